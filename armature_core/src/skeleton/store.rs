// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays joint and bone storage with allocation, topology, and
//! property management.

use alloc::vec::Vec;

use kurbo::Point;
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::error::SkeletonError;
use super::evaluate::Visit;
use super::id::{BoneId, INVALID, JointId};
use super::image::Image;
use super::slots::Slots;
use super::traverse::BonesOut;
use crate::dirty;
use crate::geometry::bone_offset;

/// Struct-of-arrays storage for one skeleton.
///
/// Joints and bones live in two independent families of parallel arrays,
/// addressed by [`JointId`] and [`BoneId`]. Forward edges (joint to outgoing
/// bones, bone to end joint) own their target; back edges (`bone_in`, a
/// bone's start joint) are plain lookups. Deleting a bone is therefore a
/// sweep over the slots below it with no shared ownership to untangle.
///
/// A freshly created skeleton has exactly one joint, the root, which can
/// never be deleted.
#[derive(Debug)]
pub struct Skeleton {
    // -- Joint topology --
    pub(crate) bone_in: Vec<u32>,
    pub(crate) first_out: Vec<u32>,

    // -- Joint computed properties (written by evaluate) --
    pub(crate) world_position: Vec<Point>,

    // -- Bone topology --
    pub(crate) start: Vec<u32>,
    pub(crate) end: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Bone properties (set by callers) --
    pub(crate) length: Vec<f64>,
    pub(crate) rotation: Vec<f64>,
    pub(crate) image: Vec<Option<Image>>,

    // -- Allocation --
    pub(crate) joints: Slots,
    pub(crate) bones: Slots,
    pub(crate) root: u32,
    pub(crate) root_offset: Point,

    // -- Dirty tracking (keyed by joint slot) --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<Visit>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking (bone slots) --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl Skeleton {
    /// Default length of a newly attached bone, in skeleton units.
    pub const DEFAULT_BONE_LENGTH: f64 = 50.0;

    /// Creates a skeleton containing only the root joint.
    ///
    /// The root sits at the origin of skeleton space and the root offset is
    /// zero.
    #[must_use]
    pub fn new() -> Self {
        let mut skeleton = Self {
            bone_in: Vec::new(),
            first_out: Vec::new(),
            world_position: Vec::new(),
            start: Vec::new(),
            end: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            length: Vec::new(),
            rotation: Vec::new(),
            image: Vec::new(),
            joints: Slots::default(),
            bones: Slots::default(),
            root: INVALID,
            root_offset: Point::ZERO,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        };
        skeleton.root = skeleton.alloc_joint();
        skeleton
    }

    // -- Structure API --

    /// Returns the root joint.
    #[must_use]
    pub fn root(&self) -> JointId {
        self.joint_id(self.root)
    }

    /// Returns whether `joint` is the root.
    #[must_use]
    pub fn is_root(&self, joint: JointId) -> bool {
        joint.idx == self.root && self.is_joint_alive(joint)
    }

    /// Appends a bone of the given length to `at`, pointing along +X.
    ///
    /// Equivalent to [`attach_bone_with_rotation`](Self::attach_bone_with_rotation)
    /// with a rotation of `0.0`.
    pub fn attach_bone(&mut self, at: JointId, length: f64) -> Result<BoneId, SkeletonError> {
        self.attach_bone_with_rotation(at, length, 0.0)
    }

    /// Appends a new bone to the end of `at`'s outgoing bones, together with
    /// a new end joint.
    ///
    /// Marks the new end joint's pose dirty and schedules a traversal
    /// rebuild.
    ///
    /// # Errors
    ///
    /// - [`SkeletonError::StaleJoint`] if `at` has been deleted.
    /// - [`SkeletonError::InvalidLength`] unless `length` is finite and
    ///   positive.
    /// - [`SkeletonError::InvalidRotation`] unless `rotation` is finite.
    pub fn attach_bone_with_rotation(
        &mut self,
        at: JointId,
        length: f64,
        rotation: f64,
    ) -> Result<BoneId, SkeletonError> {
        if !self.is_joint_alive(at) {
            return Err(SkeletonError::StaleJoint(at));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(SkeletonError::InvalidLength(length));
        }
        if !rotation.is_finite() {
            return Err(SkeletonError::InvalidRotation(rotation));
        }

        let end = self.alloc_joint();
        let b = self.alloc_bone();
        let s = at.idx;

        self.start[b as usize] = s;
        self.end[b as usize] = end;
        self.length[b as usize] = length;
        self.rotation[b as usize] = rotation;
        self.bone_in[end as usize] = b;

        if self.first_out[s as usize] == INVALID {
            self.first_out[s as usize] = b;
        } else {
            // Walk to last outgoing bone.
            let mut last = self.first_out[s as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = b;
            self.prev_sibling[b as usize] = last;
        }

        // The end joint's position depends on the start joint's.
        let _ = self.dirty.add_dependency(end, s, dirty::POSE);
        self.dirty.mark_with(end, dirty::POSE, &EagerPolicy);
        self.dirty.mark(s, dirty::TOPOLOGY);
        self.traversal_dirty = true;
        self.pending_added.push(b);

        Ok(self.bone_id(b))
    }

    /// Deletes `bone`, its end joint, and everything below it.
    ///
    /// Descendant bones are freed first (post-order), so no joint is ever
    /// left without its incoming bone. Returns the number of bones removed,
    /// which is one more than the number of descendants. Deleting a bone that
    /// is already gone is a no-op returning `0`.
    pub fn delete_bone(&mut self, bone: BoneId) -> usize {
        if !self.is_bone_alive(bone) {
            return 0;
        }
        let b = bone.idx;
        let s = self.start[b as usize];
        let e = self.end[b as usize];

        self.unlink_bone(b);
        self.dirty.remove_dependency(e, s, dirty::POSE);
        self.dirty.mark(s, dirty::TOPOLOGY);
        self.traversal_dirty = true;

        self.free_subtree(b)
    }

    /// Deletes every outgoing bone of `joint` (and their subtrees).
    ///
    /// Returns the number of bones removed; `0` if the joint is gone or has
    /// no outgoing bones.
    pub fn delete_bones_from(&mut self, joint: JointId) -> usize {
        if !self.is_joint_alive(joint) {
            return 0;
        }
        let out: Vec<BoneId> = self.bones_out(joint).collect();
        out.into_iter().map(|bone| self.delete_bone(bone)).sum()
    }

    /// Returns whether the given handle refers to a live joint.
    #[must_use]
    pub fn is_joint_alive(&self, joint: JointId) -> bool {
        self.joints.is_alive(joint.idx, joint.generation)
    }

    /// Returns whether the given handle refers to a live bone.
    #[must_use]
    pub fn is_bone_alive(&self, bone: BoneId) -> bool {
        self.bones.is_alive(bone.idx, bone.generation)
    }

    /// Returns the number of live joints, root included.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.live()
    }

    /// Returns the number of live bones.
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.live()
    }

    /// Returns the bone ending at `joint`, or `None` for the root.
    #[must_use]
    pub fn bone_in(&self, joint: JointId) -> Option<BoneId> {
        self.validate_joint(joint);
        let b = self.bone_in[joint.idx as usize];
        (b != INVALID).then(|| self.bone_id(b))
    }

    /// Returns an iterator over the bones starting at `joint`, in the order
    /// they were attached.
    #[must_use]
    pub fn bones_out(&self, joint: JointId) -> BonesOut<'_> {
        self.validate_joint(joint);
        BonesOut::new(self, self.first_out[joint.idx as usize])
    }

    /// Returns the joint a bone starts at.
    #[must_use]
    pub fn start(&self, bone: BoneId) -> JointId {
        self.validate_bone(bone);
        self.joint_id(self.start[bone.idx as usize])
    }

    /// Returns the joint a bone ends at.
    #[must_use]
    pub fn end(&self, bone: BoneId) -> JointId {
        self.validate_bone(bone);
        self.joint_id(self.end[bone.idx as usize])
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the length of a bone.
    #[must_use]
    pub fn length(&self, bone: BoneId) -> f64 {
        self.validate_bone(bone);
        self.length[bone.idx as usize]
    }

    /// Returns the absolute rotation of a bone, in radians.
    #[must_use]
    pub fn absolute_rotation(&self, bone: BoneId) -> f64 {
        self.validate_bone(bone);
        self.rotation[bone.idx as usize]
    }

    /// Returns the image attached to a bone, if any.
    #[must_use]
    pub fn image(&self, bone: BoneId) -> Option<&Image> {
        self.validate_bone(bone);
        self.image[bone.idx as usize].as_ref()
    }

    /// Returns the whole-rig translation.
    ///
    /// Skeleton-space positions are relative to the root and do not include
    /// this offset; it is the screen-space point the root is drawn at.
    #[must_use]
    pub fn root_offset(&self) -> Point {
        self.root_offset
    }

    /// Computes the skeleton-space position of a joint.
    ///
    /// Walks from `joint` up to the root, then sums each bone's displacement
    /// from the root down. The root is always at the origin. Unlike
    /// [`world_position`](Self::world_position) this never reads cached
    /// state, so it is exact even between [`evaluate`](Self::evaluate) calls.
    #[must_use]
    pub fn position(&self, joint: JointId) -> Point {
        self.validate_joint(joint);
        let mut chain = Vec::new();
        let mut j = joint.idx;
        while self.bone_in[j as usize] != INVALID {
            let b = self.bone_in[j as usize];
            chain.push(b);
            j = self.start[b as usize];
        }
        chain.iter().rev().fold(Point::ORIGIN, |p, &b| {
            p + bone_offset(self.length[b as usize], self.rotation[b as usize])
        })
    }

    /// Returns the rotation of a joint: the absolute rotation of its incoming
    /// bone, or `0.0` for the root.
    #[must_use]
    pub fn rotation(&self, joint: JointId) -> f64 {
        self.validate_joint(joint);
        let b = self.bone_in[joint.idx as usize];
        if b == INVALID {
            0.0
        } else {
            self.rotation[b as usize]
        }
    }

    /// Returns the cached skeleton-space position of a joint.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_position(&self, joint: JointId) -> Point {
        self.validate_joint(joint);
        self.world_position[joint.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the absolute rotation of a bone.
    ///
    /// No other bone's rotation changes. Marks the POSE channel dirty for the
    /// bone's end joint, with eager propagation to its descendants.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `radians` is not finite.
    pub fn set_absolute_rotation(&mut self, bone: BoneId, radians: f64) {
        self.validate_bone(bone);
        assert!(radians.is_finite(), "invalid bone rotation {radians}");
        self.rotation[bone.idx as usize] = radians;
        self.dirty
            .mark_with(self.end[bone.idx as usize], dirty::POSE, &EagerPolicy);
    }

    /// Sets the length of a bone.
    ///
    /// A length of zero is allowed; it happens when a joint is dragged onto
    /// its bone's start.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `length` is negative or not finite.
    pub fn set_length(&mut self, bone: BoneId, length: f64) {
        self.validate_bone(bone);
        assert!(
            length.is_finite() && length >= 0.0,
            "invalid bone length {length}"
        );
        self.length[bone.idx as usize] = length;
        self.dirty
            .mark_with(self.end[bone.idx as usize], dirty::POSE, &EagerPolicy);
    }

    /// Attaches `image` to a bone, returning the image it replaces.
    pub fn attach_image(&mut self, bone: BoneId, image: Image) -> Option<Image> {
        self.validate_bone(bone);
        let previous = self.image[bone.idx as usize].replace(image);
        self.dirty.mark(self.end[bone.idx as usize], dirty::IMAGE);
        previous
    }

    /// Removes the image from a bone, returning it.
    pub fn detach_image(&mut self, bone: BoneId) -> Option<Image> {
        self.validate_bone(bone);
        let previous = self.image[bone.idx as usize].take();
        if previous.is_some() {
            self.dirty.mark(self.end[bone.idx as usize], dirty::IMAGE);
        }
        previous
    }

    /// Sets the whole-rig translation.
    ///
    /// Skeleton-space positions are unaffected, so nothing is marked dirty.
    pub fn set_root_offset(&mut self, offset: Point) {
        self.root_offset = offset;
    }

    // -- Raw-index accessors --

    /// Returns the cached world position at raw joint slot `idx`.
    ///
    /// Skips generation validation; only use with indices taken from
    /// [`PoseChanges`](super::PoseChanges).
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn world_position_at(&self, idx: u32) -> Point {
        assert!(
            idx < self.joints.capacity(),
            "joint slot {idx} out of range (len {})",
            self.joints.capacity()
        );
        self.world_position[idx as usize]
    }

    // -- Internal helpers --

    pub(crate) fn joint_id(&self, idx: u32) -> JointId {
        JointId {
            idx,
            generation: self.joints.generation(idx),
        }
    }

    pub(crate) fn bone_id(&self, idx: u32) -> BoneId {
        BoneId {
            idx,
            generation: self.bones.generation(idx),
        }
    }

    /// Panics if the joint handle is stale.
    fn validate_joint(&self, id: JointId) {
        assert!(
            self.is_joint_alive(id),
            "stale JointId: {id:?} (current gen: {})",
            self.joints.generation(id.idx)
        );
    }

    /// Panics if the bone handle is stale.
    fn validate_bone(&self, id: BoneId) {
        assert!(
            self.is_bone_alive(id),
            "stale BoneId: {id:?} (current gen: {})",
            self.bones.generation(id.idx)
        );
    }

    fn alloc_joint(&mut self) -> u32 {
        let slot = self.joints.allocate();
        let idx = slot.idx;
        if slot.reused {
            self.bone_in[idx as usize] = INVALID;
            self.first_out[idx as usize] = INVALID;
            self.world_position[idx as usize] = Point::ORIGIN;
        } else {
            self.bone_in.push(INVALID);
            self.first_out.push(INVALID);
            self.world_position.push(Point::ORIGIN);
        }
        self.dirty.mark_with(idx, dirty::POSE, &EagerPolicy);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        idx
    }

    fn alloc_bone(&mut self) -> u32 {
        let slot = self.bones.allocate();
        let idx = slot.idx;
        if slot.reused {
            self.start[idx as usize] = INVALID;
            self.end[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.length[idx as usize] = 0.0;
            self.rotation[idx as usize] = 0.0;
            self.image[idx as usize] = None;
        } else {
            self.start.push(INVALID);
            self.end.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.length.push(0.0);
            self.rotation.push(0.0);
            self.image.push(None);
        }
        idx
    }

    /// Removes bone `b` from its start joint's outgoing list.
    fn unlink_bone(&mut self, b: u32) {
        let s = self.start[b as usize];
        let prev = self.prev_sibling[b as usize];
        let next = self.next_sibling[b as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first outgoing bone.
            self.first_out[s as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.prev_sibling[b as usize] = INVALID;
        self.next_sibling[b as usize] = INVALID;
    }

    /// Frees bone `b`, its end joint and everything below, children first.
    fn free_subtree(&mut self, b: u32) -> usize {
        let e = self.end[b as usize];
        let mut removed = 0;
        let mut child = self.first_out[e as usize];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            removed += self.free_subtree(child);
            child = next;
        }

        self.dirty.remove_key(e);
        self.bone_in[e as usize] = INVALID;
        self.first_out[e as usize] = INVALID;
        self.joints.free(e);

        self.image[b as usize] = None;
        self.start[b as usize] = INVALID;
        self.end[b as usize] = INVALID;
        self.next_sibling[b as usize] = INVALID;
        self.prev_sibling[b as usize] = INVALID;
        self.bones.free(b);
        self.pending_removed.push(b);

        removed + 1
    }
}
