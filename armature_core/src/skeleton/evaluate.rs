// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pose evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern for each dirty channel:
//!
//! 1. **POSE**: Drain dirty joint slots and recompute each joint's
//!    `world_position` as `start_world + length * (cos, sin)(rotation)` of
//!    its incoming bone, parent before child. The root is pinned to the
//!    origin.
//! 2. **IMAGE**: Drain dirty joint slots and report the incoming bone of
//!    each (no recomputation).
//! 3. **TOPOLOGY**: Drain and discard (the traversal order was already
//!    rebuilt at the start of evaluation if needed).
//!
//! [`PoseChanges`] uses raw slot indices (`u32`) so consumers can read the
//! cache through [`world_position_at`](super::Skeleton::world_position_at)
//! without generation checks.

use alloc::vec::Vec;

use kurbo::Point;

use super::id::{BoneId, INVALID, JointId};
use super::store::Skeleton;
use crate::dirty;
use crate::geometry::bone_offset;

/// The set of changes produced by a single [`Skeleton::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct PoseChanges {
    /// Joint slots whose world position was recomputed.
    pub moved: Vec<u32>,
    /// Bone slots whose image was attached, replaced, or detached.
    pub images: Vec<u32>,
    /// Bone slots attached since the last evaluate.
    pub added: Vec<u32>,
    /// Bone slots deleted since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl PoseChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.moved.clear();
        self.images.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty()
            && self.images.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

/// One step of the skeleton's depth-first traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visit {
    /// A joint, visited before its outgoing bones.
    Joint(JointId),
    /// A bone, visited before its end joint's subtree.
    Bone(BoneId),
}

impl Skeleton {
    /// Evaluates the skeleton, recomputing dirty joint positions and
    /// returning the set of changes.
    ///
    /// This rebuilds the traversal order if topology changed, then drains
    /// each dirty channel.
    pub fn evaluate(&mut self) -> PoseChanges {
        let mut changes = PoseChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut PoseChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        // Drain POSE channel: collect dirty joints, then recompute.
        let moved: Vec<u32> = self
            .dirty
            .drain(dirty::POSE)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &j in &moved {
            let b = self.bone_in[j as usize];
            self.world_position[j as usize] = if b == INVALID {
                Point::ORIGIN
            } else {
                self.world_position[self.start[b as usize] as usize]
                    + bone_offset(self.length[b as usize], self.rotation[b as usize])
            };
        }
        changes.moved = moved;

        // Drain IMAGE channel, translated to bone slots.
        changes.images = self
            .dirty
            .drain(dirty::IMAGE)
            .deterministic()
            .run()
            .map(|j| self.bone_in[j as usize])
            .filter(|&b| b != INVALID)
            .collect();

        // Drain TOPOLOGY channel (just consume, changes are structural).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current traversal order.
    ///
    /// Depth-first pre-order from the root: each joint is followed by each
    /// of its outgoing bones in attach order, and each bone is followed by
    /// its end joint's subtree. Only valid after [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn traversal_order(&self) -> &[Visit] {
        &self.traversal_order
    }

    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        self.dfs_collect(self.root);
    }

    fn dfs_collect(&mut self, joint: u32) {
        self.traversal_order.push(Visit::Joint(self.joint_id(joint)));
        let mut b = self.first_out[joint as usize];
        while b != INVALID {
            self.traversal_order.push(Visit::Bone(self.bone_id(b)));
            self.dfs_collect(self.end[b as usize]);
            b = self.next_sibling[b as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::skeleton::{Image, ImageHandle};

    const EPS: f64 = 1e-9;

    #[test]
    fn evaluate_computes_world_positions() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.root();
        let upper = skeleton.attach_bone(root, 10.0).unwrap();
        let lower = skeleton
            .attach_bone_with_rotation(skeleton.end(upper), 5.0, FRAC_PI_2)
            .unwrap();

        let _changes = skeleton.evaluate();

        assert_eq!(skeleton.world_position(root), Point::ORIGIN);
        assert_eq!(
            skeleton.world_position(skeleton.end(upper)),
            Point::new(10.0, 0.0)
        );
        let hand = skeleton.world_position(skeleton.end(lower));
        assert!((hand - Point::new(10.0, 5.0)).hypot() < EPS);
    }

    #[test]
    fn cached_positions_match_walked_positions() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.root();
        let a = skeleton.attach_bone_with_rotation(root, 12.0, 0.4).unwrap();
        let b = skeleton.attach_bone_with_rotation(skeleton.end(a), 8.0, 2.1).unwrap();
        let c = skeleton.attach_bone_with_rotation(skeleton.end(b), 3.0, -0.9).unwrap();
        let _ = skeleton.evaluate();

        skeleton.set_absolute_rotation(a, 1.3);
        skeleton.set_length(b, 20.0);
        let _ = skeleton.evaluate();

        for joint in [root, skeleton.end(a), skeleton.end(b), skeleton.end(c)] {
            assert_eq!(skeleton.world_position(joint), skeleton.position(joint));
        }
    }

    #[test]
    fn rotation_change_moves_descendants_only() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.root();
        let left = skeleton.attach_bone(root, 10.0).unwrap();
        let right = skeleton.attach_bone(root, 10.0).unwrap();
        let tip = skeleton.attach_bone(skeleton.end(left), 10.0).unwrap();
        let _ = skeleton.evaluate();

        skeleton.set_absolute_rotation(left, FRAC_PI_2);
        let changes = skeleton.evaluate();

        let left_end = skeleton.end(left).index();
        let tip_end = skeleton.end(tip).index();
        assert!(changes.moved.contains(&left_end));
        assert!(changes.moved.contains(&tip_end));
        assert!(!changes.moved.contains(&skeleton.end(right).index()));
        assert!(!changes.moved.contains(&root.index()));
        assert!(!changes.topology_changed);

        let tip_pos = skeleton.world_position_at(tip_end);
        assert!((tip_pos - Point::new(10.0, 10.0)).hypot() < EPS);
    }

    #[test]
    fn no_change_evaluate_returns_empty() {
        let mut skeleton = Skeleton::new();
        skeleton.attach_bone(skeleton.root(), 10.0).unwrap();
        let first = skeleton.evaluate();
        assert!(first.topology_changed);
        assert_eq!(first.added.len(), 1);

        let second = skeleton.evaluate();
        assert!(second.is_empty());
    }

    #[test]
    fn evaluate_reports_lifecycle_and_images() {
        let mut skeleton = Skeleton::new();
        let keep = skeleton.attach_bone(skeleton.root(), 10.0).unwrap();
        let doomed = skeleton.attach_bone(skeleton.end(keep), 10.0).unwrap();
        let _ = skeleton.evaluate();

        skeleton.attach_image(keep, Image::new("torso.png", ImageHandle(7)));
        skeleton.delete_bone(doomed);
        let changes = skeleton.evaluate();

        assert_eq!(changes.images, vec![keep.index()]);
        assert_eq!(changes.removed, vec![doomed.index()]);
        assert!(changes.added.is_empty());
        assert!(changes.topology_changed);
    }

    #[test]
    fn traversal_order_is_depth_first() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.root();
        // Tree: root -> [a -> [c], b]
        let a = skeleton.attach_bone(root, 1.0).unwrap();
        let b = skeleton.attach_bone(root, 1.0).unwrap();
        let c = skeleton.attach_bone(skeleton.end(a), 1.0).unwrap();
        let _ = skeleton.evaluate();

        assert_eq!(
            skeleton.traversal_order(),
            &[
                Visit::Joint(root),
                Visit::Bone(a),
                Visit::Joint(skeleton.end(a)),
                Visit::Bone(c),
                Visit::Joint(skeleton.end(c)),
                Visit::Bone(b),
                Visit::Joint(skeleton.end(b)),
            ]
        );
    }

    #[test]
    fn traversal_excludes_deleted_subtree() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.root();
        let a = skeleton.attach_bone(root, 1.0).unwrap();
        skeleton.attach_bone(skeleton.end(a), 1.0).unwrap();
        let _ = skeleton.evaluate();
        skeleton.delete_bone(a);
        let _ = skeleton.evaluate();
        assert_eq!(skeleton.traversal_order(), &[Visit::Joint(root)]);
    }

    #[test]
    fn reused_joint_slot_gets_fresh_position() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.root();
        let a = skeleton.attach_bone_with_rotation(root, 10.0, 1.0).unwrap();
        let _ = skeleton.evaluate();
        skeleton.delete_bone(a);
        let b = skeleton.attach_bone(root, 4.0).unwrap();
        let _ = skeleton.evaluate();
        assert_eq!(skeleton.world_position(skeleton.end(b)), Point::new(4.0, 0.0));
    }
}
