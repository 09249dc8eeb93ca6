// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene controller: selection state, hit testing, and edit dispatch.

use alloc::vec::Vec;

use armature_core::geometry::{distance, heading};
use armature_core::skeleton::{BoneId, Image, PoseChanges, Skeleton, Visit};
use kurbo::Point;

use crate::config::EditorConfig;
use crate::coords::{screen_to_skeleton, skeleton_to_screen};
use crate::error::SceneError;
use crate::item::{ItemKind, SceneItem, Selectable};
use crate::sink::ImageLoader;

/// Owns a skeleton and the flat item list derived from it.
///
/// The controller is a small state machine over the current selection
/// (nothing, a joint, the root, or a bone). Pointer positions arrive in
/// screen space and are mapped into skeleton space through the skeleton's
/// root offset.
///
/// Every structural edit rebuilds the item list before returning, so
/// [`items`](Self::items) is never stale. Drags only move things; they
/// re-evaluate the pose but keep the list as is.
#[derive(Debug)]
pub struct Controller {
    skeleton: Skeleton,
    config: EditorConfig,
    items: Vec<SceneItem>,
    selection: Option<Selectable>,
    hover: Option<Selectable>,
    changes: PoseChanges,
    rebuilds: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Controller {
    /// Creates a controller for a skeleton containing only the root.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::from_skeleton(Skeleton::new(), config)
    }

    /// Creates a controller for an existing skeleton.
    #[must_use]
    pub fn from_skeleton(skeleton: Skeleton, config: EditorConfig) -> Self {
        let mut controller = Self {
            skeleton,
            config,
            items: Vec::new(),
            selection: None,
            hover: None,
            changes: PoseChanges::default(),
            rebuilds: 0,
        };
        controller.rebuild();
        controller
    }

    // -- Accessors --

    /// Returns the skeleton being edited.
    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Returns the editor configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Returns the flat item list, in traversal order.
    #[must_use]
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Returns the current selection.
    #[must_use]
    pub fn selection(&self) -> Option<Selectable> {
        self.selection
    }

    /// Returns the item under the pointer, as of the last
    /// [`hover_at`](Self::hover_at).
    #[must_use]
    pub fn hovered(&self) -> Option<Selectable> {
        self.hover
    }

    /// Returns how many times the item list has been rebuilt.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Returns the changes reported by the most recent pose evaluation.
    #[must_use]
    pub fn last_changes(&self) -> &PoseChanges {
        &self.changes
    }

    // -- Coordinates --

    /// Maps a screen-space point into skeleton space.
    #[must_use]
    pub fn to_skeleton(&self, screen: Point) -> Point {
        screen_to_skeleton(self.skeleton.root_offset(), screen)
    }

    /// Maps a skeleton-space point onto the screen.
    #[must_use]
    pub fn to_screen(&self, skeleton: Point) -> Point {
        skeleton_to_screen(self.skeleton.root_offset(), skeleton)
    }

    /// Places the root (and with it the whole rig) at a screen position.
    pub fn set_root_offset(&mut self, screen: Point) {
        self.skeleton.set_root_offset(screen);
    }

    // -- Item list --

    /// Re-evaluates the pose and rebuilds the item list.
    ///
    /// Items follow the skeleton's pre-order traversal: each joint (the
    /// root as [`ItemKind::Root`]), then for each outgoing bone the bone,
    /// its image if it has one, and the end joint's subtree. A selection or
    /// hover whose entity no longer exists is dropped.
    pub fn rebuild(&mut self) {
        self.skeleton.evaluate_into(&mut self.changes);

        if self.selection.is_some_and(|s| !self.is_live(s)) {
            self.selection = None;
        }
        if self.hover.is_some_and(|s| !self.is_live(s)) {
            self.hover = None;
        }

        self.items.clear();
        let root = self.skeleton.root();
        for &visit in self.skeleton.traversal_order() {
            match visit {
                Visit::Joint(joint) if joint == root => {
                    self.items.push(SceneItem::new(ItemKind::Root(joint)));
                }
                Visit::Joint(joint) => {
                    self.items.push(SceneItem::new(ItemKind::Joint(joint)));
                }
                Visit::Bone(bone) => {
                    self.items.push(SceneItem::new(ItemKind::Bone(bone)));
                    if self.skeleton.image(bone).is_some() {
                        self.items.push(SceneItem::new(ItemKind::Image(bone)));
                    }
                }
            }
        }
        self.refresh_flags();
        self.rebuilds += 1;
    }

    // -- Selection --

    /// Returns the item under a screen-space point.
    ///
    /// Joints (root included) are hit within `joint_hit_radius` of their
    /// position, bones within `bone_hit_radius` of their midpoint; images
    /// are never hit. Among several hits the one nearest the pointer wins,
    /// and ties go to the item that comes first in the list.
    #[must_use]
    pub fn pick(&self, screen: Point) -> Option<Selectable> {
        let p = self.to_skeleton(screen);
        let mut best: Option<(f64, Selectable)> = None;
        for item in &self.items {
            let Some((target, anchor, radius)) = self.hit_shape(item.kind) else {
                continue;
            };
            let d = distance(anchor, p);
            if d <= radius && best.is_none_or(|(nearest, _)| d < nearest) {
                best = Some((d, target));
            }
        }
        best.map(|(_, target)| target)
    }

    /// Updates the hover state from a pointer position and returns it.
    pub fn hover_at(&mut self, screen: Point) -> Option<Selectable> {
        self.hover = self.pick(screen);
        self.refresh_flags();
        self.hover
    }

    /// Selects the item under a pointer press, or clears the selection when
    /// the press hits empty space.
    pub fn press(&mut self, screen: Point) -> Option<Selectable> {
        let target = self.pick(screen);
        self.select(target);
        self.selection
    }

    /// Sets the selection directly. Handles to deleted entities clear it.
    pub fn select(&mut self, target: Option<Selectable>) {
        self.selection = target.filter(|&s| self.is_live(s));
        self.refresh_flags();
    }

    // -- Edits --

    /// Attaches a bone of the configured default length to the selection.
    ///
    /// A selected joint or root gets the bone directly; a selected bone gets
    /// it at its end joint. With nothing selected this does nothing.
    pub fn add_bone(&mut self) -> Option<BoneId> {
        let at = match self.selection? {
            Selectable::Root(joint) | Selectable::Joint(joint) => joint,
            Selectable::Bone(bone) => self.skeleton.end(bone),
        };
        let bone = self
            .skeleton
            .attach_bone(at, self.config.default_bone_length)
            .ok()?;
        self.rebuild();
        Some(bone)
    }

    /// Deletes the selection and clears it.
    ///
    /// A selected bone goes with its whole subtree. A selected joint (or
    /// the root) loses all of its outgoing bones but stays itself. Returns
    /// the number of bones removed; with nothing selected this does nothing.
    pub fn delete_selected(&mut self) -> usize {
        let Some(target) = self.selection else {
            return 0;
        };
        let removed = match target {
            Selectable::Bone(bone) => self.skeleton.delete_bone(bone),
            Selectable::Root(joint) | Selectable::Joint(joint) => {
                self.skeleton.delete_bones_from(joint)
            }
        };
        self.selection = None;
        self.rebuild();
        removed
    }

    /// Removes every bone, leaving only the root, and clears the selection.
    ///
    /// Returns the number of bones removed.
    pub fn reset(&mut self) -> usize {
        let removed = self.skeleton.delete_bones_from(self.skeleton.root());
        self.selection = None;
        self.rebuild();
        removed
    }

    /// Loads `filename` and attaches it to the selected bone.
    ///
    /// Returns `Ok(None)` without touching the loader unless a bone is
    /// selected. On success the image replaces any previous one and the
    /// item list gains the image item.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ImageLoad`] if the loader fails. The bone and
    /// the item list are left exactly as they were.
    pub fn attach_image_to_selected<L>(
        &mut self,
        filename: &str,
        loader: &mut L,
    ) -> Result<Option<BoneId>, SceneError>
    where
        L: ImageLoader + ?Sized,
    {
        let Some(Selectable::Bone(bone)) = self.selection else {
            return Ok(None);
        };
        let handle = loader
            .load_image(filename)
            .map_err(|source| SceneError::ImageLoad {
                filename: filename.into(),
                source,
            })?;
        self.skeleton.attach_image(bone, Image::new(filename, handle));
        self.rebuild();
        Ok(Some(bone))
    }

    /// Removes the image from the selected bone.
    ///
    /// Returns the bone if it had an image.
    pub fn detach_image_from_selected(&mut self) -> Option<BoneId> {
        let Some(Selectable::Bone(bone)) = self.selection else {
            return None;
        };
        self.skeleton.detach_image(bone)?;
        self.rebuild();
        Some(bone)
    }

    /// Drags the selection to a screen-space point.
    ///
    /// - Bone: its rotation becomes the heading from its start joint to the
    ///   point. Its length and every other bone's rotation are unchanged.
    /// - Joint: its incoming bone is re-aimed at the point and its length
    ///   becomes the distance from the bone's start to the point.
    /// - Root: the root offset becomes the raw screen point, moving the whole
    ///   rig.
    ///
    /// Returns what was dragged, or `None` (and does nothing) when nothing
    /// is selected.
    pub fn drag(&mut self, screen: Point) -> Option<Selectable> {
        let target = self.selection?;
        match target {
            Selectable::Root(_) => self.skeleton.set_root_offset(screen),
            Selectable::Bone(bone) => {
                let p = self.to_skeleton(screen);
                let start = self.skeleton.world_position(self.skeleton.start(bone));
                self.skeleton.set_absolute_rotation(bone, heading(start, p));
            }
            Selectable::Joint(joint) => {
                let bone = self.skeleton.bone_in(joint)?;
                let p = self.to_skeleton(screen);
                let start = self.skeleton.world_position(self.skeleton.start(bone));
                self.skeleton.set_length(bone, distance(start, p));
                self.skeleton.set_absolute_rotation(bone, heading(start, p));
            }
        }
        self.skeleton.evaluate_into(&mut self.changes);
        Some(target)
    }

    // -- Internal helpers --

    fn is_live(&self, target: Selectable) -> bool {
        match target {
            Selectable::Root(joint) => self.skeleton.is_root(joint),
            Selectable::Joint(joint) => self.skeleton.is_joint_alive(joint),
            Selectable::Bone(bone) => self.skeleton.is_bone_alive(bone),
        }
    }

    /// Returns the selection, hit centre, and hit radius of an item.
    fn hit_shape(&self, kind: ItemKind) -> Option<(Selectable, Point, f64)> {
        let target = kind.selectable()?;
        let shape = match kind {
            ItemKind::Root(joint) | ItemKind::Joint(joint) => (
                target,
                self.skeleton.world_position(joint),
                self.config.joint_hit_radius,
            ),
            ItemKind::Bone(bone) => {
                let start = self.skeleton.world_position(self.skeleton.start(bone));
                let end = self.skeleton.world_position(self.skeleton.end(bone));
                (target, start.midpoint(end), self.config.bone_hit_radius)
            }
            ItemKind::Image(_) => return None,
        };
        Some(shape)
    }

    fn refresh_flags(&mut self) {
        for item in &mut self.items {
            let target = item.kind.selectable();
            item.selected = target.is_some() && target == self.selection;
            item.hilighted = target.is_some() && target == self.hover;
        }
    }
}
