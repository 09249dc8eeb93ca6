// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene items and the selection tag.

use armature_core::skeleton::{BoneId, JointId};

/// Something the user can select and drag.
///
/// Edit commands dispatch on this tag instead of inspecting the item type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selectable {
    /// The root joint. Dragging it moves the whole rig.
    Root(JointId),
    /// Any other joint. Dragging it re-aims and re-lengthens its incoming
    /// bone.
    Joint(JointId),
    /// A bone. Dragging it re-aims the bone.
    Bone(BoneId),
}

/// What a [`SceneItem`] stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// The root joint.
    Root(JointId),
    /// A non-root joint.
    Joint(JointId),
    /// A bone.
    Bone(BoneId),
    /// The image attached to a bone.
    Image(BoneId),
}

impl ItemKind {
    /// Returns the selection this item maps to, or `None` for items that
    /// cannot be picked (images).
    #[must_use]
    pub const fn selectable(self) -> Option<Selectable> {
        match self {
            Self::Root(joint) => Some(Selectable::Root(joint)),
            Self::Joint(joint) => Some(Selectable::Joint(joint)),
            Self::Bone(bone) => Some(Selectable::Bone(bone)),
            Self::Image(_) => None,
        }
    }
}

/// One entry of the controller's flat, render-ready list.
///
/// Items are rebuilt after every structural change and carry only a handle
/// plus transient UI flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneItem {
    /// The entity this item draws.
    pub kind: ItemKind,
    /// Whether the pointer is hovering over this item.
    pub hilighted: bool,
    /// Whether this item is the current selection.
    pub selected: bool,
}

impl SceneItem {
    pub(crate) const fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            hilighted: false,
            selected: false,
        }
    }
}
