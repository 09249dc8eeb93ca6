// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skeleton data model.
//!
//! A skeleton is a rooted tree of *joints* connected by rigid *bones*:
//!
//! - Identity: [`JointId`] and [`BoneId`] are generational handles that
//!   become stale when the entity is deleted.
//! - Topology: each joint has at most one incoming bone ([`bone_in`]) and an
//!   ordered list of outgoing bones ([`bones_out`]). Only the root has no
//!   incoming bone.
//! - **Bone properties** set by the caller: [`length`](Skeleton::set_length),
//!   [`absolute rotation`](Skeleton::set_absolute_rotation) and an optional
//!   [`Image`].
//! - **Joint positions** are derived: [`position`](Skeleton::position) walks
//!   the chain from the root, and [`evaluate`](Skeleton::evaluate) caches the
//!   same value for every joint as [`world_position`](Skeleton::world_position).
//!
//! Rotations are absolute. Rotating a bone moves everything below it, but
//! the bones below keep their own headings.
//!
//! [`bone_in`]: Skeleton::bone_in
//! [`bones_out`]: Skeleton::bones_out

mod error;
mod evaluate;
mod id;
mod image;
mod slots;
mod store;
mod traverse;

pub use error::SkeletonError;
pub use evaluate::{PoseChanges, Visit};
pub use id::{BoneId, INVALID, JointId};
pub use image::{Image, ImageHandle};
pub use store::Skeleton;
pub use traverse::BonesOut;
