// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Joint/bone tree and forward kinematics for 2D skeletal rigs.
//!
//! `armature_core` owns the skeleton data model. It is `no_std` compatible
//! (with `alloc`) and stores joints and bones in struct-of-arrays slots
//! addressed by generational handles.
//!
//! # Architecture
//!
//! ```text
//!   edit (attach / delete / rotate / resize / image)
//!       │
//!       ▼
//!   Skeleton ──marks──► dirty channels (POSE, IMAGE, TOPOLOGY)
//!       │
//!       ▼
//!   Skeleton::evaluate() ──► PoseChanges + traversal order
//!                                   │
//!                                   ▼
//!                    scene controller (armature_scene)
//! ```
//!
//! **[`skeleton`]**: The [`Skeleton`](skeleton::Skeleton) store. Each bone
//! owns a length and an *absolute* rotation; joint positions are derived by
//! walking from the root, or read from the cache that
//! [`evaluate`](skeleton::Skeleton::evaluate) maintains.
//!
//! **[`dirty`]**: Dirty-tracking channels via `understory_dirty`. Pose
//! changes propagate to every descendant joint; image changes stay local;
//! topology changes trigger a traversal rebuild.
//!
//! **[`geometry`]**: `heading`, `distance` and the bone displacement vector,
//! all in radians on top of `kurbo`.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod geometry;
pub mod skeleton;
