// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The skeleton keys every channel by *joint* slot. A bone is tracked through
//! its end joint, which it owns exclusively, so the two never disagree.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`POSE`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has a dependency edge
//!   from every end joint to its bone's start joint. Changing a bone's length
//!   or rotation marks its end joint, and with it every joint further down
//!   the chain.
//!
//! - **Local-only**: [`IMAGE`] is marked with the default policy. Only the
//!   end joint of the bone whose image changed appears in the drain output.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on attach and delete. It
//!   triggers a traversal-order rebuild during evaluation.
//!
//! # Consumption
//!
//! [`Skeleton::evaluate`](crate::skeleton::Skeleton::evaluate) drains all
//! channels and reports the result as
//! [`PoseChanges`](crate::skeleton::PoseChanges).

use understory_dirty::Channel;

/// A bone's length or rotation changed; the end joint and all descendants
/// need their world position recomputed.
pub const POSE: Channel = Channel::new(0);

/// A bone's image was attached, replaced, or detached.
pub const IMAGE: Channel = Channel::new(1);

/// Bones were attached or deleted; triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(2);
