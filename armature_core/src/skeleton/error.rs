// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors from structural skeleton edits.

use super::id::JointId;

/// Errors from [`Skeleton::attach_bone`](super::Skeleton::attach_bone).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SkeletonError {
    /// The joint to attach to has been deleted.
    #[error("cannot attach a bone to deleted joint {0:?}")]
    StaleJoint(JointId),
    /// Bone lengths must be finite and strictly positive.
    #[error("invalid bone length {0}")]
    InvalidLength(f64),
    /// Rotations must be finite.
    #[error("invalid bone rotation {0}")]
    InvalidRotation(f64),
}
