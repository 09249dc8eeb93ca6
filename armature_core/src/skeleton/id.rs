// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Joint and bone identity types.

use core::fmt;

/// Sentinel value indicating "no joint" or "no bone" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a joint in a [`Skeleton`](super::Skeleton).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after the joint is deleted and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl JointId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JointId({}@gen{})", self.idx, self.generation)
    }
}

/// A handle to a bone in a [`Skeleton`](super::Skeleton).
///
/// Bone slots are allocated independently of joint slots, so a `BoneId` and
/// a `JointId` with the same index are unrelated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl BoneId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for BoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoneId({}@gen{})", self.idx, self.generation)
    }
}
