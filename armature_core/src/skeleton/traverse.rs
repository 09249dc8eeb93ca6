// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::vec::Vec;

use super::id::{BoneId, INVALID};
use super::store::Skeleton;

/// An iterator over the outgoing bones of a joint.
///
/// Created by [`Skeleton::bones_out`].
#[derive(Debug)]
pub struct BonesOut<'a> {
    skeleton: &'a Skeleton,
    current: u32,
}

impl<'a> BonesOut<'a> {
    pub(crate) fn new(skeleton: &'a Skeleton, first: u32) -> Self {
        Self {
            skeleton,
            current: first,
        }
    }
}

impl Iterator for BonesOut<'_> {
    type Item = BoneId;

    fn next(&mut self) -> Option<BoneId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.skeleton.next_sibling[idx as usize];
        Some(self.skeleton.bone_id(idx))
    }
}

impl Skeleton {
    /// Returns every bone below `bone`'s end joint, in depth-first pre-order.
    ///
    /// `bone` itself is not included, so deleting `bone` removes
    /// `descendant_bones(bone).len() + 1` bones.
    #[must_use]
    pub fn descendant_bones(&self, bone: BoneId) -> Vec<BoneId> {
        let mut out = Vec::new();
        let mut stack: Vec<BoneId> = self.bones_out(self.end(bone)).collect();
        stack.reverse();
        while let Some(b) = stack.pop() {
            out.push(b);
            let first = stack.len();
            stack.extend(self.bones_out(self.end(b)));
            stack[first..].reverse();
        }
        out
    }
}
