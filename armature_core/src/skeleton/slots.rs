// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot bookkeeping shared by the joint and bone arrays.

use alloc::vec::Vec;

/// Result of [`Slots::allocate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
    /// `true` if the slot came from the free list, meaning the parallel
    /// arrays already have an entry at `idx` that must be reset.
    pub(crate) reused: bool,
}

/// Allocation state for one family of parallel arrays.
///
/// Freed slots are recycled through a free list. Every free and every reuse
/// bumps the slot's generation so that old handles fail validation.
#[derive(Clone, Debug, Default)]
pub(crate) struct Slots {
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl Slots {
    pub(crate) fn allocate(&mut self) -> Slot {
        if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            Slot {
                idx,
                generation: self.generation[idx as usize],
                reused: true,
            }
        } else {
            let idx = self.len;
            self.len += 1;
            self.generation.push(0);
            Slot {
                idx,
                generation: 0,
                reused: false,
            }
        }
    }

    pub(crate) fn free(&mut self, idx: u32) {
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    pub(crate) fn is_alive(&self, idx: u32, generation: u32) -> bool {
        idx < self.len
            && self.generation[idx as usize] == generation
            && !self.free_list.contains(&idx)
    }

    /// Current generation of slot `idx`, or `u32::MAX` when out of range.
    pub(crate) fn generation(&self, idx: u32) -> u32 {
        if idx < self.len {
            self.generation[idx as usize]
        } else {
            u32::MAX
        }
    }

    /// Number of slots ever allocated, live or free.
    pub(crate) fn capacity(&self) -> u32 {
        self.len
    }

    /// Number of live slots.
    pub(crate) fn live(&self) -> usize {
        self.len as usize - self.free_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuse_bumps_generation() {
        let mut slots = Slots::default();
        let a = slots.allocate();
        assert!(!a.reused);
        slots.free(a.idx);
        assert!(!slots.is_alive(a.idx, a.generation));

        let b = slots.allocate();
        assert!(b.reused);
        assert_eq!(a.idx, b.idx);
        assert_ne!(a.generation, b.generation);
        assert!(slots.is_alive(b.idx, b.generation));
    }

    #[test]
    fn live_counts_exclude_free_slots() {
        let mut slots = Slots::default();
        let a = slots.allocate();
        let _b = slots.allocate();
        assert_eq!(slots.live(), 2);
        slots.free(a.idx);
        assert_eq!(slots.live(), 1);
        assert_eq!(slots.capacity(), 2);
    }
}
