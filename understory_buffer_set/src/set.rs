// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BinaryHeap;
use core::cmp::Reverse;

use hashbrown::HashMap;

/// Heaps are rebuilt from the live values once the larger one holds more than
/// this many times the entries of the smaller one.
pub const STALE_HEAP_RATIO: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    value: usize,
    slot: usize,
}

/// Maps integer values to stable slot numbers, evicting far-away values first.
///
/// Slots are allocated densely from `0` and never freed; once the caller stops
/// allocating, existing slots are rebound with
/// [`replace_furthest_value_slot`](Self::replace_furthest_value_slot).
///
/// Evictions only pop the top of one heap, so the other heap keeps a stale
/// entry for the evicted value. Stale entries are skipped lazily and purged in
/// bulk according to [`STALE_HEAP_RATIO`].
#[derive(Clone, Debug, Default)]
pub struct IntegerBufferSet {
    len: usize,
    slots: HashMap<usize, usize>,
    small_values: BinaryHeap<Reverse<Entry>>,
    large_values: BinaryHeap<Entry>,
}

impl IntegerBufferSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots allocated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `value` is currently bound to a slot.
    #[must_use]
    pub fn contains(&self, value: usize) -> bool {
        self.slots.contains_key(&value)
    }

    /// The slot bound to `value`, if any.
    #[must_use]
    pub fn slot_for_value(&self, value: usize) -> Option<usize> {
        self.slots.get(&value).copied()
    }

    /// Binds `value` to a freshly allocated slot and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `value` is already bound.
    pub fn new_slot_for_value(&mut self, value: usize) -> usize {
        assert!(
            !self.slots.contains_key(&value),
            "value {value} is already bound to a slot"
        );
        let slot = self.len;
        self.len += 1;
        self.push(Entry { value, slot });
        slot
    }

    /// Rebinds the slot of the value furthest outside `[low, high]` to
    /// `new_value` and returns that slot.
    ///
    /// Returns `None` when the set holds no values or when every value already
    /// lies inside the window. When the smallest value lies further below
    /// `low` than the largest lies above `high`, the smallest is evicted;
    /// otherwise (including exact ties) the largest is.
    ///
    /// # Panics
    ///
    /// Panics if `new_value` is already bound.
    pub fn replace_furthest_value_slot(
        &mut self,
        low: usize,
        high: usize,
        new_value: usize,
    ) -> Option<usize> {
        assert!(
            !self.slots.contains_key(&new_value),
            "value {new_value} is already bound to a slot"
        );
        self.clean_heaps();

        let Reverse(min) = *self.small_values.peek()?;
        let max = *self.large_values.peek()?;
        if min.value >= low && max.value <= high {
            return None;
        }

        let evict_small = min.value < low && low - min.value > max.value.saturating_sub(high);
        let evicted = if evict_small {
            self.small_values.pop();
            min
        } else {
            self.large_values.pop();
            max
        };
        self.slots.remove(&evicted.value);
        self.push(Entry {
            value: new_value,
            slot: evicted.slot,
        });
        Some(evicted.slot)
    }

    fn push(&mut self, entry: Entry) {
        self.slots.insert(entry.value, entry.slot);
        self.small_values.push(Reverse(entry));
        self.large_values.push(entry);
    }

    fn is_live(&self, entry: Entry) -> bool {
        self.slots.get(&entry.value) == Some(&entry.slot)
    }

    fn clean_heaps(&mut self) {
        while let Some(&Reverse(top)) = self.small_values.peek() {
            if self.is_live(top) {
                break;
            }
            self.small_values.pop();
        }
        while let Some(&top) = self.large_values.peek() {
            if self.is_live(top) {
                break;
            }
            self.large_values.pop();
        }

        let small = self.small_values.len();
        let large = self.large_values.len();
        if small.max(large) > STALE_HEAP_RATIO * small.min(large) {
            self.rebuild_heaps();
        }
    }

    fn rebuild_heaps(&mut self) {
        self.small_values.clear();
        self.large_values.clear();
        for (&value, &slot) in &self.slots {
            let entry = Entry { value, slot };
            self.small_values.push(Reverse(entry));
            self.large_values.push(entry);
        }
    }
}
