// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heap-backed prefix interval tree.

use alloc::vec;
use alloc::vec::Vec;

/// A sequence of extents supporting `O(log n)` updates and prefix-sum search.
///
/// Leaves live at `half..half + len` of a flat heap whose length is twice the
/// next power of two at or above `len`; node `k` holds the sum of nodes `2k`
/// and `2k + 1`, so the root (node 1) holds the total. Padding leaves are zero.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixIntervalTree {
    len: usize,
    half: usize,
    heap: Vec<f64>,
}

impl PrefixIntervalTree {
    /// Builds a tree over `values`.
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        let len = values.len();
        let half = len.next_power_of_two();
        let mut heap = vec![0.0; 2 * half];
        heap[half..half + len].copy_from_slice(values);
        for node in (1..half).rev() {
            heap[node] = heap[2 * node] + heap[2 * node + 1];
        }
        Self { len, half, heap }
    }

    /// Builds a tree of `len` items that all have extent `value`.
    #[must_use]
    pub fn uniform(len: usize, value: f64) -> Self {
        Self::new(&vec![value; len])
    }

    /// Builds a tree of `len` zero-extent items.
    #[must_use]
    pub fn empty(len: usize) -> Self {
        Self::uniform(len, 0.0)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The item extents in index order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.heap[self.half..self.half + self.len]
    }

    /// Extent of item `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        assert!(
            index < self.len,
            "index {index} out of range for tree of length {}",
            self.len
        );
        self.heap[self.half + index]
    }

    /// Replaces the extent of item `index` and refreshes every ancestor sum.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, value: f64) {
        assert!(
            index < self.len,
            "index {index} out of range for tree of length {}",
            self.len
        );
        let mut node = self.half + index;
        self.heap[node] = value;
        while node > 1 {
            node /= 2;
            self.heap[node] = self.heap[2 * node] + self.heap[2 * node + 1];
        }
    }

    /// Sum of the extents of items `[0, end)`, i.e. the start offset of `end`.
    ///
    /// # Panics
    ///
    /// Panics if `end > len`.
    #[must_use]
    pub fn sum_until(&self, end: usize) -> f64 {
        assert!(
            end <= self.len,
            "end {end} out of range for tree of length {}",
            self.len
        );
        if end == 0 {
            return 0.0;
        }
        let mut node = end + self.half - 1;
        let mut sum = self.heap[node];
        while node != 1 {
            if node % 2 == 1 {
                sum += self.heap[node - 1];
            }
            node /= 2;
        }
        sum
    }

    /// Sum of the extents of items `[0, inclusive_end]`, i.e. the end offset of
    /// `inclusive_end`.
    ///
    /// # Panics
    ///
    /// Panics if `inclusive_end >= len`.
    #[must_use]
    pub fn sum_to(&self, inclusive_end: usize) -> f64 {
        assert!(
            inclusive_end < self.len,
            "index {inclusive_end} out of range for tree of length {}",
            self.len
        );
        self.sum_until(inclusive_end + 1)
    }

    /// Sum of the extents of items `[begin, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `begin > end` or `end > len`.
    #[must_use]
    pub fn sum(&self, begin: usize, end: usize) -> f64 {
        assert!(begin <= end, "range start {begin} is after range end {end}");
        self.sum_until(end) - self.sum_until(begin)
    }

    /// Sum of all extents.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.heap[1]
    }

    /// Largest index `i` such that `sum_until(i) <= target`.
    ///
    /// Returns `None` for negative targets and `Some(len)` once `target`
    /// reaches the total.
    #[must_use]
    pub fn greatest_lower_bound(&self, target: f64) -> Option<usize> {
        if target < 0.0 {
            return None;
        }
        if self.heap[1] <= target {
            return Some(self.len);
        }
        let mut remaining = target;
        let mut node = 1;
        while node < self.half {
            let left_sum = self.heap[2 * node];
            if remaining < left_sum {
                node *= 2;
            } else {
                node = 2 * node + 1;
                remaining -= left_sum;
            }
        }
        Some(node - self.half)
    }

    /// Largest index `i` such that `sum_until(i) < target`.
    ///
    /// Returns `None` for targets `<= 0` and `Some(len)` once `target`
    /// exceeds the total.
    #[must_use]
    pub fn greatest_strict_lower_bound(&self, target: f64) -> Option<usize> {
        if target <= 0.0 {
            return None;
        }
        if self.heap[1] < target {
            return Some(self.len);
        }
        let mut remaining = target;
        let mut node = 1;
        while node < self.half {
            let left_sum = self.heap[2 * node];
            if remaining <= left_sum {
                node *= 2;
            } else {
                node = 2 * node + 1;
                remaining -= left_sum;
            }
        }
        Some(node - self.half)
    }

    /// Smallest index `i` such that `sum_until(i) >= target`.
    #[must_use]
    pub fn least_upper_bound(&self, target: f64) -> usize {
        self.greatest_strict_lower_bound(target)
            .map_or(0, |index| index + 1)
    }

    /// Smallest index `i` such that `sum_until(i) > target`.
    #[must_use]
    pub fn least_strict_upper_bound(&self, target: f64) -> usize {
        self.greatest_lower_bound(target).map_or(0, |index| index + 1)
    }
}
