// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis scroll position tracking over lazily measured items.

use alloc::vec;
use alloc::vec::Vec;

use understory_prefix_tree::PrefixIntervalTree;

use crate::sizer::{ItemSizer, SizeGetter};

/// Number of items above the first visible one whose sizes are re-validated
/// after every scroll.
pub const SIZE_VALIDATION_BUFFER: usize = 5;

/// Result of a scroll operation on one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// First item intersecting the viewport.
    pub index: usize,
    /// Offset of that item's leading edge relative to the viewport start.
    /// Always `<= 0`.
    pub offset: f64,
    /// Scroll position in content coordinates.
    pub position: f64,
    /// Sum of all item extents.
    pub content_extent: f64,
}

impl ScrollState {
    /// State reported for an axis without items.
    pub const EMPTY: Self = Self {
        index: 0,
        offset: 0.0,
        position: 0.0,
        content_extent: 0.0,
    };
}

/// Tracks the scroll position of one axis of a virtualized grid.
///
/// Item extents are cached in a [`PrefixIntervalTree`]. Every scroll operation
/// re-reads the extents of the items it touches (the ones in the viewport and
/// a few above it) and folds any change into the content extent, so variable
/// sizes can be measured lazily while the content stays stable on screen.
#[derive(Debug)]
pub struct AxisScrollHelper {
    sizer: ItemSizer,
    tree: PrefixIntervalTree,
    cached_sizes: Vec<f64>,
    content_extent: f64,
    viewport_extent: f64,
    position: f64,
}

impl AxisScrollHelper {
    /// Creates a lazily measured axis.
    ///
    /// Every item starts at [`ItemSizer::default_size`]; only the items of the
    /// initial viewport are measured up front.
    #[must_use]
    pub fn new(item_count: usize, viewport_extent: f64, sizer: ItemSizer) -> Self {
        let default_size = sizer.default_size();
        let mut helper = Self {
            tree: PrefixIntervalTree::uniform(item_count, default_size),
            cached_sizes: vec![default_size; item_count],
            content_extent: item_count as f64 * default_size,
            viewport_extent,
            position: 0.0,
            sizer,
        };
        helper.update_sizes_in_viewport(0, 0.0);
        helper
    }

    /// Creates an axis whose items are all measured up front.
    #[must_use]
    pub fn measured(item_count: usize, viewport_extent: f64, sizer: ItemSizer) -> Self {
        let cached_sizes: Vec<f64> = (0..item_count).map(|i| sizer.size_of(i)).collect();
        let tree = PrefixIntervalTree::new(&cached_sizes);
        Self {
            content_extent: cached_sizes.iter().sum(),
            tree,
            cached_sizes,
            viewport_extent,
            position: 0.0,
            sizer,
        }
    }

    /// Number of items on this axis.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.cached_sizes.len()
    }

    /// Current scroll position.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Sum of all cached item extents.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.content_extent
    }

    /// Extent of the viewport.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Cached extent of item `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn item_size(&self, index: usize) -> f64 {
        self.cached_sizes[index]
    }

    /// Changes the viewport extent without moving the scroll position.
    pub fn set_viewport_extent(&mut self, viewport_extent: f64) {
        self.viewport_extent = viewport_extent;
    }

    /// Replaces the main size getter; new sizes are picked up as items are
    /// revisited.
    pub fn set_size_getter(&mut self, getter: Option<SizeGetter>) {
        self.sizer.set_size_getter(getter);
    }

    /// Replaces the sub size getter; new sizes are picked up as items are
    /// revisited.
    pub fn set_sub_size_getter(&mut self, getter: Option<SizeGetter>) {
        self.sizer.set_sub_size_getter(getter);
    }

    /// Re-reads the extent of item `index` and returns how much it changed.
    ///
    /// Out-of-range indices are ignored and report no change.
    pub fn update_item_size(&mut self, index: usize) -> f64 {
        if index >= self.cached_sizes.len() {
            return 0.0;
        }
        let size = self.sizer.size_of(index);
        let cached = self.cached_sizes[index];
        if size == cached {
            return 0.0;
        }
        let delta = size - cached;
        self.tree.set(index, size);
        self.cached_sizes[index] = size;
        self.content_extent += delta;
        delta
    }

    /// Start offset of item `index` after re-validating its size.
    ///
    /// # Panics
    ///
    /// Panics if `index > item_count`.
    pub fn item_position(&mut self, index: usize) -> f64 {
        self.update_item_size(index);
        self.tree.sum_until(index)
    }

    /// Scroll position that puts the trailing edge of item `index` at the end
    /// of the viewport, floored at zero.
    ///
    /// Items that would be visible at that position are re-validated first.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn item_at_end_position(&mut self, index: usize) -> f64 {
        self.update_item_size(index);
        let mut filled = self.cached_sizes[index];
        let mut current = index;
        while filled < self.viewport_extent && current > 0 {
            current -= 1;
            self.update_item_size(current);
            filled += self.cached_sizes[current];
        }
        (self.tree.sum_to(index) - self.viewport_extent).max(0.0)
    }

    /// Scrolls to an absolute position.
    ///
    /// Positions at or before zero show the first item flush with the viewport
    /// start; positions at or past the end show the last item flush with the
    /// viewport end.
    pub fn scroll_to(&mut self, position: f64) -> ScrollState {
        if self.cached_sizes.is_empty() {
            return ScrollState::EMPTY;
        }
        if position <= 0.0 {
            self.position = 0.0;
            self.update_sizes_in_viewport(0, 0.0);
            return ScrollState {
                index: 0,
                offset: 0.0,
                position: self.position,
                content_extent: self.content_extent,
            };
        }

        let position = if position >= self.content_extent - self.viewport_extent {
            self.item_at_end_position(self.cached_sizes.len() - 1)
        } else {
            position
        };
        self.position = position;
        self.settle_at(position)
    }

    /// Scrolls relative to the current position.
    ///
    /// The walk proceeds one item at a time, re-validating each item it
    /// crosses, so size changes above the anchor do not make content jump.
    pub fn scroll_by(&mut self, delta: f64) -> ScrollState {
        if self.cached_sizes.is_empty() {
            return ScrollState::EMPTY;
        }
        let count = self.cached_sizes.len();

        let first = self.first_index_at(self.position);
        let first_position = self.tree.sum_until(first);
        let mut position = self.position;

        let change = self.update_item_size(first);
        if first_position != 0.0 {
            position += change;
        }
        let visible = self.cached_sizes[first] - (position - first_position);

        if delta >= 0.0 {
            let mut remaining = delta;
            let mut visible = visible;
            let mut index = first;
            while remaining > 0.0 && index < count {
                if remaining < visible {
                    position += remaining;
                    remaining = 0.0;
                } else {
                    remaining -= visible;
                    position += visible;
                    index += 1;
                }
                if index < count {
                    self.update_item_size(index);
                    visible = self.cached_sizes[index];
                }
            }
        } else {
            let mut remaining = -delta;
            let mut invisible = self.cached_sizes[first] - visible;
            let mut index = Some(first);
            while remaining > 0.0 {
                let Some(current) = index else {
                    break;
                };
                if remaining < invisible {
                    position -= remaining;
                    remaining = 0.0;
                } else {
                    position -= invisible;
                    remaining -= invisible;
                    index = current.checked_sub(1);
                }
                if let Some(current) = index {
                    let change = self.update_item_size(current);
                    invisible = self.cached_sizes[current];
                    position += change;
                }
            }
        }

        let max_position = self.content_extent - self.viewport_extent;
        self.position = position.min(max_position).max(0.0);
        self.settle_at(self.position)
    }

    /// Scrolls so item `index` sits at `offset` from the viewport start.
    ///
    /// The index is clamped into range and the offset into
    /// `[-item_size, 0]`.
    pub fn scroll_to_item(&mut self, index: usize, offset: f64) -> ScrollState {
        if self.cached_sizes.is_empty() {
            return ScrollState::EMPTY;
        }
        let index = index.min(self.cached_sizes.len() - 1);
        let offset = offset.max(-self.cached_sizes[index]).min(0.0);
        let start = self.tree.sum_until(index);
        self.scroll_to(start - offset)
    }

    /// Scrolls the minimum amount needed to show item `index` entirely.
    ///
    /// A fully visible item leaves the position unchanged.
    pub fn scroll_item_into_view(&mut self, index: usize) -> ScrollState {
        if self.cached_sizes.is_empty() {
            return ScrollState::EMPTY;
        }
        let index = index.min(self.cached_sizes.len() - 1);
        self.update_item_size(index);
        let begin = self.tree.sum_until(index);
        let end = begin + self.cached_sizes[index];
        if begin < self.position {
            self.scroll_to(begin)
        } else if self.position + self.viewport_extent < end {
            let position = self.item_at_end_position(index);
            self.scroll_to(position)
        } else {
            self.scroll_to(self.position)
        }
    }

    fn first_index_at(&self, position: f64) -> usize {
        self.tree
            .greatest_lower_bound(position)
            .unwrap_or(0)
            .min(self.cached_sizes.len() - 1)
    }

    fn settle_at(&mut self, position: f64) -> ScrollState {
        let index = self.first_index_at(position);
        let offset = self.tree.sum_until(index) - position;
        self.update_sizes_in_viewport(index, offset);
        self.update_sizes_above_viewport(index);
        ScrollState {
            index,
            offset,
            position: self.position,
            content_extent: self.content_extent,
        }
    }

    fn update_sizes_in_viewport(&mut self, first: usize, first_offset: f64) {
        let mut top = first_offset;
        let mut index = first;
        while top <= self.viewport_extent && index < self.cached_sizes.len() {
            self.update_item_size(index);
            top += self.cached_sizes[index];
            index += 1;
        }
    }

    fn update_sizes_above_viewport(&mut self, first: usize) {
        let lowest = first.saturating_sub(SIZE_VALIDATION_BUFFER);
        for index in (lowest..first).rev() {
            let delta = self.update_item_size(index);
            self.position += delta;
        }
    }
}
