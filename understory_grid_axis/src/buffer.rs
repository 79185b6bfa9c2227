// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windowing of item indices onto recycled view slots.

use alloc::vec::Vec;
use core::fmt;

use understory_buffer_set::IntegerBufferSet;

use crate::sizer::SizeGetter;

/// Lower bound of the derived row buffer count.
pub const MIN_BUFFER_COUNT: usize = 3;
/// Upper bound of the derived row buffer count.
pub const MAX_BUFFER_COUNT: usize = 6;
/// Buffer count of a measured (column) buffer when none is requested.
pub const DEFAULT_COLUMN_BUFFER_COUNT: usize = 2;

/// Decides which item indices to materialize and in which slot.
///
/// The returned array maps slot → item index. A slot keeps its item for as
/// long as possible so hosts can reuse the view rendered in it; slots are only
/// rebound once more than `visible + 2 * buffer_count` are in use, and then the
/// item furthest from the viewport gives up its slot.
pub struct ItemBuffer {
    item_count: usize,
    viewport_extent: f64,
    size_getter: SizeGetter,
    buffer_set: IntegerBufferSet,
    buffer_count: usize,
    max_visible_count: Option<usize>,
    viewport_start: usize,
    viewport_end: usize,
    items: Vec<usize>,
}

impl fmt::Debug for ItemBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemBuffer")
            .field("item_count", &self.item_count)
            .field("viewport_extent", &self.viewport_extent)
            .field("buffer_count", &self.buffer_count)
            .field("max_visible_count", &self.max_visible_count)
            .field("viewport_start", &self.viewport_start)
            .field("viewport_end", &self.viewport_end)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl ItemBuffer {
    /// Creates a buffer for items estimated at `default_size` each (rows).
    ///
    /// At least `ceil(viewport / default_size) + 1` items are materialized per
    /// window. Without an explicit positive `buffer_count`, half of that,
    /// clamped to [`MIN_BUFFER_COUNT`]..=[`MAX_BUFFER_COUNT`], is kept on each
    /// side.
    #[must_use]
    pub fn new(
        item_count: usize,
        default_size: f64,
        viewport_extent: f64,
        size_getter: SizeGetter,
        buffer_count: Option<usize>,
    ) -> Self {
        let max_visible_count = if default_size > 0.0 {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "viewport extents are far below usize::MAX item sizes"
            )]
            let visible = libm::ceil(viewport_extent / default_size) as usize;
            visible + 1
        } else {
            item_count
        };
        let buffer_count = match buffer_count {
            Some(count) if count > 0 => count,
            _ => (max_visible_count / 2).clamp(MIN_BUFFER_COUNT, MAX_BUFFER_COUNT),
        };
        Self::with_window(
            item_count,
            viewport_extent,
            size_getter,
            buffer_count,
            Some(max_visible_count),
        )
    }

    /// Creates a buffer whose visible window is found by measuring items
    /// (columns).
    ///
    /// Without an explicit positive `buffer_count`,
    /// [`DEFAULT_COLUMN_BUFFER_COUNT`] is used.
    #[must_use]
    pub fn measured(
        item_count: usize,
        viewport_extent: f64,
        size_getter: SizeGetter,
        buffer_count: Option<usize>,
    ) -> Self {
        let buffer_count = match buffer_count {
            Some(count) if count > 0 => count,
            _ => DEFAULT_COLUMN_BUFFER_COUNT,
        };
        Self::with_window(item_count, viewport_extent, size_getter, buffer_count, None)
    }

    fn with_window(
        item_count: usize,
        viewport_extent: f64,
        size_getter: SizeGetter,
        buffer_count: usize,
        max_visible_count: Option<usize>,
    ) -> Self {
        Self {
            item_count,
            viewport_extent,
            size_getter,
            buffer_set: IntegerBufferSet::new(),
            buffer_count,
            max_visible_count,
            viewport_start: 0,
            viewport_end: 0,
            items: Vec::new(),
        }
    }

    /// Number of items on each side of the viewport kept when idle.
    #[must_use]
    pub fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    /// First index of the last computed viewport window.
    #[must_use]
    pub fn viewport_start(&self) -> usize {
        self.viewport_start
    }

    /// One past the last index of the last computed viewport window.
    #[must_use]
    pub fn viewport_end(&self) -> usize {
        self.viewport_end
    }

    /// The current slot → item index assignment.
    #[must_use]
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// The currently materialized item indices in ascending order.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<usize> {
        let mut items = self.items.clone();
        items.sort_unstable();
        items
    }

    /// Materializes the items visible when `first_index` starts at
    /// `first_offset` (`<= 0`) from the viewport start.
    pub fn get_items(&mut self, first_index: usize, first_offset: f64) -> &[usize] {
        let end = match self.max_visible_count {
            Some(max_visible) => first_index.saturating_add(max_visible).min(self.item_count),
            None => self.last_visible_end(first_index, first_offset),
        };
        self.viewport_start = first_index;

        let mut index = first_index;
        let mut filled = first_offset;
        while index < end || (filled < self.viewport_extent && index < self.item_count) {
            self.add_item(index, first_index, end);
            filled += (self.size_getter)(index);
            index += 1;
        }
        self.viewport_end = index;
        &self.items
    }

    /// Extends the last window by up to `buffer_count` items before it and
    /// fills the remaining `2 * buffer_count` budget after it.
    pub fn get_items_with_updated_buffer(&mut self) -> &[usize] {
        let (start, end) = (self.viewport_start, self.viewport_end);
        let mut remaining = 2 * self.buffer_count;

        for index in start.saturating_sub(self.buffer_count)..start.min(self.item_count) {
            self.add_item(index, start, end);
            remaining -= 1;
        }
        let mut index = end;
        while index < self.item_count && remaining > 0 {
            self.add_item(index, start, end);
            index += 1;
            remaining -= 1;
        }
        &self.items
    }

    fn last_visible_end(&self, first_index: usize, first_offset: f64) -> usize {
        let mut end = first_index;
        let mut filled = first_offset;
        while filled < self.viewport_extent && end < self.item_count {
            filled += (self.size_getter)(end);
            end += 1;
        }
        end.min(self.item_count)
    }

    /// `start..end` is the viewport window the item is added for.
    fn add_item(&mut self, index: usize, start: usize, end: usize) {
        let mut slot = self.buffer_set.slot_for_value(index);
        // Every item of `start..end` counts as visible, for measured buffers
        // too, so a full buffer on both sides fits without evictions.
        let allowed = end.saturating_sub(start) + 2 * self.buffer_count;
        if slot.is_none() && self.buffer_set.len() >= allowed {
            slot = self.buffer_set.replace_furthest_value_slot(
                start,
                end.saturating_sub(1),
                index,
            );
        }
        let slot = slot.unwrap_or_else(|| self.buffer_set.new_slot_for_value(index));
        if slot == self.items.len() {
            self.items.push(index);
        } else {
            self.items[slot] = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;

    fn rows(count: usize, size: f64, viewport: f64, buffer: Option<usize>) -> ItemBuffer {
        ItemBuffer::new(count, size, viewport, Rc::new(move |_| size), buffer)
    }

    #[test]
    fn derived_buffer_count_is_clamped() {
        // ceil(300 / 30) + 1 = 11 visible, half = 5.
        assert_eq!(rows(100, 30.0, 300.0, None).buffer_count(), 5);
        // ceil(60 / 30) + 1 = 3 visible, half = 1 -> 3.
        assert_eq!(rows(100, 30.0, 60.0, None).buffer_count(), MIN_BUFFER_COUNT);
        // ceil(3000 / 30) + 1 = 101 visible -> 6.
        assert_eq!(rows(100, 30.0, 3000.0, None).buffer_count(), MAX_BUFFER_COUNT);
        assert_eq!(rows(100, 30.0, 300.0, Some(2)).buffer_count(), 2);
        assert_eq!(rows(100, 30.0, 300.0, Some(0)).buffer_count(), 5);
    }

    #[test]
    fn first_window_covers_visible_rows() {
        let mut buffer = rows(100, 30.0, 300.0, None);
        let items = buffer.get_items(0, 0.0).to_vec();
        assert_eq!(items, (0..11).collect::<Vec<_>>());
        assert_eq!(buffer.viewport_start(), 0);
        assert_eq!(buffer.viewport_end(), 11);
    }

    #[test]
    fn short_list_stops_at_item_count() {
        let mut buffer = rows(4, 30.0, 300.0, None);
        assert_eq!(buffer.get_items(0, 0.0), &[0, 1, 2, 3]);
        assert_eq!(buffer.get_items_with_updated_buffer(), &[0, 1, 2, 3]);
    }

    #[test]
    fn window_overlap_reuses_slots() {
        let mut buffer = rows(1000, 30.0, 300.0, None);
        buffer.get_items(10, 0.0);
        let before = buffer.items().to_vec();
        let after = buffer.get_items(12, 0.0).to_vec();
        for index in 12..21 {
            let old_slot = before.iter().position(|&i| i == index).unwrap();
            let new_slot = after.iter().position(|&i| i == index).unwrap();
            assert_eq!(old_slot, new_slot, "item {index} kept its slot");
        }
    }

    #[test]
    fn slot_count_is_bounded_while_scrolling() {
        let mut buffer = rows(1000, 30.0, 300.0, None);
        for first in 0..500 {
            buffer.get_items(first, 0.0);
            buffer.get_items_with_updated_buffer();
        }
        // 11 visible + 2 * 5 buffered.
        assert!(buffer.items().len() <= 21);
        let sorted = buffer.sorted_items();
        for index in 499..510 {
            assert!(sorted.binary_search(&index).is_ok());
        }
    }

    #[test]
    fn updated_buffer_adds_both_sides() {
        let mut buffer = rows(1000, 30.0, 300.0, Some(2));
        buffer.get_items(50, 0.0);
        buffer.get_items_with_updated_buffer();
        let sorted = buffer.sorted_items();
        assert_eq!(sorted, (48..63).collect::<Vec<_>>());
    }

    #[test]
    fn leading_buffer_is_cut_at_zero() {
        let mut buffer = rows(1000, 30.0, 300.0, Some(2));
        buffer.get_items(1, 0.0);
        buffer.get_items_with_updated_buffer();
        // One leading item; the rest of the 4-item budget goes after the window.
        assert_eq!(buffer.sorted_items(), (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn measured_buffer_scans_sizes() {
        let widths = vec![100.0, 50.0, 50.0, 200.0, 100.0, 100.0, 100.0];
        let getter_widths = widths.clone();
        let mut buffer = ItemBuffer::measured(
            widths.len(),
            180.0,
            Rc::new(move |i| getter_widths[i]),
            None,
        );
        assert_eq!(buffer.buffer_count(), DEFAULT_COLUMN_BUFFER_COUNT);
        // 100 + 50 + 50 covers 180.
        buffer.get_items(0, 0.0);
        assert_eq!(buffer.sorted_items(), vec![0, 1, 2]);
        // Starting 40px into column 1: 10 + 50 + 200 covers 180.
        buffer.get_items(1, -40.0);
        assert_eq!(buffer.viewport_start(), 1);
        assert_eq!(buffer.viewport_end(), 4);
        buffer.get_items_with_updated_buffer();
        assert_eq!(buffer.sorted_items(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn measured_buffer_keeps_both_sides_without_evicting() {
        let mut buffer = ItemBuffer::measured(20, 250.0, Rc::new(|_| 100.0), Some(1));
        // 100 + 100 + 100 covers 250.
        buffer.get_items(5, 0.0);
        assert_eq!(buffer.viewport_end(), 8);
        buffer.get_items_with_updated_buffer();
        assert_eq!(buffer.sorted_items(), vec![4, 5, 6, 7, 8]);
        assert_eq!(buffer.items().len(), 5);
    }

    #[test]
    fn window_past_the_end_stays_in_range() {
        let mut buffer = rows(10, 30.0, 300.0, Some(3));
        assert!(buffer.get_items(12, 0.0).is_empty());
        assert_eq!(buffer.viewport_start(), 12);
        buffer.get_items_with_updated_buffer();
        assert!(buffer.items().iter().all(|&index| index < 10));

        // Still the leading part of the buffer when the window starts at the end.
        buffer.get_items(10, 0.0);
        buffer.get_items_with_updated_buffer();
        assert_eq!(buffer.sorted_items(), vec![7, 8, 9]);
    }
}
