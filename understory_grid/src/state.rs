// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid state snapshots and the reducer that advances them.

use alloc::string::String;
use alloc::vec::Vec;

use understory_grid_axis::ScrollState;
use understory_grid_columns::{ColumnLayout, DragViewport, Partition};

/// Derived geometry and scroll state of a grid at one point in time.
///
/// A snapshot is never mutated in place: full recomputations build a new
/// one, and incremental changes go through [`GridState::reduce`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridState {
    /// Column layout with overrides applied.
    pub columns: ColumnLayout,
    /// Number of data rows.
    pub row_count: usize,
    /// Outer height actually used.
    pub height: f64,
    /// Height follows content, bounded by the max height.
    pub use_max_height: bool,
    /// Total height of the header rows.
    pub header_height: f64,
    /// Height taken by header, footer, borders and the horizontal scrollbar.
    pub reserved_height: f64,
    /// Width inside the borders, including the vertical scrollbar.
    pub viewport_width: f64,
    /// Height inside borders, header and footer, including the horizontal
    /// scrollbar.
    pub viewport_height: f64,
    /// Width of the row area.
    pub body_width: f64,
    /// Height of the row area.
    pub body_height: f64,
    /// Total width of all columns.
    pub content_width: f64,
    /// Total height of all rows.
    pub content_height: f64,
    /// First row intersecting the body.
    pub first_row_index: usize,
    /// Offset of that row's top edge from the body's top edge.
    pub first_row_offset: f64,
    /// First scrollable leaf intersecting the scrollable area.
    pub first_column_index: usize,
    /// Offset of that leaf's leading edge from the scrollable area's.
    pub first_column_offset: f64,
    /// Horizontal scroll position.
    pub scroll_x: f64,
    /// Vertical scroll position.
    pub scroll_y: f64,
    /// Largest horizontal scroll position.
    pub max_scroll_x: f64,
    /// Largest vertical scroll position.
    pub max_scroll_y: f64,
    /// A horizontal scrollbar is shown.
    pub show_scrollbar_x: bool,
    /// A vertical scrollbar is shown.
    pub show_scrollbar_y: bool,
    /// Materialized rows, slot → row index.
    pub rows_to_render: Vec<usize>,
    /// Materialized scrollable leaves, slot → scrollable leaf index.
    pub scrollable_columns_to_render: Vec<usize>,
    /// Key of the column being resized.
    pub column_resizing_key: Option<String>,
    /// Key of the column being reordered.
    pub column_reordering_key: Option<String>,
    /// Scroll input arrived and has not settled yet.
    pub scrolling: bool,
}

/// An incremental change to a [`GridState`].
#[derive(Clone, Debug, PartialEq)]
pub enum GridPatch {
    /// The vertical axis scrolled.
    Vertical {
        /// New vertical scroll state.
        scroll: ScrollState,
        /// Largest vertical scroll position for the new content height.
        max_scroll_y: f64,
        /// Materialized rows.
        rows_to_render: Vec<usize>,
    },
    /// The horizontal axis scrolled.
    Horizontal {
        /// New horizontal scroll state.
        scroll: ScrollState,
        /// Largest horizontal scroll position.
        max_scroll_x: f64,
        /// Materialized scrollable leaves.
        columns_to_render: Vec<usize>,
    },
    /// Materialized windows changed without scrolling.
    Windows {
        /// Materialized rows.
        rows_to_render: Vec<usize>,
        /// Materialized scrollable leaves.
        columns_to_render: Vec<usize>,
    },
    /// Scrolling started or settled.
    Scrolling(bool),
    /// A column resize started or ended.
    ColumnResizing(Option<String>),
    /// A column reorder started or ended.
    ColumnReordering(Option<String>),
}

impl GridState {
    /// Applies `patch`, returning the next state.
    #[must_use]
    pub fn reduce(self, patch: GridPatch) -> Self {
        match patch {
            GridPatch::Vertical {
                scroll,
                max_scroll_y,
                rows_to_render,
            } => Self {
                first_row_index: scroll.index,
                first_row_offset: scroll.offset,
                scroll_y: scroll.position,
                content_height: scroll.content_extent,
                max_scroll_y,
                rows_to_render,
                ..self
            },
            GridPatch::Horizontal {
                scroll,
                max_scroll_x,
                columns_to_render,
            } => Self {
                first_column_index: scroll.index,
                first_column_offset: scroll.offset,
                scroll_x: scroll.position,
                max_scroll_x,
                scrollable_columns_to_render: columns_to_render,
                ..self
            },
            GridPatch::Windows {
                rows_to_render,
                columns_to_render,
            } => Self {
                rows_to_render,
                scrollable_columns_to_render: columns_to_render,
                ..self
            },
            GridPatch::Scrolling(scrolling) => Self { scrolling, ..self },
            GridPatch::ColumnResizing(column_resizing_key) => Self {
                column_resizing_key,
                ..self
            },
            GridPatch::ColumnReordering(column_reordering_key) => Self {
                column_reordering_key,
                ..self
            },
        }
    }

    /// Width of the left-pinned partition.
    #[must_use]
    pub fn left_fixed_width(&self) -> f64 {
        self.columns.partition_width(Partition::LeftFixed)
    }

    /// Width of the right-pinned partition.
    #[must_use]
    pub fn right_fixed_width(&self) -> f64 {
        self.columns.partition_width(Partition::RightFixed)
    }

    /// Horizontal body geometry for header gestures.
    #[must_use]
    pub fn drag_viewport(&self) -> DragViewport {
        DragViewport {
            scroll_x: self.scroll_x,
            max_scroll_x: self.max_scroll_x,
            body_width: self.body_width,
            left_fixed_width: self.left_fixed_width(),
            right_fixed_width: self.right_fixed_width(),
        }
    }

    /// Returns `true` if a column resize or reorder is in progress.
    #[must_use]
    pub fn is_dragging_column(&self) -> bool {
        self.column_resizing_key.is_some() || self.column_reordering_key.is_some()
    }
}
