// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications a grid queues for its host.

use alloc::string::String;

/// Something the host may want to react to, drained with
/// [`Grid::drain_events`](crate::Grid::drain_events).
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent {
    /// The first scroll input after the grid was idle.
    ScrollStart {
        /// Horizontal position before scrolling.
        scroll_x: f64,
        /// Vertical position before scrolling.
        scroll_y: f64,
        /// First visible row before scrolling.
        first_row_index: usize,
    },
    /// Scroll input has been quiet for the idle wait.
    ScrollEnd {
        /// Horizontal position after scrolling.
        scroll_x: f64,
        /// Vertical position after scrolling.
        scroll_y: f64,
        /// First visible row after scrolling.
        first_row_index: usize,
    },
    /// The horizontal scroll position changed.
    HorizontalScroll(f64),
    /// The vertical scroll position changed.
    VerticalScroll(f64),
    /// A column resize started.
    ColumnResize {
        /// Column key.
        key: String,
        /// Width when the gesture started.
        width: f64,
    },
    /// A column resize progressed.
    ColumnResizing {
        /// Column key.
        key: String,
        /// Width for this frame.
        width: f64,
    },
    /// A column resize ended; the width is now an override.
    ColumnResized {
        /// Column key.
        key: String,
        /// Final width.
        width: f64,
    },
    /// A column reorder started.
    ColumnReorder {
        /// Column key.
        key: String,
    },
    /// A column reorder progressed.
    ColumnReordering {
        /// Column key.
        key: String,
        /// Sibling the column would be dropped on.
        target_key: Option<String>,
    },
    /// A column reorder ended.
    ColumnReordered {
        /// Column key.
        key: String,
        /// Sibling it swapped places with, if any.
        target_key: Option<String>,
    },
    /// The height the grid wants from its container changed.
    ContentHeightChange(f64),
}
