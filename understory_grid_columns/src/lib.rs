// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid_columns --heading-base-level=0

//! Understory Grid Columns: hierarchical column layout and header gestures.
//!
//! Hosts describe their columns as a tree of [`ColumnDef`]s: leaves that
//! render a data field and group headers spanning other columns. Layout
//! turns that tree into a [`ColumnLayout`]:
//!
//! - top-level columns are split into left-pinned, scrollable and
//!   right-pinned [`Partition`]s;
//! - leaves with `flex_grow` share any width the viewport has to spare, and
//!   [`ColumnLayout::shrink_columns_width`] takes width back when the content
//!   must fit a narrower viewport;
//! - every leaf gets a left offset within its partition and
//!   [`ColumnFlags`] marking the first and last leaf of each sibling run.
//!
//! Manual changes made through header gestures are kept as
//! [`ColumnOverrides`] (widths and sibling positions by key) and applied on
//! the next layout. The gestures themselves are [`ResizeDrag`] and
//! [`ReorderDrag`]; both follow the pointer through [`PointerDrag`] and
//! report at most once per frame via `tick`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_grid_columns::{
//!     ColumnDef, ColumnOverrides, Fixed, Partition, compute_column_layout,
//! };
//!
//! let defs = vec![
//!     ColumnDef::leaf("id", 60.0).with_fixed(Fixed::Left),
//!     ColumnDef::group(vec![
//!         ColumnDef::leaf("first", 100.0),
//!         ColumnDef::leaf("last", 100.0),
//!     ]),
//!     ColumnDef::leaf("notes", 100.0).with_flex_grow(1.0),
//! ];
//!
//! let mut overrides = ColumnOverrides::new();
//! overrides.record_width("first", 140.0);
//!
//! let layout = compute_column_layout(&defs, &overrides, 500.0);
//! assert_eq!(layout.partition_width(Partition::LeftFixed), 60.0);
//! assert_eq!(layout.depth(), 2);
//!
//! let notes = layout.column(layout.find("notes").unwrap());
//! // 500 - (60 + 100 + 100 + 100) left over, all to the one flexible leaf.
//! assert_eq!(notes.width, 240.0);
//! // Scrollable offsets start after the left-pinned partition.
//! assert_eq!(notes.left, 60.0 + 140.0 + 100.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod def;
mod drag;
mod layout;
mod reorder;
mod resize;

pub use def::{ColumnDef, DuplicateKeyError, Fixed};
pub use drag::PointerDrag;
pub use layout::{
    Column, ColumnFlags, ColumnId, ColumnLayout, ColumnOverrides, Partition,
    compute_column_layout,
};
pub use reorder::{
    AutoScroll, DEFAULT_REORDER_FACTOR, DragViewport, DropTarget, ReorderDrag, ReorderUpdate,
};
pub use resize::{ColumnResize, ResizeDrag};
