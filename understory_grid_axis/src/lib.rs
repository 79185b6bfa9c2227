// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid_axis --heading-base-level=0

//! Understory Grid Axis: per-axis scroll state and view buffering.
//!
//! A virtualized grid is scrolled along two independent axes. This crate
//! provides the two building blocks each axis needs:
//!
//! - [`AxisScrollHelper`]: maps scroll positions to "first visible item +
//!   offset" ([`ScrollState`]), absorbing lazily measured size changes so the
//!   content under the viewport does not jump. Rows use the lazily measured
//!   constructor [`AxisScrollHelper::new`]; columns, whose widths are known up
//!   front, use [`AxisScrollHelper::measured`].
//! - [`ItemBuffer`]: turns a [`ScrollState`] into the set of item indices to
//!   materialize, assigning each a stable slot so host views can be recycled.
//!
//! Item extents are described by an [`ItemSizer`]: a default size plus an
//! optional per-index [`SizeGetter`], and an optional sub size (rows use it
//! for expandable detail areas).
//!
//! ## Minimal example
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_grid_axis::{AxisScrollHelper, ItemBuffer, ItemSizer};
//!
//! let mut rows = AxisScrollHelper::new(1000, 300.0, ItemSizer::uniform(30.0));
//! let state = rows.scroll_to(150.0);
//! assert_eq!((state.index, state.offset), (5, 0.0));
//!
//! let mut buffer = ItemBuffer::new(1000, 30.0, 300.0, Rc::new(|_| 30.0), None);
//! let slots = buffer.get_items(state.index, state.offset);
//! assert!(slots.contains(&5));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod buffer;
mod scroll;
mod sizer;

pub use buffer::{DEFAULT_COLUMN_BUFFER_COUNT, ItemBuffer, MAX_BUFFER_COUNT, MIN_BUFFER_COUNT};
pub use scroll::{AxisScrollHelper, SIZE_VALIDATION_BUFFER, ScrollState};
pub use sizer::{ItemSizer, SizeGetter};
