// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_buffer_set --heading-base-level=0

//! Understory Buffer Set: stable slot assignment for recycled views.
//!
//! A virtualized list or grid only materializes a handful of views at a time.
//! To avoid tearing views down and rebuilding them while scrolling, each
//! materialized item index (a *value*) is bound to a *slot*, and a slot is
//! rebound to a new index only when the old one has scrolled far away.
//!
//! [`IntegerBufferSet`] keeps that value→slot mapping together with a pair of
//! heaps over the live values, so that the value furthest outside a window
//! `[low, high]` can be found and evicted in logarithmic time.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_buffer_set::IntegerBufferSet;
//!
//! let mut set = IntegerBufferSet::new();
//! for index in 0..4 {
//!     set.new_slot_for_value(index);
//! }
//! assert_eq!(set.len(), 4);
//!
//! // The window moved to [2, 5]: index 0 is furthest away, so its slot is reused.
//! let slot = set.replace_furthest_value_slot(2, 5, 4);
//! assert_eq!(slot, Some(0));
//! assert_eq!(set.slot_for_value(4), Some(0));
//! assert_eq!(set.slot_for_value(0), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod set;

pub use set::{IntegerBufferSet, STALE_HEAP_RATIO};
