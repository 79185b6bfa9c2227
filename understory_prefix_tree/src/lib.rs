// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_prefix_tree --heading-base-level=0

//! Understory Prefix Tree: prefix sums over a mutable sequence of extents.
//!
//! [`PrefixIntervalTree`] stores `len` non-negative values (row heights, column
//! widths, ...) in a flat binary heap so that both point updates and prefix-sum
//! queries run in `O(log n)`. It also answers the inverse question used by
//! virtualized scrolling: "which item contains this offset?"
//!
//! - [`PrefixIntervalTree::sum_until`] / [`PrefixIntervalTree::sum_to`] give the
//!   start and end offsets of an item.
//! - [`PrefixIntervalTree::greatest_lower_bound`] and
//!   [`PrefixIntervalTree::least_upper_bound`] (plus their strict variants) map
//!   an offset back to an index.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_prefix_tree::PrefixIntervalTree;
//!
//! let mut tree = PrefixIntervalTree::uniform(100, 30.0);
//! assert_eq!(tree.total(), 3000.0);
//!
//! // The item containing offset 150 is item 5, which starts at 150.
//! assert_eq!(tree.greatest_lower_bound(150.0), Some(5));
//! assert_eq!(tree.sum_until(5), 150.0);
//!
//! // Growing item 2 shifts everything after it.
//! tree.set(2, 60.0);
//! assert_eq!(tree.sum_until(5), 180.0);
//! ```
//!
//! Indices outside the tree are contract violations and panic; offsets outside
//! the covered range produce `None` or `Some(len)` as documented on each query.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;

pub use tree::PrefixIntervalTree;
