// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid --heading-base-level=0

//! Understory Grid: a headless virtualized grid controller.
//!
//! [`Grid`] ties the lower-level crates together:
//!
//! - column layout and header gestures from `understory_grid_columns`;
//! - one `understory_grid_axis` scroll helper and item buffer per axis;
//! - idle detection and per-frame gesture updates from `understory_timing`.
//!
//! The host owns rendering, input and the event loop. It describes the grid
//! with [`GridProps`], forwards wheel, scrollbar and pointer input, delivers
//! timer and frame callbacks, and renders what [`Grid::state`],
//! [`Grid::rows_to_render`] and [`Grid::scrollable_leaves_to_render`]
//! describe. Everything the grid derives lives in an immutable [`GridState`]
//! snapshot that only changes through full recomputation or
//! [`GridState::reduce`].
//!
//! While scroll input arrives only the visible rows and columns are
//! materialized; once input has been quiet for
//! [`GridOptions::scroll_idle_wait`] the windows are widened by their buffer
//! counts and a [`GridEvent::ScrollEnd`] is queued.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_grid::{Grid, GridEvent, GridProps};
//! use understory_grid_columns::ColumnDef;
//! use understory_timing::TimerQueue;
//!
//! let columns = vec![
//!     ColumnDef::leaf("name", 200.0),
//!     ColumnDef::leaf("email", 300.0),
//! ];
//! let props = GridProps::new(columns, 1000, 502.0, 400.0).with_row_height(30.0);
//! let mut grid = Grid::new(props).unwrap();
//! let mut timers = TimerQueue::new();
//!
//! grid.on_wheel(0.0, 300.0, &mut timers);
//! assert_eq!(grid.state().first_row_index, 10);
//! assert!(grid.state().scrolling);
//!
//! for handle in timers.advance_to(Duration::from_millis(200)) {
//!     grid.on_timer(handle);
//! }
//! assert!(!grid.state().scrolling);
//! let events = grid.drain_events();
//! assert!(events.iter().any(|e| matches!(e, GridEvent::ScrollEnd { .. })));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod grid;
mod props;
mod state;

pub use event::GridEvent;
pub use grid::{Grid, RenderedColumn};
pub use props::{GridOptions, GridProps, GridPropsError, SCROLLBAR_SIZE};
pub use state::{GridPatch, GridState};
