// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer and frame primitives.
//!
//! UI components often need "do this once things settle" and "do this once
//! per frame" without owning an event loop. This crate splits that into:
//!
//! - host traits: [`TimerHost`], [`FrameScheduler`] and [`Clock`], which a
//!   runtime implements on top of its own timers and frame callbacks;
//! - small state machines driven through those traits: [`Debounce`] for
//!   trailing-edge idle detection and [`FrameLoop`] for a self-rescheduling
//!   per-frame update;
//! - [`TimerQueue`] and [`FrameQueue`], manually advanced hosts for headless
//!   use and tests.
//!
//! Components never block or sleep. They arm a timer or request a frame and
//! get the handle back from the host later; handles that are no longer
//! current are rejected, so a host that delivers a late callback is harmless.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_timing::{Debounce, TimerQueue};
//!
//! let mut timers = TimerQueue::new();
//! let mut idle = Debounce::new(Duration::from_millis(100));
//!
//! // A burst of activity keeps pushing the deadline out.
//! idle.trigger(&mut timers);
//! timers.advance_to(Duration::from_millis(60));
//! let last = idle.trigger(&mut timers);
//!
//! assert!(timers.advance_to(Duration::from_millis(120)).is_empty());
//! for handle in timers.advance_to(Duration::from_millis(160)) {
//!     assert!(idle.fire(handle));
//!     assert_eq!(handle, last);
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod debounce;
mod frame;
mod host;
mod queue;

pub use debounce::{DEFAULT_IDLE_WAIT, Debounce};
pub use frame::FrameLoop;
pub use host::{Clock, FrameHandle, FrameScheduler, TimerHandle, TimerHost};
pub use queue::{FrameQueue, TimerQueue};
