// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Self-rescheduling frame loop.

use crate::host::{FrameHandle, FrameScheduler};

/// Keeps exactly one frame request outstanding while running.
///
/// Gestures use it to coalesce pointer input into at most one update per
/// frame: input only records state, and [`on_frame`](Self::on_frame) is where
/// the update is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    /// Creates a stopped loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` between [`start`](Self::start) and [`stop`](Self::stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests the first frame. Does nothing if already running.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame());
        }
    }

    /// Handles a frame callback. Returns `true`, after requesting the next
    /// frame, if `handle` is the outstanding request.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut impl FrameScheduler) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Cancels the outstanding request.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}
