// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manually driven hosts for headless runtimes and tests.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::time::Duration;

use crate::host::{Clock, FrameHandle, FrameScheduler, TimerHandle, TimerHost};

/// A [`TimerHost`] and [`Clock`] whose time only moves through
/// [`advance_to`](Self::advance_to).
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    armed: BTreeSet<(Duration, TimerHandle)>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    /// Returns `true` if no timer is armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Deadline of the earliest armed timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.first().map(|&(deadline, _)| deadline)
    }

    /// Moves time forward to `now` and returns the timers that elapsed, by
    /// deadline and then by arming order. Time never moves backwards.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerHandle> {
        self.now = self.now.max(now);
        let mut fired = Vec::new();
        while let Some(&(deadline, handle)) = self.armed.first()
            && deadline <= self.now
        {
            self.armed.pop_first();
            fired.push(handle);
        }
        fired
    }
}

impl TimerHost for TimerQueue {
    fn set_timer(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.armed.insert((self.now + delay, handle));
        handle
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        self.armed.retain(|&(_, armed)| armed != handle);
    }
}

impl Clock for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }
}

/// A [`FrameScheduler`] that collects requests until they are taken.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl FrameQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the outstanding requests, oldest first. Requests
    /// made while handling them belong to the next frame.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        core::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&pending| pending != handle);
    }
}
