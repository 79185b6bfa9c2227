// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce.

use core::time::Duration;

use crate::host::{TimerHandle, TimerHost};

/// Default quiet period after which a burst of activity is considered over.
pub const DEFAULT_IDLE_WAIT: Duration = Duration::from_millis(200);

/// Fires once activity has been quiet for `wait`.
///
/// Every [`trigger`](Self::trigger) re-arms the timer, so only the timer
/// armed last can fire; stale handles delivered by a host are rejected by
/// [`fire`](Self::fire).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debounce {
    wait: Duration,
    pending: Option<TimerHandle>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_WAIT)
    }
}

impl Debounce {
    /// Creates an idle debounce with the given quiet period.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Returns `true` while a timer is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records activity: clears the armed timer, if any, and arms a new one.
    pub fn trigger(&mut self, host: &mut impl TimerHost) -> TimerHandle {
        if let Some(old) = self.pending.take() {
            host.clear_timer(old);
        }
        let handle = host.set_timer(self.wait);
        self.pending = Some(handle);
        handle
    }

    /// Disarms the pending timer without firing.
    pub fn reset(&mut self, host: &mut impl TimerHost) {
        if let Some(handle) = self.pending.take() {
            host.clear_timer(handle);
        }
    }

    /// Handles an elapsed timer. Returns `true` if `handle` is the armed
    /// timer, which is then consumed.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
