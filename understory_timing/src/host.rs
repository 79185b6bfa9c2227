// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits a host implements to give components timers and frames.

use core::time::Duration;

/// Identifies a timer armed through a [`TimerHost`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Identifies a frame callback requested through a [`FrameScheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// One-shot timers.
///
/// When a timer elapses the host calls back into the component that armed it
/// with the returned handle. Handles of cleared timers must never be
/// delivered.
pub trait TimerHost {
    /// Arms a timer that elapses after `delay`.
    fn set_timer(&mut self, delay: Duration) -> TimerHandle;

    /// Disarms `handle`. Unknown or already elapsed handles are ignored.
    fn clear_timer(&mut self, handle: TimerHandle);
}

/// Per-frame callbacks, the equivalent of an animation frame request.
pub trait FrameScheduler {
    /// Requests a callback before the next frame is presented.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraws a pending request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}
