// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal pointer tracking for header drag gestures.
//!
//! Column gestures only care about horizontal motion. [`PointerDrag`] turns
//! successive pointer positions into horizontal deltas:
//!
//! ```
//! use kurbo::Point;
//! use understory_grid_columns::PointerDrag;
//!
//! let mut drag = PointerDrag::default();
//! drag.start(Point::new(100.0, 8.0));
//! assert_eq!(drag.update(Point::new(112.0, 30.0)), Some(12.0));
//! assert_eq!(drag.update(Point::new(104.0, 30.0)), Some(-8.0));
//! assert_eq!(drag.total_offset(Point::new(104.0, 0.0)), Some(4.0));
//! drag.end();
//! assert!(!drag.is_dragging());
//! ```

use kurbo::Point;

/// Tracks a pointer between press and release, reporting horizontal motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerDrag {
    origin: Option<Point>,
    last: Option<Point>,
}

impl PointerDrag {
    /// Starts tracking at `pos`, replacing any drag in progress.
    pub fn start(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
    }

    /// Records `pos` and returns the horizontal distance moved since the
    /// previous position, or `None` when no drag is in progress.
    pub fn update(&mut self, pos: Point) -> Option<f64> {
        self.origin?;
        let last = self.last.replace(pos)?;
        Some(pos.x - last.x)
    }

    /// Horizontal distance between the press position and `pos`.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<f64> {
        self.origin.map(|origin| pos.x - origin.x)
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.origin = None;
        self.last = None;
    }

    /// Returns `true` between [`start`](Self::start) and [`end`](Self::end).
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}
