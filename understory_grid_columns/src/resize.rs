// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column resize gesture.

use alloc::string::String;

use kurbo::Point;

use crate::drag::PointerDrag;

/// A column width reported by a resize gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnResize {
    /// Key of the resized column.
    pub key: String,
    /// Width clamped to the column's bounds.
    pub width: f64,
}

/// State of an in-progress column resize.
///
/// The pointer position is followed without clamping so that dragging past a
/// bound and back resumes exactly where the pointer is; only the reported
/// width is clamped to `[min_width, max_width]`. In right-to-left columns
/// dragging left widens the column and moves its leading edge.
#[derive(Clone, Debug)]
pub struct ResizeDrag {
    key: String,
    min_width: f64,
    max_width: f64,
    rtl: bool,
    width: f64,
    left: f64,
    cursor_width: f64,
    moved: bool,
    pointer: PointerDrag,
}

impl ResizeDrag {
    /// Starts resizing column `key` from `initial_width`, with its leading
    /// edge at `offset_left` and the pointer pressed at `pointer`.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        initial_width: f64,
        min_width: f64,
        max_width: f64,
        rtl: bool,
        offset_left: f64,
        pointer: Point,
    ) -> Self {
        let mut drag = PointerDrag::default();
        drag.start(pointer);
        Self {
            key: key.into(),
            min_width,
            max_width,
            rtl,
            width: initial_width,
            left: offset_left,
            cursor_width: initial_width,
            moved: false,
            pointer: drag,
        }
    }

    /// Key of the column being resized.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current clamped width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Current leading edge of the resize guide.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Follows the pointer to `pos`.
    pub fn pointer_move(&mut self, pos: Point) {
        if let Some(dx) = self.pointer.update(pos) {
            self.apply_delta(dx);
        }
    }

    /// Applies a horizontal pointer movement of `dx`.
    pub fn apply_delta(&mut self, dx: f64) {
        let cursor_width = self.cursor_width + if self.rtl { -dx } else { dx };
        let width = cursor_width.max(self.min_width).min(self.max_width);
        if self.rtl {
            self.left -= width - self.width;
        }
        self.width = width;
        self.cursor_width = cursor_width;
        self.moved = true;
    }

    /// The width to report for the current frame, once the pointer has moved.
    #[must_use]
    pub fn tick(&self) -> Option<ColumnResize> {
        self.moved.then(|| ColumnResize {
            key: self.key.clone(),
            width: self.width,
        })
    }

    /// Ends the gesture, returning the final width.
    #[must_use]
    pub fn finish(mut self) -> ColumnResize {
        self.pointer.end();
        ColumnResize {
            key: self.key,
            width: self.width,
        }
    }
}
