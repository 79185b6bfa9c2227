// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column reorder gesture, drop targets and drag auto-scroll.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::def::Fixed;
use crate::drag::PointerDrag;
use crate::layout::{ColumnId, ColumnLayout, ColumnOverrides};

/// Share of a target's width, measured from the matching edge, in which a
/// dragged column's edge selects that target.
pub const DEFAULT_REORDER_FACTOR: f64 = 0.75;

/// Horizontal geometry of the grid body used by header gestures.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragViewport {
    /// Current horizontal scroll position.
    pub scroll_x: f64,
    /// Largest horizontal scroll position.
    pub max_scroll_x: f64,
    /// Width of the body, excluding the vertical scrollbar.
    pub body_width: f64,
    /// Width of the left-pinned partition.
    pub left_fixed_width: f64,
    /// Width of the right-pinned partition.
    pub right_fixed_width: f64,
}

/// A sibling span a dragged column can be dropped on, in body coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct DropTarget {
    /// Key of the sibling.
    pub key: String,
    /// Leading edge.
    pub left: f64,
    /// Width.
    pub width: f64,
    /// The leading edge is not hidden under a pinned partition.
    pub left_side_visible: bool,
    /// The trailing edge is not hidden under a pinned partition.
    pub right_side_visible: bool,
}

/// Progress of a reorder gesture for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ReorderUpdate {
    /// Sibling the column would be dropped on, if any.
    pub target_key: Option<String>,
    /// Edge of the target where the drop indicator goes.
    pub target_position: f64,
    /// The indicator is on the target's leading edge.
    pub is_left_target: bool,
    /// Leading edge of the dragged column.
    pub position: f64,
    /// The last pointer movement went left.
    pub moving_left: bool,
}

impl ColumnLayout {
    /// Leading edge of column `id` in body coordinates.
    ///
    /// Scrollable columns are shifted by the scroll position, right-pinned
    /// columns are anchored at the body's right edge.
    #[must_use]
    pub fn body_left(&self, id: ColumnId, viewport: &DragViewport) -> f64 {
        let column = self.column(id);
        match column.fixed {
            Fixed::None => column.left - viewport.scroll_x,
            Fixed::Left => column.left,
            Fixed::Right => column.left + viewport.body_width - viewport.right_fixed_width,
        }
    }

    /// Drop targets for dragging column `id`: one per sibling, including the
    /// column itself, laid out from the column's body position.
    ///
    /// Edges of scrollable siblings that are scrolled under a pinned
    /// partition are marked invisible.
    #[must_use]
    pub fn drop_targets(&self, id: ColumnId, viewport: &DragViewport) -> Vec<DropTarget> {
        let siblings = self.siblings(id);
        let before: f64 = siblings
            .iter()
            .take_while(|&&sibling| sibling != id)
            .map(|&sibling| self.column(sibling).width)
            .sum();
        let scrollable = !self.column(id).fixed.is_fixed();
        let max_right = viewport.body_width - viewport.right_fixed_width;

        let mut left = self.body_left(id, viewport) - before;
        siblings
            .iter()
            .map(|&sibling| {
                let column = self.column(sibling);
                let target = DropTarget {
                    key: column.key.clone(),
                    left,
                    width: column.width,
                    left_side_visible: !scrollable || left >= viewport.left_fixed_width,
                    right_side_visible: !scrollable || left + column.width <= max_right,
                };
                left += column.width;
                target
            })
            .collect()
    }
}

impl ColumnOverrides {
    /// Records that column `source` was dropped on its sibling `target_key`:
    /// the two swap sibling positions.
    ///
    /// Returns `false`, recording nothing, when `target_key` is not a sibling.
    pub fn record_reorder(
        &mut self,
        layout: &ColumnLayout,
        source: ColumnId,
        target_key: &str,
    ) -> bool {
        let siblings = layout.siblings(source);
        let Some(target_index) = siblings
            .iter()
            .position(|&id| layout.column(id).key == target_key)
        else {
            return false;
        };
        let Some(source_index) = siblings.iter().position(|&id| id == source) else {
            return false;
        };
        let source_key = layout.column(source).key.clone();
        self.record_order(source_key, target_index);
        self.record_order(target_key, source_index);
        true
    }
}

/// State of an in-progress column reorder.
#[derive(Clone, Debug)]
pub struct ReorderDrag {
    key: String,
    width: f64,
    targets: Vec<DropTarget>,
    factor: f64,
    min_left: f64,
    max_left: f64,
    left: f64,
    cursor_left: f64,
    moving_left: bool,
    moved: bool,
    current: Option<ReorderUpdate>,
    pointer: PointerDrag,
}

impl ReorderDrag {
    /// Starts dragging column `key` of `width`, whose leading edge is at
    /// `offset_left`, over `targets`, with the pointer pressed at `pointer`.
    ///
    /// The column can travel from the first target's leading edge until its
    /// trailing edge meets the last target's trailing edge.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        width: f64,
        offset_left: f64,
        targets: Vec<DropTarget>,
        factor: f64,
        pointer: Point,
    ) -> Self {
        let (min_left, max_left) = match (targets.first(), targets.last()) {
            (Some(first), Some(last)) => (first.left, last.left + last.width - width),
            _ => (offset_left, offset_left),
        };
        let mut drag = PointerDrag::default();
        drag.start(pointer);
        Self {
            key: key.into(),
            width,
            targets,
            factor,
            min_left,
            max_left,
            left: offset_left,
            cursor_left: offset_left,
            moving_left: false,
            moved: false,
            current: None,
            pointer: drag,
        }
    }

    /// Key of the column being dragged.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Width of the column being dragged.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Current clamped leading edge of the dragged column.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    /// The drop targets the gesture was started with.
    #[must_use]
    pub fn targets(&self) -> &[DropTarget] {
        &self.targets
    }

    /// Follows the pointer to `pos`.
    pub fn pointer_move(&mut self, pos: Point) {
        if let Some(dx) = self.pointer.update(pos) {
            self.apply_delta(dx);
        }
    }

    /// Applies a horizontal pointer movement of `dx`. Zero movement is
    /// ignored so the motion direction is kept.
    pub fn apply_delta(&mut self, dx: f64) {
        if dx == 0.0 {
            return;
        }
        self.cursor_left += dx;
        self.left = self.cursor_left.max(self.min_left).min(self.max_left);
        self.moving_left = dx < 0.0;
        self.moved = true;
    }

    /// Resolves the drop target for the current frame, once the pointer has
    /// moved.
    ///
    /// The side the column is moving towards is searched first. A target
    /// whose matching edge is not visible yields no target key.
    pub fn tick(&mut self) -> Option<ReorderUpdate> {
        if !self.moved {
            return None;
        }
        let found = if self.moving_left {
            self.left_side_target().or_else(|| self.right_side_target())
        } else {
            self.right_side_target().or_else(|| self.left_side_target())
        };
        let (target_key, target_position, is_left_target) = match found {
            Some((target, true)) => (
                target.left_side_visible.then(|| target.key.clone()),
                target.left,
                true,
            ),
            Some((target, false)) => (
                target.right_side_visible.then(|| target.key.clone()),
                target.left + target.width,
                false,
            ),
            None => (None, 0.0, true),
        };
        let update = ReorderUpdate {
            target_key,
            target_position,
            is_left_target,
            position: self.left,
            moving_left: self.moving_left,
        };
        self.current = Some(update.clone());
        Some(update)
    }

    /// Ends the gesture, returning the key of the last resolved target.
    #[must_use]
    pub fn finish(mut self) -> Option<String> {
        self.pointer.end();
        self.current.and_then(|update| update.target_key)
    }

    fn left_side_target(&self) -> Option<(&DropTarget, bool)> {
        let left = self.left;
        self.targets
            .iter()
            .find(|target| {
                target.key != self.key
                    && left > target.left
                    && left < target.left + target.width * self.factor
            })
            .map(|target| (target, true))
    }

    fn right_side_target(&self) -> Option<(&DropTarget, bool)> {
        let right = self.left + self.width;
        self.targets
            .iter()
            .rev()
            .find(|target| {
                target.key != self.key
                    && right < target.left + target.width
                    && right > target.left + target.width * (1.0 - self.factor)
            })
            .map(|target| (target, false))
    }
}

/// Scrolls the body while a scrollable column is dragged near a pinned edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoScroll {
    /// Distance from a pinned partition's edge that triggers scrolling.
    pub buffer: f64,
    /// Distance scrolled per frame.
    pub speed: f64,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            buffer: 50.0,
            speed: 15.0,
        }
    }
}

impl AutoScroll {
    /// The scroll position to move to for a frame of `update` while dragging
    /// a column of `column_width` pinned as `fixed`, if any.
    #[must_use]
    pub fn scroll_target(
        &self,
        viewport: &DragViewport,
        fixed: Fixed,
        column_width: f64,
        update: &ReorderUpdate,
    ) -> Option<f64> {
        if fixed.is_fixed() {
            return None;
        }
        let scroll_x = viewport.scroll_x;
        let target = if update.moving_left {
            if scroll_x > 0.0 && update.position < viewport.left_fixed_width + self.buffer {
                (scroll_x - self.speed).max(0.0)
            } else {
                scroll_x
            }
        } else if scroll_x < viewport.max_scroll_x
            && update.position + column_width
                > viewport.body_width - viewport.right_fixed_width - self.buffer
        {
            (scroll_x + self.speed).min(viewport.max_scroll_x)
        } else {
            scroll_x
        };
        (target != scroll_x).then_some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::ColumnDef;
    use crate::layout::{Partition, compute_column_layout};
    use alloc::vec;

    fn target(key: &str, left: f64, width: f64) -> DropTarget {
        DropTarget {
            key: key.into(),
            left,
            width,
            left_side_visible: true,
            right_side_visible: true,
        }
    }

    fn row_of_targets() -> Vec<DropTarget> {
        vec![
            target("a", 0.0, 100.0),
            target("b", 100.0, 100.0),
            target("c", 200.0, 100.0),
        ]
    }

    #[test]
    fn travel_is_clamped_to_targets() {
        let mut drag = ReorderDrag::new("b", 100.0, 100.0, row_of_targets(), 0.75, Point::ZERO);
        drag.apply_delta(-500.0);
        assert_eq!(drag.left(), 0.0);
        drag.apply_delta(1000.0);
        assert_eq!(drag.left(), 200.0);
    }

    #[test]
    fn no_update_before_movement() {
        let mut drag = ReorderDrag::new("b", 100.0, 100.0, row_of_targets(), 0.75, Point::ZERO);
        assert_eq!(drag.tick(), None);
        assert_eq!(drag.finish(), None);
    }

    #[test]
    fn moving_left_finds_left_side_target() {
        let mut drag = ReorderDrag::new("b", 100.0, 100.0, row_of_targets(), 0.75, Point::ZERO);
        drag.pointer_move(Point::new(-40.0, 0.0));
        let update = drag.tick().unwrap();
        assert_eq!(update.target_key.as_deref(), Some("a"));
        assert_eq!(update.target_position, 0.0);
        assert!(update.is_left_target);
        assert!(update.moving_left);
        assert_eq!(update.position, 60.0);
        assert_eq!(drag.finish().as_deref(), Some("a"));
    }

    #[test]
    fn moving_right_finds_right_side_target() {
        let mut drag = ReorderDrag::new("b", 100.0, 100.0, row_of_targets(), 0.75, Point::ZERO);
        drag.apply_delta(50.0);
        let update = drag.tick().unwrap();
        // Trailing edge at 250 lies in c's last three quarters.
        assert_eq!(update.target_key.as_deref(), Some("c"));
        assert_eq!(update.target_position, 300.0);
        assert!(!update.is_left_target);
    }

    #[test]
    fn small_moves_find_no_target() {
        let mut drag = ReorderDrag::new("b", 100.0, 100.0, row_of_targets(), 0.75, Point::ZERO);
        drag.apply_delta(10.0);
        // Trailing edge at 210 is inside c's leading quarter.
        assert_eq!(drag.tick().unwrap().target_key, None);
    }

    #[test]
    fn hidden_edge_yields_no_target() {
        let mut targets = row_of_targets();
        targets[0].left_side_visible = false;
        let mut drag = ReorderDrag::new("b", 100.0, 100.0, targets, 0.75, Point::ZERO);
        drag.apply_delta(-40.0);
        let update = drag.tick().unwrap();
        assert_eq!(update.target_key, None);
        assert_eq!(update.target_position, 0.0);
    }

    #[test]
    fn drop_targets_follow_scroll() {
        let defs = vec![
            ColumnDef::leaf("pin", 50.0).with_fixed(Fixed::Left),
            ColumnDef::leaf("a", 100.0),
            ColumnDef::leaf("b", 100.0),
            ColumnDef::leaf("c", 100.0),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        let viewport = DragViewport {
            scroll_x: 80.0,
            max_scroll_x: 150.0,
            body_width: 200.0,
            left_fixed_width: 50.0,
            right_fixed_width: 0.0,
        };
        let b = layout.find("b").unwrap();
        assert_eq!(layout.body_left(b, &viewport), 70.0);
        let targets = layout.drop_targets(b, &viewport);
        let lefts: Vec<f64> = targets.iter().map(|t| t.left).collect();
        assert_eq!(lefts, vec![-30.0, 70.0, 170.0]);
        assert!(!targets[0].left_side_visible);
        assert!(targets[1].left_side_visible);
        assert!(!targets[2].right_side_visible);

        let pin = layout.find("pin").unwrap();
        let targets = layout.drop_targets(pin, &viewport);
        assert_eq!(targets.len(), 1);
        assert!(targets[0].left_side_visible && targets[0].right_side_visible);
    }

    #[test]
    fn right_pinned_columns_anchor_at_body_edge() {
        let defs = vec![
            ColumnDef::leaf("a", 100.0),
            ColumnDef::leaf("r1", 40.0).with_fixed(Fixed::Right),
            ColumnDef::leaf("r2", 60.0).with_fixed(Fixed::Right),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        let viewport = DragViewport {
            body_width: 300.0,
            right_fixed_width: 100.0,
            ..DragViewport::default()
        };
        let r2 = layout.find("r2").unwrap();
        assert_eq!(layout.body_left(r2, &viewport), 240.0);
        let lefts: Vec<f64> = layout
            .drop_targets(r2, &viewport)
            .iter()
            .map(|t| t.left)
            .collect();
        assert_eq!(lefts, vec![200.0, 240.0]);
    }

    #[test]
    fn record_reorder_swaps_positions() {
        let defs = vec![
            ColumnDef::leaf("a", 10.0),
            ColumnDef::leaf("b", 10.0),
            ColumnDef::leaf("c", 10.0),
        ];
        let mut overrides = ColumnOverrides::new();
        let layout = compute_column_layout(&defs, &overrides, 0.0);
        let a = layout.find("a").unwrap();
        assert!(overrides.record_reorder(&layout, a, "c"));
        assert_eq!(overrides.order("a"), Some(2));
        assert_eq!(overrides.order("c"), Some(0));
        assert!(!overrides.record_reorder(&layout, a, "missing"));

        let layout = compute_column_layout(&defs, &overrides, 0.0);
        let keys: Vec<&str> = layout
            .leaves(Partition::Scrollable)
            .iter()
            .map(|&id| layout.column(id).key.as_str())
            .collect();
        assert_eq!(keys, ["c", "b", "a"]);
    }

    #[test]
    fn auto_scroll_near_edges() {
        let auto = AutoScroll::default();
        let viewport = DragViewport {
            scroll_x: 100.0,
            max_scroll_x: 500.0,
            body_width: 400.0,
            left_fixed_width: 50.0,
            right_fixed_width: 50.0,
        };
        let mut update = ReorderUpdate {
            target_key: None,
            target_position: 0.0,
            is_left_target: true,
            position: 60.0,
            moving_left: true,
        };
        assert_eq!(auto.scroll_target(&viewport, Fixed::None, 100.0, &update), Some(85.0));
        assert_eq!(auto.scroll_target(&viewport, Fixed::Left, 100.0, &update), None);

        update.position = 200.0;
        assert_eq!(auto.scroll_target(&viewport, Fixed::None, 100.0, &update), None);

        update.moving_left = false;
        update.position = 220.0;
        // Trailing edge 320 passes 400 - 50 - 50.
        assert_eq!(auto.scroll_target(&viewport, Fixed::None, 100.0, &update), Some(115.0));

        let at_end = DragViewport {
            scroll_x: 500.0,
            ..viewport
        };
        assert_eq!(auto.scroll_target(&at_end, Fixed::None, 100.0, &update), None);
    }
}
