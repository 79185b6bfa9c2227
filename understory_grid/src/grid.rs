// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid controller.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use tracing::{debug, trace};
use understory_grid_axis::{AxisScrollHelper, ItemBuffer, ItemSizer, ScrollState, SizeGetter};
use understory_grid_columns::{
    ColumnId, ColumnOverrides, Fixed, Partition, ReorderDrag, ResizeDrag, compute_column_layout,
};
use understory_timing::{Debounce, FrameHandle, FrameLoop, FrameScheduler, TimerHandle, TimerHost};

use crate::event::GridEvent;
use crate::props::{GridProps, GridPropsError, same_getter};
use crate::state::{GridPatch, GridState};

/// A scrollable leaf column materialized for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedColumn {
    /// Slot the column is rendered in; stable while it stays materialized.
    pub slot: usize,
    /// Index among the scrollable leaves.
    pub index: usize,
    /// The leaf in [`GridState::columns`].
    pub id: ColumnId,
    /// Leading edge within the scrollable content.
    pub offset_left: f64,
}

/// Scroll helpers and windowing buffers for both axes.
#[derive(Debug)]
struct Axes {
    vertical: AxisScrollHelper,
    horizontal: AxisScrollHelper,
    rows: ItemBuffer,
    /// Row count, default row extent and body height the row buffer was built for.
    rows_key: (usize, f64, f64),
    columns: ItemBuffer,
    /// Scrollable leaf widths and viewport the column buffer was built for.
    columns_key: (Vec<f64>, f64),
}

impl Axes {
    fn empty() -> Self {
        let zero: SizeGetter = Rc::new(|_| 0.0);
        Self {
            vertical: AxisScrollHelper::new(0, 0.0, ItemSizer::default()),
            horizontal: AxisScrollHelper::measured(0, 0.0, ItemSizer::default()),
            rows: ItemBuffer::measured(0, 0.0, zero.clone(), None),
            rows_key: (0, 0.0, 0.0),
            columns: ItemBuffer::measured(0, 0.0, zero, None),
            columns_key: (Vec::new(), 0.0),
        }
    }
}

#[derive(Debug)]
enum Gesture {
    Resize(ResizeDrag),
    Reorder {
        drag: ReorderDrag,
        column: ColumnId,
        fixed: Fixed,
        start_scroll_x: f64,
    },
}

/// A virtualized grid.
///
/// The grid owns the scroll state of both axes, decides which rows and
/// scrollable columns to materialize, and runs header gestures. It never
/// renders: the host reads [`Grid::state`] and the `*_to_render` queries,
/// forwards input, and delivers timer and frame callbacks through the
/// [`understory_timing`] traits.
///
/// Host notifications are queued and collected with [`Grid::drain_events`].
#[derive(Debug)]
pub struct Grid {
    props: GridProps,
    state: GridState,
    overrides: ColumnOverrides,
    axes: Axes,
    idle: Debounce,
    frames: FrameLoop,
    gesture: Option<Gesture>,
    events: Vec<GridEvent>,
    reported_content_height: Option<f64>,
}

impl Grid {
    /// Creates a grid scrolled to the origin, or to the scroll commands in
    /// `props`.
    ///
    /// Fails when [`GridProps::validate`] does.
    pub fn new(props: GridProps) -> Result<Self, GridPropsError> {
        props.validate()?;
        let overrides = ColumnOverrides::new();
        let mut axes = Axes::empty();
        let state = calculate_state(&props, None, &overrides, &mut axes);
        let mut grid = Self {
            idle: Debounce::new(props.options.scroll_idle_wait),
            props,
            state,
            overrides,
            axes,
            frames: FrameLoop::new(),
            gesture: None,
            events: Vec::new(),
            reported_content_height: None,
        };
        grid.report_content_height();
        Ok(grid)
    }

    /// The props last applied.
    #[must_use]
    pub fn props(&self) -> &GridProps {
        &self.props
    }

    /// The current state snapshot.
    #[must_use]
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Widths and orders recorded by header gestures.
    #[must_use]
    pub fn overrides(&self) -> &ColumnOverrides {
        &self.overrides
    }

    /// Forgets all recorded widths and orders.
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
        self.recalculate(None);
    }

    /// Removes and returns the queued notifications.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        core::mem::take(&mut self.events)
    }

    /// Applies new props.
    ///
    /// Pending scroll settling is flushed first. Row scroll state survives
    /// unless the row count, row height or height changed, in which case the
    /// first visible row is kept in place.
    ///
    /// Props that fail [`GridProps::validate`] are rejected and the grid is
    /// left untouched.
    pub fn set_props(
        &mut self,
        props: GridProps,
        timers: &mut impl TimerHost,
    ) -> Result<(), GridPropsError> {
        props.validate()?;
        if props.owner_height != self.props.owner_height
            || props.scroll_top != self.props.scroll_top
            || props.scroll_left != self.props.scroll_left
        {
            self.did_scroll_start();
        }
        self.idle.reset(timers);
        self.did_scroll_stop();
        if props.options.scroll_idle_wait != self.idle.wait() {
            self.idle = Debounce::new(props.options.scroll_idle_wait);
        }
        let old = core::mem::replace(&mut self.props, props);
        self.recalculate(Some(&old));
        Ok(())
    }

    /// Handles wheel input. The dominant axis scrolls by its delta, if it
    /// has a scrollbar.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64, timers: &mut impl TimerHost) {
        self.did_scroll_start();
        if delta_y.abs() > delta_x.abs() && self.state.show_scrollbar_y {
            self.do_vertical_scroll(delta_y, true);
        } else if delta_x != 0.0 && self.state.show_scrollbar_x {
            self.do_horizontal_scroll(delta_x, true);
        }
        self.idle.trigger(timers);
    }

    /// Scrolls horizontally to `scroll_x`, as a scrollbar drag does.
    pub fn scroll_x_to(&mut self, scroll_x: f64, timers: &mut impl TimerHost) {
        if scroll_x == self.state.scroll_x {
            return;
        }
        self.did_scroll_start();
        self.do_horizontal_scroll(scroll_x, false);
        self.idle.trigger(timers);
    }

    /// Scrolls vertically to `scroll_y`, as a scrollbar drag does.
    pub fn scroll_y_to(&mut self, scroll_y: f64, timers: &mut impl TimerHost) {
        if scroll_y == self.state.scroll_y {
            return;
        }
        self.did_scroll_start();
        self.do_vertical_scroll(scroll_y, false);
        self.idle.trigger(timers);
    }

    /// Returns `true` if a horizontal wheel delta would move the grid, so the
    /// host should consume it rather than let an outer container scroll.
    #[must_use]
    pub fn should_handle_wheel_x(&self, delta: f64) -> bool {
        should_handle_wheel(
            delta,
            self.state.show_scrollbar_x,
            self.state.scroll_x,
            self.state.max_scroll_x,
        )
    }

    /// Vertical counterpart of [`Self::should_handle_wheel_x`].
    #[must_use]
    pub fn should_handle_wheel_y(&self, delta: f64) -> bool {
        should_handle_wheel(
            delta,
            self.state.show_scrollbar_y,
            self.state.scroll_y,
            self.state.max_scroll_y,
        )
    }

    /// Delivers an elapsed timer. Returns `true` if it was the grid's idle
    /// timer, which ends scrolling and widens the materialized windows.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if !self.idle.fire(handle) {
            return false;
        }
        self.did_scroll_stop();
        true
    }

    /// Materialized rows, slot → row index.
    #[must_use]
    pub fn rows_to_render(&self) -> &[usize] {
        &self.state.rows_to_render
    }

    /// Top edge of row `index` within the content, re-validating its height.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the row count.
    pub fn row_position(&mut self, index: usize) -> f64 {
        self.axes.vertical.item_position(index)
    }

    /// Materialized scrollable leaves in slot order, with their offsets.
    pub fn scrollable_leaves_to_render(&mut self) -> Vec<RenderedColumn> {
        let leaves = self.state.columns.leaves(Partition::Scrollable);
        let horizontal = &mut self.axes.horizontal;
        self.state
            .scrollable_columns_to_render
            .iter()
            .enumerate()
            .filter(|&(_, &index)| index < leaves.len())
            .map(|(slot, &index)| RenderedColumn {
                slot,
                index,
                id: leaves[index],
                offset_left: horizontal.item_position(index),
            })
            .collect()
    }

    /// The top-level columns containing `leaves`, each once, in order of
    /// first appearance. Group headers are rendered from these.
    #[must_use]
    pub fn top_level_columns(&self, leaves: &[RenderedColumn]) -> Vec<ColumnId> {
        let mut tops = Vec::new();
        for leaf in leaves {
            let top = self.state.columns.top_level_ancestor(leaf.id);
            if !tops.contains(&top) {
                tops.push(top);
            }
        }
        tops
    }

    /// Starts resizing `column` with the pointer pressed at `pointer`.
    ///
    /// Right-pinned columns resize towards the left. Returns `false` if a
    /// gesture is already running.
    pub fn begin_column_resize(
        &mut self,
        column: ColumnId,
        pointer: Point,
        frames: &mut impl FrameScheduler,
    ) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let layout = &self.state.columns;
        let target = layout.column(column);
        let (key, width) = (target.key.clone(), target.width);
        let drag = ResizeDrag::new(
            key.clone(),
            width,
            target.min_width,
            target.max_width,
            target.fixed == Fixed::Right,
            layout.body_left(column, &self.state.drag_viewport()),
            pointer,
        );
        debug!(key = key.as_str(), width, "column resize started");
        self.events.push(GridEvent::ColumnResize {
            key: key.clone(),
            width,
        });
        self.apply(GridPatch::ColumnResizing(Some(key)));
        self.gesture = Some(Gesture::Resize(drag));
        self.frames.start(frames);
        true
    }

    /// Starts reordering `column` among its siblings with the pointer pressed
    /// at `pointer`. Returns `false` if a gesture is already running.
    pub fn begin_column_reorder(
        &mut self,
        column: ColumnId,
        pointer: Point,
        frames: &mut impl FrameScheduler,
    ) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let layout = &self.state.columns;
        let viewport = self.state.drag_viewport();
        let target = layout.column(column);
        let key = target.key.clone();
        let drag = ReorderDrag::new(
            key.clone(),
            target.width,
            layout.body_left(column, &viewport),
            layout.drop_targets(column, &viewport),
            self.props.options.reorder_factor,
            pointer,
        );
        let fixed = target.fixed;
        debug!(key = key.as_str(), "column reorder started");
        self.events.push(GridEvent::ColumnReorder { key: key.clone() });
        self.apply(GridPatch::ColumnReordering(Some(key)));
        self.gesture = Some(Gesture::Reorder {
            drag,
            column,
            fixed,
            start_scroll_x: self.state.scroll_x,
        });
        self.frames.start(frames);
        true
    }

    /// Follows the pointer during a gesture. Updates are reported on the next
    /// frame.
    pub fn pointer_move(&mut self, pos: Point) {
        match &mut self.gesture {
            Some(Gesture::Resize(drag)) => drag.pointer_move(pos),
            Some(Gesture::Reorder { drag, .. }) => drag.pointer_move(pos),
            None => {}
        }
    }

    /// Delivers a frame callback. Returns `true` if it was the gesture's
    /// frame.
    ///
    /// Reordering a scrollable column near a pinned partition scrolls the
    /// body here.
    pub fn on_frame(&mut self, handle: FrameHandle, frames: &mut impl FrameScheduler) -> bool {
        if !self.frames.on_frame(handle, frames) {
            return false;
        }
        let mut scroll_to = None;
        let mut reordering = None;
        match &mut self.gesture {
            Some(Gesture::Resize(drag)) => {
                if let Some(resize) = drag.tick() {
                    trace!(key = resize.key.as_str(), width = resize.width, "column resizing");
                    self.events.push(GridEvent::ColumnResizing {
                        key: resize.key,
                        width: resize.width,
                    });
                }
            }
            Some(Gesture::Reorder { drag, fixed, .. }) => {
                if let Some(update) = drag.tick() {
                    trace!(
                        key = drag.key(),
                        position = update.position,
                        moving_left = update.moving_left,
                        "column reordering"
                    );
                    scroll_to = self.props.options.auto_scroll().scroll_target(
                        &self.state.drag_viewport(),
                        *fixed,
                        drag.width(),
                        &update,
                    );
                    reordering = Some(GridEvent::ColumnReordering {
                        key: String::from(drag.key()),
                        target_key: update.target_key,
                    });
                }
            }
            None => {}
        }
        if let Some(scroll_x) = scroll_to {
            self.do_horizontal_scroll(scroll_x, false);
        }
        self.events.extend(reordering);
        true
    }

    /// Ends the running gesture and records its outcome.
    ///
    /// A resize records the final width, a reorder swaps the column with the
    /// sibling it was dropped on; either way the state is recomputed.
    pub fn pointer_up(&mut self, frames: &mut impl FrameScheduler) {
        self.frames.stop(frames);
        match self.gesture.take() {
            Some(Gesture::Resize(drag)) => {
                let resize = drag.finish();
                debug!(key = resize.key.as_str(), width = resize.width, "column resized");
                self.events.push(GridEvent::ColumnResized {
                    key: resize.key.clone(),
                    width: resize.width,
                });
                self.overrides.record_width(resize.key, resize.width);
                self.apply(GridPatch::ColumnResizing(None));
                self.recalculate(None);
            }
            Some(Gesture::Reorder {
                drag,
                column,
                start_scroll_x,
                ..
            }) => {
                let key = String::from(drag.key());
                let target_key = drag.finish();
                if let Some(target) = &target_key {
                    let recorded =
                        self.overrides
                            .record_reorder(&self.state.columns, column, target);
                    debug!(key = key.as_str(), target = target.as_str(), recorded, "column reordered");
                }
                self.events.push(GridEvent::ColumnReordered { key, target_key });
                if self.state.scroll_x != start_scroll_x {
                    self.events
                        .push(GridEvent::HorizontalScroll(self.state.scroll_x));
                }
                self.apply(GridPatch::ColumnReordering(None));
                self.recalculate(None);
            }
            None => {}
        }
    }

    /// Abandons the running gesture without recording anything.
    pub fn cancel_gestures(&mut self, frames: &mut impl FrameScheduler) {
        self.frames.stop(frames);
        if self.gesture.take().is_some() {
            debug!("column gesture cancelled");
            self.apply(GridPatch::ColumnResizing(None));
            self.apply(GridPatch::ColumnReordering(None));
        }
    }

    /// Cancels every pending callback, settling any scroll in progress
    /// immediately. Call before dropping a grid whose host still holds
    /// handles.
    pub fn teardown(&mut self, timers: &mut impl TimerHost, frames: &mut impl FrameScheduler) {
        self.cancel_gestures(frames);
        self.idle.reset(timers);
        self.did_scroll_stop();
    }

    fn apply(&mut self, patch: GridPatch) {
        let state = core::mem::take(&mut self.state);
        self.state = state.reduce(patch);
    }

    fn recalculate(&mut self, old_props: Option<&GridProps>) {
        let old_props = old_props.unwrap_or(&self.props);
        let state = calculate_state(
            &self.props,
            Some((old_props, &self.state)),
            &self.overrides,
            &mut self.axes,
        );
        self.state = state;
        self.report_content_height();
    }

    fn did_scroll_start(&mut self) {
        if self.state.scrolling {
            return;
        }
        debug!(
            scroll_x = self.state.scroll_x,
            scroll_y = self.state.scroll_y,
            "scroll started"
        );
        self.events.push(GridEvent::ScrollStart {
            scroll_x: self.state.scroll_x,
            scroll_y: self.state.scroll_y,
            first_row_index: self.state.first_row_index,
        });
        self.apply(GridPatch::Scrolling(true));
    }

    fn did_scroll_stop(&mut self) {
        if !self.state.scrolling {
            return;
        }
        self.apply(GridPatch::Scrolling(false));
        let rows_to_render = self.axes.rows.get_items_with_updated_buffer().to_vec();
        let columns_to_render = self.axes.columns.get_items_with_updated_buffer().to_vec();
        self.apply(GridPatch::Windows {
            rows_to_render,
            columns_to_render,
        });
        debug!(
            scroll_x = self.state.scroll_x,
            scroll_y = self.state.scroll_y,
            rows = self.state.rows_to_render.len(),
            "scroll ended"
        );
        self.events.push(GridEvent::ScrollEnd {
            scroll_x: self.state.scroll_x,
            scroll_y: self.state.scroll_y,
            first_row_index: self.state.first_row_index,
        });
    }

    fn do_vertical_scroll(&mut self, value: f64, relative: bool) {
        let value = libm::round(value);
        let scroll = if relative {
            self.axes.vertical.scroll_by(value)
        } else {
            self.axes.vertical.scroll_to(value)
        };
        trace!(position = scroll.position, index = scroll.index, "vertical scroll");
        self.events.push(GridEvent::VerticalScroll(scroll.position));
        let max_scroll_y = (scroll.content_extent - self.state.body_height).max(0.0);
        let rows_to_render = window(&mut self.axes.rows, scroll, self.state.scrolling);
        self.apply(GridPatch::Vertical {
            scroll,
            max_scroll_y,
            rows_to_render,
        });
        self.report_content_height();
    }

    fn do_horizontal_scroll(&mut self, value: f64, relative: bool) {
        let value = libm::round(value);
        let scroll = if relative {
            self.axes.horizontal.scroll_by(value)
        } else {
            self.axes.horizontal.scroll_to(value)
        };
        trace!(position = scroll.position, index = scroll.index, "horizontal scroll");
        self.events.push(GridEvent::HorizontalScroll(scroll.position));
        let content_width =
            self.state.left_fixed_width() + self.state.right_fixed_width() + scroll.content_extent;
        let max_scroll_x = (content_width - self.state.body_width).max(0.0);
        let columns_to_render = window(&mut self.axes.columns, scroll, self.state.scrolling);
        self.apply(GridPatch::Horizontal {
            scroll,
            max_scroll_x,
            columns_to_render,
        });
    }

    fn report_content_height(&mut self) {
        let state = &self.state;
        let required = state.content_height + state.reserved_height;
        let content_height = match (self.props.max_height, self.props.owner_height) {
            (Some(max_height), _) if state.use_max_height && max_height > required => required,
            (_, Some(owner_height)) if state.height > required => required.max(owner_height),
            _ => state.height + state.max_scroll_y,
        };
        if self.reported_content_height != Some(content_height) {
            debug!(content_height, "content height changed");
            self.reported_content_height = Some(content_height);
            self.events.push(GridEvent::ContentHeightChange(content_height));
        }
    }
}

fn should_handle_wheel(delta: f64, scrollbar: bool, position: f64, max_position: f64) -> bool {
    if !scrollbar {
        return false;
    }
    let delta = libm::round(delta);
    if delta == 0.0 {
        return false;
    }
    (delta < 0.0 && position > 0.0) || (delta > 0.0 && position < max_position)
}

/// Materializes the window at `scroll`, widened by the buffer unless input
/// is still arriving.
fn window(buffer: &mut ItemBuffer, scroll: ScrollState, scrolling: bool) -> Vec<usize> {
    buffer.get_items(scroll.index, scroll.offset);
    if !scrolling {
        buffer.get_items_with_updated_buffer();
    }
    buffer.items().to_vec()
}

fn calculate_state(
    props: &GridProps,
    previous: Option<(&GridProps, &GridState)>,
    overrides: &ColumnOverrides,
    axes: &mut Axes,
) -> GridState {
    let outer_height = props.height.or(props.max_height).unwrap_or_default();
    let old_props = previous.map(|(props, _)| props);
    let old_state = previous.map(|(_, state)| state);

    let border = props.effective_border();
    let reserved_border = 2.0 * border;
    let viewport_width = props.width - reserved_border;

    let mut columns = compute_column_layout(&props.columns, overrides, viewport_width);
    if props.options.shrink_to_fit && columns.content_width() > viewport_width {
        let exceed = columns.content_width() - viewport_width;
        columns.shrink_columns_width(exceed);
    }

    let header_height = columns.depth() as f64 * props.header_row_height;
    let use_max_height = props.height.is_none();
    let viewport_height = outer_height - header_height - props.footer_height - reserved_border;

    let mut row_anchor = old_state.map_or((0, 0.0), |s| (s.first_row_index, s.first_row_offset));
    let mut column_anchor =
        old_state.map_or((0, 0.0), |s| (s.first_column_index, s.first_column_offset));
    let mut scroll_x = old_state.map_or(0.0, |s| s.scroll_x);
    let mut scroll_y = old_state.map_or(0.0, |s| s.scroll_y);

    let rebuild_rows = old_props.is_none_or(|old| {
        props.row_count != old.row_count
            || props.row_height != old.row_height
            || props.sub_row_height != old.sub_row_height
            || props.height != old.height
    });
    let mut getters_changed = false;
    if rebuild_rows {
        axes.vertical = AxisScrollHelper::new(props.row_count, viewport_height, props.row_sizer());
    } else if let Some(old) = old_props {
        if !same_getter(&props.row_height_getter, &old.row_height_getter) {
            axes.vertical
                .set_size_getter(props.row_height_getter.clone());
            getters_changed = true;
        }
        if !same_getter(&props.sub_row_height_getter, &old.sub_row_height_getter) {
            axes.vertical
                .set_sub_size_getter(props.sub_row_height_getter.clone());
            getters_changed = true;
        }
    }

    let content_width = columns.content_width();
    let estimated_height = axes.vertical.content_extent();
    let show_scrollbar_x = content_width > viewport_width + border;
    let show_scrollbar_y = estimated_height > viewport_height;
    let scrollbar = props.options.scrollbar_size;
    let reserved_height = props.footer_height
        + header_height
        + reserved_border
        + if show_scrollbar_x { scrollbar } else { 0.0 };
    let height = if use_max_height && !show_scrollbar_y {
        estimated_height + reserved_height
    } else {
        libm::round(outer_height)
    };
    let body_width = viewport_width - if show_scrollbar_y { scrollbar } else { 0.0 };
    let body_height = height - reserved_height;
    axes.vertical.set_viewport_extent(body_height);

    // Vertical scroll commands, applied against the final body height.
    let mut vertical = None;
    if rebuild_rows && old_state.is_some() {
        vertical = Some(axes.vertical.scroll_to_item(row_anchor.0, row_anchor.1));
    }
    if let Some(row) = props.scroll_to_row
        && (old_props.and_then(|p| p.scroll_to_row) != Some(row)
            || old_state.map(|s| s.body_height) != Some(body_height))
    {
        vertical = Some(axes.vertical.scroll_item_into_view(row));
    }
    if let Some(top) = props.scroll_top
        && old_props.and_then(|p| p.scroll_top) != Some(top)
    {
        vertical = Some(axes.vertical.scroll_to(top));
    }
    let content_height = axes.vertical.content_extent();
    let max_scroll_y = (content_height - body_height).max(0.0);
    if let Some(scroll) = vertical {
        row_anchor = (scroll.index, scroll.offset);
        scroll_y = scroll.position;
    }
    if scroll_y > max_scroll_y {
        let scroll = axes.vertical.scroll_to(max_scroll_y);
        row_anchor = (scroll.index, scroll.offset);
        scroll_y = scroll.position;
    }

    let scrollable_viewport = body_width
        - columns.partition_width(Partition::LeftFixed)
        - columns.partition_width(Partition::RightFixed);
    let widths: Vec<f64> = columns
        .leaves(Partition::Scrollable)
        .iter()
        .map(|&id| columns.column(id).width)
        .collect();
    let width_getter = || -> SizeGetter {
        let widths: Rc<[f64]> = Rc::from(widths.as_slice());
        Rc::new(move |index| widths[index])
    };
    let columns_changed = old_state.is_none() || axes.columns_key.0 != widths;
    if columns_changed {
        axes.horizontal = AxisScrollHelper::measured(
            widths.len(),
            scrollable_viewport,
            ItemSizer::from_getter(0.0, width_getter()),
        );
        if old_state.is_some() {
            let scroll = axes.horizontal.scroll_to(scroll_x);
            column_anchor = (scroll.index, scroll.offset);
            scroll_x = scroll.position;
        }
    } else {
        axes.horizontal.set_viewport_extent(scrollable_viewport);
    }
    if columns_changed || axes.columns_key.1 != scrollable_viewport {
        axes.columns = ItemBuffer::measured(
            widths.len(),
            scrollable_viewport,
            width_getter(),
            props.buffer_column_count,
        );
        axes.columns_key = (widths, scrollable_viewport);
    }

    // Horizontal scroll commands.
    let mut horizontal = None;
    if let Some(column) = props.scroll_to_column
        && old_props.and_then(|p| p.scroll_to_column) != Some(column)
    {
        let left_count = columns.leaves(Partition::LeftFixed).len();
        let last = axes.horizontal.item_count().saturating_sub(1);
        let index = column.saturating_sub(left_count).min(last);
        horizontal = Some(axes.horizontal.scroll_to_item(index, 0.0));
    }
    if let Some(left) = props.scroll_left
        && old_props.and_then(|p| p.scroll_left) != Some(left)
    {
        horizontal = Some(axes.horizontal.scroll_to(left));
    }
    if let Some(scroll) = horizontal {
        column_anchor = (scroll.index, scroll.offset);
        scroll_x = scroll.position;
    }
    let max_scroll_x = (content_width - body_width).max(0.0);
    if scroll_x > max_scroll_x {
        let scroll = axes.horizontal.scroll_to(max_scroll_x);
        column_anchor = (scroll.index, scroll.offset);
        scroll_x = scroll.position;
    }

    let rows_key = (
        props.row_count,
        props.row_height + props.sub_row_height,
        body_height,
    );
    if rebuild_rows || getters_changed || axes.rows_key != rows_key {
        let sizer = props.row_sizer();
        let default_size = sizer.default_size();
        axes.rows = ItemBuffer::new(
            props.row_count,
            default_size,
            body_height,
            Rc::new(move |index| sizer.size_of(index)),
            props.buffer_row_count,
        );
        axes.rows_key = rows_key;
    }

    let scrolling = old_state.is_some_and(|s| s.scrolling);
    let rows_to_render = window(
        &mut axes.rows,
        ScrollState {
            index: row_anchor.0,
            offset: row_anchor.1,
            ..ScrollState::EMPTY
        },
        scrolling,
    );
    let scrollable_columns_to_render = window(
        &mut axes.columns,
        ScrollState {
            index: column_anchor.0,
            offset: column_anchor.1,
            ..ScrollState::EMPTY
        },
        scrolling,
    );

    debug!(
        rows = props.row_count,
        leaves = columns.leaf_count(),
        body_width,
        body_height,
        scroll_x,
        scroll_y,
        "grid state recalculated"
    );

    GridState {
        columns,
        row_count: props.row_count,
        height,
        use_max_height,
        header_height,
        reserved_height,
        viewport_width,
        viewport_height,
        body_width,
        body_height,
        content_width,
        content_height,
        first_row_index: row_anchor.0,
        first_row_offset: row_anchor.1,
        first_column_index: column_anchor.0,
        first_column_offset: column_anchor.1,
        scroll_x,
        scroll_y,
        max_scroll_x,
        max_scroll_y,
        show_scrollbar_x,
        show_scrollbar_y,
        rows_to_render,
        scrollable_columns_to_render,
        column_resizing_key: old_state.and_then(|s| s.column_resizing_key.clone()),
        column_reordering_key: old_state.and_then(|s| s.column_reordering_key.clone()),
        scrolling,
    }
}
