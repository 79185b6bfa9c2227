// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied grid configuration.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use understory_grid_axis::{ItemSizer, SizeGetter};
use understory_grid_columns::{AutoScroll, ColumnDef, DEFAULT_REORDER_FACTOR, DuplicateKeyError};
use understory_timing::DEFAULT_IDLE_WAIT;

/// Thickness of a scrollbar.
pub const SCROLLBAR_SIZE: f64 = 15.0;

/// Tuning knobs that rarely change over a grid's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    /// See [`DEFAULT_REORDER_FACTOR`].
    pub reorder_factor: f64,
    /// Distance from a pinned partition within which a reordered column
    /// scrolls the body.
    pub drag_scroll_buffer: f64,
    /// Distance scrolled per frame while reordering near a pinned partition.
    pub drag_scroll_speed: f64,
    /// Quiet period after the last scroll before scrolling counts as ended.
    pub scroll_idle_wait: Duration,
    /// Thickness reserved for each visible scrollbar.
    pub scrollbar_size: f64,
    /// Shrink columns to fit the viewport instead of scrolling horizontally.
    pub shrink_to_fit: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            reorder_factor: DEFAULT_REORDER_FACTOR,
            drag_scroll_buffer: 50.0,
            drag_scroll_speed: 15.0,
            scroll_idle_wait: DEFAULT_IDLE_WAIT,
            scrollbar_size: SCROLLBAR_SIZE,
            shrink_to_fit: false,
        }
    }
}

impl GridOptions {
    /// Auto-scroll parameters for column reordering.
    #[must_use]
    pub fn auto_scroll(&self) -> AutoScroll {
        AutoScroll {
            buffer: self.drag_scroll_buffer,
            speed: self.drag_scroll_speed,
        }
    }
}

/// Everything the host decides about a grid.
///
/// Either `height` or `max_height` must be set. With only `max_height`, the
/// grid shrinks to its content when that fits.
///
/// The scroll fields are commands: each is applied when it differs from the
/// value in the previous props, so hosts can leave them set.
#[derive(Clone)]
pub struct GridProps {
    /// Column tree.
    pub columns: Vec<ColumnDef>,
    /// Number of data rows.
    pub row_count: usize,
    /// Outer width, including borders and the vertical scrollbar.
    pub width: f64,
    /// Fixed outer height.
    pub height: Option<f64>,
    /// Upper bound on the outer height when `height` is not set.
    pub max_height: Option<f64>,
    /// Height of the host's container, used when reporting content height.
    pub owner_height: Option<f64>,
    /// Height reserved below the body.
    pub footer_height: f64,
    /// Height of a row, and the estimate for rows not measured yet.
    pub row_height: f64,
    /// Per-row heights.
    pub row_height_getter: Option<SizeGetter>,
    /// Height of one header row; nested column groups stack header rows.
    pub header_row_height: f64,
    /// Height of the expandable area under every row.
    pub sub_row_height: f64,
    /// Per-row sub row heights.
    pub sub_row_height_getter: Option<SizeGetter>,
    /// Rows kept on each side of the viewport once scrolling settles.
    pub buffer_row_count: Option<usize>,
    /// Scrollable columns kept on each side of the viewport.
    pub buffer_column_count: Option<usize>,
    /// Draw a border around the grid.
    pub bordered: bool,
    /// Border thickness when `bordered`.
    pub border_size: f64,
    /// Scroll vertically to this position.
    pub scroll_top: Option<f64>,
    /// Scroll horizontally to this position.
    pub scroll_left: Option<f64>,
    /// Scroll vertically until this row is fully visible.
    pub scroll_to_row: Option<usize>,
    /// Scroll horizontally to this leaf column, counted across all partitions.
    pub scroll_to_column: Option<usize>,
    /// Tuning.
    pub options: GridOptions,
}

impl fmt::Debug for GridProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridProps")
            .field("columns", &self.columns.len())
            .field("row_count", &self.row_count)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("max_height", &self.max_height)
            .field("owner_height", &self.owner_height)
            .field("footer_height", &self.footer_height)
            .field("row_height", &self.row_height)
            .field("row_height_getter", &self.row_height_getter.is_some())
            .field("header_row_height", &self.header_row_height)
            .field("sub_row_height", &self.sub_row_height)
            .field("sub_row_height_getter", &self.sub_row_height_getter.is_some())
            .field("buffer_row_count", &self.buffer_row_count)
            .field("buffer_column_count", &self.buffer_column_count)
            .field("bordered", &self.bordered)
            .field("border_size", &self.border_size)
            .field("scroll_top", &self.scroll_top)
            .field("scroll_left", &self.scroll_left)
            .field("scroll_to_row", &self.scroll_to_row)
            .field("scroll_to_column", &self.scroll_to_column)
            .field("options", &self.options)
            .finish()
    }
}

impl GridProps {
    /// Props for `row_count` rows under `columns`, `width` wide and `height`
    /// tall, with defaults for everything else.
    #[must_use]
    pub fn new(columns: Vec<ColumnDef>, row_count: usize, width: f64, height: f64) -> Self {
        Self {
            columns,
            row_count,
            width,
            height: Some(height),
            max_height: None,
            owner_height: None,
            footer_height: 0.0,
            row_height: 32.0,
            row_height_getter: None,
            header_row_height: 32.0,
            sub_row_height: 0.0,
            sub_row_height_getter: None,
            buffer_row_count: None,
            buffer_column_count: None,
            bordered: true,
            border_size: 1.0,
            scroll_top: None,
            scroll_left: None,
            scroll_to_row: None,
            scroll_to_column: None,
            options: GridOptions::default(),
        }
    }

    /// Lets the grid shrink to its content, up to `max_height`.
    #[must_use]
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.height = None;
        self.max_height = Some(max_height);
        self
    }

    /// Sets the row height.
    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Sets a per-row height getter.
    #[must_use]
    pub fn with_row_height_getter(mut self, getter: SizeGetter) -> Self {
        self.row_height_getter = Some(getter);
        self
    }

    /// Sets the sub row height and an optional per-row getter.
    #[must_use]
    pub fn with_sub_rows(mut self, sub_row_height: f64, getter: Option<SizeGetter>) -> Self {
        self.sub_row_height = sub_row_height;
        self.sub_row_height_getter = getter;
        self
    }

    /// Sets the row buffer count.
    #[must_use]
    pub fn with_buffer_row_count(mut self, count: usize) -> Self {
        self.buffer_row_count = Some(count);
        self
    }

    /// Checks what [`Grid::new`](crate::Grid::new) requires of the props.
    pub fn validate(&self) -> Result<(), GridPropsError> {
        if self.height.is_none() && self.max_height.is_none() {
            return Err(GridPropsError::MissingHeight);
        }
        ColumnDef::validate(&self.columns).map_err(GridPropsError::DuplicateKey)
    }

    /// Border thickness actually drawn.
    #[must_use]
    pub fn effective_border(&self) -> f64 {
        if self.bordered { self.border_size } else { 0.0 }
    }

    pub(crate) fn row_sizer(&self) -> ItemSizer {
        let sizer = match &self.row_height_getter {
            Some(getter) => ItemSizer::from_getter(self.row_height, getter.clone()),
            None => ItemSizer::uniform(self.row_height),
        };
        sizer.with_sub_size(self.sub_row_height, self.sub_row_height_getter.clone())
    }
}

/// Props a grid cannot be built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridPropsError {
    /// Neither `height` nor `max_height` is set.
    MissingHeight,
    /// Two sibling columns resolve to the same key.
    DuplicateKey(DuplicateKeyError),
}

impl fmt::Display for GridPropsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeight => f.write_str("either height or max_height must be set"),
            Self::DuplicateKey(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for GridPropsError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::MissingHeight => None,
            Self::DuplicateKey(err) => Some(err),
        }
    }
}

/// Returns `true` if both getters are absent or the same callback.
pub(crate) fn same_getter(a: &Option<SizeGetter>, b: &Option<SizeGetter>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
