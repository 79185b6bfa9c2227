// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item size sources.

use alloc::rc::Rc;
use core::fmt;

/// Host callback returning the extent of the item at an index.
///
/// Getters are reference counted so one callback can feed both an
/// [`AxisScrollHelper`](crate::AxisScrollHelper) and an
/// [`ItemBuffer`](crate::ItemBuffer).
pub type SizeGetter = Rc<dyn Fn(usize) -> f64>;

/// Resolves the full extent of an item from defaults and optional getters.
///
/// The extent of item `i` is the main size (`size_getter(i)` or
/// `default_size`) plus the sub size (`sub_size_getter(i)` or
/// `default_sub_size`). Rows use the sub size for expandable detail areas;
/// columns leave it at zero.
#[derive(Clone, Default)]
pub struct ItemSizer {
    default_size: f64,
    size_getter: Option<SizeGetter>,
    default_sub_size: f64,
    sub_size_getter: Option<SizeGetter>,
}

impl fmt::Debug for ItemSizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSizer")
            .field("default_size", &self.default_size)
            .field("size_getter", &self.size_getter.is_some())
            .field("default_sub_size", &self.default_sub_size)
            .field("sub_size_getter", &self.sub_size_getter.is_some())
            .finish()
    }
}

impl ItemSizer {
    /// Every item has extent `default_size`.
    #[must_use]
    pub fn uniform(default_size: f64) -> Self {
        Self {
            default_size,
            ..Self::default()
        }
    }

    /// Item extents come from `getter`; `default_size` is the estimate used
    /// before an item has been measured.
    #[must_use]
    pub fn from_getter(default_size: f64, getter: SizeGetter) -> Self {
        Self {
            default_size,
            size_getter: Some(getter),
            ..Self::default()
        }
    }

    /// Adds a sub size to every item.
    #[must_use]
    pub fn with_sub_size(mut self, default_sub_size: f64, getter: Option<SizeGetter>) -> Self {
        self.default_sub_size = default_sub_size;
        self.sub_size_getter = getter;
        self
    }

    /// Replaces the main size getter.
    pub fn set_size_getter(&mut self, getter: Option<SizeGetter>) {
        self.size_getter = getter;
    }

    /// Replaces the sub size getter.
    pub fn set_sub_size_getter(&mut self, getter: Option<SizeGetter>) {
        self.sub_size_getter = getter;
    }

    /// Full extent assumed for items that have not been measured.
    #[must_use]
    pub fn default_size(&self) -> f64 {
        self.default_size + self.default_sub_size
    }

    /// Full extent of item `index`.
    #[must_use]
    pub fn size_of(&self, index: usize) -> f64 {
        let main = self
            .size_getter
            .as_ref()
            .map_or(self.default_size, |getter| getter(index));
        let sub = self
            .sub_size_getter
            .as_ref()
            .map_or(self.default_sub_size, |getter| getter(index));
        main + sub
    }
}
