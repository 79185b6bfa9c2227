// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative column definitions supplied by the host.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

/// Which edge of the viewport a column is pinned to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Fixed {
    /// The column scrolls horizontally with the content.
    #[default]
    None,
    /// Pinned to the left edge.
    Left,
    /// Pinned to the right edge.
    Right,
}

impl Fixed {
    /// Returns `true` for [`Fixed::Left`] and [`Fixed::Right`].
    #[must_use]
    pub fn is_fixed(self) -> bool {
        self != Self::None
    }
}

/// A column as declared by the host: a leaf, or a group header spanning
/// `children`.
///
/// Definitions are never mutated by layout; manual widths and orders are
/// layered on top through [`ColumnOverrides`](crate::ColumnOverrides).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnDef {
    /// Stable identity of a leaf. Falls back to `data_index` when absent.
    /// Group keys are always derived from their children.
    pub key: Option<String>,
    /// Name of the data field rendered by a leaf.
    pub data_index: Option<String>,
    /// Declared width of a leaf. Ignored for groups.
    pub width: f64,
    /// Lower bound applied while resizing.
    pub min_width: f64,
    /// Upper bound applied while resizing; unbounded when `None`.
    pub max_width: Option<f64>,
    /// Pinning of a leaf. Groups take the pinning of their first pinned child.
    pub fixed: Fixed,
    /// Share of leftover viewport width this leaf grows by. `0` disables growth.
    pub flex_grow: f64,
    /// Columns spanned by a group header. Empty for leaves.
    pub children: Vec<Self>,
}

impl ColumnDef {
    /// A leaf column.
    #[must_use]
    pub fn leaf(key: impl Into<String>, width: f64) -> Self {
        Self {
            key: Some(key.into()),
            width,
            ..Self::default()
        }
    }

    /// A group header over `children`.
    #[must_use]
    pub fn group(children: Vec<Self>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    /// Sets the data field name.
    #[must_use]
    pub fn with_data_index(mut self, data_index: impl Into<String>) -> Self {
        self.data_index = Some(data_index.into());
        self
    }

    /// Sets the pinning.
    #[must_use]
    pub fn with_fixed(mut self, fixed: Fixed) -> Self {
        self.fixed = fixed;
        self
    }

    /// Sets the flex growth factor.
    #[must_use]
    pub fn with_flex_grow(mut self, flex_grow: f64) -> Self {
        self.flex_grow = flex_grow;
        self
    }

    /// Sets the minimum width used while resizing.
    #[must_use]
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    /// Sets the maximum width used while resizing.
    #[must_use]
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Returns `true` if this definition has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The key layout assigns to this definition.
    ///
    /// Leaves use `key`, then `data_index`; groups join their children's keys
    /// with `-`.
    #[must_use]
    pub fn resolved_key(&self) -> String {
        if self.is_leaf() {
            return self
                .key
                .clone()
                .or_else(|| self.data_index.clone())
                .unwrap_or_default();
        }
        let mut key = String::new();
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                key.push('-');
            }
            key.push_str(&child.resolved_key());
        }
        key
    }

    /// Checks that no two siblings anywhere in `defs` resolve to the same key.
    ///
    /// Layout asserts the same condition; hosts accepting column trees from
    /// untrusted sources can call this first.
    pub fn validate(defs: &[Self]) -> Result<(), DuplicateKeyError> {
        let mut seen = HashSet::with_capacity(defs.len());
        for def in defs {
            let key = def.resolved_key();
            if !seen.insert(key.clone()) {
                return Err(DuplicateKeyError { key });
            }
        }
        for def in defs {
            Self::validate(&def.children)?;
        }
        Ok(())
    }
}

/// Two sibling columns resolved to the same key.
#[derive(Clone, PartialEq, Eq)]
pub struct DuplicateKeyError {
    /// The repeated key.
    pub key: String,
}

impl fmt::Debug for DuplicateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DuplicateKeyError {{ key: {:?} }}", self.key)
    }
}

impl fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column key {:?} is used by more than one sibling", self.key)
    }
}

impl core::error::Error for DuplicateKeyError {}
