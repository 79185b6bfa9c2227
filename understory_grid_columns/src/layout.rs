// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column tree layout: flex growth, pinning partitions, ordering and offsets.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::def::{ColumnDef, Fixed};

/// Identifier of a column within one [`ColumnLayout`].
///
/// Ids index the layout's arena and are only meaningful for the layout that
/// produced them; recomputing the layout invalidates them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u32);

impl ColumnId {
    fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of the column in [`ColumnLayout::columns`].
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Position of a column among its siblings.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ColumnFlags: u8 {
        /// First among its siblings.
        const FIRST_LEAF = 0b0000_0001;
        /// Last among its siblings.
        const LAST_LEAF  = 0b0000_0010;
    }
}

/// One of the three horizontal regions of a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Columns pinned to the left edge.
    LeftFixed,
    /// Columns that scroll horizontally.
    Scrollable,
    /// Columns pinned to the right edge.
    RightFixed,
}

impl Partition {
    /// All partitions, left to right.
    pub const ALL: [Self; 3] = [Self::LeftFixed, Self::Scrollable, Self::RightFixed];

    /// The pinning shared by every column of this partition.
    #[must_use]
    pub fn fixed(self) -> Fixed {
        match self {
            Self::LeftFixed => Fixed::Left,
            Self::Scrollable => Fixed::None,
            Self::RightFixed => Fixed::Right,
        }
    }

    /// The partition holding columns pinned as `fixed`.
    #[must_use]
    pub fn of(fixed: Fixed) -> Self {
        match fixed {
            Fixed::Left => Self::LeftFixed,
            Fixed::None => Self::Scrollable,
            Fixed::Right => Self::RightFixed,
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::LeftFixed => 0,
            Self::Scrollable => 1,
            Self::RightFixed => 2,
        }
    }
}

/// A laid-out column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Resolved key; see [`ColumnDef::resolved_key`].
    pub key: String,
    /// Data field name of a leaf.
    pub data_index: Option<String>,
    /// Effective width. For groups, the sum of the children.
    pub width: f64,
    /// Lower bound used while resizing.
    pub min_width: f64,
    /// Upper bound used while resizing.
    pub max_width: f64,
    /// Nesting level; top-level columns have depth 1.
    pub depth: usize,
    /// Enclosing group, if any.
    pub parent: Option<ColumnId>,
    /// Spanned columns, in display order. Empty for leaves.
    pub children: SmallVec<[ColumnId; 4]>,
    /// Pinning, matching the partition the column was placed in.
    pub fixed: Fixed,
    /// Declared growth factor.
    pub flex_grow: f64,
    /// Offset of the leading edge within the column's partition coordinate
    /// space. Groups share the offset of their first leaf.
    pub left: f64,
    /// Position among siblings.
    pub flags: ColumnFlags,
}

impl Column {
    /// Returns `true` if the column spans no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if the column is the first of its siblings.
    #[must_use]
    pub fn is_first_leaf(&self) -> bool {
        self.flags.contains(ColumnFlags::FIRST_LEAF)
    }

    /// Returns `true` if the column is the last of its siblings.
    #[must_use]
    pub fn is_last_leaf(&self) -> bool {
        self.flags.contains(ColumnFlags::LAST_LEAF)
    }
}

/// Manual adjustments layered over the declared columns.
///
/// Widths come from finished resize gestures, orders from finished reorder
/// gestures. Both are keyed by resolved column key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnOverrides {
    pub(crate) widths: HashMap<String, f64>,
    pub(crate) orders: HashMap<String, usize>,
}

impl ColumnOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are neither width nor order overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty() && self.orders.is_empty()
    }

    /// Manual width of column `key`.
    #[must_use]
    pub fn width(&self, key: &str) -> Option<f64> {
        self.widths.get(key).copied()
    }

    /// Manual sibling position of column `key`.
    #[must_use]
    pub fn order(&self, key: &str) -> Option<usize> {
        self.orders.get(key).copied()
    }

    /// Records a manual width for column `key`.
    pub fn record_width(&mut self, key: impl Into<String>, width: f64) {
        self.widths.insert(key.into(), width);
    }

    /// Records a manual sibling position for column `key`.
    pub fn record_order(&mut self, key: impl Into<String>, index: usize) {
        self.orders.insert(key.into(), index);
    }

    /// Drops every override.
    pub fn clear(&mut self) {
        self.widths.clear();
        self.orders.clear();
    }
}

/// The result of laying out a column tree.
///
/// Columns live in an arena addressed by [`ColumnId`]. Top-level columns are
/// split into three [`Partition`]s; each partition also has its leaves
/// flattened in display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnLayout {
    columns: Vec<Column>,
    roots: Vec<ColumnId>,
    partitions: [Vec<ColumnId>; 3],
    leaves: [Vec<ColumnId>; 3],
    widths: [f64; 3],
    grow_count: f64,
    depth: usize,
}

/// Lays out `defs` for a viewport `viewport_width` wide.
///
/// 1. When the declared leaf widths do not fill the viewport and some leaves
///    have `flex_grow`, the slack is shared among them (rounded, with the
///    last flexible leaf without a manual width taking the remainder).
///    Manual widths win.
/// 2. Top-level columns up to the last left-pinned one form the left
///    partition; the first right-pinned one after that starts the right
///    partition; the rest scroll.
/// 3. Manual orders move columns to their recorded sibling position, other
///    columns keep their relative order.
/// 4. Leaf offsets accumulate from `0` in the left partition, from the left
///    partition's width in the scrollable one, and from `0` in the right
///    partition (hosts anchor it at the viewport's right edge).
///
/// # Panics
///
/// Panics if two siblings resolve to the same key.
#[must_use]
pub fn compute_column_layout(
    defs: &[ColumnDef],
    overrides: &ColumnOverrides,
    viewport_width: f64,
) -> ColumnLayout {
    let (content_width, grow_count) = leaf_totals(defs);

    let mut columns = Vec::new();
    let roots: Vec<ColumnId> = defs
        .iter()
        .map(|def| add_column(&mut columns, &overrides.widths, def, 1, None))
        .collect();
    assert_unique_keys(&columns, &roots);
    if content_width < viewport_width && grow_count > 0.0 {
        grow_flex_leaves(
            &mut columns,
            &overrides.widths,
            viewport_width - content_width,
            grow_count,
        );
    }

    let left_len = roots
        .iter()
        .rposition(|id| columns[id.index()].fixed == Fixed::Left)
        .map_or(0, |index| index + 1);
    let right_start = roots[left_len..]
        .iter()
        .position(|id| columns[id.index()].fixed == Fixed::Right)
        .map(|index| index + left_len)
        .filter(|&index| index > 0)
        .unwrap_or(roots.len());

    let mut partitions = [
        roots[..left_len].to_vec(),
        roots[left_len..right_start].to_vec(),
        roots[right_start..].to_vec(),
    ];

    let mut orders = overrides.orders.clone();
    for partition in &mut partitions {
        apply_orders(&mut columns, partition, &mut orders);
        assign_sibling_flags(&mut columns, partition);
    }

    let mut layout = ColumnLayout {
        columns,
        roots,
        partitions,
        leaves: [Vec::new(), Vec::new(), Vec::new()],
        widths: [0.0; 3],
        grow_count,
        depth: 0,
    };
    for partition in Partition::ALL {
        let slot = partition.slot();
        let mut leaves = Vec::new();
        collect_leaves(&layout.columns, &layout.partitions[slot], &mut leaves);
        layout.leaves[slot] = leaves;
        layout.widths[slot] = layout.partitions[slot]
            .iter()
            .map(|id| layout.columns[id.index()].width)
            .sum();
    }
    layout.position_leaves();
    layout.depth = layout
        .leaves
        .iter()
        .flatten()
        .map(|id| layout.columns[id.index()].depth)
        .max()
        .unwrap_or(0);
    layout
}

impl ColumnLayout {
    /// Every column, indexed by [`ColumnId::index`].
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column with id `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this layout.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.index()]
    }

    /// Top-level columns in declaration order.
    #[must_use]
    pub fn roots(&self) -> &[ColumnId] {
        &self.roots
    }

    /// First column, in arena order, whose key is `key`.
    ///
    /// Keys are only unique among siblings, so nested layouts that reuse a
    /// key should look columns up through [`Self::siblings`] instead.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<ColumnId> {
        self.columns
            .iter()
            .position(|column| column.key == key)
            .map(ColumnId::new)
    }

    /// Top-level columns of `partition`, in display order.
    #[must_use]
    pub fn partition(&self, partition: Partition) -> &[ColumnId] {
        &self.partitions[partition.slot()]
    }

    /// Leaf columns of `partition`, in display order.
    #[must_use]
    pub fn leaves(&self, partition: Partition) -> &[ColumnId] {
        &self.leaves[partition.slot()]
    }

    /// Total width of `partition`.
    #[must_use]
    pub fn partition_width(&self, partition: Partition) -> f64 {
        self.widths[partition.slot()]
    }

    /// Total width of all partitions.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.widths.iter().sum()
    }

    /// Number of leaf columns.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves.iter().map(Vec::len).sum()
    }

    /// Sum of the leaves' `flex_grow`.
    #[must_use]
    pub fn grow_count(&self) -> f64 {
        self.grow_count
    }

    /// Number of header rows: the deepest leaf's depth, `0` without columns.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The partition `id` was placed in.
    #[must_use]
    pub fn partition_of(&self, id: ColumnId) -> Partition {
        Partition::of(self.column(id).fixed)
    }

    /// The columns `id` can be reordered among: its parent's children, or its
    /// partition for top-level columns.
    #[must_use]
    pub fn siblings(&self, id: ColumnId) -> &[ColumnId] {
        match self.column(id).parent {
            Some(parent) => self.column(parent).children.as_slice(),
            None => self.partition(self.partition_of(id)),
        }
    }

    /// The top-level column containing `id`.
    #[must_use]
    pub fn top_level_ancestor(&self, id: ColumnId) -> ColumnId {
        let mut current = id;
        while let Some(parent) = self.column(current).parent {
            current = parent;
        }
        current
    }

    /// Shrinks leaves so the total width drops by `exceed`.
    ///
    /// The reduction is shared in proportion to `flex_grow` (equally when no
    /// leaf grows), visiting left-pinned leaves first, then scrollable, then
    /// right-pinned ones; the very last leaf absorbs the rounding remainder.
    /// No column shrinks below zero. Group and partition widths follow, and
    /// offsets are recomputed.
    pub fn shrink_columns_width(&mut self, exceed: f64) {
        let leaf_count = self.leaf_count();
        if leaf_count == 0 || exceed <= 0.0 {
            return;
        }
        let divide_equally = self.grow_count == 0.0;
        let factor = exceed / if divide_equally {
            leaf_count as f64
        } else {
            self.grow_count
        };

        let mut unassigned = exceed;
        for partition in Partition::ALL {
            if unassigned <= 0.0 {
                break;
            }
            let slot = partition.slot();
            let is_last = self.leaves[slot + 1..].iter().all(Vec::is_empty);
            let leaves = core::mem::take(&mut self.leaves[slot]);
            let mut assigned = 0.0;
            for (index, &leaf) in leaves.iter().enumerate() {
                let grow = if divide_equally {
                    1.0
                } else {
                    self.columns[leaf.index()].flex_grow
                };
                let mut amount = libm::round(factor * grow);
                if unassigned - amount < 0.0 {
                    amount = unassigned;
                }
                if is_last && index == leaves.len() - 1 {
                    amount = unassigned;
                }
                amount = amount.min(self.columns[leaf.index()].width);
                if amount <= 0.0 || unassigned <= 0.0 {
                    continue;
                }
                assigned += amount;
                unassigned -= amount;
                let mut node = Some(leaf);
                while let Some(id) = node {
                    self.columns[id.index()].width -= amount;
                    node = self.columns[id.index()].parent;
                }
            }
            self.leaves[slot] = leaves;
            self.widths[slot] -= assigned;
        }
        self.position_leaves();
    }

    fn position_leaves(&mut self) {
        let starts = [0.0, self.widths[0], 0.0];
        for partition in Partition::ALL {
            let slot = partition.slot();
            let fixed = partition.fixed();
            let mut offset = starts[slot];
            for &leaf in &self.leaves[slot] {
                self.columns[leaf.index()].left = offset;
                let mut current = leaf;
                while let Some(parent) = self.columns[current.index()].parent
                    && self.columns[current.index()].is_first_leaf()
                {
                    self.columns[parent.index()].left = offset;
                    current = parent;
                }
                // Pinning follows the partition, so a pinned column stranded
                // among scrollable ones reports `Fixed::None`.
                let mut node = Some(leaf);
                while let Some(id) = node {
                    self.columns[id.index()].fixed = fixed;
                    node = self.columns[id.index()].parent;
                }
                offset += self.columns[leaf.index()].width;
            }
        }
    }
}

fn leaf_totals(defs: &[ColumnDef]) -> (f64, f64) {
    defs.iter().fold((0.0, 0.0), |(width, grow), def| {
        if def.is_leaf() {
            (width + def.width, grow + def.flex_grow)
        } else {
            let (child_width, child_grow) = leaf_totals(&def.children);
            (width + child_width, grow + child_grow)
        }
    })
}

/// Shares `slack` among flexible leaves in proportion to `flex_grow`.
///
/// Leaves with a manual width keep it. Shares are rounded; the last leaf
/// without a manual width takes the rounding remainder. Ancestors grow with
/// their leaves.
fn grow_flex_leaves(
    columns: &mut [Column],
    manual: &HashMap<String, f64>,
    slack: f64,
    grow_count: f64,
) {
    let factor = slack / grow_count;
    let flex: Vec<(ColumnId, f64, bool)> = columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.is_leaf() && column.flex_grow > 0.0)
        .map(|(index, column)| {
            (
                ColumnId::new(index),
                libm::round(factor * column.flex_grow),
                manual.contains_key(&column.key),
            )
        })
        .collect();
    let remainder = slack - flex.iter().map(|&(_, extra, _)| extra).sum::<f64>();
    let last_free = flex.iter().rposition(|&(_, _, overridden)| !overridden);

    for (position, &(leaf, extra, overridden)) in flex.iter().enumerate() {
        if overridden {
            continue;
        }
        let extra = if Some(position) == last_free {
            extra + remainder
        } else {
            extra
        };
        let mut node = Some(leaf);
        while let Some(id) = node {
            columns[id.index()].width += extra;
            node = columns[id.index()].parent;
        }
    }
}

fn add_column(
    columns: &mut Vec<Column>,
    widths: &HashMap<String, f64>,
    def: &ColumnDef,
    depth: usize,
    parent: Option<ColumnId>,
) -> ColumnId {
    let id = ColumnId::new(columns.len());
    columns.push(Column {
        key: String::new(),
        data_index: def.data_index.clone(),
        width: def.width,
        min_width: def.min_width,
        max_width: def.max_width.unwrap_or(f64::INFINITY),
        depth,
        parent,
        children: SmallVec::new(),
        fixed: def.fixed,
        flex_grow: def.flex_grow,
        left: 0.0,
        flags: ColumnFlags::empty(),
    });

    if def.is_leaf() {
        let key = def.resolved_key();
        if let Some(&width) = widths.get(&key) {
            columns[id.index()].width = width;
        }
        columns[id.index()].key = key;
        return id;
    }

    let children: SmallVec<[ColumnId; 4]> = def
        .children
        .iter()
        .map(|child| add_column(columns, widths, child, depth + 1, Some(id)))
        .collect();
    assert_unique_keys(columns, &children);

    let mut key = String::new();
    let mut width = 0.0;
    let mut fixed = Fixed::None;
    for (index, child) in children.iter().enumerate() {
        let child = &columns[child.index()];
        if index > 0 {
            key.push('-');
        }
        key.push_str(&child.key);
        width += child.width;
        if fixed == Fixed::None {
            fixed = child.fixed;
        }
    }
    let group = &mut columns[id.index()];
    group.key = key;
    group.width = width;
    group.fixed = fixed;
    group.children = children;
    id
}

fn assert_unique_keys(columns: &[Column], siblings: &[ColumnId]) {
    let mut seen = HashSet::with_capacity(siblings.len());
    for id in siblings {
        let key = columns[id.index()].key.as_str();
        assert!(seen.insert(key), "duplicate column key {key:?} among siblings");
    }
}

/// Moves columns with a recorded order to that position and recurses into
/// groups until every recorded order has been consumed.
fn apply_orders(columns: &mut [Column], list: &mut [ColumnId], orders: &mut HashMap<String, usize>) {
    if orders.is_empty() || list.is_empty() {
        return;
    }

    let len = list.len();
    let mut slots: Vec<Option<ColumnId>> = vec![None; len];
    let mut rest = Vec::with_capacity(len);
    for &id in list.iter() {
        match orders.remove(&columns[id.index()].key) {
            Some(target) => {
                let start = target.min(len - 1);
                let free = (start..len)
                    .chain((0..start).rev())
                    .find(|&slot| slots[slot].is_none());
                if let Some(slot) = free {
                    slots[slot] = Some(id);
                }
            }
            None => rest.push(id),
        }
    }
    let mut rest = rest.into_iter();
    for (out, slot) in list.iter_mut().zip(slots) {
        if let Some(id) = slot.or_else(|| rest.next()) {
            *out = id;
        }
    }

    for &id in list.iter() {
        if orders.is_empty() {
            break;
        }
        if columns[id.index()].children.is_empty() {
            continue;
        }
        let mut children = core::mem::take(&mut columns[id.index()].children);
        apply_orders(columns, &mut children, orders);
        columns[id.index()].children = children;
    }
}

fn assign_sibling_flags(columns: &mut [Column], siblings: &[ColumnId]) {
    let last = siblings.len().saturating_sub(1);
    for (index, &id) in siblings.iter().enumerate() {
        let mut flags = ColumnFlags::empty();
        flags.set(ColumnFlags::FIRST_LEAF, index == 0);
        flags.set(ColumnFlags::LAST_LEAF, index == last);
        columns[id.index()].flags = flags;
        let children = columns[id.index()].children.clone();
        assign_sibling_flags(columns, &children);
    }
}

fn collect_leaves(columns: &[Column], list: &[ColumnId], out: &mut Vec<ColumnId>) {
    for &id in list {
        let column = &columns[id.index()];
        if column.is_leaf() {
            out.push(id);
        } else {
            collect_leaves(columns, &column.children, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn keys(layout: &ColumnLayout, ids: &[ColumnId]) -> Vec<String> {
        ids.iter().map(|&id| layout.column(id).key.clone()).collect()
    }

    fn widths(layout: &ColumnLayout, ids: &[ColumnId]) -> Vec<f64> {
        ids.iter().map(|&id| layout.column(id).width).collect()
    }

    fn three(width: f64) -> Vec<ColumnDef> {
        vec![
            ColumnDef::leaf("a", width),
            ColumnDef::leaf("b", width),
            ColumnDef::leaf("c", width),
        ]
    }

    #[test]
    fn empty_layout() {
        let layout = compute_column_layout(&[], &ColumnOverrides::new(), 500.0);
        assert_eq!(layout.depth(), 0);
        assert_eq!(layout.content_width(), 0.0);
        assert_eq!(layout.leaf_count(), 0);
        for partition in Partition::ALL {
            assert!(layout.partition(partition).is_empty());
        }
    }

    #[test]
    fn flex_growth_fills_viewport() {
        let mut defs = three(100.0);
        defs[1].flex_grow = 1.0;
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 400.0);
        let leaves = layout.leaves(Partition::Scrollable);
        assert_eq!(widths(&layout, leaves), vec![100.0, 200.0, 100.0]);
        assert_eq!(layout.content_width(), 400.0);
    }

    #[test]
    fn flex_growth_shares_by_factor() {
        let defs = vec![
            ColumnDef::leaf("a", 100.0).with_flex_grow(1.0),
            ColumnDef::leaf("b", 100.0).with_flex_grow(2.0),
            ColumnDef::leaf("c", 100.0).with_flex_grow(1.0),
        ];
        // Slack 101: factor 25.25 -> 25, 51 (rounded 50.5), remainder 25.
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 401.0);
        let leaves = layout.leaves(Partition::Scrollable);
        assert_eq!(widths(&layout, leaves), vec![125.0, 151.0, 125.0]);
        assert_eq!(layout.grow_count(), 4.0);
    }

    #[test]
    fn manual_width_beats_flex() {
        let mut defs = three(100.0);
        defs[1].flex_grow = 1.0;
        let mut overrides = ColumnOverrides::new();
        overrides.record_width("b", 150.0);
        let layout = compute_column_layout(&defs, &overrides, 400.0);
        let leaves = layout.leaves(Partition::Scrollable);
        assert_eq!(widths(&layout, leaves), vec![100.0, 150.0, 100.0]);
    }

    #[test]
    fn no_flex_when_content_is_wide_enough() {
        let mut defs = three(200.0);
        defs[0].flex_grow = 1.0;
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 400.0);
        assert_eq!(layout.content_width(), 600.0);
    }

    #[test]
    fn flex_leaves_sharing_a_key_grow_separately() {
        let defs = vec![
            ColumnDef::group(vec![
                ColumnDef::leaf("name", 100.0).with_flex_grow(1.0),
                ColumnDef::leaf("a", 50.0),
            ]),
            ColumnDef::group(vec![
                ColumnDef::leaf("name", 60.0).with_flex_grow(1.0),
                ColumnDef::leaf("b", 50.0),
            ]),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 500.0);
        let leaves = layout.leaves(Partition::Scrollable);
        assert_eq!(widths(&layout, leaves), vec![220.0, 50.0, 180.0, 50.0]);
        let groups = layout.partition(Partition::Scrollable);
        assert_eq!(widths(&layout, groups), vec![270.0, 230.0]);
        assert_eq!(layout.content_width(), 500.0);
    }

    #[test]
    fn remainder_skips_manually_sized_last_leaf() {
        let defs = vec![
            ColumnDef::leaf("a", 100.0).with_flex_grow(1.0),
            ColumnDef::leaf("b", 100.0).with_flex_grow(1.0),
            ColumnDef::leaf("c", 100.0).with_flex_grow(1.0),
        ];
        let mut overrides = ColumnOverrides::new();
        overrides.record_width("c", 120.0);
        // Slack 100: 33 each, the leftover 1 lands on `b`.
        let layout = compute_column_layout(&defs, &overrides, 400.0);
        let leaves = layout.leaves(Partition::Scrollable);
        assert_eq!(widths(&layout, leaves), vec![133.0, 134.0, 120.0]);
    }

    #[test]
    fn partitions_and_offsets() {
        let defs = vec![
            ColumnDef::leaf("a", 50.0).with_fixed(Fixed::Left),
            ColumnDef::leaf("b", 100.0),
            ColumnDef::leaf("c", 100.0),
            ColumnDef::leaf("d", 60.0).with_fixed(Fixed::Right),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 200.0);
        assert_eq!(keys(&layout, layout.partition(Partition::LeftFixed)), ["a"]);
        assert_eq!(keys(&layout, layout.partition(Partition::Scrollable)), ["b", "c"]);
        assert_eq!(keys(&layout, layout.partition(Partition::RightFixed)), ["d"]);
        assert_eq!(layout.partition_width(Partition::LeftFixed), 50.0);
        assert_eq!(layout.partition_width(Partition::Scrollable), 200.0);
        assert_eq!(layout.partition_width(Partition::RightFixed), 60.0);

        let lefts: Vec<f64> = layout.columns().iter().map(|column| column.left).collect();
        assert_eq!(lefts, vec![0.0, 50.0, 150.0, 0.0]);
    }

    #[test]
    fn left_run_extends_to_last_left_pinned_column() {
        let defs = vec![
            ColumnDef::leaf("a", 10.0).with_fixed(Fixed::Left),
            ColumnDef::leaf("b", 10.0),
            ColumnDef::leaf("c", 10.0).with_fixed(Fixed::Left),
            ColumnDef::leaf("d", 10.0),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        assert_eq!(keys(&layout, layout.partition(Partition::LeftFixed)), ["a", "b", "c"]);
        // b is pinned by virtue of its position.
        let b = layout.find("b").unwrap();
        assert_eq!(layout.column(b).fixed, Fixed::Left);
        assert_eq!(layout.partition_of(b), Partition::LeftFixed);
    }

    #[test]
    fn leading_right_pinned_column_scrolls() {
        let defs = vec![
            ColumnDef::leaf("a", 10.0).with_fixed(Fixed::Right),
            ColumnDef::leaf("b", 10.0),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        assert!(layout.partition(Partition::RightFixed).is_empty());
        assert_eq!(keys(&layout, layout.partition(Partition::Scrollable)), ["a", "b"]);
        assert_eq!(layout.column(layout.find("a").unwrap()).fixed, Fixed::None);
    }

    #[test]
    fn groups_sum_children_and_join_keys() {
        let defs = vec![
            ColumnDef::leaf("id", 40.0).with_fixed(Fixed::Left),
            ColumnDef::group(vec![
                ColumnDef::leaf("first", 80.0),
                ColumnDef::group(vec![ColumnDef::leaf("x", 30.0), ColumnDef::leaf("y", 30.0)]),
            ]),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        assert_eq!(layout.depth(), 3);

        let group = layout.find("first-x-y").unwrap();
        let column = layout.column(group);
        assert_eq!(column.width, 140.0);
        assert_eq!(column.depth, 1);
        assert_eq!(column.left, 40.0);
        assert_eq!(column.children.len(), 2);

        let inner = layout.find("x-y").unwrap();
        assert_eq!(layout.column(inner).parent, Some(group));
        assert_eq!(layout.column(inner).left, 120.0);
        assert!(layout.column(inner).is_last_leaf());
        assert_eq!(layout.top_level_ancestor(layout.find("y").unwrap()), group);
        assert_eq!(
            keys(&layout, layout.leaves(Partition::Scrollable)),
            ["first", "x", "y"]
        );
        assert_eq!(layout.siblings(inner), layout.column(group).children.as_slice());
        assert_eq!(layout.siblings(group), layout.partition(Partition::Scrollable));
    }

    #[test]
    fn group_takes_pinning_of_first_pinned_child() {
        let defs = vec![
            ColumnDef::group(vec![
                ColumnDef::leaf("a", 10.0),
                ColumnDef::leaf("b", 10.0).with_fixed(Fixed::Left),
            ]),
            ColumnDef::leaf("c", 10.0),
        ];
        let layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        assert_eq!(keys(&layout, layout.partition(Partition::LeftFixed)), ["a-b"]);
        // Every leaf of a pinned group is pinned.
        assert_eq!(layout.column(layout.find("a").unwrap()).fixed, Fixed::Left);
    }

    #[test]
    fn recorded_orders_swap_siblings() {
        let mut overrides = ColumnOverrides::new();
        overrides.record_order("a", 2);
        overrides.record_order("c", 0);
        let layout = compute_column_layout(&three(10.0), &overrides, 0.0);
        let leaves = layout.leaves(Partition::Scrollable);
        assert_eq!(keys(&layout, leaves), ["c", "b", "a"]);
        assert!(layout.column(leaves[0]).is_first_leaf());
        assert!(layout.column(leaves[2]).is_last_leaf());
        let lefts: Vec<f64> = leaves.iter().map(|&id| layout.column(id).left).collect();
        assert_eq!(lefts, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn recorded_orders_reach_nested_groups() {
        let defs = vec![
            ColumnDef::leaf("a", 10.0),
            ColumnDef::group(vec![
                ColumnDef::leaf("x", 10.0),
                ColumnDef::leaf("y", 20.0),
                ColumnDef::leaf("z", 30.0),
            ]),
        ];
        let mut overrides = ColumnOverrides::new();
        overrides.record_order("z", 0);
        let layout = compute_column_layout(&defs, &overrides, 0.0);
        assert_eq!(
            keys(&layout, layout.leaves(Partition::Scrollable)),
            ["a", "z", "x", "y"]
        );
        let group = layout.find("x-y-z").unwrap();
        // The group now starts with z.
        assert_eq!(layout.column(group).left, 10.0);
        assert_eq!(layout.column(layout.find("x").unwrap()).left, 40.0);
    }

    #[test]
    fn out_of_range_order_clamps_to_last_slot() {
        let mut overrides = ColumnOverrides::new();
        overrides.record_order("a", 10);
        let layout = compute_column_layout(&three(10.0), &overrides, 0.0);
        assert_eq!(
            keys(&layout, layout.leaves(Partition::Scrollable)),
            ["b", "c", "a"]
        );
    }

    #[test]
    #[should_panic(expected = "duplicate column key")]
    fn duplicate_sibling_keys_panic() {
        let defs = vec![ColumnDef::leaf("a", 10.0), ColumnDef::leaf("a", 10.0)];
        let _ = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
    }

    #[test]
    fn shrink_divides_equally_without_growth() {
        let mut layout = compute_column_layout(&three(100.0), &ColumnOverrides::new(), 0.0);
        layout.shrink_columns_width(31.0);
        let leaves = layout.leaves(Partition::Scrollable).to_vec();
        // round(31 / 3) = 10 for the first two, the last takes the remainder.
        assert_eq!(widths(&layout, &leaves), vec![90.0, 90.0, 89.0]);
        assert_eq!(layout.content_width(), 269.0);
        assert_eq!(layout.column(leaves[2]).left, 180.0);
    }

    #[test]
    fn shrink_follows_growth_and_partition_order() {
        let defs = vec![
            ColumnDef::leaf("a", 100.0)
                .with_fixed(Fixed::Left)
                .with_flex_grow(1.0),
            ColumnDef::group(vec![
                ColumnDef::leaf("b", 100.0).with_flex_grow(1.0),
                ColumnDef::leaf("c", 100.0),
            ]),
            ColumnDef::leaf("d", 100.0)
                .with_fixed(Fixed::Right)
                .with_flex_grow(2.0),
        ];
        let mut layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        layout.shrink_columns_width(40.0);
        let all: Vec<f64> = ["a", "b", "c", "d"]
            .iter()
            .map(|key| layout.column(layout.find(key).unwrap()).width)
            .collect();
        assert_eq!(all, vec![90.0, 90.0, 100.0, 80.0]);
        assert_eq!(layout.column(layout.find("b-c").unwrap()).width, 190.0);
        assert_eq!(layout.partition_width(Partition::LeftFixed), 90.0);
        assert_eq!(layout.partition_width(Partition::Scrollable), 190.0);
        assert_eq!(layout.partition_width(Partition::RightFixed), 80.0);
        assert_eq!(layout.content_width(), 360.0);
        // Scrollable offsets follow the narrower left partition.
        assert_eq!(layout.column(layout.find("b").unwrap()).left, 90.0);
    }

    #[test]
    fn shrink_never_goes_negative() {
        let defs = vec![ColumnDef::leaf("a", 10.0), ColumnDef::leaf("b", 10.0)];
        let mut layout = compute_column_layout(&defs, &ColumnOverrides::new(), 0.0);
        layout.shrink_columns_width(100.0);
        for &id in layout.leaves(Partition::Scrollable) {
            assert!(layout.column(id).width >= 0.0);
        }
        assert_eq!(layout.content_width(), 0.0);
    }
}
