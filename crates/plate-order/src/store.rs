//! Plate store
//!
//! The plate is an ordered list of compiled line items. Insertion order is
//! display order and summary order. After an item is appended only its
//! `included` flag can change; the only other mutations are removal and
//! clearing. The total is recomputed on every call.

use plate_config::{LineItem, LinePart};
use plate_menu::Rupees;
use serde::Serialize;
use tracing::debug;

/// Rendered plate row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateRow {
    pub index: usize,
    pub name: String,
    pub included: bool,
    /// `"<label> x<qty> (Rs <line>)"` for parts, `"+ ..."` for extras
    pub lines: Vec<String>,
}

/// Ordered list of line items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlateStore {
    items: Vec<LineItem>,
}

impl PlateStore {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; returns its index
    pub fn append(&mut self, item: LineItem) -> usize {
        debug!(name = %item.name, subtotal = %item.subtotal(), "Plate append");
        self.items.push(item);
        self.items.len() - 1
    }

    /// Remove the item at `index`, keeping the order of the rest
    ///
    /// Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        debug!(index, name = %item.name, "Plate remove");
        Some(item)
    }

    /// Set the inclusion flag; returns `false` for an out-of-range index
    pub fn set_included(&mut self, index: usize, included: bool) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.included = included;
                debug!(index, included, "Plate inclusion");
                true
            }
            None => false,
        }
    }

    /// Flip the inclusion flag; returns the new value
    pub fn toggle_included(&mut self, index: usize) -> Option<bool> {
        let included = !self.items.get(index)?.included;
        self.set_included(index, included);
        Some(included)
    }

    /// Sum of included items' subtotals
    #[must_use]
    pub fn total(&self) -> Rupees {
        self.items.iter().map(LineItem::contribution).sum()
    }

    pub fn clear(&mut self) {
        debug!(items = self.items.len(), "Plate cleared");
        self.items.clear();
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Included items with their plate index
    pub fn included(&self) -> impl Iterator<Item = (usize, &LineItem)> {
        self.items.iter().enumerate().filter(|(_, item)| item.included)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows for the plate panel; a pure function of the items
    #[must_use]
    pub fn rows(&self) -> Vec<PlateRow> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| PlateRow {
                index,
                name: item.name.clone(),
                included: item.included,
                lines: item
                    .parts
                    .iter()
                    .map(|p| row_line("", p))
                    .chain(item.extras.iter().map(|e| row_line("+ ", e)))
                    .collect(),
            })
            .collect()
    }
}

fn row_line(prefix: &str, part: &LinePart) -> String {
    format!(
        "{prefix}{} x{} ({})",
        part.label,
        part.qty,
        part.line_total()
    )
}
