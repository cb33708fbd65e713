//! Quantity stepper
//!
//! [`QuantityControl`] is the only place a quantity lives. Zero is not just
//! a number here: it is the unset state shown as a "How much" placeholder,
//! and a control in that state never produces a line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder text for an unset quantity
pub const PLACEHOLDER: &str = "How much";

/// Stepper with a zero/unset sentinel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityControl {
    qty: u32,
}

/// Change notification emitted by every effective mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityChange {
    /// Value before the mutation
    pub previous: u32,
    /// Value after the mutation
    pub current: u32,
}

/// What a quantity display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyDisplay {
    /// Unset, rendered as [`PLACEHOLDER`]
    Placeholder,
    /// A positive count
    Count(u32),
}

impl fmt::Display for QtyDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QtyDisplay::Placeholder => f.write_str(PLACEHOLDER),
            QtyDisplay::Count(n) => write!(f, "{n}"),
        }
    }
}

impl QuantityControl {
    /// New control in the unset state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quantity
    #[inline]
    #[must_use]
    pub fn qty(&self) -> u32 {
        self.qty
    }

    /// Whether the control is still unset
    #[inline]
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.qty == 0
    }

    /// Display state, a pure function of the quantity
    #[inline]
    #[must_use]
    pub fn display(&self) -> QtyDisplay {
        if self.qty == 0 {
            QtyDisplay::Placeholder
        } else {
            QtyDisplay::Count(self.qty)
        }
    }

    /// Step up; the first step from unset lands on exactly 1
    pub fn increment(&mut self) -> QuantityChange {
        let previous = self.qty;
        self.qty = self.qty.saturating_add(1);
        QuantityChange {
            previous,
            current: self.qty,
        }
    }

    /// Step down, flooring at unset
    ///
    /// Returns `None` when already unset: nothing changed, nothing to notify.
    pub fn decrement(&mut self) -> Option<QuantityChange> {
        if self.qty == 0 {
            return None;
        }
        let previous = self.qty;
        self.qty -= 1;
        Some(QuantityChange {
            previous,
            current: self.qty,
        })
    }

    /// Set from an arbitrary number, clamped to `max(0, floor(n))`
    ///
    /// NaN clears the control.
    pub fn set_qty(&mut self, n: f64) -> QuantityChange {
        let previous = self.qty;
        self.qty = clamp_quantity(n);
        QuantityChange {
            previous,
            current: self.qty,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_quantity(n: f64) -> u32 {
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        n.floor() as u32
    }
}
