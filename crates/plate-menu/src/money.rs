//! Whole-rupee amounts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Amount in whole rupees
///
/// Menu prices have no fractional part, so amounts are integers and sums
/// are exact.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupees(pub u64);

impl Rupees {
    /// Zero amount
    pub const ZERO: Rupees = Rupees(0);

    /// Create amount
    #[inline]
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Numeric value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Unit price multiplied by a quantity
    #[inline]
    #[must_use]
    pub fn times(self, qty: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(qty)))
    }
}

impl Add for Rupees {
    type Output = Rupees;

    fn add(self, rhs: Self) -> Self::Output {
        Rupees(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Rupees {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rupees::ZERO, Add::add)
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_and_sum() {
        let line = Rupees::new(270).times(2);
        assert_eq!(line, Rupees::new(540));
        let total: Rupees = [line, Rupees::new(50)].into_iter().sum();
        assert_eq!(total.value(), 590);
    }

    #[test]
    fn display_uses_rs_prefix() {
        assert_eq!(Rupees::new(150).to_string(), "Rs 150");
    }
}
