//! Recipient details collected at checkout

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment method used when none is given
pub const DEFAULT_PAYMENT: &str = "Cash on delivery";

/// When the order should arrive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTiming {
    #[default]
    Now,
    Scheduled(NaiveDateTime),
}

impl fmt::Display for DeliveryTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTiming::Now => f.write_str("Now"),
            DeliveryTiming::Scheduled(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M")),
        }
    }
}

/// Who receives the order and how; all fields are opaque text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInfo {
    pub name: String,
    pub contact: String,
    pub address: String,
    #[serde(default)]
    pub delivery: DeliveryTiming,
    /// Maps link of the recipient's live location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_link: Option<String>,
    pub payment: String,
}

impl RecipientInfo {
    /// Recipient for immediate delivery, paying cash; inputs are trimmed
    #[must_use]
    pub fn new(name: &str, contact: &str, address: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            contact: contact.trim().to_string(),
            address: address.trim().to_string(),
            delivery: DeliveryTiming::Now,
            location_link: None,
            payment: DEFAULT_PAYMENT.to_string(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_delivery(mut self, delivery: DeliveryTiming) -> Self {
        self.delivery = delivery;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_location_link(mut self, link: impl Into<String>) -> Self {
        self.location_link = Some(link.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_payment(mut self, payment: impl Into<String>) -> Self {
        self.payment = payment.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_trims_and_defaults() {
        let r = RecipientInfo::new("  Ali ", "0300 ", " Street 5");
        assert_eq!(r.name, "Ali");
        assert_eq!(r.address, "Street 5");
        assert_eq!(r.delivery, DeliveryTiming::Now);
        assert_eq!(r.payment, DEFAULT_PAYMENT);
    }

    #[test]
    fn scheduled_display() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        assert_eq!(DeliveryTiming::Scheduled(at).to_string(), "2025-03-14 19:30");
        assert_eq!(DeliveryTiming::Now.to_string(), "Now");
    }
}
