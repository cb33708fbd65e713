//! Order summary text
//!
//! Renders the included plate items and the recipient's details into the
//! message sent over every channel. The output is deterministic: plate
//! order, parts before extras, and no formatting that depends on anything
//! but its inputs.

use crate::recipient::RecipientInfo;
use crate::store::PlateStore;
use plate_config::LinePart;
use plate_menu::Rupees;
use std::fmt::Write;

/// Rendered summary and the grand total it states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub text: String,
    pub total: Rupees,
}

/// Renders [`OrderSummary`] values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummaryFormatter {
    business: String,
    currency: String,
}

impl OrderSummaryFormatter {
    #[must_use]
    pub fn new(business: impl Into<String>) -> Self {
        Self {
            business: business.into(),
            currency: "Rs".to_string(),
        }
    }

    /// Set the currency label printed before amounts
    #[inline]
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Render the summary
    ///
    /// Items keep their plate number even when earlier items are excluded.
    #[must_use]
    pub fn format(&self, plate: &PlateStore, recipient: &RecipientInfo) -> OrderSummary {
        let mut text = String::new();
        let mut total = Rupees::ZERO;

        let _ = writeln!(text, "Order from {}", recipient.name);
        let _ = writeln!(text, "Contact: {}", recipient.contact);
        let _ = writeln!(text, "Address: {}", recipient.address);
        if let Some(link) = &recipient.location_link {
            let _ = writeln!(text, "Location: {link}");
        }
        let _ = writeln!(text, "Delivery: {}", recipient.delivery);
        let _ = writeln!(text, "Payment: {}", recipient.payment);
        text.push('\n');

        for (index, item) in plate.included() {
            let _ = writeln!(text, "{}. {}", index + 1, item.name);
            for part in &item.parts {
                self.write_line(&mut text, '-', part);
            }
            for extra in &item.extras {
                self.write_line(&mut text, '+', extra);
            }
            text.push('\n');
            total += item.subtotal();
        }

        let _ = writeln!(text, "Total: {} {}", self.currency, total.value());
        text.push('\n');
        let _ = write!(text, "Thank you for ordering from {}!", self.business);

        OrderSummary { text, total }
    }

    fn write_line(&self, text: &mut String, marker: char, line: &LinePart) {
        let _ = writeln!(
            text,
            "   {marker} {} x{} = {} {}",
            line.label,
            line.qty,
            self.currency,
            line.line_total().value()
        );
    }
}
