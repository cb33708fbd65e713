//! Error types and user notices for ordering

use crate::checkout::CheckoutState;
use plate_config::ConfigureError;
use plate_menu::CatalogError;
use std::fmt;

/// Messages shown to the user
///
/// Everything the flow can refuse for a user-visible reason maps to exactly
/// one notice; the flow's state is unchanged whenever one is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Add attempted before any quantity was set
    NothingConfigured,
    /// Checkout attempted with an empty plate
    EmptyPlate,
    /// Live location requested but not obtainable
    LocationUnavailable,
}

impl Notice {
    /// Text shown to the user
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::NothingConfigured => {
                "Please set quantity (How much) for at least one selection before adding to plate."
            }
            Notice::EmptyPlate => "Your plate is empty. Add items first.",
            Notice::LocationUnavailable => {
                "Live location is not available. Please type your address instead."
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordering errors
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Configure(#[from] ConfigureError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("plate is empty")]
    EmptyPlate,

    #[error("invalid checkout transition: {from:?} -> {to:?}")]
    InvalidTransition { from: CheckoutState, to: CheckoutState },

    /// Plate changes are refused between the first and last send
    #[error("plate cannot change while the order is being sent ({0:?})")]
    PlateLocked(CheckoutState),

    /// No outstanding message to send
    #[error("no order message has been prepared")]
    NoMessage,

    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl OrderError {
    /// Notice to show for this error, if it is user facing
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            OrderError::Configure(e) if e.is_user_facing() => Some(Notice::NothingConfigured),
            OrderError::EmptyPlate => Some(Notice::EmptyPlate),
            OrderError::LocationUnavailable(_) => Some(Notice::LocationUnavailable),
            _ => None,
        }
    }

    /// Whether the error should be surfaced as a notice rather than logged
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        self.notice().is_some()
    }
}

impl From<toml::de::Error> for OrderError {
    fn from(e: toml::de::Error) -> Self {
        OrderError::Config(e.to_string())
    }
}

/// Analytics sink errors
///
/// Never surfaced to the user; the dispatcher logs and drops them.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("sink rejected payload: {0}")]
    Rejected(String),
}

impl SinkError {
    /// Whether a later attempt could succeed (the flow never retries)
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            SinkError::Http(e) => e.is_timeout() || e.is_connect(),
            SinkError::Status { status, .. } => *status >= 500,
            SinkError::Rejected(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_for_user_facing_errors() {
        let nothing = OrderError::from(ConfigureError::NothingConfigured {
            family: "burger".into(),
        });
        assert_eq!(nothing.notice(), Some(Notice::NothingConfigured));
        assert_eq!(OrderError::EmptyPlate.notice(), Some(Notice::EmptyPlate));
        assert!(!OrderError::NoMessage.is_user_facing());
    }

    #[test]
    fn notice_text() {
        assert_eq!(
            Notice::EmptyPlate.to_string(),
            "Your plate is empty. Add items first."
        );
        assert!(Notice::NothingConfigured.message().starts_with("Please set quantity"));
    }

    #[test]
    fn sink_status_recoverability() {
        let e = SinkError::Status {
            status: 503,
            body: String::new(),
        };
        assert!(e.is_recoverable());
        assert!(!SinkError::Rejected("bad".into()).is_recoverable());
    }
}
