//! Messaging links
//!
//! The order text is URL-encoded once into a [`MessageDraft`] when the
//! details form is submitted. Each channel's link reuses that encoding and
//! only swaps in the channel's number.

use crate::error::OrderError;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Default messaging base
pub const DEFAULT_MESSAGING_BASE: &str = "https://wa.me";

/// One recipient channel of the shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingChannel {
    /// Label used in logs (e.g. `primary`)
    pub name: String,
    /// International number without `+`
    pub phone: String,
}

impl MessagingChannel {
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Link handed to the messaging transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel: String,
    pub url: Url,
}

/// Encoded order text, ready to address to any channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    template: Url,
}

impl MessageDraft {
    /// Encode `text` against `base`
    ///
    /// # Errors
    /// [`OrderError::InvalidUrl`] if `base` is not an absolute URL that can
    /// carry a path
    pub fn new(base: &str, text: &str) -> Result<Self, OrderError> {
        let template = Url::parse_with_params(base, &[("text", text)]).map_err(|e| {
            OrderError::InvalidUrl {
                url: base.to_string(),
                reason: e.to_string(),
            }
        })?;
        if template.cannot_be_a_base() {
            return Err(OrderError::InvalidUrl {
                url: base.to_string(),
                reason: "cannot carry a path".to_string(),
            });
        }
        Ok(Self { template })
    }

    /// Encoded query string (`text=...`)
    #[must_use]
    pub fn encoded(&self) -> &str {
        self.template.query().unwrap_or_default()
    }

    /// Link for one channel
    #[must_use]
    pub fn link_for(&self, channel: &MessagingChannel) -> OutboundMessage {
        let mut url = self.template.clone();
        url.set_path(&channel.phone);
        OutboundMessage {
            channel: channel.name.clone(),
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_carries_encoded_text() {
        let draft = MessageDraft::new(DEFAULT_MESSAGING_BASE, "Order from Ali\nTotal: Rs 540").unwrap();
        let out = draft.link_for(&MessagingChannel::new("primary", "923294102524"));
        assert_eq!(out.channel, "primary");
        assert_eq!(out.url.path(), "/923294102524");

        let text: Vec<_> = out.url.query_pairs().collect();
        assert_eq!(text[0].1, "Order from Ali\nTotal: Rs 540");
        assert!(!draft.encoded().contains('\n'));
    }

    #[test]
    fn same_encoding_for_every_channel() {
        let draft = MessageDraft::new(DEFAULT_MESSAGING_BASE, "a & b = c").unwrap();
        let first = draft.link_for(&MessagingChannel::new("primary", "1"));
        let second = draft.link_for(&MessagingChannel::new("secondary", "2"));
        assert_eq!(first.url.query(), second.url.query());
        assert_ne!(first.url, second.url);
    }

    #[test]
    fn rejects_bad_base() {
        assert!(MessageDraft::new("not a url", "x").is_err());
        assert!(MessageDraft::new("mailto:shop@example.com", "x").is_err());
    }
}
