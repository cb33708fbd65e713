//! Runtime configuration
//!
//! Loaded from TOML or from `PLATE_*` environment variables; anything
//! missing falls back to the shop's defaults and is logged.

use crate::dispatch::{MessagingChannel, DEFAULT_MESSAGING_BASE};
use crate::error::OrderError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Most channels the checkout flow can prompt for
pub const MAX_CHANNELS: usize = 3;

const CHANNEL_NAMES: [&str; MAX_CHANNELS] = ["primary", "secondary", "tertiary"];
const DEFAULT_PHONES: [&str; MAX_CHANNELS] = ["923294102524", "923298120448", "923046472688"];

/// Ordering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Name in the summary's closing line
    pub business_name: String,
    /// Label printed before amounts
    pub currency: String,
    /// Messaging base URL; a channel's number is appended as the path
    pub messaging_base: String,
    /// Channels in prompt order
    pub channels: Vec<MessagingChannel>,
    /// Analytics webhook; none disables the sink
    pub webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
    /// Default tracing filter directive
    pub log_filter: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            business_name: "LOG FROZE".to_string(),
            currency: "Rs".to_string(),
            messaging_base: DEFAULT_MESSAGING_BASE.to_string(),
            channels: default_channels(&DEFAULT_PHONES),
            webhook_url: None,
            webhook_timeout_secs: 10,
            log_filter: "info".to_string(),
            log_json: false,
        }
    }
}

fn default_channels(phones: &[&str]) -> Vec<MessagingChannel> {
    CHANNEL_NAMES
        .iter()
        .zip(phones)
        .map(|(name, phone)| MessagingChannel::new(*name, *phone))
        .collect()
}

impl OrderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_business_name(mut self, name: impl Into<String>) -> Self {
        self.business_name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_messaging_base(mut self, base: impl Into<String>) -> Self {
        self.messaging_base = base.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<MessagingChannel>) -> Self {
        self.channels = channels;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    /// Parse from TOML; missing keys take defaults
    ///
    /// # Errors
    /// [`OrderError::Config`] on malformed input or invalid settings
    pub fn from_toml_str(input: &str) -> Result<Self, OrderError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the process environment
    ///
    /// # Errors
    /// [`OrderError::Config`] on unparsable values or invalid settings
    pub fn from_env() -> Result<Self, OrderError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup, using `PLATE_*` names
    ///
    /// | key | field |
    /// |-----|-------|
    /// | `PLATE_BUSINESS_NAME` | `business_name` |
    /// | `PLATE_CURRENCY` | `currency` |
    /// | `PLATE_MESSAGING_BASE` | `messaging_base` |
    /// | `PLATE_CHANNELS` | comma-separated phone numbers |
    /// | `PLATE_WEBHOOK_URL` | `webhook_url` |
    /// | `PLATE_WEBHOOK_TIMEOUT_SECS` | `webhook_timeout_secs` |
    /// | `PLATE_LOG` | `log_filter` |
    /// | `PLATE_LOG_JSON` | `log_json` |
    ///
    /// # Errors
    /// [`OrderError::Config`] on unparsable values or invalid settings
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OrderError> {
        let defaults = Self::default();
        let phones: String = try_load(&lookup, "PLATE_CHANNELS", &DEFAULT_PHONES.join(","))?;
        let phones: Vec<&str> = phones
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let config = Self {
            business_name: try_load(&lookup, "PLATE_BUSINESS_NAME", &defaults.business_name)?,
            currency: try_load(&lookup, "PLATE_CURRENCY", &defaults.currency)?,
            messaging_base: try_load(&lookup, "PLATE_MESSAGING_BASE", &defaults.messaging_base)?,
            channels: default_channels(&phones),
            webhook_url: lookup("PLATE_WEBHOOK_URL").filter(|u| !u.trim().is_empty()),
            webhook_timeout_secs: try_load(
                &lookup,
                "PLATE_WEBHOOK_TIMEOUT_SECS",
                &defaults.webhook_timeout_secs.to_string(),
            )?,
            log_filter: try_load(&lookup, "PLATE_LOG", &defaults.log_filter)?,
            log_json: try_load(&lookup, "PLATE_LOG_JSON", "false")?,
        };
        if phones.len() > MAX_CHANNELS {
            return Err(OrderError::Config(format!(
                "PLATE_CHANNELS lists {} numbers, at most {MAX_CHANNELS} are supported",
                phones.len()
            )));
        }
        if config.webhook_url.is_none() {
            info!("PLATE_WEBHOOK_URL not set, order analytics disabled");
        }
        config.validate()?;
        Ok(config)
    }

    /// Check channel count and URLs
    ///
    /// # Errors
    /// [`OrderError::Config`] describing the first problem
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.channels.is_empty() || self.channels.len() > MAX_CHANNELS {
            return Err(OrderError::Config(format!(
                "expected 1 to {MAX_CHANNELS} messaging channels, got {}",
                self.channels.len()
            )));
        }
        if let Some(channel) = self
            .channels
            .iter()
            .find(|c| c.phone.is_empty() || !c.phone.chars().all(|ch| ch.is_ascii_digit()))
        {
            return Err(OrderError::Config(format!(
                "channel '{}' has invalid number '{}'",
                channel.name, channel.phone
            )));
        }
        Url::parse(&self.messaging_base)
            .map_err(|e| OrderError::Config(format!("messaging_base: {e}")))?;
        if let Some(url) = &self.webhook_url {
            Url::parse(url).map_err(|e| OrderError::Config(format!("webhook_url: {e}")))?;
        }
        Ok(())
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, OrderError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            OrderError::Config(format!("{key}: {e}"))
        })
}
