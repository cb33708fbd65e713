//! Live location links
//!
//! Capturing a position is the environment's job; [`LocationProvider`] is
//! the seam. Without a provider, or when it fails, the user gets
//! [`Notice::LocationUnavailable`] and types an address instead.

use crate::error::{Notice, OrderError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Base of generated maps links
pub const MAPS_BASE: &str = "https://www.google.com/maps";

/// A captured position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveLocation {
    pub lat: f64,
    pub lng: f64,
}

impl LiveLocation {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Maps link pointing at this position
    #[must_use]
    pub fn maps_link(&self) -> String {
        format!("{MAPS_BASE}?q={},{}", self.lat, self.lng)
    }
}

/// Source of the user's position
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    /// Capture the current position
    async fn locate(&self) -> Result<LiveLocation, OrderError>;
}

/// Provider returning a fixed position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub LiveLocation);

#[async_trait::async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<LiveLocation, OrderError> {
        Ok(self.0)
    }
}

/// Resolve a maps link, degrading to a notice
///
/// # Errors
/// [`Notice::LocationUnavailable`] when no provider exists or it fails
pub async fn live_location_link(
    provider: Option<&dyn LocationProvider>,
) -> Result<String, Notice> {
    let Some(provider) = provider else {
        warn!("No location provider available");
        return Err(Notice::LocationUnavailable);
    };
    match provider.locate().await {
        Ok(location) => Ok(location.maps_link()),
        Err(e) => {
            warn!(error = %e, "Location lookup failed");
            Err(Notice::LocationUnavailable)
        }
    }
}
