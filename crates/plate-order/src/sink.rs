//! Best-effort order analytics
//!
//! After the primary message goes out, a compact record of the order is
//! handed to an [`OrderSink`]. Delivery never gates the checkout flow:
//! [`SinkDispatcher`] spawns the call, logs the outcome and drops errors.
//! There is no retry and no cancellation.

use crate::error::SinkError;
use crate::recipient::RecipientInfo;
use crate::store::PlateStore;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Record posted to the analytics sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLogPayload {
    pub name: String,
    pub contact: String,
    /// Delivery address as typed
    pub location: String,
    /// Included item names joined with `", "`
    pub items: String,
    pub total: u64,
    pub payment: String,
}

impl OrderLogPayload {
    /// Build from the plate and recipient
    #[must_use]
    pub fn new(plate: &PlateStore, recipient: &RecipientInfo) -> Self {
        let items = plate
            .included()
            .map(|(_, item)| item.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            name: recipient.name.clone(),
            contact: recipient.contact.clone(),
            location: recipient.address.clone(),
            items,
            total: plate.total().value(),
            payment: recipient.payment.clone(),
        }
    }
}

/// Destination of order records
#[async_trait::async_trait]
pub trait OrderSink: Send + Sync {
    /// Deliver one record
    async fn record(&self, payload: &OrderLogPayload) -> Result<(), SinkError>;
}

/// Posts records as JSON to a webhook
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: Url,
}

impl WebhookSink {
    /// Create sink with a request timeout
    #[must_use]
    pub fn new(url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, url }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait::async_trait]
impl OrderSink for WebhookSink {
    async fn record(&self, payload: &OrderLogPayload) -> Result<(), SinkError> {
        let response = self.client.post(self.url.clone()).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!(%status, body = %body, "Webhook response");
        Ok(())
    }
}

/// Fire-and-forget front of an optional sink
#[derive(Clone, Default)]
pub struct SinkDispatcher {
    sink: Option<Arc<dyn OrderSink>>,
}

impl std::fmt::Debug for SinkDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkDispatcher")
            .field("configured", &self.sink.is_some())
            .finish()
    }
}

impl SinkDispatcher {
    #[must_use]
    pub fn new(sink: Option<Arc<dyn OrderSink>>) -> Self {
        Self { sink }
    }

    #[inline]
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.sink.is_some()
    }

    /// Spawn delivery of `payload` on the current tokio runtime
    ///
    /// Returns the task handle, or `None` when no sink is configured or no
    /// runtime is available; the caller proceeds either way.
    pub fn dispatch(&self, payload: OrderLogPayload) -> Option<JoinHandle<()>> {
        let Some(sink) = self.sink.clone() else {
            debug!("No order sink configured");
            return None;
        };
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime, order record dropped");
            return None;
        };
        Some(handle.spawn(async move {
            match sink.record(&payload).await {
                Ok(()) => info!(total = payload.total, "Order recorded"),
                Err(e) => warn!(
                    error = %e,
                    recoverable = e.is_recoverable(),
                    "Order record failed"
                ),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_config::{LineItem, LinePart};
    use plate_menu::Rupees;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<OrderLogPayload>>);

    #[async_trait::async_trait]
    impl OrderSink for Recording {
        async fn record(&self, payload: &OrderLogPayload) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    struct Failing;

    #[async_trait::async_trait]
    impl OrderSink for Failing {
        async fn record(&self, _: &OrderLogPayload) -> Result<(), SinkError> {
            Err(SinkError::Rejected("down".into()))
        }
    }

    fn payload() -> OrderLogPayload {
        let mut plate = PlateStore::new();
        for (name, included) in [("Burger", true), ("Drink", false), ("Biryani", true)] {
            plate.append(LineItem {
                name: name.into(),
                family: name.to_lowercase(),
                parts: vec![LinePart::new(name, Rupees::new(100), 1)],
                extras: Vec::new(),
                included,
            });
        }
        OrderLogPayload::new(&plate, &RecipientInfo::new("Ali", "0300", "Street 1"))
    }

    #[test]
    fn payload_lists_included_items() {
        let p = payload();
        assert_eq!(p.items, "Burger, Biryani");
        assert_eq!(p.total, 200);
        assert_eq!(p.location, "Street 1");
    }

    #[test]
    fn payload_json_shape() {
        let json = serde_json::to_value(payload()).unwrap();
        for key in ["name", "contact", "location", "items", "total", "payment"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[tokio::test]
    async fn dispatch_delivers_in_background() {
        let sink = Arc::new(Recording::default());
        let dispatcher = SinkDispatcher::new(Some(sink.clone()));
        dispatcher.dispatch(payload()).unwrap().await.unwrap();
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let dispatcher = SinkDispatcher::new(Some(Arc::new(Failing)));
        assert!(dispatcher.dispatch(payload()).unwrap().await.is_ok());
    }

    #[test]
    fn without_runtime_or_sink_nothing_is_spawned() {
        assert!(SinkDispatcher::default().dispatch(payload()).is_none());
        let dispatcher = SinkDispatcher::new(Some(Arc::new(Failing)));
        assert!(dispatcher.dispatch(payload()).is_none());
    }
}
