//! Order session
//!
//! [`OrderSession`] is the single owned store behind an ordering page: the
//! catalog, one [`ItemBuilder`] per family, the plate, and the checkout
//! flow. Handlers get it injected and call its methods; every method leaves
//! visibility, totals and flow state consistent before returning.

use crate::checkout::{CheckoutFlow, CheckoutState};
use crate::config::OrderConfig;
use crate::dispatch::{MessageDraft, MessagingChannel, OutboundMessage};
use crate::error::OrderError;
use crate::recipient::RecipientInfo;
use crate::sink::{OrderLogPayload, OrderSink, SinkDispatcher, WebhookSink};
use crate::store::{PlateRow, PlateStore};
use crate::summary::{OrderSummary, OrderSummaryFormatter};
use indexmap::IndexMap;
use plate_config::ItemBuilder;
use plate_menu::{Catalog, CatalogError, Rupees};
use reqwest::Url;
use std::sync::Arc;
use tracing::{info, warn};

/// Owned state of one ordering session
#[derive(Debug)]
pub struct OrderSession {
    catalog: Catalog,
    builders: IndexMap<String, ItemBuilder>,
    plate: PlateStore,
    flow: CheckoutFlow,
    formatter: OrderSummaryFormatter,
    messaging_base: String,
    channels: Vec<MessagingChannel>,
    dispatcher: SinkDispatcher,
}

impl OrderSession {
    /// Create session; builds the webhook sink if one is configured
    ///
    /// # Errors
    /// [`OrderError::Config`] if the config is invalid
    pub fn new(catalog: Catalog, config: &OrderConfig) -> Result<Self, OrderError> {
        config.validate()?;
        let sink = match &config.webhook_url {
            Some(url) => {
                let url = Url::parse(url).map_err(|e| OrderError::InvalidUrl {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
                Some(Arc::new(WebhookSink::new(url, config.webhook_timeout())) as Arc<dyn OrderSink>)
            }
            None => None,
        };

        let builders = catalog
            .families()
            .map(|schema| (schema.id.clone(), ItemBuilder::new(Arc::clone(schema))))
            .collect();

        info!(families = catalog.len(), channels = config.channels.len(), "Order session ready");
        Ok(Self {
            catalog,
            builders,
            plate: PlateStore::new(),
            flow: CheckoutFlow::new(),
            formatter: OrderSummaryFormatter::new(config.business_name.clone())
                .with_currency(config.currency.clone()),
            messaging_base: config.messaging_base.clone(),
            channels: config.channels.clone(),
            dispatcher: SinkDispatcher::new(sink),
        })
    }

    /// Replace the analytics sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn OrderSink>) -> Self {
        self.dispatcher = SinkDispatcher::new(Some(sink));
        self
    }

    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    #[must_use]
    pub fn plate(&self) -> &PlateStore {
        &self.plate
    }

    #[inline]
    #[must_use]
    pub fn checkout_state(&self) -> CheckoutState {
        self.flow.state()
    }

    /// Builder of a family
    ///
    /// # Errors
    /// [`OrderError::Catalog`] for an unknown family
    pub fn builder(&self, family: &str) -> Result<&ItemBuilder, OrderError> {
        self.builders
            .get(family)
            .ok_or_else(|| CatalogError::UnknownFamily(family.to_string()).into())
    }

    /// Mutable builder of a family
    ///
    /// # Errors
    /// [`OrderError::Catalog`] for an unknown family
    pub fn builder_mut(&mut self, family: &str) -> Result<&mut ItemBuilder, OrderError> {
        self.builders
            .get_mut(family)
            .ok_or_else(|| CatalogError::UnknownFamily(family.to_string()).into())
    }

    /// Compile a family's configuration onto the plate
    ///
    /// On success the family's builder is reset. With nothing configured the
    /// plate and builder are untouched and the error carries
    /// [`Notice::NothingConfigured`](crate::Notice::NothingConfigured).
    ///
    /// # Errors
    /// - [`OrderError::Configure`] if the item is not configured
    /// - [`OrderError::Catalog`] for an unknown family
    /// - [`OrderError::PlateLocked`] while the order is being sent
    pub fn add_to_plate(&mut self, family: &str) -> Result<usize, OrderError> {
        self.ensure_plate_editable()?;
        let item = self.builder_mut(family)?.finish()?;
        let index = self.plate.append(item);
        info!(family, index, total = %self.plate.total(), "Added to plate");
        Ok(index)
    }

    /// Remove a plate item; out-of-range indices are ignored
    ///
    /// # Errors
    /// [`OrderError::PlateLocked`] while the order is being sent
    pub fn remove_item(&mut self, index: usize) -> Result<bool, OrderError> {
        self.ensure_plate_editable()?;
        let removed = self.plate.remove_at(index).is_some();
        if removed {
            info!(index, total = %self.plate.total(), "Removed from plate");
        }
        Ok(removed)
    }

    /// Set a plate item's inclusion
    ///
    /// # Errors
    /// [`OrderError::PlateLocked`] while the order is being sent
    pub fn set_included(&mut self, index: usize, included: bool) -> Result<bool, OrderError> {
        self.ensure_plate_editable()?;
        Ok(self.plate.set_included(index, included))
    }

    /// Flip a plate item's inclusion
    ///
    /// # Errors
    /// [`OrderError::PlateLocked`] while the order is being sent
    pub fn toggle_included(&mut self, index: usize) -> Result<Option<bool>, OrderError> {
        self.ensure_plate_editable()?;
        Ok(self.plate.toggle_included(index))
    }

    #[must_use]
    pub fn total(&self) -> Rupees {
        self.plate.total()
    }

    #[must_use]
    pub fn plate_rows(&self) -> Vec<PlateRow> {
        self.plate.rows()
    }

    /// Open the details form
    ///
    /// A finished or cancelled flow is restarted first.
    ///
    /// # Errors
    /// - [`OrderError::EmptyPlate`] if no item is included
    /// - [`OrderError::InvalidTransition`] if a checkout is already running
    pub fn begin_checkout(&mut self) -> Result<(), OrderError> {
        if self.nothing_to_order() {
            warn!(items = self.plate.len(), "Checkout with nothing included");
            return Err(OrderError::EmptyPlate);
        }
        if self.flow.state().is_terminal() {
            self.flow.transition(CheckoutState::Browsing)?;
        }
        self.flow.transition(CheckoutState::Reviewing)
    }

    /// Close the details form without sending
    ///
    /// # Errors
    /// [`OrderError::InvalidTransition`] unless reviewing
    pub fn close_review(&mut self) -> Result<(), OrderError> {
        self.flow.transition(CheckoutState::Browsing)
    }

    /// Preview the summary for a recipient
    #[must_use]
    pub fn summary(&self, recipient: &RecipientInfo) -> OrderSummary {
        self.formatter.format(&self.plate, recipient)
    }

    /// Submit the details form
    ///
    /// Renders and encodes the summary once, returns the primary channel's
    /// link and hands an order record to the analytics sink in the
    /// background.
    ///
    /// # Errors
    /// - [`OrderError::InvalidTransition`] unless reviewing
    /// - [`OrderError::EmptyPlate`] if nothing is included any more
    /// - [`OrderError::InvalidUrl`] if the messaging base is unusable
    pub fn submit_details(&mut self, recipient: &RecipientInfo) -> Result<OutboundMessage, OrderError> {
        if self.nothing_to_order() {
            warn!(items = self.plate.len(), "Details submitted with nothing included");
            return Err(OrderError::EmptyPlate);
        }
        let summary = self.summary(recipient);
        let draft = MessageDraft::new(&self.messaging_base, &summary.text)?;
        let channel = self.channels.first().ok_or(OrderError::NoMessage)?;
        let message = draft.link_for(channel);

        self.flow.record_first_send(draft, self.channels.len())?;
        info!(
            channel = %message.channel,
            total = %summary.total,
            "Order sent"
        );

        self.dispatcher.dispatch(OrderLogPayload::new(&self.plate, recipient));
        self.finish_if_done();
        Ok(message)
    }

    /// Send the prepared message to the next channel
    ///
    /// # Errors
    /// - [`OrderError::InvalidTransition`] unless at a send prompt
    /// - [`OrderError::NoMessage`] if nothing was prepared
    pub fn send_next(&mut self) -> Result<OutboundMessage, OrderError> {
        let draft = self.flow.draft().ok_or(OrderError::NoMessage)?;
        let channel = self
            .channels
            .get(self.flow.sent())
            .ok_or(OrderError::InvalidTransition {
                from: self.flow.state(),
                to: CheckoutState::Completed,
            })?;
        let message = draft.link_for(channel);

        self.flow.record_next_send(self.channels.len())?;
        info!(channel = %message.channel, "Order forwarded");
        self.finish_if_done();
        Ok(message)
    }

    /// Decline the remaining channels
    ///
    /// # Errors
    /// [`OrderError::InvalidTransition`] unless at a send prompt
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.flow.transition(CheckoutState::Cancelled)?;
        info!(sent = self.flow.sent(), "Remaining channels skipped");
        self.plate.clear();
        Ok(())
    }

    fn nothing_to_order(&self) -> bool {
        self.plate.included().next().is_none()
    }

    /// The sent message covers the plate as it was; it stays fixed until
    /// the flow ends.
    fn ensure_plate_editable(&self) -> Result<(), OrderError> {
        let state = self.flow.state();
        if state.is_sending() {
            warn!(state = ?state, "Plate change while sending");
            return Err(OrderError::PlateLocked(state));
        }
        Ok(())
    }

    fn finish_if_done(&mut self) {
        if self.flow.state() == CheckoutState::Completed {
            info!(sent = self.flow.sent(), "Checkout completed");
            self.plate.clear();
        }
    }
}
