//! Plate Order
//!
//! Plate aggregation, order summaries and the multi-channel submission flow.
//!
//! # Core Concepts
//!
//! - [`PlateStore`]: Ordered line items with inclusion flags and a live total
//! - [`OrderSummaryFormatter`]: Deterministic order text plus grand total
//! - [`CheckoutFlow`]: Validated review and send states
//! - [`MessageDraft`]: Order text encoded once, addressed per channel
//! - [`SinkDispatcher`]: Fire-and-forget analytics through an [`OrderSink`]
//! - [`OrderSession`]: The owned store wiring all of the above
//!
//! # Example
//!
//! ```rust
//! use plate_menu::{Catalog, OptionPath};
//! use plate_order::{OrderConfig, OrderSession, RecipientInfo};
//!
//! let mut session = OrderSession::new(Catalog::builtin(), &OrderConfig::default()).unwrap();
//!
//! let burger = session.builder_mut("burger").unwrap();
//! burger.select(&"egg".parse().unwrap()).unwrap();
//! let leaf: OptionPath = "egg.round".parse().unwrap();
//! burger.increment(&leaf).unwrap();
//! session.add_to_plate("burger").unwrap();
//! assert_eq!(session.total().value(), 180);
//!
//! session.begin_checkout().unwrap();
//! let primary = session
//!     .submit_details(&RecipientInfo::new("Ali", "03001234567", "Street 5"))
//!     .unwrap();
//! assert_eq!(primary.url.path(), "/923294102524");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod checkout;
pub mod telemetry;

mod config;
mod dispatch;
mod error;
mod location;
mod recipient;
mod session;
mod sink;
mod store;
mod summary;

pub use checkout::{CheckoutFlow, CheckoutState};
pub use config::{OrderConfig, MAX_CHANNELS};
pub use dispatch::{MessageDraft, MessagingChannel, OutboundMessage, DEFAULT_MESSAGING_BASE};
pub use error::{Notice, OrderError, SinkError};
pub use location::{live_location_link, FixedLocation, LiveLocation, LocationProvider, MAPS_BASE};
pub use recipient::{DeliveryTiming, RecipientInfo, DEFAULT_PAYMENT};
pub use session::OrderSession;
pub use sink::{OrderLogPayload, OrderSink, SinkDispatcher, WebhookSink};
pub use store::{PlateRow, PlateStore};
pub use summary::{OrderSummary, OrderSummaryFormatter};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
