//! Plate Config
//!
//! Configuration engine for a single menu item: nested option pickers,
//! quantities, dependent regions and compilation into priced line items.
//!
//! # Core Concepts
//!
//! - [`QuantityControl`]: Stepper where zero means "unset"
//! - [`OptionTree`]: Generic recursive selection tree driven by a family schema
//! - [`VisibilityPolicy`]: Pure derivation of which regions are offered
//! - [`LineItemCompiler`]: Configuration to [`LineItem`] via price-table lookups
//! - [`ItemBuilder`]: Owns one item's state, cascades resets, notifies observers
//!
//! # Example
//!
//! ```rust
//! use plate_config::ItemBuilder;
//! use plate_menu::{Catalog, OptionPath, Rupees};
//! use std::sync::Arc;
//!
//! let catalog = Catalog::builtin();
//! let burger = Arc::clone(catalog.family("burger").unwrap());
//! let mut builder = ItemBuilder::new(burger);
//!
//! builder.select(&"shami".parse().unwrap()).unwrap();
//! let leaf: OptionPath = "shami.round".parse().unwrap();
//! builder.set_quantity(&leaf, 2.0).unwrap();
//!
//! let item = builder.finish().unwrap();
//! assert_eq!(item.subtotal(), Rupees::new(540));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod builder;
mod compiler;
mod error;
mod events;
mod extras;
mod quantity;
mod tree;
mod visibility;

pub use builder::ItemBuilder;
pub use compiler::{LineItem, LineItemCompiler, LinePart, COMBO_LABEL_PREFIX};
pub use error::ConfigureError;
pub use events::{ConfigChange, ConfigEvent, ConfigObserver};
pub use extras::{ComboState, ExtraAnswer, ExtraScope, ExtraState, ExtrasSelection};
pub use quantity::{QtyDisplay, QuantityChange, QuantityControl, PLACEHOLDER};
pub use tree::{OptionNode, OptionTree, SelectOutcome, Slot};
pub use visibility::{Region, Visibility, VisibilityPolicy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
