//! Plate Menu
//!
//! Static menu definitions the configuration engine works from.
//!
//! # Core Concepts
//!
//! - [`OptionPath`]: Hierarchical address of a selection (`shami.round`)
//! - [`FamilySchema`]: Ordered levels of one item family plus its extras
//! - [`PriceTable`]: Exactly one price per keyed leaf combination
//! - [`Catalog`]: Validated set of families, loadable from TOML or JSON
//! - [`Rupees`]: Whole-rupee amounts
//!
//! # Example
//!
//! ```rust
//! use plate_menu::{Catalog, OptionPath};
//!
//! let catalog = Catalog::builtin();
//! let burger = catalog.family("burger").unwrap();
//! let leaf: OptionPath = "shami.round".parse().unwrap();
//! assert_eq!(burger.resolve_price(&leaf).unwrap().value(), 270);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod builtin;
mod catalog;
mod error;
mod money;
mod path;
mod price;
mod schema;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use money::Rupees;
pub use path::{OptionPath, PathError};
pub use price::PriceTable;
pub use schema::{
    ComboDef, ExtraDef, FamilySchema, LevelDef, OptionDef, SelectorKind, DEFAULT_EXTRA_PRICE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
