//! Testing utilities for the plate builder workspace
//! 
//! Shared fixtures: catalogs, builders and hand-made line items.

#![allow(missing_docs)]

use plate_config::{ItemBuilder, LineItem, LinePart};
use plate_menu::{Catalog, OptionPath, Rupees};
use std::str::FromStr;
use std::sync::Arc;

/// Small two-family menu for tests that should not depend on the shop menu
pub const SMALL_MENU: &str = r#"
[[family]]
id = "rice"
name = "Rice"
extras = [{ id = "raita", label = "Extra raita" }]

[[family.levels]]
id = "kind"
label = "Kind"
kind = "checkbox"
options = [
    { id = "chicken", label = "Chicken" },
    { id = "egg", label = "Egg" },
]

[family.prices]
chicken = 300
egg = 250

[[family]]
id = "tea"
name = "Tea"
part_label = "{0} tea ({1})"

[[family.levels]]
id = "temperature"
label = "Temperature"
kind = "checkbox"
options = [{ id = "hot", label = "Hot" }]

[[family.levels]]
id = "size"
label = "Size"
kind = "radio"
options = [
    { id = "regular", label = "Regular" },
    { id = "large", label = "Large" },
]

[family.prices]
"hot.regular" = 100
"hot.large" = 150
"#;

pub fn path(s: &str) -> OptionPath {
    OptionPath::from_str(s).unwrap()
}

pub fn builtin_catalog() -> Catalog {
    let catalog = Catalog::builtin();
    for family in catalog.families() {
        family.validate().unwrap();
    }
    catalog
}

pub fn small_catalog() -> Catalog {
    Catalog::from_toml_str(SMALL_MENU).unwrap()
}

pub fn builder(catalog: &Catalog, family: &str) -> ItemBuilder {
    ItemBuilder::new(Arc::clone(catalog.family(family).unwrap()))
}

/// Builder with every segment of `leaf` selected and the leaf set to `qty`
pub fn configured_builder(catalog: &Catalog, family: &str, leaf: &str, qty: u32) -> ItemBuilder {
    let mut b = builder(catalog, family);
    let leaf = path(leaf);
    let mut prefix = OptionPath::root();
    for seg in leaf.iter() {
        prefix = prefix.child(seg);
        if !b.tree().is_selected(&prefix) {
            b.select(&prefix).unwrap();
        }
    }
    b.set_quantity(&leaf, f64::from(qty)).unwrap();
    b
}

/// Line item with a single part
pub fn item(name: &str, unit_price: u64, qty: u32) -> LineItem {
    LineItem {
        name: name.to_string(),
        family: name.to_lowercase(),
        parts: vec![LinePart::new(name, Rupees::new(unit_price), qty)],
        extras: Vec::new(),
        included: true,
    }
}

pub fn excluded(mut item: LineItem) -> LineItem {
    item.included = false;
    item
}
