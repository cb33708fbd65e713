//! Canonical price tables
//!
//! A [`PriceTable`] maps a price key (the keyed segments of an option path)
//! to exactly one price. Lookups never fall back to anything else: a missing
//! key is a catalog defect and surfaces as [`CatalogError::UnpricedPath`].

use crate::error::CatalogError;
use crate::money::Rupees;
use crate::path::OptionPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price lookup keyed by option combination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    entries: BTreeMap<OptionPath, Rupees>,
}

impl PriceTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a price, returning the previous one
    pub fn insert(&mut self, key: OptionPath, price: Rupees) -> Option<Rupees> {
        self.entries.insert(key, price)
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: &str, price: u64) -> Self {
        let segments = key.split('.').map(ToString::to_string).collect();
        self.entries.insert(OptionPath::new(segments), Rupees::new(price));
        self
    }

    /// Resolve the price for a key
    ///
    /// # Errors
    /// Returns [`CatalogError::UnpricedPath`] if the key has no entry
    pub fn lookup(&self, family: &str, key: &OptionPath) -> Result<Rupees, CatalogError> {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| CatalogError::UnpricedPath {
                family: family.to_string(),
                key: key.to_string(),
            })
    }

    /// Check if a key is priced
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &OptionPath) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of priced combinations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&OptionPath, Rupees)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hits_exact_key() {
        let table = PriceTable::new()
            .with("shami.round", 270)
            .with("shami.long", 300);
        let key: OptionPath = "shami.long".parse().unwrap();
        assert_eq!(table.lookup("burger", &key).unwrap(), Rupees::new(300));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn lookup_miss_is_error_not_zero() {
        let table = PriceTable::new().with("shami.round", 270);
        let key: OptionPath = "shami".parse().unwrap();
        let err = table.lookup("burger", &key).unwrap_err();
        assert!(matches!(err, CatalogError::UnpricedPath { ref key, .. } if key == "shami"));
    }

    #[test]
    fn deserializes_from_toml_table() {
        let table: PriceTable = toml::from_str(
            r#"
            "egg.2" = 180
            "egg.3" = 200
            "#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains(&"egg.3".parse().unwrap()));
    }
}
