//! Menu catalog
//!
//! The [`Catalog`] is the owned, validated set of family schemas a session
//! configures items from. It loads from TOML (`[[family]]` tables) or JSON
//! and rejects any menu whose leaf combinations do not each resolve to
//! exactly one price.

use crate::builtin;
use crate::error::CatalogError;
use crate::schema::FamilySchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(rename = "family", default)]
    families: Vec<FamilySchema>,
}

/// Validated menu families in display order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    families: IndexMap<String, Arc<FamilySchema>>,
}

impl Catalog {
    /// Build catalog from schemas, validating each
    ///
    /// # Errors
    /// - [`CatalogError::DuplicateFamily`] if two schemas share an id
    /// - any error from [`FamilySchema::validate`]
    pub fn new(families: Vec<FamilySchema>) -> Result<Self, CatalogError> {
        let mut map = IndexMap::with_capacity(families.len());
        for family in families {
            family.validate()?;
            if map.contains_key(&family.id) {
                return Err(CatalogError::DuplicateFamily(family.id));
            }
            map.insert(family.id.clone(), Arc::new(family));
        }
        tracing::debug!(families = map.len(), "catalog loaded");
        Ok(Self { families: map })
    }

    /// Parse catalog from TOML
    ///
    /// # Errors
    /// [`CatalogError::Parse`] on malformed input, otherwise as [`Catalog::new`]
    pub fn from_toml_str(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(input)?;
        Self::new(file.families)
    }

    /// Parse catalog from JSON (`{"family": [...]}`)
    ///
    /// # Errors
    /// [`CatalogError::Parse`] on malformed input, otherwise as [`Catalog::new`]
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(input)?;
        Self::new(file.families)
    }

    /// The shop's own menu
    #[must_use]
    pub fn builtin() -> Self {
        let families = builtin::families()
            .into_iter()
            .map(|f| (f.id.clone(), Arc::new(f)))
            .collect();
        Self { families }
    }

    /// Look up family by id
    ///
    /// # Errors
    /// [`CatalogError::UnknownFamily`] if absent
    pub fn family(&self, id: &str) -> Result<&Arc<FamilySchema>, CatalogError> {
        self.families
            .get(id)
            .ok_or_else(|| CatalogError::UnknownFamily(id.to_string()))
    }

    /// Check if family exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.families.contains_key(id)
    }

    /// Families in display order
    pub fn families(&self) -> impl Iterator<Item = &Arc<FamilySchema>> {
        self.families.values()
    }

    /// Number of families
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
