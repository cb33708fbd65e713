//! Error types for the menu catalog

use crate::path::PathError;

/// Catalog construction and lookup errors
///
/// All of these indicate a defective menu definition rather than a user
/// mistake, so none of them are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Family id not present in the catalog
    #[error("unknown menu family: {0}")]
    UnknownFamily(String),

    /// Two families share an id
    #[error("duplicate menu family: {0}")]
    DuplicateFamily(String),

    /// Family defines no selection levels
    #[error("family '{0}' has no levels")]
    NoLevels(String),

    /// Level defines no options
    #[error("level '{level}' of family '{family}' has no options")]
    EmptyLevel { family: String, level: String },

    /// Two options in a level share an id
    #[error("duplicate option '{option}' in level '{level}' of family '{family}'")]
    DuplicateOption {
        family: String,
        level: String,
        option: String,
    },

    /// Level default does not name one of its options
    #[error("default '{default}' of level '{level}' in family '{family}' is not an option")]
    UnknownDefault {
        family: String,
        level: String,
        default: String,
    },

    /// Checkbox levels cannot preselect
    #[error("checkbox level '{level}' of family '{family}' cannot have a default")]
    DefaultOnCheckbox { family: String, level: String },

    /// A leaf combination has no price
    #[error("no price for '{key}' in family '{family}'")]
    UnpricedPath { family: String, key: String },

    /// Price entry that no leaf combination can reach
    #[error("unreachable price key '{key}' in family '{family}'")]
    OrphanPrice { family: String, key: String },

    /// Two local extras share an id
    #[error("duplicate extra '{extra}' in family '{family}'")]
    DuplicateExtra { family: String, extra: String },

    /// Id is not a valid path segment
    #[error("invalid id in family '{family}': {source}")]
    InvalidId {
        family: String,
        #[source]
        source: PathError,
    },

    /// Catalog text could not be parsed
    #[error("catalog parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for CatalogError {
    fn from(value: toml::de::Error) -> Self {
        CatalogError::Parse(value.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        CatalogError::Parse(value.to_string())
    }
}
