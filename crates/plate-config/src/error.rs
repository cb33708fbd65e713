//! Error types for item configuration
//!
//! Only [`ConfigureError::NothingConfigured`] is expected during normal use:
//! it is the "set a quantity first" notice. Everything else means the caller
//! addressed something the current configuration does not offer.

use crate::visibility::Region;
use plate_menu::CatalogError;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigureError {
    /// Add attempted with no nonzero quantity anywhere
    #[error("nothing configured for '{family}'")]
    NothingConfigured { family: String },

    /// Path names an option its level does not define
    #[error("unknown option '{path}' in family '{family}'")]
    UnknownOption { family: String, path: String },

    /// Path has more segments than the family has levels
    #[error("path '{path}' is deeper than family '{family}'")]
    PathTooDeep { family: String, path: String },

    /// Path goes through an option that is not currently selected
    #[error("path '{path}' is not active in family '{family}'")]
    InactivePath { family: String, path: String },

    /// Quantity addressed on a branch node
    #[error("'{path}' in family '{family}' has no quantity")]
    NotALeaf { family: String, path: String },

    /// Extra id not defined for the family
    #[error("unknown extra '{extra}' in family '{family}'")]
    UnknownExtra { family: String, extra: String },

    /// Quantity addressed on an extra that is not answered "yes"
    #[error("extra '{extra}' in family '{family}' is not chosen")]
    ExtraNotChosen { family: String, extra: String },

    /// Combo addressed on a family without one, or an unknown combo option
    #[error("no combo option '{option}' in family '{family}'")]
    UnknownComboOption { family: String, option: String },

    /// Interaction with a region that is currently hidden
    #[error("{region:?} is hidden for family '{family}'")]
    RegionHidden { family: String, region: Region },

    /// Catalog defect surfaced while compiling
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ConfigureError {
    /// Whether the error should be shown to the user as a notice
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::NothingConfigured { .. })
    }
}
