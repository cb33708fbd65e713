//! Change notifications
//!
//! Every effective mutation of an [`ItemBuilder`](crate::ItemBuilder) is
//! reported to its observers as a [`ConfigEvent`], after visibility has been
//! recomputed and any cascading resets applied.

use crate::extras::{ExtraAnswer, ExtraScope};
use crate::visibility::Visibility;
use plate_menu::OptionPath;

/// What changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigChange {
    /// Option selected (explicitly or as a level default)
    Selected { path: OptionPath },
    /// Option and its subtree discarded
    Deselected { path: OptionPath },
    /// Leaf quantity changed
    QuantityChanged { path: OptionPath, previous: u32, current: u32 },
    /// Extra answered
    ExtraAnswered { scope: ExtraScope, id: String, answer: ExtraAnswer },
    /// Extra quantity changed
    ExtraQuantityChanged { scope: ExtraScope, id: String, previous: u32, current: u32 },
    /// Every extra of a scope returned to unanswered
    ExtrasCleared { scope: ExtraScope },
    /// Combo choice set or cleared
    ComboChosen { choice: Option<String> },
    /// Region visibility changed
    VisibilityChanged(Visibility),
    /// Body expanded or collapsed
    ExpandedChanged(bool),
    /// Whole configuration returned to its initial state
    Reset,
}

/// A change tagged with the family it happened in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEvent {
    pub family: String,
    pub change: ConfigChange,
}

/// Receives configuration events
pub trait ConfigObserver {
    fn notify(&mut self, event: &ConfigEvent);
}

impl<F> ConfigObserver for F
where
    F: FnMut(&ConfigEvent),
{
    fn notify(&mut self, event: &ConfigEvent) {
        self(event);
    }
}
