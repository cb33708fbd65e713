//! Yes/no extras and the combo picker
//!
//! An extra starts unanswered. Answering "yes" gives it a quantity control,
//! answering "no" takes it away again. Extras come in two scopes: local ones
//! belong to the item itself, post-combo ones are only offered after a combo
//! option has been chosen.

use crate::quantity::QuantityControl;
use indexmap::IndexMap;
use plate_menu::ExtraDef;
use serde::{Deserialize, Serialize};

/// Which group of extras an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraScope {
    /// Extras offered once the item has a quantity
    Local,
    /// Extras offered once a combo option is chosen
    PostCombo,
}

/// State of a yes/no question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraAnswer {
    #[default]
    Unanswered,
    Yes,
    No,
}

/// One extra's answer and, while answered yes, its quantity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraState {
    answer: ExtraAnswer,
    quantity: Option<QuantityControl>,
}

impl ExtraState {
    #[inline]
    #[must_use]
    pub fn answer(&self) -> ExtraAnswer {
        self.answer
    }

    /// Quantity control, present only while answered yes
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> Option<&QuantityControl> {
        self.quantity.as_ref()
    }

    /// Effective quantity (zero unless answered yes)
    #[inline]
    #[must_use]
    pub fn qty(&self) -> u32 {
        self.quantity.map_or(0, |q| q.qty())
    }
}

/// Answers for one scope of extras, in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtrasSelection {
    states: IndexMap<String, ExtraState>,
}

impl ExtrasSelection {
    /// All extras unanswered
    #[must_use]
    pub fn for_defs(defs: &[ExtraDef]) -> Self {
        Self {
            states: defs
                .iter()
                .map(|d| (d.id.clone(), ExtraState::default()))
                .collect(),
        }
    }

    /// Look up an extra
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExtraState> {
        self.states.get(id)
    }

    /// Record an answer
    ///
    /// "Yes" keeps an existing quantity control or creates an unset one;
    /// "no" discards it. Returns `None` for an unknown id, otherwise whether
    /// the answer changed.
    pub fn answer(&mut self, id: &str, yes: bool) -> Option<bool> {
        let state = self.states.get_mut(id)?;
        let answer = if yes { ExtraAnswer::Yes } else { ExtraAnswer::No };
        let changed = state.answer != answer;
        state.answer = answer;
        if yes {
            state.quantity.get_or_insert_with(QuantityControl::new);
        } else {
            state.quantity = None;
        }
        Some(changed)
    }

    /// Quantity control of an extra answered yes
    pub fn quantity_mut(&mut self, id: &str) -> Option<&mut QuantityControl> {
        self.states.get_mut(id)?.quantity.as_mut()
    }

    /// Return every extra to unanswered; returns whether anything changed
    pub fn reset(&mut self) -> bool {
        let mut changed = false;
        for state in self.states.values_mut() {
            if *state != ExtraState::default() {
                *state = ExtraState::default();
                changed = true;
            }
        }
        changed
    }

    /// Extras answered yes with a nonzero quantity
    pub fn active(&self) -> impl Iterator<Item = (&str, u32)> {
        self.states
            .iter()
            .filter(|(_, s)| s.answer == ExtraAnswer::Yes && s.qty() > 0)
            .map(|(id, s)| (id.as_str(), s.qty()))
    }

    /// Every extra with its state
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraState)> {
        self.states.iter().map(|(id, s)| (id.as_str(), s))
    }
}

/// Combo choice plus the extras it reveals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboState {
    choice: Option<String>,
    extras: ExtrasSelection,
}

impl ComboState {
    #[must_use]
    pub fn for_defs(extras: &[ExtraDef]) -> Self {
        Self {
            choice: None,
            extras: ExtrasSelection::for_defs(extras),
        }
    }

    /// Chosen combo option id
    #[inline]
    #[must_use]
    pub fn choice(&self) -> Option<&str> {
        self.choice.as_deref()
    }

    /// Set or clear the choice; returns whether it changed
    pub fn choose(&mut self, option: Option<&str>) -> bool {
        if self.choice.as_deref() == option {
            return false;
        }
        self.choice = option.map(str::to_string);
        true
    }

    #[inline]
    #[must_use]
    pub fn extras(&self) -> &ExtrasSelection {
        &self.extras
    }

    pub fn extras_mut(&mut self) -> &mut ExtrasSelection {
        &mut self.extras
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extras() -> ExtrasSelection {
        ExtrasSelection::for_defs(&[
            ExtraDef::new("raita", "Extra raita"),
            ExtraDef::new("salad", "Extra salad"),
        ])
    }

    #[test]
    fn yes_creates_unset_quantity() {
        let mut sel = extras();
        assert_eq!(sel.answer("raita", true), Some(true));
        let state = sel.get("raita").unwrap();
        assert_eq!(state.answer(), ExtraAnswer::Yes);
        assert_eq!(state.quantity().map(QuantityControl::qty), Some(0));
        assert_eq!(sel.active().count(), 0);
    }

    #[test]
    fn repeated_yes_keeps_quantity() {
        let mut sel = extras();
        sel.answer("raita", true);
        sel.quantity_mut("raita").unwrap().set_qty(2.0);
        assert_eq!(sel.answer("raita", true), Some(false));
        assert_eq!(sel.active().collect::<Vec<_>>(), vec![("raita", 2)]);
    }

    #[test]
    fn no_discards_quantity() {
        let mut sel = extras();
        sel.answer("salad", true);
        sel.quantity_mut("salad").unwrap().increment();
        sel.answer("salad", false);
        assert!(sel.quantity_mut("salad").is_none());
        assert_eq!(sel.get("salad").unwrap().qty(), 0);
    }

    #[test]
    fn unknown_extra() {
        let mut sel = extras();
        assert_eq!(sel.answer("fries", true), None);
    }

    #[test]
    fn reset_reports_change() {
        let mut sel = extras();
        assert!(!sel.reset());
        sel.answer("raita", false);
        assert!(sel.reset());
        assert_eq!(sel.get("raita").unwrap().answer(), ExtraAnswer::Unanswered);
    }

    #[test]
    fn combo_choice_changes() {
        let mut combo = ComboState::for_defs(&[]);
        assert!(combo.choose(Some("with_drink")));
        assert!(!combo.choose(Some("with_drink")));
        assert!(combo.choose(None));
        assert_eq!(combo.choice(), None);
    }
}
