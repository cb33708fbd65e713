//! Per-family item builder
//!
//! [`ItemBuilder`] owns everything the user can configure on one item card:
//! the option tree, local extras and the combo picker. Every mutating method
//! runs the same cycle before returning:
//!
//! 1. apply the mutation
//! 2. recompute [`Visibility`]
//! 3. reset regions that became hidden (extras to unanswered, combo to none)
//! 4. notify observers of every effective change, in order
//!
//! Mutations that change nothing notify nobody.

use crate::compiler::{LineItem, LineItemCompiler};
use crate::error::ConfigureError;
use crate::events::{ConfigChange, ConfigEvent, ConfigObserver};
use crate::extras::{ComboState, ExtraAnswer, ExtraScope, ExtrasSelection};
use crate::quantity::{QuantityChange, QuantityControl};
use crate::tree::OptionTree;
use crate::visibility::{Region, Visibility, VisibilityPolicy};
use plate_menu::{ExtraDef, FamilySchema, OptionPath};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration state of one menu item
pub struct ItemBuilder {
    schema: Arc<FamilySchema>,
    tree: OptionTree,
    extras: ExtrasSelection,
    combo: ComboState,
    visibility: Visibility,
    expanded: bool,
    observers: Vec<Box<dyn ConfigObserver>>,
}

impl fmt::Debug for ItemBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemBuilder")
            .field("family", &self.schema.id)
            .field("tree", &self.tree)
            .field("extras", &self.extras)
            .field("combo", &self.combo)
            .field("visibility", &self.visibility)
            .field("expanded", &self.expanded)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ItemBuilder {
    /// Fresh builder, collapsed and unconfigured
    #[must_use]
    pub fn new(schema: Arc<FamilySchema>) -> Self {
        let extras = ExtrasSelection::for_defs(&schema.extras);
        let combo = ComboState::for_defs(combo_extras(&schema));
        Self {
            schema,
            tree: OptionTree::new(),
            extras,
            combo,
            visibility: Visibility::default(),
            expanded: false,
            observers: Vec::new(),
        }
    }

    /// Register an observer
    pub fn subscribe(&mut self, observer: impl ConfigObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[inline]
    #[must_use]
    pub fn schema(&self) -> &FamilySchema {
        &self.schema
    }

    #[inline]
    #[must_use]
    pub fn family(&self) -> &str {
        &self.schema.id
    }

    #[inline]
    #[must_use]
    pub fn tree(&self) -> &OptionTree {
        &self.tree
    }

    /// Extras of a scope
    #[must_use]
    pub fn extras(&self, scope: ExtraScope) -> &ExtrasSelection {
        match scope {
            ExtraScope::Local => &self.extras,
            ExtraScope::PostCombo => self.combo.extras(),
        }
    }

    #[inline]
    #[must_use]
    pub fn combo_choice(&self) -> Option<&str> {
        self.combo.choice()
    }

    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Current quantity of a selected leaf
    #[must_use]
    pub fn quantity(&self, path: &OptionPath) -> Option<u32> {
        self.tree.quantity(path).map(QuantityControl::qty)
    }

    /// Show or hide the item body; configuration is kept either way
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.settle(vec![ConfigChange::ExpandedChanged(self.expanded)]);
        self.expanded
    }

    /// Select an option
    ///
    /// # Errors
    /// See [`OptionTree::select`]
    pub fn select(&mut self, path: &OptionPath) -> Result<(), ConfigureError> {
        let outcome = self.tree.select(&self.schema, path)?;
        let changes: Vec<_> = outcome
            .discarded
            .into_iter()
            .map(|path| ConfigChange::Deselected { path })
            .chain(
                outcome
                    .selected
                    .into_iter()
                    .map(|path| ConfigChange::Selected { path }),
            )
            .collect();
        self.settle(changes);
        Ok(())
    }

    /// Deselect an option, discarding its subtree
    ///
    /// # Errors
    /// See [`OptionTree::deselect`]
    pub fn deselect(&mut self, path: &OptionPath) -> Result<(), ConfigureError> {
        if self.tree.deselect(&self.schema, path)? {
            self.settle(vec![ConfigChange::Deselected { path: path.clone() }]);
        }
        Ok(())
    }

    /// Click an option: checkboxes flip, radio and select options only select
    ///
    /// Returns whether the option is selected afterwards.
    ///
    /// # Errors
    /// See [`OptionTree::select`]
    pub fn toggle(&mut self, path: &OptionPath) -> Result<bool, ConfigureError> {
        let multi = path
            .len()
            .checked_sub(1)
            .and_then(|depth| self.schema.level(depth))
            .is_some_and(|level| level.kind.allows_multiple());
        if multi && self.tree.is_selected(path) {
            self.deselect(path)?;
            Ok(false)
        } else {
            self.select(path)?;
            Ok(true)
        }
    }

    /// Step a leaf quantity up
    ///
    /// # Errors
    /// See [`OptionTree::leaf_mut`]
    pub fn increment(&mut self, path: &OptionPath) -> Result<u32, ConfigureError> {
        self.adjust_leaf(path, |q| Some(q.increment()))
    }

    /// Step a leaf quantity down
    ///
    /// # Errors
    /// See [`OptionTree::leaf_mut`]
    pub fn decrement(&mut self, path: &OptionPath) -> Result<u32, ConfigureError> {
        self.adjust_leaf(path, QuantityControl::decrement)
    }

    /// Type a leaf quantity
    ///
    /// # Errors
    /// See [`OptionTree::leaf_mut`]
    pub fn set_quantity(&mut self, path: &OptionPath, n: f64) -> Result<u32, ConfigureError> {
        self.adjust_leaf(path, |q| Some(q.set_qty(n)))
    }

    /// Answer an extra's yes/no question
    ///
    /// # Errors
    /// - [`ConfigureError::UnknownExtra`] if the scope has no such extra
    /// - [`ConfigureError::RegionHidden`] if the scope is not offered
    pub fn answer_extra(
        &mut self,
        scope: ExtraScope,
        id: &str,
        yes: bool,
    ) -> Result<(), ConfigureError> {
        self.check_extra(scope, id)?;
        let changed = self.extras_mut(scope).answer(id, yes).unwrap_or(false);
        if changed {
            let answer = if yes { ExtraAnswer::Yes } else { ExtraAnswer::No };
            self.settle(vec![ConfigChange::ExtraAnswered {
                scope,
                id: id.to_string(),
                answer,
            }]);
        }
        Ok(())
    }

    /// Step an extra's quantity up
    ///
    /// # Errors
    /// As [`ItemBuilder::answer_extra`], plus
    /// [`ConfigureError::ExtraNotChosen`] unless answered yes
    pub fn increment_extra(&mut self, scope: ExtraScope, id: &str) -> Result<u32, ConfigureError> {
        self.adjust_extra(scope, id, |q| Some(q.increment()))
    }

    /// Step an extra's quantity down
    ///
    /// # Errors
    /// See [`ItemBuilder::increment_extra`]
    pub fn decrement_extra(&mut self, scope: ExtraScope, id: &str) -> Result<u32, ConfigureError> {
        self.adjust_extra(scope, id, QuantityControl::decrement)
    }

    /// Type an extra's quantity
    ///
    /// # Errors
    /// See [`ItemBuilder::increment_extra`]
    pub fn set_extra_quantity(
        &mut self,
        scope: ExtraScope,
        id: &str,
        n: f64,
    ) -> Result<u32, ConfigureError> {
        self.adjust_extra(scope, id, |q| Some(q.set_qty(n)))
    }

    /// Choose a combo option, or clear the choice with `None`
    ///
    /// # Errors
    /// - [`ConfigureError::UnknownComboOption`] if the family has no such
    ///   combo option
    /// - [`ConfigureError::RegionHidden`] when choosing while the combo
    ///   picker is not offered
    pub fn choose_combo(&mut self, option: Option<&str>) -> Result<(), ConfigureError> {
        if let Some(id) = option {
            let known = self
                .schema
                .combo
                .as_ref()
                .is_some_and(|combo| combo.option(id).is_some());
            if !known {
                return Err(ConfigureError::UnknownComboOption {
                    family: self.schema.id.clone(),
                    option: id.to_string(),
                });
            }
            self.check_visible(Region::Combo)?;
        }
        if self.combo.choose(option) {
            self.settle(vec![ConfigChange::ComboChosen {
                choice: option.map(str::to_string),
            }]);
        }
        Ok(())
    }

    /// Compile the current configuration without touching it
    ///
    /// # Errors
    /// See [`LineItemCompiler::compile`]
    pub fn compile(&self) -> Result<LineItem, ConfigureError> {
        LineItemCompiler::new(&self.schema).compile(&self.tree, &self.extras, &self.combo)
    }

    /// Compile and, on success, return the item card to its initial state
    ///
    /// On failure nothing changes.
    ///
    /// # Errors
    /// See [`LineItemCompiler::compile`]
    pub fn finish(&mut self) -> Result<LineItem, ConfigureError> {
        match self.compile() {
            Ok(item) => {
                info!(family = %self.schema.id, subtotal = %item.subtotal(), "Item configured");
                self.reset();
                Ok(item)
            }
            Err(e) => {
                info!(family = %self.schema.id, error = %e, "Item not configured");
                Err(e)
            }
        }
    }

    /// Discard every selection, answer and choice
    pub fn reset(&mut self) {
        self.tree.clear();
        self.extras = ExtrasSelection::for_defs(&self.schema.extras);
        self.combo = ComboState::for_defs(combo_extras(&self.schema));
        self.settle(vec![ConfigChange::Reset]);
    }

    fn adjust_leaf(
        &mut self,
        path: &OptionPath,
        op: impl FnOnce(&mut QuantityControl) -> Option<QuantityChange>,
    ) -> Result<u32, ConfigureError> {
        let q = self.tree.leaf_mut(&self.schema, path)?;
        let change = op(q);
        let current = q.qty();
        if let Some(QuantityChange { previous, current }) =
            change.filter(|c| c.previous != c.current)
        {
            self.settle(vec![ConfigChange::QuantityChanged {
                path: path.clone(),
                previous,
                current,
            }]);
        }
        Ok(current)
    }

    fn adjust_extra(
        &mut self,
        scope: ExtraScope,
        id: &str,
        op: impl FnOnce(&mut QuantityControl) -> Option<QuantityChange>,
    ) -> Result<u32, ConfigureError> {
        self.check_extra(scope, id)?;
        let family = &self.schema.id;
        let selection = match scope {
            ExtraScope::Local => &mut self.extras,
            ExtraScope::PostCombo => self.combo.extras_mut(),
        };
        let q = selection
            .quantity_mut(id)
            .ok_or_else(|| ConfigureError::ExtraNotChosen {
                family: family.clone(),
                extra: id.to_string(),
            })?;
        let change = op(q);
        let current = q.qty();
        if let Some(QuantityChange { previous, current }) =
            change.filter(|c| c.previous != c.current)
        {
            self.settle(vec![ConfigChange::ExtraQuantityChanged {
                scope,
                id: id.to_string(),
                previous,
                current,
            }]);
        }
        Ok(current)
    }

    fn extras_mut(&mut self, scope: ExtraScope) -> &mut ExtrasSelection {
        match scope {
            ExtraScope::Local => &mut self.extras,
            ExtraScope::PostCombo => self.combo.extras_mut(),
        }
    }

    fn check_extra(&self, scope: ExtraScope, id: &str) -> Result<(), ConfigureError> {
        if self.extras(scope).get(id).is_none() {
            return Err(ConfigureError::UnknownExtra {
                family: self.schema.id.clone(),
                extra: id.to_string(),
            });
        }
        self.check_visible(match scope {
            ExtraScope::Local => Region::Extras,
            ExtraScope::PostCombo => Region::PostComboExtras,
        })
    }

    fn check_visible(&self, region: Region) -> Result<(), ConfigureError> {
        if self.visibility.is_visible(region) {
            Ok(())
        } else {
            Err(ConfigureError::RegionHidden {
                family: self.schema.id.clone(),
                region,
            })
        }
    }

    /// Recompute visibility, cascade resets, then notify
    fn settle(&mut self, mut changes: Vec<ConfigChange>) {
        if changes.is_empty() {
            return;
        }

        let visibility = VisibilityPolicy::derive(&self.schema, &self.tree, self.combo.choice());
        if !visibility.extras && self.extras.reset() {
            changes.push(ConfigChange::ExtrasCleared {
                scope: ExtraScope::Local,
            });
        }
        if !visibility.combo && self.combo.choose(None) {
            changes.push(ConfigChange::ComboChosen { choice: None });
        }

        // the combo reset above can hide post-combo extras
        let visibility = VisibilityPolicy::derive(&self.schema, &self.tree, self.combo.choice());
        if !visibility.post_combo_extras && self.combo.extras_mut().reset() {
            changes.push(ConfigChange::ExtrasCleared {
                scope: ExtraScope::PostCombo,
            });
        }

        if visibility != self.visibility {
            debug!(family = %self.schema.id, ?visibility, "Visibility changed");
            self.visibility = visibility;
            changes.push(ConfigChange::VisibilityChanged(visibility));
        }

        for change in changes {
            let event = ConfigEvent {
                family: self.schema.id.clone(),
                change,
            };
            for observer in &mut self.observers {
                observer.notify(&event);
            }
        }
    }
}

fn combo_extras(schema: &FamilySchema) -> &[ExtraDef] {
    schema
        .combo
        .as_ref()
        .map(|c| c.extras.as_slice())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_menu::{ComboDef, LevelDef, OptionDef, PriceTable, Rupees, SelectorKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn biryani() -> Arc<FamilySchema> {
        Arc::new(
            FamilySchema::new("biryani", "Biryani")
                .with_level(
                    LevelDef::new("plate", "Plate", SelectorKind::Checkbox)
                        .with_plain_options(&["half", "full"]),
                )
                .with_extra(ExtraDef::new("salad", "Extra salad"))
                .with_combo(ComboDef {
                    options: vec![OptionDef::new("with_drink", "With drink")],
                    extras: vec![ExtraDef::new("raita", "Extra raita")],
                })
                .with_prices(PriceTable::new().with("half", 200).with("full", 350)),
        )
    }

    fn p(s: &str) -> OptionPath {
        s.parse().unwrap()
    }

    #[test]
    fn quantity_reveals_dependent_regions() {
        let mut b = ItemBuilder::new(biryani());
        b.select(&p("half")).unwrap();
        assert!(!b.visibility().add_action);
        b.increment(&p("half")).unwrap();
        let v = b.visibility();
        assert!(v.extras && v.combo && v.add_action);
        assert!(!v.post_combo_extras);
    }

    #[test]
    fn hidden_extras_reject_answers() {
        let mut b = ItemBuilder::new(biryani());
        let err = b.answer_extra(ExtraScope::Local, "salad", true).unwrap_err();
        assert!(matches!(err, ConfigureError::RegionHidden { region: Region::Extras, .. }));
    }

    #[test]
    fn losing_quantity_cascades_resets() {
        let mut b = ItemBuilder::new(biryani());
        b.select(&p("half")).unwrap();
        b.increment(&p("half")).unwrap();
        b.answer_extra(ExtraScope::Local, "salad", true).unwrap();
        b.increment_extra(ExtraScope::Local, "salad").unwrap();
        b.choose_combo(Some("with_drink")).unwrap();
        b.answer_extra(ExtraScope::PostCombo, "raita", true).unwrap();

        b.decrement(&p("half")).unwrap();

        assert_eq!(b.visibility(), Visibility::default());
        assert_eq!(b.combo_choice(), None);
        assert_eq!(
            b.extras(ExtraScope::Local).get("salad").map(|s| s.answer()),
            Some(ExtraAnswer::Unanswered)
        );
        assert_eq!(
            b.extras(ExtraScope::PostCombo).get("raita").map(|s| s.answer()),
            Some(ExtraAnswer::Unanswered)
        );
    }

    #[test]
    fn observers_see_changes_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut b = ItemBuilder::new(biryani());
        let sink = Rc::clone(&log);
        b.subscribe(move |e: &ConfigEvent| sink.borrow_mut().push(e.change.clone()));

        b.select(&p("full")).unwrap();
        b.decrement(&p("full")).unwrap();
        b.increment(&p("full")).unwrap();

        let log = log.borrow();
        assert_eq!(log[0], ConfigChange::Selected { path: p("full") });
        assert_eq!(
            log[1],
            ConfigChange::QuantityChanged { path: p("full"), previous: 0, current: 1 }
        );
        assert!(matches!(log[2], ConfigChange::VisibilityChanged(v) if v.add_action));
        assert_eq!(log.len(), 3, "decrement at unset notifies nobody");
    }

    #[test]
    fn finish_resets_on_success_only() {
        let mut b = ItemBuilder::new(biryani());
        b.select(&p("half")).unwrap();
        assert!(b.finish().unwrap_err().is_user_facing());
        assert!(b.tree().is_selected(&p("half")));

        b.set_quantity(&p("half"), 2.0).unwrap();
        b.choose_combo(Some("with_drink")).unwrap();
        let item = b.finish().unwrap();
        assert_eq!(item.subtotal(), Rupees::new(400));
        assert_eq!(item.extras[0].label, "Combo: With drink");
        assert!(b.tree().is_empty());
        assert_eq!(b.visibility(), Visibility::default());
    }

    #[test]
    fn toggle_flips_checkbox() {
        let mut b = ItemBuilder::new(biryani());
        assert!(b.toggle(&p("half")).unwrap());
        assert!(!b.toggle(&p("half")).unwrap());
        assert!(b.tree().is_empty());
    }

    #[test]
    fn expanding_keeps_configuration() {
        let mut b = ItemBuilder::new(biryani());
        b.select(&p("half")).unwrap();
        assert!(b.toggle_expanded());
        assert!(!b.toggle_expanded());
        assert!(b.tree().is_selected(&p("half")));
    }
}
