//! Section visibility policy
//!
//! Which dependent regions of an item are offered is a pure function of the
//! current configuration. The builder recomputes it after every mutation and
//! resets whatever ends up hidden.
//!
//! | Region              | Shown when                                 |
//! |---------------------|--------------------------------------------|
//! | local extras        | some leaf quantity > 0 and extras exist    |
//! | combo               | some leaf quantity > 0 and a combo exists  |
//! | post-combo extras   | combo visible and an option chosen         |
//! | add action          | some leaf quantity > 0                     |

use crate::tree::OptionTree;
use plate_menu::FamilySchema;
use serde::{Deserialize, Serialize};

/// Dependent region of an item's configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Extras,
    Combo,
    PostComboExtras,
    AddAction,
}

/// Visibility of every dependent region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub extras: bool,
    pub combo: bool,
    pub post_combo_extras: bool,
    pub add_action: bool,
}

impl Visibility {
    /// Check a single region
    #[inline]
    #[must_use]
    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::Extras => self.extras,
            Region::Combo => self.combo,
            Region::PostComboExtras => self.post_combo_extras,
            Region::AddAction => self.add_action,
        }
    }
}

/// Derives [`Visibility`] from configuration state
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityPolicy;

impl VisibilityPolicy {
    /// Compute visibility for a family's current state
    #[must_use]
    pub fn derive(schema: &FamilySchema, tree: &OptionTree, combo_choice: Option<&str>) -> Visibility {
        let configured = tree.any_quantity();
        let combo = configured && schema.combo.is_some();
        Visibility {
            extras: configured && !schema.extras.is_empty(),
            combo,
            post_combo_extras: combo
                && combo_choice.is_some()
                && schema.combo.as_ref().is_some_and(|c| !c.extras.is_empty()),
            add_action: configured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_menu::{ComboDef, ExtraDef, LevelDef, OptionDef, OptionPath, PriceTable, SelectorKind};

    fn biryani() -> FamilySchema {
        FamilySchema::new("biryani", "Biryani")
            .with_level(
                LevelDef::new("plate", "Plate", SelectorKind::Checkbox)
                    .with_plain_options(&["half", "full"]),
            )
            .with_combo(ComboDef {
                options: vec![OptionDef::new("with_drink", "With drink")],
                extras: vec![ExtraDef::new("raita", "Extra raita")],
            })
            .with_prices(PriceTable::new().with("half", 200).with("full", 350))
    }

    #[test]
    fn nothing_visible_without_quantity() {
        let schema = biryani();
        let mut tree = OptionTree::new();
        tree.select(&schema, &OptionPath::single("half")).unwrap();
        let v = VisibilityPolicy::derive(&schema, &tree, Some("with_drink"));
        assert_eq!(v, Visibility::default());
    }

    #[test]
    fn combo_and_post_combo_follow_choice() {
        let schema = biryani();
        let mut tree = OptionTree::new();
        let half = OptionPath::single("half");
        tree.select(&schema, &half).unwrap();
        tree.leaf_mut(&schema, &half).unwrap().increment();

        let v = VisibilityPolicy::derive(&schema, &tree, None);
        assert!(v.combo && v.add_action);
        assert!(!v.extras, "family has no local extras");
        assert!(!v.post_combo_extras);

        let v = VisibilityPolicy::derive(&schema, &tree, Some("with_drink"));
        assert!(v.is_visible(Region::PostComboExtras));
    }
}
