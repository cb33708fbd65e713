//! Line item compilation
//!
//! Turns one family's configuration into a priced [`LineItem`]: one part per
//! leaf with a nonzero quantity, then the extras that are answered yes with
//! a nonzero quantity. Unit prices always come from the family's price
//! table, never from anything rendered.

use crate::error::ConfigureError;
use crate::extras::{ComboState, ExtrasSelection};
use crate::tree::OptionTree;
use plate_menu::{FamilySchema, Rupees};
use serde::{Deserialize, Serialize};

/// Prefix of the label-only line recording a combo choice
pub const COMBO_LABEL_PREFIX: &str = "Combo: ";

/// One priced line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePart {
    pub label: String,
    pub unit_price: Rupees,
    pub qty: u32,
}

impl LinePart {
    #[must_use]
    pub fn new(label: impl Into<String>, unit_price: Rupees, qty: u32) -> Self {
        Self {
            label: label.into(),
            unit_price,
            qty,
        }
    }

    /// `unit_price × qty`
    #[inline]
    #[must_use]
    pub fn line_total(&self) -> Rupees {
        self.unit_price.times(self.qty)
    }
}

/// A compiled plate entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name (e.g. `Burger`)
    pub name: String,
    /// Family id the item was compiled from
    pub family: String,
    pub parts: Vec<LinePart>,
    pub extras: Vec<LinePart>,
    /// Whether the item counts toward totals and summaries
    pub included: bool,
}

impl LineItem {
    /// Sum of all part and extra line totals
    #[must_use]
    pub fn subtotal(&self) -> Rupees {
        self.lines().map(LinePart::line_total).sum()
    }

    /// Subtotal if included, zero otherwise
    #[inline]
    #[must_use]
    pub fn contribution(&self) -> Rupees {
        if self.included {
            self.subtotal()
        } else {
            Rupees::ZERO
        }
    }

    /// Parts followed by extras
    pub fn lines(&self) -> impl Iterator<Item = &LinePart> {
        self.parts.iter().chain(&self.extras)
    }
}

/// Compiles configuration state of one family
#[derive(Debug, Clone, Copy)]
pub struct LineItemCompiler<'a> {
    schema: &'a FamilySchema,
}

impl<'a> LineItemCompiler<'a> {
    #[inline]
    #[must_use]
    pub fn new(schema: &'a FamilySchema) -> Self {
        Self { schema }
    }

    /// Compile a line item
    ///
    /// Extras are emitted in this order: option-attached extras (one per
    /// contributing leaf, at the leaf's quantity), local extras, the combo
    /// choice as a zero-priced line, then post-combo extras.
    ///
    /// # Errors
    /// - [`ConfigureError::NothingConfigured`] if no part or extra has a
    ///   quantity
    /// - [`ConfigureError::Catalog`] if a leaf has no price
    pub fn compile(
        &self,
        tree: &OptionTree,
        extras: &ExtrasSelection,
        combo: &ComboState,
    ) -> Result<LineItem, ConfigureError> {
        let schema = self.schema;
        let mut parts = Vec::new();
        let mut attached = Vec::new();

        for (path, q) in tree.leaves() {
            if q.is_unset() {
                continue;
            }
            let unit_price = schema.resolve_price(&path)?;
            parts.push(LinePart::new(schema.part_label(&path), unit_price, q.qty()));
            attached.extend(
                schema
                    .attached_extras(&path)
                    .into_iter()
                    .map(|label| LinePart::new(label, schema.extra_price, q.qty())),
            );
        }

        let mut lines = attached;
        lines.extend(self.extra_lines(extras, &schema.extras));
        if parts.is_empty() && lines.is_empty() {
            return Err(ConfigureError::NothingConfigured {
                family: schema.id.clone(),
            });
        }

        if let Some(combo_def) = &schema.combo {
            if let Some(option) = combo.choice().and_then(|id| combo_def.option(id)) {
                lines.push(LinePart::new(
                    format!("{COMBO_LABEL_PREFIX}{}", option.label),
                    Rupees::ZERO,
                    1,
                ));
                lines.extend(self.extra_lines(combo.extras(), &combo_def.extras));
            }
        }

        tracing::debug!(
            family = %schema.id,
            parts = parts.len(),
            extras = lines.len(),
            "Compiled line item"
        );

        Ok(LineItem {
            name: schema.name.clone(),
            family: schema.id.clone(),
            parts,
            extras: lines,
            included: true,
        })
    }

    fn extra_lines(
        &self,
        selection: &ExtrasSelection,
        defs: &[plate_menu::ExtraDef],
    ) -> Vec<LinePart> {
        selection
            .active()
            .filter_map(|(id, qty)| {
                let def = defs.iter().find(|d| d.id == id)?;
                Some(LinePart::new(def.label.clone(), self.schema.extra_price, qty))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_menu::{ExtraDef, LevelDef, OptionPath, PriceTable, SelectorKind};

    fn rice() -> FamilySchema {
        FamilySchema::new("rice", "Rice")
            .with_level(
                LevelDef::new("kind", "Kind", SelectorKind::Checkbox)
                    .with_plain_options(&["chicken", "egg"]),
            )
            .with_extra(ExtraDef::new("raita", "Extra raita"))
            .with_prices(PriceTable::new().with("chicken", 300).with("egg", 250))
    }

    #[test]
    fn unset_leaves_produce_nothing() {
        let schema = rice();
        let mut tree = OptionTree::new();
        tree.select(&schema, &OptionPath::single("egg")).unwrap();
        let extras = ExtrasSelection::for_defs(&schema.extras);
        let err = LineItemCompiler::new(&schema)
            .compile(&tree, &extras, &ComboState::default())
            .unwrap_err();
        assert!(err.is_user_facing());
    }

    #[test]
    fn parts_and_extras_are_priced() {
        let schema = rice();
        let mut tree = OptionTree::new();
        let chicken = OptionPath::single("chicken");
        tree.select(&schema, &chicken).unwrap();
        tree.select(&schema, &OptionPath::single("egg")).unwrap();
        tree.leaf_mut(&schema, &chicken).unwrap().set_qty(2.0);

        let mut extras = ExtrasSelection::for_defs(&schema.extras);
        extras.answer("raita", true);
        extras.quantity_mut("raita").unwrap().increment();

        let item = LineItemCompiler::new(&schema)
            .compile(&tree, &extras, &ComboState::default())
            .unwrap();
        assert_eq!(item.parts, vec![LinePart::new("chicken", Rupees::new(300), 2)]);
        assert_eq!(item.extras, vec![LinePart::new("Extra raita", Rupees::new(50), 1)]);
        assert_eq!(item.subtotal(), Rupees::new(650));
        assert!(item.included);
    }

    #[test]
    fn excluded_item_contributes_nothing() {
        let item = LineItem {
            name: "Rice".into(),
            family: "rice".into(),
            parts: vec![LinePart::new("egg", Rupees::new(250), 1)],
            extras: Vec::new(),
            included: false,
        };
        assert_eq!(item.subtotal(), Rupees::new(250));
        assert_eq!(item.contribution(), Rupees::ZERO);
    }
}
