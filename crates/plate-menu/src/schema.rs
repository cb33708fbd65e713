//! Per-family configuration schemas
//!
//! A [`FamilySchema`] describes the shape of one menu item's option tree as
//! an ordered list of levels. Flat items have one level; composite items
//! (burgers, sandwiches, drinks) have several. Every level is either part of
//! the price key or not, and the full set of keyed segments of a leaf path
//! resolves to exactly one entry of the family's [`PriceTable`].

use crate::error::CatalogError;
use crate::money::Rupees;
use crate::path::{validate_segment, OptionPath};
use crate::price::PriceTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Flat rate charged for every extra unless a family overrides it
pub const DEFAULT_EXTRA_PRICE: Rupees = Rupees::new(50);

/// How options within one level are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// Any number of options active at once, each with its own subtree
    Checkbox,
    /// At most one option active; choosing another discards the previous
    Radio,
    /// Like radio, but usually preselects a default when instantiated
    Select,
}

impl SelectorKind {
    /// Whether sibling selections coexist
    #[inline]
    #[must_use]
    pub fn allows_multiple(self) -> bool {
        matches!(self, SelectorKind::Checkbox)
    }
}

/// One choosable option within a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDef {
    /// Path segment
    pub id: String,
    /// Display label, also used in part labels
    pub label: String,
    /// Extra emitted alongside every leaf that passes through this option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl OptionDef {
    /// Create option
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            extra: None,
        }
    }

    /// Attach an extra label
    #[must_use]
    pub fn with_extra(mut self, label: impl Into<String>) -> Self {
        self.extra = Some(label.into());
        self
    }
}

/// One level of a family's hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Level id (e.g. `patty`, `bun`, `sweetness`)
    pub id: String,
    /// Display heading
    pub label: String,
    /// Selector semantics
    pub kind: SelectorKind,
    /// Options in display order
    pub options: Vec<OptionDef>,
    /// Option preselected when this level is instantiated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether the chosen option id is part of the price key
    #[serde(default = "keyed_by_default")]
    pub keyed: bool,
}

fn keyed_by_default() -> bool {
    true
}

impl LevelDef {
    /// Create keyed level with no options
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: SelectorKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            default: None,
            keyed: true,
        }
    }

    /// Append an option
    #[must_use]
    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Append options whose labels equal their ids
    #[must_use]
    pub fn with_plain_options(mut self, ids: &[&str]) -> Self {
        self.options
            .extend(ids.iter().map(|id| OptionDef::new(*id, *id)));
        self
    }

    /// Preselect an option on instantiation
    #[must_use]
    pub fn with_default(mut self, id: impl Into<String>) -> Self {
        self.default = Some(id.into());
        self
    }

    /// Exclude this level from the price key
    #[must_use]
    pub fn unkeyed(mut self) -> Self {
        self.keyed = false;
        self
    }

    /// Find option by id
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// Binary yes/no add-on with its own quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraDef {
    /// Extra id (e.g. `raita`)
    pub id: String,
    /// Label used on compiled lines (e.g. `Extra raita`)
    pub label: String,
}

impl ExtraDef {
    /// Create extra
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Combo picker shown once the item has a quantity
///
/// Combo choices carry no price of their own; the post-combo extras they
/// reveal are priced like any other extra.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboDef {
    /// Radio options
    pub options: Vec<OptionDef>,
    /// Extras revealed after a combo option is chosen
    #[serde(default)]
    pub extras: Vec<ExtraDef>,
}

impl ComboDef {
    /// Find combo option by id
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// Schema of one menu item family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySchema {
    /// Family id (e.g. `burger`)
    pub id: String,
    /// Item name as shown on the plate
    pub name: String,
    /// Levels from outermost to leaf
    pub levels: Vec<LevelDef>,
    /// Local extras
    #[serde(default)]
    pub extras: Vec<ExtraDef>,
    /// Optional combo picker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo: Option<ComboDef>,
    /// Unit price of every extra in this family
    #[serde(default = "default_extra_price")]
    pub extra_price: Rupees,
    /// Part label template with positional placeholders (`{0}`, `{1}`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_label: Option<String>,
    /// Price per keyed leaf combination
    #[serde(default)]
    pub prices: PriceTable,
}

fn default_extra_price() -> Rupees {
    DEFAULT_EXTRA_PRICE
}

impl FamilySchema {
    /// Create family with no levels
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            levels: Vec::new(),
            extras: Vec::new(),
            combo: None,
            extra_price: DEFAULT_EXTRA_PRICE,
            part_label: None,
            prices: PriceTable::new(),
        }
    }

    /// Append a level
    #[must_use]
    pub fn with_level(mut self, level: LevelDef) -> Self {
        self.levels.push(level);
        self
    }

    /// Append a local extra
    #[must_use]
    pub fn with_extra(mut self, extra: ExtraDef) -> Self {
        self.extras.push(extra);
        self
    }

    /// Set combo picker
    #[must_use]
    pub fn with_combo(mut self, combo: ComboDef) -> Self {
        self.combo = Some(combo);
        self
    }

    /// Set part label template
    #[must_use]
    pub fn with_part_label(mut self, template: impl Into<String>) -> Self {
        self.part_label = Some(template.into());
        self
    }

    /// Set price table
    #[must_use]
    pub fn with_prices(mut self, prices: PriceTable) -> Self {
        self.prices = prices;
        self
    }

    /// Number of levels
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Level at depth
    #[inline]
    #[must_use]
    pub fn level(&self, depth: usize) -> Option<&LevelDef> {
        self.levels.get(depth)
    }

    /// Whether options at this depth carry a quantity instead of a subtree
    #[inline]
    #[must_use]
    pub fn is_leaf_depth(&self, depth: usize) -> bool {
        depth + 1 == self.levels.len()
    }

    /// Find local extra by id
    #[must_use]
    pub fn extra(&self, id: &str) -> Option<&ExtraDef> {
        self.extras.iter().find(|e| e.id == id)
    }

    /// Option definitions along a path, outermost first
    ///
    /// Returns `None` if the path is deeper than the schema or names an
    /// option that does not exist at its level.
    #[must_use]
    pub fn options_along(&self, path: &OptionPath) -> Option<Vec<&OptionDef>> {
        if path.len() > self.levels.len() {
            return None;
        }
        path.iter()
            .zip(&self.levels)
            .map(|(seg, level)| level.option(seg))
            .collect()
    }

    /// Keep only the segments of keyed levels
    #[must_use]
    pub fn price_key(&self, path: &OptionPath) -> OptionPath {
        path.iter()
            .zip(&self.levels)
            .filter(|(_, level)| level.keyed)
            .map(|(seg, _)| seg.to_string())
            .collect::<Vec<_>>()
            .into()
    }

    /// Resolve the unit price of a complete leaf path
    ///
    /// # Errors
    /// [`CatalogError::UnpricedPath`] if the path is not a full leaf path or
    /// its key has no entry
    pub fn resolve_price(&self, leaf: &OptionPath) -> Result<Rupees, CatalogError> {
        if leaf.len() != self.levels.len() || self.options_along(leaf).is_none() {
            return Err(CatalogError::UnpricedPath {
                family: self.id.clone(),
                key: leaf.to_string(),
            });
        }
        self.prices.lookup(&self.id, &self.price_key(leaf))
    }

    /// Render the part label of a leaf path
    ///
    /// Uses the family template when present, otherwise joins option labels
    /// with `" - "`.
    #[must_use]
    pub fn part_label(&self, leaf: &OptionPath) -> String {
        let labels: Vec<&str> = self
            .options_along(leaf)
            .map(|opts| opts.iter().map(|o| o.label.as_str()).collect())
            .unwrap_or_else(|| leaf.iter().collect());

        match &self.part_label {
            Some(template) => labels
                .iter()
                .enumerate()
                .fold(template.clone(), |acc, (i, label)| {
                    acc.replace(&format!("{{{i}}}"), label)
                }),
            None => labels.join(" - "),
        }
    }

    /// Labels of option-attached extras along a leaf path
    #[must_use]
    pub fn attached_extras(&self, leaf: &OptionPath) -> Vec<&str> {
        self.options_along(leaf)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|o| o.extra.as_deref())
            .collect()
    }

    /// Every complete leaf path the schema can produce
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<OptionPath> {
        if self.levels.is_empty() {
            return Vec::new();
        }
        self.levels.iter().fold(vec![OptionPath::root()], |acc, level| {
            acc.iter()
                .flat_map(|prefix| level.options.iter().map(move |o| prefix.child(&o.id)))
                .collect()
        })
    }

    /// Check structural soundness and price coverage
    ///
    /// # Errors
    /// The first defect found, see [`CatalogError`]
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |source: crate::path::PathError| CatalogError::InvalidId {
            family: self.id.clone(),
            source,
        };

        validate_segment(&self.id).map_err(invalid)?;
        if self.levels.is_empty() {
            return Err(CatalogError::NoLevels(self.id.clone()));
        }

        for level in &self.levels {
            validate_segment(&level.id).map_err(invalid)?;
            if level.options.is_empty() {
                return Err(CatalogError::EmptyLevel {
                    family: self.id.clone(),
                    level: level.id.clone(),
                });
            }
            let mut seen = HashSet::new();
            for option in &level.options {
                validate_segment(&option.id).map_err(invalid)?;
                if !seen.insert(option.id.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        family: self.id.clone(),
                        level: level.id.clone(),
                        option: option.id.clone(),
                    });
                }
            }
            if let Some(default) = &level.default {
                if level.kind.allows_multiple() {
                    return Err(CatalogError::DefaultOnCheckbox {
                        family: self.id.clone(),
                        level: level.id.clone(),
                    });
                }
                if level.option(default).is_none() {
                    return Err(CatalogError::UnknownDefault {
                        family: self.id.clone(),
                        level: level.id.clone(),
                        default: default.clone(),
                    });
                }
            }
        }

        let combo_extras = self.combo.iter().flat_map(|c| c.extras.iter());
        let mut extra_ids = HashSet::new();
        for extra in self.extras.iter().chain(combo_extras) {
            validate_segment(&extra.id).map_err(invalid)?;
            if !extra_ids.insert(extra.id.as_str()) {
                return Err(CatalogError::DuplicateExtra {
                    family: self.id.clone(),
                    extra: extra.id.clone(),
                });
            }
        }

        let mut reachable = HashSet::new();
        for leaf in self.leaf_paths() {
            let key = self.price_key(&leaf);
            self.prices.lookup(&self.id, &key)?;
            reachable.insert(key);
        }
        if let Some((orphan, _)) = self.prices.iter().find(|(k, _)| !reachable.contains(*k)) {
            return Err(CatalogError::OrphanPrice {
                family: self.id.clone(),
                key: orphan.to_string(),
            });
        }

        Ok(())
    }
}
