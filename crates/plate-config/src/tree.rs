//! Generic option tree
//!
//! One recursive structure serves every family. A node maps the ids of its
//! currently selected options (in selection order) to a [`Slot`]: either the
//! next level's node, or a [`QuantityControl`] when the option sits on the
//! family's last level.
//!
//! A subtree exists only while the option above it is selected. Deselecting
//! drops the subtree outright, so reselecting the same path always starts
//! from a fresh, unset quantity.

use crate::error::ConfigureError;
use crate::quantity::QuantityControl;
use indexmap::IndexMap;
use plate_menu::{FamilySchema, OptionPath};

/// What a selected option owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Next level of selections
    Branch(OptionNode),
    /// Terminal quantity
    Leaf(QuantityControl),
}

/// Selections made at one level under one parent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionNode {
    selected: IndexMap<String, Slot>,
}

impl OptionNode {
    /// Selected option ids in selection order
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.keys().map(String::as_str)
    }

    /// Slot of a selected option
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.selected.get(id)
    }

    /// Check if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn collect_leaves(&self, prefix: &OptionPath, out: &mut Vec<(OptionPath, QuantityControl)>) {
        for (id, slot) in &self.selected {
            let path = prefix.child(id);
            match slot {
                Slot::Branch(node) => node.collect_leaves(&path, out),
                Slot::Leaf(q) => out.push((path, *q)),
            }
        }
    }

    fn any_quantity(&self) -> bool {
        self.selected.values().any(|slot| match slot {
            Slot::Branch(node) => node.any_quantity(),
            Slot::Leaf(q) => !q.is_unset(),
        })
    }
}

/// Outcome of a selection, for change notifications
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOutcome {
    /// Paths newly selected, the requested one first, then defaults
    pub selected: Vec<OptionPath>,
    /// Sibling paths discarded by radio semantics
    pub discarded: Vec<OptionPath>,
}

/// Selection state of one family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTree {
    root: OptionNode,
}

impl OptionTree {
    /// Empty tree (nothing selected)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level node
    #[inline]
    #[must_use]
    pub fn root(&self) -> &OptionNode {
        &self.root
    }

    /// Check if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.root = OptionNode::default();
    }

    /// Node reached by following selected options along `path`
    #[must_use]
    pub fn node(&self, path: &OptionPath) -> Option<&OptionNode> {
        let mut node = &self.root;
        for seg in path.iter() {
            match node.selected.get(seg) {
                Some(Slot::Branch(child)) => node = child,
                _ => return None,
            }
        }
        Some(node)
    }

    fn node_mut(&mut self, path: &OptionPath) -> Option<&mut OptionNode> {
        let mut node = &mut self.root;
        for seg in path.iter() {
            match node.selected.get_mut(seg) {
                Some(Slot::Branch(child)) => node = child,
                _ => return None,
            }
        }
        Some(node)
    }

    /// Check if the option at `path` is selected (with all its ancestors)
    #[must_use]
    pub fn is_selected(&self, path: &OptionPath) -> bool {
        match (path.parent(), path.last()) {
            (Some(parent), Some(last)) => self
                .node(&parent)
                .is_some_and(|node| node.selected.contains_key(last)),
            _ => false,
        }
    }

    /// Quantity control of a selected leaf
    #[must_use]
    pub fn quantity(&self, path: &OptionPath) -> Option<&QuantityControl> {
        let parent = self.node(&path.parent()?)?;
        match parent.selected.get(path.last()?)? {
            Slot::Leaf(q) => Some(q),
            Slot::Branch(_) => None,
        }
    }

    /// Mutable quantity control of a selected leaf
    ///
    /// # Errors
    /// - [`ConfigureError::InactivePath`] if the path is not selected
    /// - [`ConfigureError::NotALeaf`] if it addresses a branch
    pub fn leaf_mut(
        &mut self,
        schema: &FamilySchema,
        path: &OptionPath,
    ) -> Result<&mut QuantityControl, ConfigureError> {
        let inactive = || ConfigureError::InactivePath {
            family: schema.id.clone(),
            path: path.to_string(),
        };
        let parent = path.parent().ok_or_else(inactive)?;
        let last = path.last().ok_or_else(inactive)?;
        let node = self.node_mut(&parent).ok_or_else(inactive)?;
        match node.selected.get_mut(last) {
            Some(Slot::Leaf(q)) => Ok(q),
            Some(Slot::Branch(_)) => Err(ConfigureError::NotALeaf {
                family: schema.id.clone(),
                path: path.to_string(),
            }),
            None => Err(inactive()),
        }
    }

    /// Select the option at `path`
    ///
    /// Instantiates the option's subtree (preselecting level defaults) or its
    /// quantity. On radio and select levels, any sibling selection is
    /// discarded first. Selecting an already selected option changes nothing.
    ///
    /// # Errors
    /// - [`ConfigureError::PathTooDeep`] / [`ConfigureError::UnknownOption`]
    ///   if the path does not fit the schema
    /// - [`ConfigureError::InactivePath`] if an ancestor is not selected
    pub fn select(
        &mut self,
        schema: &FamilySchema,
        path: &OptionPath,
    ) -> Result<SelectOutcome, ConfigureError> {
        let (parent, id) = Self::split_checked(schema, path)?;
        let depth = parent.len();
        let multi = schema
            .level(depth)
            .is_some_and(|level| level.kind.allows_multiple());

        let node = self
            .node_mut(&parent)
            .ok_or_else(|| ConfigureError::InactivePath {
                family: schema.id.clone(),
                path: path.to_string(),
            })?;

        let mut outcome = SelectOutcome::default();
        if node.selected.contains_key(&id) {
            return Ok(outcome);
        }

        if !multi {
            outcome.discarded = node
                .selected
                .drain(..)
                .map(|(sibling, _)| parent.child(sibling))
                .collect();
        }

        outcome.selected.push(path.clone());
        let slot = instantiate(schema, path, &mut outcome.selected);
        node.selected.insert(id, slot);
        Ok(outcome)
    }

    /// Deselect the option at `path`, discarding its subtree
    ///
    /// Returns whether anything was selected there.
    ///
    /// # Errors
    /// Same shape checks as [`OptionTree::select`]
    pub fn deselect(
        &mut self,
        schema: &FamilySchema,
        path: &OptionPath,
    ) -> Result<bool, ConfigureError> {
        let (parent, id) = Self::split_checked(schema, path)?;
        let node = self
            .node_mut(&parent)
            .ok_or_else(|| ConfigureError::InactivePath {
                family: schema.id.clone(),
                path: path.to_string(),
            })?;
        Ok(node.selected.shift_remove(&id).is_some())
    }

    /// Every selected leaf with its quantity, depth-first in selection order
    #[must_use]
    pub fn leaves(&self) -> Vec<(OptionPath, QuantityControl)> {
        let mut out = Vec::new();
        self.root.collect_leaves(&OptionPath::root(), &mut out);
        out
    }

    /// Whether any selected leaf has a nonzero quantity
    #[must_use]
    pub fn any_quantity(&self) -> bool {
        self.root.any_quantity()
    }

    fn split_checked(
        schema: &FamilySchema,
        path: &OptionPath,
    ) -> Result<(OptionPath, String), ConfigureError> {
        let (Some(parent), Some(last)) = (path.parent(), path.last()) else {
            return Err(ConfigureError::UnknownOption {
                family: schema.id.clone(),
                path: path.to_string(),
            });
        };
        let level = schema
            .level(parent.len())
            .ok_or_else(|| ConfigureError::PathTooDeep {
                family: schema.id.clone(),
                path: path.to_string(),
            })?;
        if level.option(last).is_none() {
            return Err(ConfigureError::UnknownOption {
                family: schema.id.clone(),
                path: path.to_string(),
            });
        }
        Ok((parent, last.to_string()))
    }
}

/// Build the slot for a freshly selected option
fn instantiate(schema: &FamilySchema, path: &OptionPath, selected: &mut Vec<OptionPath>) -> Slot {
    let depth = path.len() - 1;
    if schema.is_leaf_depth(depth) {
        return Slot::Leaf(QuantityControl::new());
    }

    let mut node = OptionNode::default();
    if let Some(default) = schema.level(depth + 1).and_then(|l| l.default.as_deref()) {
        let child = path.child(default);
        selected.push(child.clone());
        let slot = instantiate(schema, &child, selected);
        node.selected.insert(default.to_string(), slot);
    }
    Slot::Branch(node)
}
