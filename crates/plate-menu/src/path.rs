//! Option paths for addressing nodes within a configuration tree
//!
//! Provides [`OptionPath`] for hierarchical addressing of selections, one
//! segment per schema level (e.g. `hot.sweet.large.with_topping`).

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path of option ids from the first level of a family down to some node
///
/// Also used as the key of a [`PriceTable`](crate::PriceTable), where it holds
/// only the segments of levels that contribute to the price key.
///
/// # Examples
/// - `["shami", "round"]` → `shami.round`
/// - `["hot", "sweet", "large"]` → `hot.sweet.large`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionPath(Vec<String>);

impl OptionPath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Create path from a single segment
    #[inline]
    #[must_use]
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Empty path (the unselected root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments, which is also the depth of the addressed node
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Get first segment (if not root)
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    /// Check if this path is a prefix of another
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }

    /// Check if this path is an ancestor of another (strict prefix)
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Validate a single segment (option or family id)
pub(crate) fn validate_segment(seg: &str) -> Result<(), PathError> {
    if seg.is_empty() {
        Err(PathError::EmptySegment)
    } else if seg.contains(|c: char| !c.is_ascii_alphanumeric() && c != '_') {
        Err(PathError::InvalidSegment(seg.to_string()))
    } else {
        Ok(())
    }
}

impl Display for OptionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for OptionPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<String> = s
            .split('.')
            .map(|seg| validate_segment(seg).map(|()| seg.to_string()))
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

impl From<Vec<String>> for OptionPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for OptionPath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(ToString::to_string).collect())
    }
}

impl Default for OptionPath {
    fn default() -> Self {
        Self::root()
    }
}

impl Serialize for OptionPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OptionPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Errors related to option paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be ascii alphanumeric or underscore)")]
    InvalidSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_new_and_segments() {
        let path = OptionPath::new(vec!["shami".to_string(), "round".to_string()]);
        assert_eq!(path.segments(), &["shami", "round"]);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn path_root_parent_is_none() {
        let path = OptionPath::root();
        assert!(path.is_empty());
        assert!(path.parent().is_none());
    }

    #[test]
    fn path_parent_and_child() {
        let path: OptionPath = "hot.sweet.large".parse().unwrap();
        assert_eq!(path.parent().unwrap().to_string(), "hot.sweet");
        assert_eq!(path.child("plain").to_string(), "hot.sweet.large.plain");
        assert_eq!(path.first(), Some("hot"));
        assert_eq!(path.last(), Some("large"));
    }

    #[test]
    fn path_ancestry() {
        let hot: OptionPath = "hot".parse().unwrap();
        let leaf: OptionPath = "hot.sweet".parse().unwrap();
        assert!(hot.is_ancestor_of(&leaf));
        assert!(!leaf.is_ancestor_of(&hot));
        assert!(hot.is_prefix_of(&hot));
        assert!(!hot.is_ancestor_of(&hot));
    }

    #[test]
    fn path_from_str_numeric_segments() {
        let path: OptionPath = "egg.3".parse().unwrap();
        assert_eq!(path.segments(), &["egg", "3"]);
    }

    #[test]
    fn path_from_str_rejects_bad_segments() {
        assert_eq!("a..b".parse::<OptionPath>(), Err(PathError::EmptySegment));
        assert!(matches!(
            "a.b-c".parse::<OptionPath>(),
            Err(PathError::InvalidSegment(_))
        ));
    }

    #[test]
    fn path_serde_as_string() {
        let path: OptionPath = "cold.less_sweet".parse().unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"cold.less_sweet\"");
        let back: OptionPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
