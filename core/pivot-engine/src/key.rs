//! FILENAME: core/pivot-engine/src/key.rs
//! Axis keys - ordered tuples of dimension values.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definition::TOTAL_LABEL;

/// A key identifying one row or one column of the cross-tab.
///
/// Ordering is lexicographic over the raw component strings, so a shorter key
/// sorts before any longer key it prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisKey(SmallVec<[String; 4]>);

impl AxisKey {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AxisKey(components.into_iter().map(Into::into).collect())
    }

    /// The empty key (single-measure axis with no dimensions).
    pub fn empty() -> Self {
        AxisKey(SmallVec::new())
    }

    /// The synthetic `("Total",)` key.
    pub fn total() -> Self {
        AxisKey::new([TOTAL_LABEL])
    }

    pub fn from_slice(components: &[String]) -> Self {
        AxisKey(components.iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, depth: usize) -> Option<&str> {
        self.0.get(depth).map(String::as_str)
    }

    /// The first `depth + 1` components, clamped to the key length.
    pub fn prefix(&self, depth: usize) -> &[String] {
        &self.0[..(depth + 1).min(self.0.len())]
    }

    /// Returns a copy of this key with `head` inserted in front.
    pub fn prefixed(&self, head: &str) -> Self {
        let mut components = SmallVec::with_capacity(self.0.len() + 1);
        components.push(head.to_string());
        components.extend(self.0.iter().cloned());
        AxisKey(components)
    }
}

impl fmt::Display for AxisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", component)?;
        }
        write!(f, ")")
    }
}
