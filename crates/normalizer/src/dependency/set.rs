//! Ordered, deduplicated sets of attribute names.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A set of attribute (column) names.
///
/// Iteration is in sorted order, so two sets holding the same names compare,
/// hash and serialize identically regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeSet<String>);

impl AttributeSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, attr: &str) -> bool {
        self.0.contains(attr)
    }

    /// Insert an attribute; returns true if it was not already present.
    pub fn insert(&mut self, attr: impl Into<String>) -> bool {
        self.0.insert(attr.into())
    }

    pub fn remove(&mut self, attr: &str) -> bool {
        self.0.remove(attr)
    }

    pub fn is_subset(&self, other: &AttributeSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Subset and not equal.
    pub fn is_proper_subset(&self, other: &AttributeSet) -> bool {
        self.0.len() < other.0.len() && self.0.is_subset(&other.0)
    }

    pub fn is_disjoint(&self, other: &AttributeSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub fn union(&self, other: &AttributeSet) -> AttributeSet {
        self.0.union(&other.0).cloned().collect()
    }

    pub fn difference(&self, other: &AttributeSet) -> AttributeSet {
        self.0.difference(&other.0).cloned().collect()
    }

    /// A copy of this set without `attr`.
    pub fn without(&self, attr: &str) -> AttributeSet {
        self.0.iter().filter(|a| *a != attr).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Names in sorted order.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// The names of `columns` that are in this set, in the order of `columns`.
    pub fn ordered_by(&self, columns: &[String]) -> Vec<String> {
        columns.iter().filter(|c| self.contains(c)).cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", attr)?;
        }
        write!(f, "]")
    }
}
