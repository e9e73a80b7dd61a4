//! Collections and collection sets
//!
//! A [`Collection`] is nothing more than its display name. The normalized
//! identifier is recomputed from the name on every use and never stored,
//! so the two cannot drift apart.
//!
//! A [`CollectionSet`] preserves input order, which directly determines the
//! order of the generated blocks. Duplicates are kept: the same name twice
//! produces two identical blocks.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::naming::normalize;

// ============================================================================
// Collection
// ============================================================================

/// A logical named entity that becomes one table and one accessor class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    name: String,
}

impl Collection {
    /// Create a collection from its display name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The display name, exactly as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized SQL identifier (table name).
    pub fn identifier(&self) -> String {
        normalize(&self.name)
    }
}

impl From<&str> for Collection {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Collection {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// CollectionSet
// ============================================================================

/// Ordered, read-only sequence of collections for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionSet {
    collections: Vec<Collection>,
}

impl CollectionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from display names, keeping their order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Collection::new).collect()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Collection> {
        self.collections.iter()
    }

    pub fn as_slice(&self) -> &[Collection] {
        &self.collections
    }

    /// Display names in input order.
    pub fn names(&self) -> Vec<&str> {
        self.collections.iter().map(Collection::name).collect()
    }

    /// Normalized identifiers in input order.
    pub fn identifiers(&self) -> Vec<String> {
        self.collections.iter().map(Collection::identifier).collect()
    }

    /// Names that occur more than once, each reported once, in order of
    /// their second occurrence.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dups = Vec::new();
        for c in &self.collections {
            if !seen.insert(c.name()) && reported.insert(c.name()) {
                dups.push(c.name());
            }
        }
        dups
    }

    /// Pairs of distinct names that normalize to the same identifier.
    ///
    /// These are reported, not resolved: both blocks are still emitted.
    pub fn identifier_collisions(&self) -> Vec<(&str, &str, String)> {
        let mut collisions = Vec::new();
        for (i, a) in self.collections.iter().enumerate() {
            for b in &self.collections[i + 1..] {
                if a.name() != b.name() && a.identifier() == b.identifier() {
                    collisions.push((a.name(), b.name(), a.identifier()));
                }
            }
        }
        collisions
    }
}

impl FromIterator<Collection> for CollectionSet {
    fn from_iter<T: IntoIterator<Item = Collection>>(iter: T) -> Self {
        Self {
            collections: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CollectionSet {
    type Item = &'a Collection;
    type IntoIter = std::slice::Iter<'a, Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}

impl IntoIterator for CollectionSet {
    type Item = Collection;
    type IntoIter = std::vec::IntoIter<Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.into_iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
