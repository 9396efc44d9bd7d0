use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of normalized symptom tokens.
///
/// Backed by a `BTreeSet` so iteration order (and therefore any debug or
/// serialized form) is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomSet {
    tokens: BTreeSet<String>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Insert a token; returns `false` when it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.tokens.insert(token.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn intersection_len(&self, other: &SymptomSet) -> usize {
        self.tokens.intersection(&other.tokens).count()
    }

    pub fn union_len(&self, other: &SymptomSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }

    /// Jaccard similarity `|A ∩ B| / |A ∪ B|`.
    ///
    /// Two empty sets have an empty union and score `0.0`, never `NaN`.
    pub fn jaccard(&self, other: &SymptomSet) -> f64 {
        let intersection = self.intersection_len(other);
        let union = self.len() + other.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }

    pub fn into_inner(self) -> BTreeSet<String> {
        self.tokens
    }
}

impl<S: Into<String>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SymptomSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
