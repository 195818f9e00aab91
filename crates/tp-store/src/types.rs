//! Core warp point types.
//!
//! A [`WarpPoint`] names a directory with a short key. [`WarpPoints`] is the
//! complete mapping held by a store; keys are unique and the last write for a
//! key wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named bookmark pointing at a directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpPoint {
    /// Short key used to jump to the target.
    pub key: String,
    /// Directory path the key points at, as written by the user.
    pub target: String,
}

impl WarpPoint {
    pub fn new(key: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: target.into(),
        }
    }
}

/// The full key → target mapping of a store.
///
/// Iteration always yields entries in ascending key order, which is also the
/// order they are serialized in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WarpPoints {
    entries: BTreeMap<String, String>,
}

impl WarpPoints {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite an entry. Returns the previous target, if any.
    pub fn insert(&mut self, key: impl Into<String>, target: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), target.into())
    }

    /// Remove an entry by key. Returns the removed target, if any.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Remove the first entry (in key order) whose target equals `target`.
    ///
    /// Returns the key of the removed entry. Other entries with the same
    /// target are left in place.
    pub fn remove_by_target(&mut self, target: &str) -> Option<String> {
        let key = self
            .entries
            .iter()
            .find(|(_, t)| t.as_str() == target)
            .map(|(k, _)| k.clone())?;
        self.entries.remove(&key);
        Some(key)
    }

    /// Keep only the entries for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&str, &str) -> bool) {
        self.entries.retain(|k, t| f(k, t));
    }

    /// Iterate over `(key, target)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect the entries as owned [`WarpPoint`]s in key order.
    pub fn to_vec(&self) -> Vec<WarpPoint> {
        self.iter().map(|(k, t)| WarpPoint::new(k, t)).collect()
    }
}

impl<K: Into<String>, T: Into<String>> FromIterator<(K, T)> for WarpPoints {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, t)| (k.into(), t.into()))
                .collect(),
        }
    }
}
