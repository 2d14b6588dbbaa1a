//! Numeric card stats.
//!
//! Cards carry stats like "attack", "defense" and "health". The common
//! keys have constants here; anything else in a content record is kept
//! and carried through untouched.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Attack stat key.
pub const ATTACK: &str = "attack";
/// Defense stat key.
pub const DEFENSE: &str = "defense";
/// Health stat key.
pub const HEALTH: &str = "health";

/// Key for accessing card stats.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatKey(pub String);

impl StatKey {
    /// Create a new stat key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for StatKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StatKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Map of stat values. Missing stats read as 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(FxHashMap<StatKey, f64>);

impl Stats {
    /// Create an empty stat map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a stat (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<StatKey>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Get a stat, 0 if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(&StatKey::new(key)).copied().unwrap_or(0.0)
    }

    /// Check if a stat is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(&StatKey::new(key))
    }

    /// Set a stat.
    pub fn set(&mut self, key: impl Into<StatKey>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Scale a stat by `1 + percent / 100`. Absent stats stay absent.
    pub fn boost(&mut self, key: &str, percent: f64) {
        if let Some(value) = self.0.get_mut(&StatKey::new(key)) {
            *value *= 1.0 + percent / 100.0;
        }
    }

    /// Iterate over all stats (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&StatKey, &f64)> {
        self.0.iter()
    }
}
