//! Engine configuration.
//!
//! The surrounding application owns a settings table. The engine reads
//! three numeric keys from it through [`ConfigStore`]:
//!
//! - `pv_base_initial`: starting (and max) health of each player base
//! - `emplacements_objet`: object slots per personnage card
//! - `budget_motivation_initial`: per-turn motivation budget
//!
//! Missing or malformed keys fall back to the defaults in
//! [`EngineConfig::default`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings key for base health.
pub const KEY_BASE_HEALTH: &str = "pv_base_initial";
/// Settings key for object slots per personnage.
pub const KEY_OBJECT_SLOTS: &str = "emplacements_objet";
/// Settings key for the per-turn motivation budget.
pub const KEY_MOTIVATION_BUDGET: &str = "budget_motivation_initial";

/// Default base health.
pub const DEFAULT_BASE_HEALTH: f64 = 100.0;
/// Default object slots per personnage.
pub const DEFAULT_OBJECT_SLOTS: u8 = 3;
/// Default per-turn motivation.
pub const DEFAULT_MOTIVATION: u32 = 10;
/// Default fraction of incoming damage a base actually takes.
pub const DEFAULT_DAMAGE_REDUCTION: f64 = 0.5;

/// Read-only settings lookup supplied by the host application.
pub trait ConfigStore {
    /// Get a setting by key. `None` when the key is absent.
    fn get(&self, key: &str) -> Option<Value>;
}

/// In-memory [`ConfigStore`].
#[derive(Clone, Debug, Default)]
pub struct MapConfigStore {
    values: FxHashMap<String, Value>,
}

impl MapConfigStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a setting (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Insert or replace a setting.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }
}

impl ConfigStore for MapConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

/// Extract a number from a setting stored either bare (`3`) or wrapped
/// (`{ "value": 3 }`).
fn numeric_setting(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(map) => map.get("value").and_then(numeric_setting),
        _ => None,
    }
}

/// Numeric engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Starting and maximum health of each player base.
    pub base_health: f64,

    /// Object slots per personnage card.
    pub object_slots: u8,

    /// Per-turn motivation budget.
    pub motivation_budget: u32,

    /// Multiplier applied to damage dealt to a base.
    pub damage_reduction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_health: DEFAULT_BASE_HEALTH,
            object_slots: DEFAULT_OBJECT_SLOTS,
            motivation_budget: DEFAULT_MOTIVATION,
            damage_reduction: DEFAULT_DAMAGE_REDUCTION,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from a store, falling back per key.
    pub fn load(store: &dyn ConfigStore) -> Self {
        let defaults = Self::default();
        let read = |key: &str| store.get(key).as_ref().and_then(numeric_setting);

        let base_health = read(KEY_BASE_HEALTH)
            .filter(|v| *v > 0.0)
            .unwrap_or(defaults.base_health);
        let object_slots = read(KEY_OBJECT_SLOTS)
            .filter(|v| *v >= 0.0 && *v <= f64::from(u8::MAX))
            .map_or(defaults.object_slots, |v| v as u8);
        let motivation_budget = read(KEY_MOTIVATION_BUDGET)
            .filter(|v| *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map_or(defaults.motivation_budget, |v| v as u32);

        log::debug!(
            "engine config loaded: base_health={base_health} object_slots={object_slots} motivation_budget={motivation_budget}"
        );

        Self {
            base_health,
            object_slots,
            motivation_budget,
            ..defaults
        }
    }

    /// Set base health.
    #[must_use]
    pub fn with_base_health(mut self, health: f64) -> Self {
        self.base_health = health;
        self
    }

    /// Set object slots per personnage.
    #[must_use]
    pub fn with_object_slots(mut self, slots: u8) -> Self {
        self.object_slots = slots;
        self
    }

    /// Set the per-turn motivation budget.
    #[must_use]
    pub fn with_motivation_budget(mut self, budget: u32) -> Self {
        self.motivation_budget = budget;
        self
    }

    /// Set the damage multiplier for bases.
    #[must_use]
    pub fn with_damage_reduction(mut self, factor: f64) -> Self {
        self.damage_reduction = factor;
        self
    }
}
