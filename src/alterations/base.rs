//! Player base: the health pool each player defends.
//!
//! ## Health
//!
//! Damage is scaled by the base's damage reduction (0.5 by default) and
//! clamped to the remaining health. Healing is clamped to the missing
//! health. Every call returns a [`HealthChange`] with the amount that
//! actually moved, so the caller decides what to log or publish.
//!
//! Non-positive (or NaN) amounts change nothing and report 0.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::active::{AlterationOutcome, AlterationSet};
use super::definition::{Alteration, AlterationId};
use crate::cards::InstanceId;
use crate::core::config::{EngineConfig, DEFAULT_BASE_HEALTH, DEFAULT_DAMAGE_REDUCTION};

/// Identifier of a player base within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseId(pub u32);

impl BaseId {
    /// Create a new base ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Base({})", self.0)
    }
}

/// Construction parameters for a [`PlayerBase`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerBaseConfig {
    pub max_health: f64,

    /// Fraction of incoming damage actually taken.
    pub damage_reduction: f64,
}

impl Default for PlayerBaseConfig {
    fn default() -> Self {
        Self {
            max_health: DEFAULT_BASE_HEALTH,
            damage_reduction: DEFAULT_DAMAGE_REDUCTION,
        }
    }
}

impl From<&EngineConfig> for PlayerBaseConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_health: config.base_health,
            damage_reduction: config.damage_reduction,
        }
    }
}

/// Direction of a health change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthChangeKind {
    Damage,
    Heal,
}

/// Record of one health mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthChange {
    pub kind: HealthChangeKind,

    /// Health actually removed or restored.
    pub amount: f64,

    pub source: Option<String>,
}

impl HealthChange {
    fn damage(amount: f64, source: Option<&str>) -> Self {
        Self {
            kind: HealthChangeKind::Damage,
            amount,
            source: source.map(str::to_owned),
        }
    }

    fn heal(amount: f64, source: Option<&str>) -> Self {
        Self {
            kind: HealthChangeKind::Heal,
            amount,
            source: source.map(str::to_owned),
        }
    }
}

/// A player's base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerBase {
    pub id: BaseId,
    current_health: f64,
    max_health: f64,
    damage_reduction: f64,
    alterations: AlterationSet,
}

impl PlayerBase {
    /// Create a base at full health.
    ///
    /// A non-positive max health or a negative or non-finite damage factor
    /// falls back to the engine default.
    #[must_use]
    pub fn new(id: BaseId, config: PlayerBaseConfig) -> Self {
        let max_health = if config.max_health > 0.0 {
            config.max_health
        } else {
            DEFAULT_BASE_HEALTH
        };
        let damage_reduction =
            if config.damage_reduction.is_finite() && config.damage_reduction >= 0.0 {
                config.damage_reduction
            } else {
                log::warn!(
                    "{id}: invalid damage reduction {}, using {DEFAULT_DAMAGE_REDUCTION}",
                    config.damage_reduction
                );
                DEFAULT_DAMAGE_REDUCTION
            };
        Self {
            id,
            current_health: max_health,
            max_health,
            damage_reduction,
            alterations: AlterationSet::new(),
        }
    }

    #[must_use]
    pub fn current_health(&self) -> f64 {
        self.current_health
    }

    #[must_use]
    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    /// Live alterations.
    #[must_use]
    pub fn alterations(&self) -> &AlterationSet {
        &self.alterations
    }

    /// Take damage after reduction, clamped to current health.
    pub fn apply_damage(&mut self, amount: f64, source: Option<&str>) -> HealthChange {
        if amount.is_nan() || amount <= 0.0 {
            return HealthChange::damage(0.0, source);
        }
        let actual = (amount * self.damage_reduction).clamp(0.0, self.current_health);
        self.current_health -= actual;
        HealthChange::damage(actual, source)
    }

    /// Restore health, clamped to max health.
    pub fn heal(&mut self, amount: f64, source: Option<&str>) -> HealthChange {
        if amount.is_nan() || amount <= 0.0 {
            return HealthChange::heal(0.0, source);
        }
        let healed = (self.current_health + amount).min(self.max_health);
        let actual = healed - self.current_health;
        self.current_health = healed;
        HealthChange::heal(actual, source)
    }

    /// Apply an alteration (see [`AlterationSet::add`] for stacking).
    pub fn add_alteration(
        &mut self,
        alteration: Arc<Alteration>,
        source: Option<InstanceId>,
    ) -> AlterationOutcome {
        self.alterations.add(alteration, source)
    }

    /// Remove an alteration. Returns `false` if it was absent.
    pub fn remove_alteration(&mut self, id: AlterationId) -> bool {
        self.alterations.remove(id).is_some()
    }

    #[must_use]
    pub fn has_alteration(&self, id: AlterationId) -> bool {
        self.alterations.contains(id)
    }

    /// Run periodic alteration effects (damage/heal over time, per stack).
    ///
    /// Damage goes through the base's reduction like any other damage.
    /// Entries with no health effect produce no record.
    pub fn apply_alteration_effects(&mut self) -> Vec<HealthChange> {
        let pending: Vec<(f64, String)> = self
            .alterations
            .iter()
            .map(|entry| (entry.periodic_delta(), entry.alteration.name.clone()))
            .filter(|(delta, _)| *delta != 0.0)
            .collect();

        pending
            .into_iter()
            .map(|(delta, name)| {
                if delta < 0.0 {
                    self.apply_damage(-delta, Some(&name))
                } else {
                    self.heal(delta, Some(&name))
                }
            })
            .collect()
    }

    /// End-of-turn upkeep: count alteration durations down.
    ///
    /// Returns the alterations that expired.
    pub fn reset_for_next_turn(&mut self) -> Vec<AlterationId> {
        self.alterations.tick()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.current_health <= 0.0
    }
}
