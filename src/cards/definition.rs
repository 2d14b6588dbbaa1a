//! Card definitions - static card data.
//!
//! `CardDefinition` holds what every copy of a card shares: kind, base
//! stats and, for objects, the passive effect granted to whoever equips
//! it. Runtime state (health, equipment, alterations) lives in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

use super::stats::{StatKey, Stats, ATTACK, DEFENSE, HEALTH};

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card kind. Only `Personnage` cards carry object slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Character.
    Personnage,
    /// Equippable object.
    Objet,
    /// One-shot event.
    Evenement,
    /// Location.
    Lieu,
}

/// Passive effect kinds understood by the stat fold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveKind {
    AttackBoost,
    DefenseBoost,
    HealthBoost,
    #[serde(other)]
    Other,
}

/// Passive effect an object grants while equipped.
///
/// Stored as `{ "type": "attack_boost", "value": 30 }`. Boost values are
/// percentages.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassiveEffect {
    #[serde(rename = "type")]
    pub kind: PassiveKind,
    pub value: f64,
}

impl PassiveEffect {
    /// Create a passive effect.
    #[must_use]
    pub const fn new(kind: PassiveKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Stat this effect boosts, if any.
    #[must_use]
    pub fn stat(&self) -> Option<&'static str> {
        match self.kind {
            PassiveKind::AttackBoost => Some(ATTACK),
            PassiveKind::DefenseBoost => Some(DEFENSE),
            PassiveKind::HealthBoost => Some(HEALTH),
            PassiveKind::Other => None,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use yeayeayea_engine::cards::{CardDefinition, CardId, CardKind};
///
/// let knight = CardDefinition::new(CardId::new(1), "Chevalier", CardKind::Personnage)
///     .with_stat("attack", 4.0)
///     .with_stat("health", 12.0);
///
/// assert_eq!(knight.stats.get("attack"), 4.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    #[serde(rename = "type")]
    pub kind: CardKind,

    /// Base stats before equipment.
    #[serde(default)]
    pub stats: Stats,

    /// Granted to the holder while this card is equipped.
    #[serde(default)]
    pub passive_effect: Option<PassiveEffect>,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            stats: Stats::new(),
            passive_effect: None,
        }
    }

    /// Add a stat (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, key: impl Into<StatKey>, value: f64) -> Self {
        self.stats.set(key, value);
        self
    }

    /// Set the passive effect (builder pattern).
    #[must_use]
    pub fn with_passive(mut self, effect: PassiveEffect) -> Self {
        self.passive_effect = Some(effect);
        self
    }

    /// Check if the card can carry object slots.
    #[must_use]
    pub fn is_personnage(&self) -> bool {
        self.kind == CardKind::Personnage
    }
}
