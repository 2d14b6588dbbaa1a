//! Player identification and per-player resource state.
//!
//! ## PlayerId
//!
//! Opaque string identifier supplied by the surrounding application.
//!
//! ## Player
//!
//! Value type carrying the motivation pool and its modifiers. Every
//! transition returns a new `Player`; nothing is mutated behind the
//! caller's back.

use serde::{Deserialize, Serialize};

use crate::resources::{ModifierId, ResourceModifier};

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A player in a game session.
///
/// ## Motivation
///
/// - `motivation`: what the player can spend this turn
/// - `base_motivation`: per-turn budget before modifiers. `None` means the
///   engine default (10) applies at renewal.
/// - `motivation_modifiers`: additive/percentage modifiers, applied in list
///   order by [`crate::resources::renew`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Current motivation.
    pub motivation: u32,

    /// Per-turn budget before modifiers.
    #[serde(default)]
    pub base_motivation: Option<u32>,

    /// Active modifiers, in application order.
    #[serde(default)]
    pub motivation_modifiers: Vec<ResourceModifier>,

    /// Seat in the turn order (index into `GameState::players`).
    #[serde(default)]
    pub turn_order: usize,

    /// Next modifier ID to allocate.
    #[serde(default)]
    pub(crate) next_modifier_id: u64,
}

impl Player {
    /// Create a player with an empty motivation pool.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            motivation: 0,
            base_motivation: None,
            motivation_modifiers: Vec::new(),
            turn_order: 0,
            next_modifier_id: 0,
        }
    }

    /// Set the per-turn budget (builder pattern).
    #[must_use]
    pub fn with_base_motivation(mut self, base: u32) -> Self {
        self.base_motivation = Some(base);
        self
    }

    /// Set current motivation (builder pattern).
    #[must_use]
    pub fn with_motivation(mut self, motivation: u32) -> Self {
        self.motivation = motivation;
        self
    }

    /// Allocate a modifier ID unique within this player.
    ///
    /// Never reuses an ID already present in `motivation_modifiers`, even
    /// when the counter was not part of the loaded record.
    pub(crate) fn alloc_modifier_id(&mut self) -> ModifierId {
        let floor = self
            .motivation_modifiers
            .iter()
            .map(|m| m.id.raw() + 1)
            .max()
            .unwrap_or(0);
        let id = ModifierId::new(self.next_modifier_id.max(floor));
        self.next_modifier_id = id.raw() + 1;
        id
    }

    /// Find a modifier by ID.
    #[must_use]
    pub fn modifier(&self, id: ModifierId) -> Option<&ResourceModifier> {
        self.motivation_modifiers.iter().find(|m| m.id == id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
