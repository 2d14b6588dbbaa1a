//! Combat event types.
//!
//! One event per observable outcome. Amounts are what actually happened
//! (after reduction and clamping), not what was requested.

use serde::{Deserialize, Serialize};

use crate::alterations::{AlterationId, HealthChange, HealthChangeKind};
use crate::core::PlayerId;
use crate::resources::ModifierId;

/// Something that happened during combat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    /// A player's turn began.
    TurnStarted { player: PlayerId, turn: u32 },

    /// Motivation paid for an action.
    MotivationSpent {
        player: PlayerId,
        amount: u32,
        remaining: u32,
    },

    /// A motivation modifier was granted.
    ModifierAdded {
        player: PlayerId,
        modifier: ModifierId,
        value: f64,
        is_percentage: bool,
    },

    /// A base lost health.
    BaseDamaged {
        player: PlayerId,
        amount: f64,
        source: Option<String>,
    },

    /// A base regained health.
    BaseHealed {
        player: PlayerId,
        amount: f64,
        source: Option<String>,
    },

    /// A base reached 0 health.
    BaseDestroyed { player: PlayerId },

    /// An alteration was applied, refreshed or stacked.
    AlterationApplied {
        player: PlayerId,
        alteration: AlterationId,
        stack_count: u32,
    },

    /// An alteration was removed by an effect.
    AlterationRemoved {
        player: PlayerId,
        alteration: AlterationId,
    },

    /// An alteration ran out.
    AlterationExpired {
        player: PlayerId,
        alteration: AlterationId,
    },
}

impl CombatEvent {
    /// Build the damage or heal event matching a health change.
    #[must_use]
    pub fn from_health_change(player: PlayerId, change: HealthChange) -> Self {
        match change.kind {
            HealthChangeKind::Damage => CombatEvent::BaseDamaged {
                player,
                amount: change.amount,
                source: change.source,
            },
            HealthChangeKind::Heal => CombatEvent::BaseHealed {
                player,
                amount: change.amount,
                source: change.source,
            },
        }
    }

    /// The player the event is about.
    #[must_use]
    pub fn player(&self) -> &PlayerId {
        match self {
            CombatEvent::TurnStarted { player, .. }
            | CombatEvent::MotivationSpent { player, .. }
            | CombatEvent::ModifierAdded { player, .. }
            | CombatEvent::BaseDamaged { player, .. }
            | CombatEvent::BaseHealed { player, .. }
            | CombatEvent::BaseDestroyed { player }
            | CombatEvent::AlterationApplied { player, .. }
            | CombatEvent::AlterationRemoved { player, .. }
            | CombatEvent::AlterationExpired { player, .. } => player,
        }
    }
}
