//! Combat actions and the effects they carry.
//!
//! An action is paid for by its actor, then its effects apply to the
//! target player's base, in order.

use serde::{Deserialize, Serialize};

use crate::alterations::AlterationId;
use crate::cards::InstanceId;
use crate::core::PlayerId;

/// An atomic combat effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Damage the target base (reduction applies).
    Damage { amount: f64 },

    /// Heal the target base.
    Heal { amount: f64 },

    /// Apply an alteration to the target base.
    ApplyAlteration { alteration: AlterationId },

    /// Strip an alteration from the target base.
    RemoveAlteration { alteration: AlterationId },

    /// Grant the target player a motivation modifier.
    MotivationModifier {
        value: f64,
        #[serde(default)]
        is_percentage: bool,
        /// Renewals the modifier lasts. `None` (or `-1`) is permanent.
        #[serde(
            default,
            serialize_with = "crate::resources::modifier::duration_as_signed",
            deserialize_with = "crate::resources::modifier::negative_is_permanent"
        )]
        duration: Option<u32>,
    },
}

/// A paid action from one player against another (or themself).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatAction {
    pub actor: PlayerId,

    pub target: PlayerId,

    /// Motivation the actor pays up front.
    pub cost: u32,

    /// Label carried into health-change records (card or spell name).
    pub label: Option<String>,

    /// Card instance performing the action, if any.
    pub source: Option<InstanceId>,

    pub effects: Vec<Effect>,
}

impl CombatAction {
    /// Create a free action with no effects.
    pub fn new(actor: impl Into<PlayerId>, target: impl Into<PlayerId>) -> Self {
        Self {
            actor: actor.into(),
            target: target.into(),
            cost: 0,
            label: None,
            source: None,
            effects: Vec::new(),
        }
    }

    /// Set the motivation cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the label (builder pattern).
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the source card instance (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: InstanceId) -> Self {
        self.source = Some(source);
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append a damage effect (builder pattern).
    #[must_use]
    pub fn damage(self, amount: f64) -> Self {
        self.with_effect(Effect::Damage { amount })
    }

    /// Append a heal effect (builder pattern).
    #[must_use]
    pub fn heal(self, amount: f64) -> Self {
        self.with_effect(Effect::Heal { amount })
    }

    /// Append an alteration effect (builder pattern).
    #[must_use]
    pub fn apply_alteration(self, alteration: AlterationId) -> Self {
        self.with_effect(Effect::ApplyAlteration { alteration })
    }
}
