//! Combat resolution - applying an action to state and bases.
//!
//! Resolution is all-or-nothing up to payment: every lookup (players,
//! base, alteration definitions) and the motivation check happen before
//! anything is mutated. Once paid, effects apply in order and each
//! outcome is published on the combat log.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::action::{CombatAction, Effect};
use crate::alterations::{Alteration, AlterationId, PlayerBase};
use crate::cards::ContentRepository;
use crate::core::{GameState, PlayerId};
use crate::events::{CombatEvent, CombatLog};
use crate::{resources, turns};

/// Player bases keyed by owner.
pub type Bases = FxHashMap<PlayerId, PlayerBase>;

/// Why an action was rejected. Nothing is mutated when one is returned.
#[derive(Debug, Error, PartialEq)]
pub enum CombatError {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} has no base")]
    MissingBase(PlayerId),

    #[error("unknown alteration {0}")]
    UnknownAlteration(AlterationId),

    #[error("{player} needs {cost} motivation but has {available}")]
    InsufficientMotivation {
        player: PlayerId,
        cost: u32,
        available: u32,
    },
}

/// Outcome of a resolved action.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// State after payment and motivation effects.
    pub state: GameState,

    /// Events published, in order.
    pub events: Vec<CombatEvent>,
}

// An effect with its content lookups done.
enum Prepared {
    Damage(f64),
    Heal(f64),
    Apply(Arc<Alteration>),
    Remove(AlterationId),
    Modifier {
        value: f64,
        is_percentage: bool,
        duration: Option<u32>,
    },
}

/// Resolves combat actions.
pub struct CombatResolver;

impl CombatResolver {
    /// Pay for and apply an action.
    pub fn resolve(
        state: &GameState,
        bases: &mut Bases,
        action: &CombatAction,
        content: &dyn ContentRepository,
        log: &mut CombatLog,
    ) -> Result<Resolution, CombatError> {
        let actor = state
            .player(&action.actor)
            .ok_or_else(|| CombatError::UnknownPlayer(action.actor.clone()))?;
        let target_seat = state
            .seat_of(&action.target)
            .ok_or_else(|| CombatError::UnknownPlayer(action.target.clone()))?;
        if !bases.contains_key(&action.target) {
            return Err(CombatError::MissingBase(action.target.clone()));
        }

        let prepared = action
            .effects
            .iter()
            .map(|effect| Self::prepare(effect, content))
            .collect::<Result<Vec<_>, _>>()?;

        let available = actor.motivation;
        let Some(mut next) = turns::consume_motivation(state, &action.actor, action.cost) else {
            log::warn!(
                "rejected action by {}: cost {} exceeds motivation {}",
                action.actor,
                action.cost,
                available
            );
            return Err(CombatError::InsufficientMotivation {
                player: action.actor.clone(),
                cost: action.cost,
                available,
            });
        };

        let mut events = Vec::new();
        if action.cost > 0 {
            events.push(CombatEvent::MotivationSpent {
                player: action.actor.clone(),
                amount: action.cost,
                remaining: available - action.cost,
            });
        }

        let target = action.target.clone();
        let label = action.label.as_deref();
        let Some(base) = bases.get_mut(&target) else {
            return Err(CombatError::MissingBase(target));
        };
        let was_destroyed = base.is_destroyed();

        for effect in prepared {
            match effect {
                Prepared::Damage(amount) => {
                    let change = base.apply_damage(amount, label);
                    events.push(CombatEvent::from_health_change(target.clone(), change));
                }
                Prepared::Heal(amount) => {
                    let change = base.heal(amount, label);
                    events.push(CombatEvent::from_health_change(target.clone(), change));
                }
                Prepared::Apply(alteration) => {
                    let id = alteration.id;
                    base.add_alteration(alteration, action.source);
                    let stack_count = base.alterations().get(id).map_or(1, |a| a.stack_count);
                    events.push(CombatEvent::AlterationApplied {
                        player: target.clone(),
                        alteration: id,
                        stack_count,
                    });
                }
                Prepared::Remove(id) => {
                    if base.remove_alteration(id) {
                        events.push(CombatEvent::AlterationRemoved {
                            player: target.clone(),
                            alteration: id,
                        });
                    }
                }
                Prepared::Modifier {
                    value,
                    is_percentage,
                    duration,
                } => {
                    let source = action.label.clone().unwrap_or_else(|| action.actor.to_string());
                    let (player, modifier) = resources::add_modifier(
                        &next.players[target_seat],
                        value,
                        is_percentage,
                        source,
                        duration,
                    );
                    next = next.with_player(target_seat, player);
                    events.push(CombatEvent::ModifierAdded {
                        player: target.clone(),
                        modifier,
                        value,
                        is_percentage,
                    });
                }
            }
        }

        if !was_destroyed && base.is_destroyed() {
            events.push(CombatEvent::BaseDestroyed {
                player: target.clone(),
            });
        }

        log.publish_all(&events);
        Ok(Resolution {
            state: next,
            events,
        })
    }

    fn prepare(effect: &Effect, content: &dyn ContentRepository) -> Result<Prepared, CombatError> {
        Ok(match effect {
            Effect::Damage { amount } => Prepared::Damage(*amount),
            Effect::Heal { amount } => Prepared::Heal(*amount),
            Effect::ApplyAlteration { alteration } => Prepared::Apply(
                content
                    .alteration(*alteration)
                    .ok_or(CombatError::UnknownAlteration(*alteration))?,
            ),
            Effect::RemoveAlteration { alteration } => Prepared::Remove(*alteration),
            Effect::MotivationModifier {
                value,
                is_percentage,
                duration,
            } => Prepared::Modifier {
                value: *value,
                is_percentage: *is_percentage,
                duration: *duration,
            },
        })
    }
}
