//! Game session: one running game with its bases, log and history.
//!
//! ## Turn flow
//!
//! `next_turn` first closes the outgoing player's turn (periodic
//! alteration effects on their base, then alteration countdown) and then
//! hands the turn over through [`turns::next_turn`], which renews the
//! incoming player's motivation.
//!
//! Every state transition pushes the previous [`GameState`] onto the
//! session history. `undo` restores turn and motivation state only; base
//! health and alterations are not rolled back.
//!
//! ## Equipment
//!
//! A card instance only knows its own slots. The session records which card
//! carries each object, so `equip` refuses an object that another card in
//! this game already holds.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::action::CombatAction;
use super::resolver::{Bases, CombatError, CombatResolver};
use crate::alterations::{BaseId, PlayerBase, PlayerBaseConfig};
use crate::cards::{CardId, CardInstance, ContentRepository, InstanceId, SlotId};
use crate::core::{EngineConfig, GameHistory, GameState, Phase, Player, PlayerId};
use crate::events::{CombatEvent, CombatLog};
use crate::{resources, turns};

/// Shared content handle.
pub type SharedContent = Arc<dyn ContentRepository + Send + Sync>;

/// A running game.
pub struct GameSession {
    config: EngineConfig,
    state: GameState,
    bases: Bases,
    log: CombatLog,
    history: GameHistory,
    content: SharedContent,
    next_instance: u32,
    /// Equipped object -> the card carrying it.
    holders: FxHashMap<InstanceId, InstanceId>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("bases", &self.bases)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Start a game.
    ///
    /// Each player's motivation is seeded from the configured budget and
    /// each gets a base at full health.
    ///
    /// # Panics
    ///
    /// Panics if `players` is empty.
    pub fn new(players: Vec<Player>, config: EngineConfig, content: SharedContent) -> Self {
        let players: Vec<Player> = players
            .iter()
            .map(|p| resources::initialize_motivation(p, config.motivation_budget))
            .collect();
        let state = turns::initialize(players);

        let base_config = PlayerBaseConfig::from(&config);
        let bases: Bases = state
            .players
            .iter()
            .zip(0u32..)
            .map(|(p, seat)| (p.id.clone(), PlayerBase::new(BaseId::new(seat), base_config)))
            .collect();

        log::info!(
            "session started: {} players, base health {}, motivation {}",
            state.player_count(),
            config.base_health,
            config.motivation_budget
        );

        Self {
            config,
            state,
            bases,
            log: CombatLog::new(),
            history: GameHistory::new(),
            content,
            next_instance: 0,
            holders: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Combat log, for subscribing.
    pub fn log_mut(&mut self) -> &mut CombatLog {
        &mut self.log
    }

    /// A player's base.
    #[must_use]
    pub fn base(&self, player: &PlayerId) -> Option<&PlayerBase> {
        self.bases.get(player)
    }

    fn commit(&mut self, next: GameState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
    }

    /// Set the phase. Any phase is accepted.
    pub fn change_phase(&mut self, phase: Phase) {
        let next = turns::change_phase(&self.state, phase);
        self.commit(next);
    }

    /// Pay for and resolve an action.
    pub fn perform(&mut self, action: &CombatAction) -> Result<Vec<CombatEvent>, CombatError> {
        let resolution = CombatResolver::resolve(
            &self.state,
            &mut self.bases,
            action,
            self.content.as_ref(),
            &mut self.log,
        )?;
        self.commit(resolution.state);
        Ok(resolution.events)
    }

    /// Close the active player's turn and start the next one.
    pub fn next_turn(&mut self) -> Vec<CombatEvent> {
        let outgoing = self.state.active().id.clone();
        let mut events = Vec::new();

        if let Some(base) = self.bases.get_mut(&outgoing) {
            let was_destroyed = base.is_destroyed();
            for change in base.apply_alteration_effects() {
                events.push(CombatEvent::from_health_change(outgoing.clone(), change));
            }
            for alteration in base.reset_for_next_turn() {
                events.push(CombatEvent::AlterationExpired {
                    player: outgoing.clone(),
                    alteration,
                });
            }
            if !was_destroyed && base.is_destroyed() {
                events.push(CombatEvent::BaseDestroyed {
                    player: outgoing.clone(),
                });
            }
        }

        let next = turns::next_turn(&self.state);
        events.push(CombatEvent::TurnStarted {
            player: next.active().id.clone(),
            turn: next.current_turn,
        });
        self.commit(next);

        self.log.publish_all(&events);
        events
    }

    /// Restore the previous state. Returns `false` with no history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.state = previous;
                true
            }
            None => false,
        }
    }

    /// Put a card into play.
    ///
    /// Personnage cards get the configured number of object slots.
    /// `None` if the card is unknown.
    pub fn spawn_card(&mut self, card: CardId) -> Option<CardInstance> {
        let definition = self.content.card(card)?;
        let id = InstanceId::new(self.next_instance);
        self.next_instance += 1;

        let mut instance = CardInstance::new(id, definition);
        if instance.definition.is_personnage() {
            instance.initialize_object_slots(self.config.object_slots);
        }
        Some(instance)
    }

    /// Equip `object` on `holder`.
    ///
    /// Fails if the object is already carried by any card in this session,
    /// or if `holder` rejects it (no free or matching slot, locked slot).
    pub fn equip(
        &mut self,
        holder: &mut CardInstance,
        object: Arc<CardInstance>,
        slot_id: Option<SlotId>,
    ) -> bool {
        let object_id = object.instance_id;
        if let Some(current) = self.holders.get(&object_id) {
            log::debug!("{object_id} already carried by {current}");
            return false;
        }
        if !holder.equip_object(object, slot_id) {
            return false;
        }
        self.holders.insert(object_id, holder.instance_id);
        true
    }

    /// Take the object out of `holder`'s slot and release it for other
    /// cards.
    pub fn unequip(
        &mut self,
        holder: &mut CardInstance,
        slot_id: SlotId,
    ) -> Option<Arc<CardInstance>> {
        let object = holder.unequip_object(slot_id)?;
        self.holders.remove(&object.instance_id);
        Some(object)
    }

    /// The card carrying `object`, if any.
    #[must_use]
    pub fn holder_of(&self, object: InstanceId) -> Option<InstanceId> {
        self.holders.get(&object).copied()
    }

    /// The last player standing, once every other base is destroyed.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        if self.state.player_count() < 2 {
            return None;
        }
        let mut standing = self
            .state
            .players
            .iter()
            .map(|p| &p.id)
            .filter(|id| self.bases.get(*id).is_some_and(|b| !b.is_destroyed()));
        match (standing.next(), standing.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    /// Check if at most one base is left standing.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.bases.values().filter(|b| !b.is_destroyed()).count() <= 1
    }
}
