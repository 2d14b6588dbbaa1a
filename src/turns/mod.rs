//! Turn and phase state machine.
//!
//! Free functions over [`GameState`]. Each returns a fresh state; the
//! input is never modified.
//!
//! ## Phases
//!
//! `change_phase` sets any phase the caller asks for. Callers who want
//! the fixed `Draw -> Main -> Combat -> End` cycle use [`Phase::next`]
//! (or [`advance_phase`]) themselves.

use im::Vector;

use crate::core::player::{Player, PlayerId};
use crate::core::state::{GameState, Phase};
use crate::resources;

/// Build the opening state: seat 0 active, main phase, round 1.
///
/// Each player's `turn_order` is set to their seat.
///
/// # Panics
///
/// Panics if `players` is empty.
#[must_use]
pub fn initialize(players: Vec<Player>) -> GameState {
    assert!(!players.is_empty(), "Must have at least 1 player");

    let players: Vector<Player> = players
        .into_iter()
        .enumerate()
        .map(|(seat, mut p)| {
            p.turn_order = seat;
            p
        })
        .collect();

    GameState {
        players,
        current_turn: 0,
        active_player: 0,
        phase: Phase::Main,
        turn_count: 1,
    }
}

/// Copy of `state` with `phase` replaced. Any phase is accepted.
#[must_use]
pub fn change_phase(state: &GameState, phase: Phase) -> GameState {
    GameState {
        phase,
        ..state.clone()
    }
}

/// Move to the next phase of the conventional cycle.
#[must_use]
pub fn advance_phase(state: &GameState) -> GameState {
    change_phase(state, state.phase.next())
}

/// Hand the turn to the next seat.
///
/// The incoming player's motivation is renewed. `turn_count` increments
/// when the seat wraps to 0; `current_turn` always increments.
#[must_use]
pub fn next_turn(state: &GameState) -> GameState {
    let seat = (state.active_player + 1) % state.players.len();
    let turn_count = if seat == 0 {
        state.turn_count + 1
    } else {
        state.turn_count
    };

    let mut players = state.players.clone();
    players[seat] = resources::renew(&state.players[seat]);

    log::debug!(
        "turn {} -> {}: active seat {} -> {} (round {})",
        state.current_turn,
        state.current_turn + 1,
        state.active_player,
        seat,
        turn_count
    );

    GameState {
        players,
        current_turn: state.current_turn + 1,
        active_player: seat,
        phase: Phase::Main,
        turn_count,
    }
}

/// Check whether a player can pay `cost`. Unknown players cannot.
#[must_use]
pub fn has_enough_motivation(state: &GameState, player: &PlayerId, cost: u32) -> bool {
    state.player(player).is_some_and(|p| p.motivation >= cost)
}

/// Spend a player's motivation.
///
/// `None` if the player is unknown or cannot afford `cost`.
#[must_use]
pub fn consume_motivation(state: &GameState, player: &PlayerId, cost: u32) -> Option<GameState> {
    let seat = state.seat_of(player)?;
    let updated = resources::consume(&state.players[seat], cost)?;
    Some(state.with_player(seat, updated))
}
