//! Game state: turn counters, phase, and players.
//!
//! ## GameState
//!
//! A value type. Transitions in [`crate::turns`] take a `&GameState` and
//! return a new one; callers swap their reference. Players live in an
//! `im::Vector` so snapshots are O(1) to clone.
//!
//! ## GameHistory
//!
//! Append-only list of prior snapshots, used for undo and for saves.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Draw,
    #[default]
    Main,
    Combat,
    End,
}

/// Conventional phase order. The engine does not enforce it.
pub const PHASE_CYCLE: [Phase; 4] = [Phase::Draw, Phase::Main, Phase::Combat, Phase::End];

impl Phase {
    /// The phase after this one in [`PHASE_CYCLE`], wrapping at `End`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Phase::Draw => Phase::Main,
            Phase::Main => Phase::Combat,
            Phase::Combat => Phase::End,
            Phase::End => Phase::Draw,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "draw",
            Phase::Main => "main",
            Phase::Combat => "combat",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}

/// Snapshot of a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Players in turn order.
    pub players: Vector<Player>,

    /// Monotonic count of `next_turn` calls (starts at 0).
    pub current_turn: u32,

    /// Index of the active player in `players`.
    pub active_player: usize,

    /// Current phase.
    pub phase: Phase,

    /// Full rounds started (starts at 1, bumps when the seat wraps to 0).
    pub turn_count: u32,
}

impl GameState {
    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get the active player.
    #[must_use]
    pub fn active(&self) -> &Player {
        &self.players[self.active_player]
    }

    /// Find a player by ID.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Find a player's seat by ID.
    #[must_use]
    pub fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Copy of this state with one player replaced.
    #[must_use]
    pub fn with_player(&self, seat: usize, player: Player) -> Self {
        let mut next = self.clone();
        next.players[seat] = player;
        next
    }
}

/// Append-only sequence of prior game states.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameHistory {
    snapshots: Vector<GameState>,
}

impl GameHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot.
    pub fn push(&mut self, state: GameState) {
        self.snapshots.push_back(state);
    }

    /// Remove and return the most recent snapshot.
    pub fn undo(&mut self) -> Option<GameState> {
        self.snapshots.pop_back()
    }

    /// Most recent snapshot, if any.
    #[must_use]
    pub fn last(&self) -> Option<&GameState> {
        self.snapshots.back()
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if no snapshots are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &GameState> {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_players() -> GameState {
        GameState {
            players: Vector::from(vec![Player::new("a", "A"), Player::new("b", "B")]),
            current_turn: 0,
            active_player: 0,
            phase: Phase::Main,
            turn_count: 1,
        }
    }

    #[test]
    fn test_phase_cycle() {
        assert_eq!(Phase::Draw.next(), Phase::Main);
        assert_eq!(Phase::End.next(), Phase::Draw);
        for window in PHASE_CYCLE.windows(2) {
            assert_eq!(window[0].next(), window[1]);
        }
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Combat).unwrap(), "\"combat\"");
        assert_eq!(format!("{}", Phase::Draw), "draw");
    }

    #[test]
    fn test_player_lookup() {
        let state = two_players();
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.seat_of(&PlayerId::new("b")), Some(1));
        assert!(state.player(&PlayerId::new("zz")).is_none());
        assert_eq!(state.active().name, "A");
    }

    #[test]
    fn test_with_player_leaves_original_untouched() {
        let state = two_players();
        let updated = state.with_player(1, Player::new("b", "B").with_motivation(7));

        assert_eq!(state.players[1].motivation, 0);
        assert_eq!(updated.players[1].motivation, 7);
    }

    #[test]
    fn test_history_undo() {
        let mut history = GameHistory::new();
        assert!(history.undo().is_none());

        let first = two_players();
        let mut second = first.clone();
        second.current_turn = 1;

        history.push(first.clone());
        history.push(second.clone());

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some(second));
        assert_eq!(history.last(), Some(&first));
    }
}
