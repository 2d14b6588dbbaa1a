//! Single-game simulator.
//!
//! A simulated game is not played card by card: the turn count is drawn
//! uniformly from 1 to 10 and the winner is one weighted coin flip on the
//! AI difficulty. The AI action log is generated for the drawn turn count
//! and the outcome is written to the results sink.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::ai::{run_ai, Difficulty};
use super::results::{GameOutcome, ResultsSink, SimulationRecord, SimulationType, SinkError};
use crate::core::GameRng;

/// Upper bound on simulated turns.
pub const MAX_SIMULATED_TURNS: u32 = 10;

/// Simulation failure.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// What to simulate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    pub deck_id: String,
    pub opponent_deck_id: String,
    #[serde(default)]
    pub simulation_type: SimulationType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "empty_metadata")]
    pub metadata: Value,
}

fn empty_metadata() -> Value {
    Value::Object(serde_json::Map::new())
}

impl SimulationOptions {
    /// Training run at medium difficulty with empty metadata.
    pub fn new(deck_id: impl Into<String>, opponent_deck_id: impl Into<String>) -> Self {
        Self {
            deck_id: deck_id.into(),
            opponent_deck_id: opponent_deck_id.into(),
            simulation_type: SimulationType::default(),
            difficulty: Difficulty::default(),
            metadata: empty_metadata(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, simulation_type: SimulationType) -> Self {
        self.simulation_type = simulation_type;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Result of one simulated game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Winning deck id.
    pub winner: String,
    /// Whether `deck_id` won. Unambiguous in mirror matches.
    pub won: bool,
    pub turns: u32,
    /// AI action lines, one per turn.
    pub log: Vec<String>,
}

/// Runs simulated games and records their outcomes.
pub struct GameSimulator {
    sink: Arc<dyn ResultsSink>,
    rng: GameRng,
    games_played: u64,
}

impl std::fmt::Debug for GameSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSimulator")
            .field("seed", &self.rng.seed())
            .field("games_played", &self.games_played)
            .finish_non_exhaustive()
    }
}

impl GameSimulator {
    pub fn new(sink: Arc<dyn ResultsSink>, rng: GameRng) -> Self {
        Self {
            sink,
            rng,
            games_played: 0,
        }
    }

    /// Simulator with a fixed seed.
    pub fn with_seed(sink: Arc<dyn ResultsSink>, seed: u64) -> Self {
        Self::new(sink, GameRng::new(seed))
    }

    /// Games simulated so far, including ones whose record failed to save.
    #[must_use]
    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    /// Simulate one game and record it.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Sink`] if the record could not be saved.
    pub async fn simulate_game(
        &mut self,
        options: &SimulationOptions,
    ) -> Result<SimulationResult, SimulationError> {
        let turns = self.rng.gen_range(1..=MAX_SIMULATED_TURNS);
        let won = self.rng.gen_bool(options.difficulty.win_probability());
        let feedback = run_ai(turns, options.difficulty, &mut self.rng);
        self.games_played += 1;

        let winner = if won {
            options.deck_id.clone()
        } else {
            options.opponent_deck_id.clone()
        };

        self.sink
            .record(SimulationRecord {
                simulation_type: options.simulation_type,
                deck_id: options.deck_id.clone(),
                opponent_deck_id: options.opponent_deck_id.clone(),
                result: GameOutcome { won, turns },
                metadata: options.metadata.clone(),
            })
            .await?;

        log::info!(
            "simulated {} vs {} ({}): {} won in {} turns",
            options.deck_id,
            options.opponent_deck_id,
            options.difficulty,
            winner,
            turns
        );

        Ok(SimulationResult {
            winner,
            won,
            turns,
            log: feedback.actions,
        })
    }
}
