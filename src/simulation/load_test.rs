//! Sequential load test over the simulator.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::time::Instant;

use super::ai::Difficulty;
use super::results::SimulationType;
use super::simulator::{GameSimulator, SimulationError, SimulationOptions};

/// Load test parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadTestOptions {
    pub iterations: u32,
    pub deck_id: String,
    pub opponent_deck_id: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl LoadTestOptions {
    pub fn new(
        iterations: u32,
        deck_id: impl Into<String>,
        opponent_deck_id: impl Into<String>,
    ) -> Self {
        Self {
            iterations,
            deck_id: deck_id.into(),
            opponent_deck_id: opponent_deck_id.into(),
            difficulty: Difficulty::default(),
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// Load test summary.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadTestReport {
    pub iterations: u32,
    pub duration: Duration,
    pub deck_wins: u32,
    pub opponent_wins: u32,
    pub total_turns: u64,
}

impl LoadTestReport {
    /// Throughput. Zero if no time elapsed.
    #[must_use]
    pub fn games_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            f64::from(self.iterations) / secs
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn average_turns(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.total_turns as f64 / f64::from(self.iterations)
        }
    }
}

/// Run `iterations` performance games one after another.
///
/// # Errors
///
/// Stops at the first game whose record fails to save.
pub async fn run_load_test(
    simulator: &mut GameSimulator,
    options: &LoadTestOptions,
) -> Result<LoadTestReport, SimulationError> {
    let game = SimulationOptions::new(options.deck_id.clone(), options.opponent_deck_id.clone())
        .with_type(SimulationType::Performance)
        .with_difficulty(options.difficulty)
        .with_metadata(json!({ "iterations": options.iterations }));

    let started = Instant::now();
    let mut deck_wins = 0;
    let mut total_turns = 0u64;
    for _ in 0..options.iterations {
        let result = simulator.simulate_game(&game).await?;
        if result.won {
            deck_wins += 1;
        }
        total_turns += u64::from(result.turns);
    }

    let report = LoadTestReport {
        iterations: options.iterations,
        duration: started.elapsed(),
        deck_wins,
        opponent_wins: options.iterations - deck_wins,
        total_turns,
    };
    log::info!(
        "load test: {} games in {:?} ({:.1} games/s), {} {} / {} {}",
        report.iterations,
        report.duration,
        report.games_per_second(),
        options.deck_id,
        report.deck_wins,
        options.opponent_deck_id,
        report.opponent_wins
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_per_second() {
        let report = LoadTestReport {
            iterations: 10,
            duration: Duration::from_secs(2),
            deck_wins: 6,
            opponent_wins: 4,
            total_turns: 55,
        };
        assert!((report.games_per_second() - 5.0).abs() < f64::EPSILON);
        assert!((report.average_turns() - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_report() {
        let report = LoadTestReport {
            iterations: 0,
            duration: Duration::ZERO,
            deck_wins: 0,
            opponent_wins: 0,
            total_turns: 0,
        };
        assert_eq!(report.games_per_second(), 0.0);
        assert_eq!(report.average_turns(), 0.0);
    }
}
