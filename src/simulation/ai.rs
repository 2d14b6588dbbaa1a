//! AI action picker.
//!
//! Produces a readable action line per turn for simulation logs. It does
//! not play the game: each line is drawn uniformly from the difficulty's
//! three-action vocabulary.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// AI skill level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Actions this level picks from.
    #[must_use]
    pub fn actions(self) -> &'static [&'static str; 3] {
        match self {
            Difficulty::Easy => &["passes its turn", "plays a weak card", "defends"],
            Difficulty::Medium => &["attacks", "casts a spell", "defends"],
            Difficulty::Hard => &[
                "attacks aggressively",
                "casts a powerful spell",
                "optimizes its defense",
            ],
        }
    }

    /// Chance that the simulated player's deck beats this AI.
    #[must_use]
    pub fn win_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 0.5,
            Difficulty::Hard => 0.3,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Action lines from [`run_ai`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiFeedback {
    pub actions: Vec<String>,
}

/// One `"Turn t: AI <action>"` line per turn, `t` counting from 1.
pub fn run_ai(turns: u32, difficulty: Difficulty, rng: &mut GameRng) -> AiFeedback {
    let vocabulary = difficulty.actions();
    let actions = (1..=turns)
        .map(|turn| {
            let action = rng.choose(vocabulary).copied().unwrap_or("waits");
            format!("Turn {turn}: AI {action}")
        })
        .collect();
    AiFeedback { actions }
}
