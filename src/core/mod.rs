//! Core engine types: players, game state, RNG, configuration.
//!
//! Everything here is a value type or a read-only lookup. Mutation
//! lives in the subsystems built on top (`turns`, `resources`,
//! `alterations`, `cards`).

pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ConfigStore, EngineConfig, MapConfigStore};
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use state::{GameHistory, GameState, Phase, PHASE_CYCLE};
