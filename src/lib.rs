//! # yeayeayea-engine
//!
//! Turn, resource and combat simulation engine for balancing card-game
//! content.
//!
//! ## Design Principles
//!
//! 1. **Value State**: `GameState` is an immutable value. Turn and
//!    motivation transitions return a new state and never mutate their
//!    input, so history and undo are plain snapshots.
//!
//! 2. **N-Player First**: Turn order wraps over any number of seats.
//!    Nothing assumes two players.
//!
//! 3. **Content Over Code**: Cards and alterations are data loaded into a
//!    `ContentRepository`. Engine numbers come from `EngineConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`.
//!
//! - **Single-Writer Entities**: Bases, card instances and the combat log
//!   are mutated through `&mut self` by whoever owns them, usually a
//!   `GameSession`.
//!
//! - **Async only at the edge**: The simulation harness awaits its results
//!   sink. Everything else is synchronous.
//!
//! ## Modules
//!
//! - `core`: Players, game state, configuration, RNG
//! - `resources`: Motivation ledger and modifiers
//! - `turns`: Turn and phase state machine
//! - `alterations`: Buffs, debuffs and player bases
//! - `cards`: Card definitions, instances, equipment slots, registry
//! - `events`: Combat events and the combat log
//! - `combat`: Action resolution and game sessions
//! - `simulation`: AI picker, game simulator, load test, training service
//! - `persistence`: Game save snapshots

pub mod core;
pub mod resources;
pub mod turns;
pub mod alterations;
pub mod cards;
pub mod events;
pub mod combat;
pub mod simulation;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    ConfigStore, EngineConfig, MapConfigStore,
    Player, PlayerId,
    GameRng,
    GameHistory, GameState, Phase,
};

pub use crate::resources::{ModifierId, ResourceModifier};

pub use crate::alterations::{
    Alteration, AlterationEffect, AlterationId, AlterationKind, AlterationSet,
    HealthChange, PlayerBase,
};

pub use crate::cards::{
    CardDefinition, CardId, CardInstance, CardKind, CardRegistry, ContentRepository,
    InstanceId, RegistryError, SlotId, Stats,
};

pub use crate::events::{CombatEvent, CombatLog, SubscriptionId};

pub use crate::combat::{CombatAction, CombatError, CombatResolver, Effect, GameSession};

pub use crate::simulation::{
    Difficulty, GameSimulator, InMemoryResultsSink, ResultsSink, SimulationError,
    SimulationOptions, SimulationResult, TrainingService,
};

pub use crate::persistence::{GameSaveStore, InMemorySaveStore, SaveError, SaveId, SavedGame};
