//! Headless simulation harness.
//!
//! ## Key Types
//!
//! - `GameSimulator`: simulates a game and writes the outcome to a `ResultsSink`
//! - `run_load_test`: sequential throughput run over the simulator
//! - `TrainingService`: periodic background batches on a tokio task
//! - `run_ai`: difficulty-driven AI action log

pub mod ai;
pub mod load_test;
pub mod results;
pub mod simulator;
pub mod trainer;

pub use ai::{run_ai, AiFeedback, Difficulty};
pub use load_test::{run_load_test, LoadTestOptions, LoadTestReport};
pub use results::{
    GameOutcome, InMemoryResultsSink, ResultsSink, SimulationRecord, SimulationType, SinkError,
};
pub use simulator::{
    GameSimulator, SimulationError, SimulationOptions, SimulationResult, MAX_SIMULATED_TURNS,
};
pub use trainer::{
    DeckPair, TrainingOptions, TrainingService, TrainingStats, DEFAULT_TRAINING_INTERVAL,
};
