//! Simulation result records and the sink they are written to.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

/// Why a simulation was run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationType {
    #[default]
    Training,
    Performance,
    Metrics,
}

/// Outcome from the simulated deck's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    pub turns: u32,
}

/// Row written to the results store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub simulation_type: SimulationType,
    pub deck_id: String,
    pub opponent_deck_id: String,
    pub result: GameOutcome,
    pub metadata: Value,
}

/// Results store failure.
#[derive(Debug, Error, PartialEq)]
pub enum SinkError {
    #[error("results store unavailable: {0}")]
    Unavailable(String),

    #[error("results store rejected record: {0}")]
    Rejected(String),
}

/// Destination for simulation records.
#[async_trait::async_trait]
pub trait ResultsSink: Send + Sync {
    async fn record(&self, record: SimulationRecord) -> Result<(), SinkError>;
}

/// Sink that keeps records in memory. Clones share storage.
#[derive(Clone, Debug, Default)]
pub struct InMemoryResultsSink {
    records: Arc<Mutex<Vec<SimulationRecord>>>,
}

impl InMemoryResultsSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub async fn records(&self) -> Vec<SimulationRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ResultsSink for InMemoryResultsSink {
    async fn record(&self, record: SimulationRecord) -> Result<(), SinkError> {
        self.records.lock().await.push(record);
        Ok(())
    }
}
