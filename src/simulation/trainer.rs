//! Periodic training runs.
//!
//! `TrainingService` owns a background tokio task that simulates one game
//! per configured deck pair every interval. The first batch runs one full
//! interval after `start`. A batch always finishes before the next tick is
//! awaited and ticks missed while a batch runs are skipped, so batches
//! never overlap.
//!
//! `stop` only signals the task: a batch already in progress runs to
//! completion and the task exits before starting another.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::ai::Difficulty;
use super::results::SimulationType;
use super::simulator::{GameSimulator, SimulationOptions};

/// Default pause between batches.
pub const DEFAULT_TRAINING_INTERVAL: Duration = Duration::from_millis(60_000);

/// Two decks to pit against each other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPair {
    pub deck_id: String,
    pub opponent_deck_id: String,
}

impl DeckPair {
    pub fn new(deck_id: impl Into<String>, opponent_deck_id: impl Into<String>) -> Self {
        Self {
            deck_id: deck_id.into(),
            opponent_deck_id: opponent_deck_id.into(),
        }
    }
}

/// Training schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingOptions {
    pub deck_pairs: Vec<DeckPair>,
    pub interval: Duration,
    pub difficulty: Difficulty,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            deck_pairs: Vec::new(),
            interval: DEFAULT_TRAINING_INTERVAL,
            difficulty: Difficulty::default(),
        }
    }
}

impl TrainingOptions {
    #[must_use]
    pub fn with_pair(mut self, pair: DeckPair) -> Self {
        self.deck_pairs.push(pair);
        self
    }

    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Training interval must be non-zero");
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// Counters across every run of a service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingStats {
    pub batches: u64,
    pub games: u64,
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    batches: AtomicU64,
    games: AtomicU64,
    failures: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> TrainingStats {
        TrainingStats {
            batches: self.batches.load(Ordering::Relaxed),
            games: self.games.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

struct Worker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Background training scheduler.
pub struct TrainingService {
    simulator: Arc<Mutex<GameSimulator>>,
    counters: Arc<Counters>,
    worker: Option<Worker>,
}

impl std::fmt::Debug for TrainingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainingService")
            .field("running", &self.is_running())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl TrainingService {
    pub fn new(simulator: GameSimulator) -> Self {
        Self {
            simulator: Arc::new(Mutex::new(simulator)),
            counters: Arc::default(),
            worker: None,
        }
    }

    /// Simulator shared with the background task.
    #[must_use]
    pub fn simulator(&self) -> Arc<Mutex<GameSimulator>> {
        Arc::clone(&self.simulator)
    }

    /// Spawn the training loop. Must be called from within a tokio runtime.
    ///
    /// Returns `false` and leaves the running loop untouched if already
    /// running.
    pub fn start(&mut self, options: TrainingOptions) -> bool {
        if self.is_running() {
            log::debug!("training already running");
            return false;
        }

        log::info!(
            "training started: {} deck pairs every {:?}",
            options.deck_pairs.len(),
            options.interval
        );
        let (shutdown, rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(
            Arc::clone(&self.simulator),
            Arc::clone(&self.counters),
            options,
            rx,
        ));
        self.worker = Some(Worker { shutdown, handle });
        true
    }

    /// Signal the loop to stop. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        match self.worker.take() {
            Some(worker) => {
                let _ = worker.shutdown.send(true);
                log::info!("training stop requested");
                true
            }
            None => false,
        }
    }

    /// Signal the loop to stop and wait for it to exit.
    pub async fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.shutdown.send(true);
            if let Err(e) = worker.handle.await {
                log::warn!("training task ended abnormally: {e}");
            }
            log::info!("training stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    #[must_use]
    pub fn stats(&self) -> TrainingStats {
        self.counters.snapshot()
    }
}

async fn run_loop(
    simulator: Arc<Mutex<GameSimulator>>,
    counters: Arc<Counters>,
    options: TrainingOptions,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = time::interval_at(Instant::now() + options.interval, options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                run_batch(&simulator, &counters, &options).await;
            }
        }
    }
    log::debug!("training loop exited");
}

async fn run_batch(
    simulator: &Mutex<GameSimulator>,
    counters: &Counters,
    options: &TrainingOptions,
) {
    let mut simulator = simulator.lock().await;
    for pair in &options.deck_pairs {
        let game = SimulationOptions::new(pair.deck_id.clone(), pair.opponent_deck_id.clone())
            .with_type(SimulationType::Training)
            .with_difficulty(options.difficulty);
        match simulator.simulate_game(&game).await {
            Ok(_) => {
                counters.games.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                counters.failures.fetch_add(1, Ordering::Relaxed);
                log::warn!(
                    "training game {} vs {} failed: {e}",
                    pair.deck_id,
                    pair.opponent_deck_id
                );
            }
        }
    }
    counters.batches.fetch_add(1, Ordering::Relaxed);
}
