//! Simulation harness tests: simulator, load test and training service.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use yeayeayea_engine::simulation::{
    run_load_test, DeckPair, Difficulty, GameSimulator, InMemoryResultsSink, LoadTestOptions,
    ResultsSink, SimulationError, SimulationOptions, SimulationRecord, SimulationType, SinkError,
    TrainingOptions, TrainingService, TrainingStats,
};

/// Fails every `n`th record.
struct FlakySink {
    every: u32,
    calls: AtomicU32,
}

#[async_trait::async_trait]
impl ResultsSink for FlakySink {
    async fn record(&self, _record: SimulationRecord) -> Result<(), SinkError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call % self.every == 0 {
            Err(SinkError::Rejected(format!("call {call}")))
        } else {
            Ok(())
        }
    }
}

fn simulator(sink: &InMemoryResultsSink, seed: u64) -> GameSimulator {
    GameSimulator::with_seed(Arc::new(sink.clone()), seed)
}

#[tokio::test]
async fn test_simulation_records_metadata_and_type() {
    let sink = InMemoryResultsSink::new();
    let mut sim = simulator(&sink, 1);
    let options = SimulationOptions::new("red", "blue")
        .with_type(SimulationType::Metrics)
        .with_difficulty(Difficulty::Easy)
        .with_metadata(json!({ "season": 3 }));

    let result = sim.simulate_game(&options).await.unwrap();

    let records = sink.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].simulation_type, SimulationType::Metrics);
    assert_eq!(records[0].deck_id, "red");
    assert_eq!(records[0].opponent_deck_id, "blue");
    assert_eq!(records[0].metadata, json!({ "season": 3 }));
    assert_eq!(records[0].result.turns, result.turns);
    assert_eq!(result.log.len(), result.turns as usize);
}

#[tokio::test]
async fn test_simulation_options_json_defaults() {
    let options: SimulationOptions =
        serde_json::from_str(r#"{ "deck_id": "a", "opponent_deck_id": "b" }"#).unwrap();

    assert_eq!(options.simulation_type, SimulationType::Training);
    assert_eq!(options.difficulty, Difficulty::Medium);
    assert_eq!(options.metadata, json!({}));
}

#[tokio::test]
async fn test_load_test_runs_each_iteration() {
    let sink = InMemoryResultsSink::new();
    let mut sim = simulator(&sink, 42);

    let report = run_load_test(&mut sim, &LoadTestOptions::new(5, "red", "blue"))
        .await
        .unwrap();

    assert_eq!(report.iterations, 5);
    assert_eq!(report.deck_wins + report.opponent_wins, 5);
    assert!(report.total_turns >= 5 && report.total_turns <= 50);

    let records = sink.records().await;
    assert_eq!(records.len(), 5);
    assert!(records
        .iter()
        .all(|r| r.simulation_type == SimulationType::Performance));
    assert_eq!(
        records.iter().filter(|r| r.result.won).count() as u32,
        report.deck_wins
    );
}

#[tokio::test]
async fn test_load_test_stops_on_sink_failure() {
    let sink = Arc::new(FlakySink {
        every: 3,
        calls: AtomicU32::new(0),
    });
    let mut sim = GameSimulator::with_seed(sink.clone(), 5);

    let err = run_load_test(&mut sim, &LoadTestOptions::new(10, "a", "b"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SimulationError::Sink(SinkError::Rejected("call 3".into()))
    );
    assert_eq!(sink.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_training_waits_one_interval() {
    let sink = InMemoryResultsSink::new();
    let mut service = TrainingService::new(simulator(&sink, 7));
    let options = TrainingOptions::default()
        .with_pair(DeckPair::new("red", "blue"))
        .with_pair(DeckPair::new("green", "blue"));

    assert!(service.start(options));
    assert!(service.is_running());

    tokio::time::sleep(Duration::from_secs(59)).await;
    assert!(sink.is_empty().await);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(sink.len().await, 2);
    assert_eq!(
        service.stats(),
        TrainingStats {
            batches: 1,
            games: 2,
            failures: 0
        }
    );

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(service.stats().batches, 2);
    assert!(sink
        .records()
        .await
        .iter()
        .all(|r| r.simulation_type == SimulationType::Training));

    service.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_training_start_twice_is_noop() {
    let sink = InMemoryResultsSink::new();
    let mut service = TrainingService::new(simulator(&sink, 7));

    assert!(service.start(TrainingOptions::default()));
    assert!(!service.start(TrainingOptions::default()));
    assert!(service.is_running());

    service.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_training_stop_halts_batches() {
    let sink = InMemoryResultsSink::new();
    let mut service = TrainingService::new(simulator(&sink, 3));
    let options = TrainingOptions::default()
        .with_interval(Duration::from_secs(10))
        .with_pair(DeckPair::new("red", "blue"));

    service.start(options);
    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(service.stats().batches, 2);

    assert!(service.stop());
    assert!(!service.is_running());
    assert!(!service.stop());

    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(service.stats().batches, 2);
    assert_eq!(sink.len().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_training_can_restart_after_shutdown() {
    let sink = InMemoryResultsSink::new();
    let mut service = TrainingService::new(simulator(&sink, 3));
    let options = TrainingOptions::default()
        .with_interval(Duration::from_secs(5))
        .with_pair(DeckPair::new("red", "blue"));

    service.start(options.clone());
    tokio::time::sleep(Duration::from_secs(6)).await;
    service.shutdown().await;
    assert!(!service.is_running());

    assert!(service.start(options));
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(service.stats().batches, 2);

    service.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_training_counts_failures_and_keeps_going() {
    let sink = Arc::new(FlakySink {
        every: 2,
        calls: AtomicU32::new(0),
    });
    let mut service = TrainingService::new(GameSimulator::with_seed(sink, 9));
    let options = TrainingOptions::default()
        .with_interval(Duration::from_secs(1))
        .with_difficulty(Difficulty::Hard)
        .with_pair(DeckPair::new("a", "b"))
        .with_pair(DeckPair::new("c", "d"));

    service.start(options);
    tokio::time::sleep(Duration::from_millis(3500)).await;

    assert_eq!(
        service.stats(),
        TrainingStats {
            batches: 3,
            games: 3,
            failures: 3
        }
    );
    assert_eq!(service.simulator().lock().await.games_played(), 6);

    service.shutdown().await;
}

#[tokio::test]
async fn test_load_test_mirror_match_counts_each_side() {
    let sink = InMemoryResultsSink::new();
    let mut sim = simulator(&sink, 17);

    let report = run_load_test(&mut sim, &LoadTestOptions::new(50, "red", "red"))
        .await
        .unwrap();

    let recorded_wins = sink
        .records()
        .await
        .iter()
        .filter(|r| r.result.won)
        .count() as u32;
    assert_eq!(report.deck_wins, recorded_wins);
    assert_eq!(report.opponent_wins, 50 - recorded_wins);
    assert!(report.deck_wins > 0 && report.opponent_wins > 0);
}
