#![cfg(feature = "client-mock")]
//! End-to-end benchmark properties, driven against the mock service.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sampling_bench::client::ClientError;
use sampling_bench::client::Connector;
use sampling_bench::client::mock::{MockBehavior, MockConnector};
use sampling_bench::config::BenchConfig;
use sampling_bench::metrics::stats::summarize;
use sampling_bench::orchestrator::Orchestrator;
use sampling_bench::pool::{QueryBenchConfig, run_benchmark};

fn pool_config(workers: usize, trials: u64) -> QueryBenchConfig {
    QueryBenchConfig {
        worker_count: workers,
        trial_count: trials,
        structure_name: "bench_test_index".to_string(),
        request_data: false,
        elements_per_query: 10_000,
        suggested_ttl: 10,
    }
}

#[tokio::test]
async fn sequential_fixed_latency_phase_report() {
    let connector = Arc::new(MockConnector::new(MockBehavior {
        setup_delay: Duration::from_millis(10),
        query_delay: Duration::from_millis(20),
        total_count: 50,
        ..MockBehavior::default()
    }));
    let results = run_benchmark(connector, &pool_config(1, 3)).await.unwrap();
    assert_eq!(results.len(), 3);

    let report = summarize(&results, "bench_test_index", 3, false).unwrap();
    // every recorded latency covers its injected delay, so the summed
    // accounting covers 3 x (10ms + 20ms)
    assert!(report.total_time >= Duration::from_millis(90));
    assert!(report.min_setup_time >= Duration::from_millis(10));
    assert!(report.min_query_time >= Duration::from_millis(20));
    assert_eq!(report.setup_times.len(), 3);
    for trial in &results {
        assert_eq!(trial.result_count_estimate, 50);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn more_workers_shrink_wall_clock_but_not_total_time() {
    const TRIALS: u64 = 8;
    let per_trial = Duration::from_millis(30); // 10ms setup + 20ms query
    let behavior = MockBehavior {
        setup_delay: Duration::from_millis(10),
        query_delay: Duration::from_millis(20),
        ..MockBehavior::default()
    };

    let sequential = Arc::new(MockConnector::new(behavior.clone()));
    let start = Instant::now();
    let sequential_results = run_benchmark(sequential, &pool_config(1, TRIALS))
        .await
        .unwrap();
    let sequential_span = start.elapsed();

    let concurrent = Arc::new(MockConnector::new(behavior));
    let start = Instant::now();
    let concurrent_results = run_benchmark(concurrent, &pool_config(4, TRIALS))
        .await
        .unwrap();
    let concurrent_span = start.elapsed();

    // one worker runs the trials back to back; four workers overlap them
    assert!(sequential_span >= per_trial * TRIALS as u32);
    assert!(concurrent_span < per_trial * TRIALS as u32 * 3 / 4);

    // the summed per-request accounting is independent of parallelism:
    // both runs record every injected delay in full
    let sequential_total = summarize(&sequential_results, "idx", TRIALS, false)
        .unwrap()
        .total_time;
    let concurrent_total = summarize(&concurrent_results, "idx", TRIALS, false)
        .unwrap()
        .total_time;
    assert!(sequential_total >= per_trial * TRIALS as u32);
    assert!(concurrent_total >= per_trial * TRIALS as u32);
}

#[tokio::test]
async fn failure_on_second_start_query_discards_the_run() {
    let connector = Arc::new(MockConnector::new(MockBehavior {
        fail_start_query_at: Some(2),
        ..MockBehavior::default()
    }));
    let pool_connector: Arc<dyn Connector> = connector.clone();
    let err = run_benchmark(pool_connector, &pool_config(1, 3))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ClientError>(),
        Some(ClientError::Rpc {
            method: "StartQuery",
            ..
        })
    ));
    // the first trial completed before the failure; its result went down
    // with the run, and the third trial was never started
    assert_eq!(connector.start_query_calls(), 2);
    assert_eq!(connector.query_calls(), 1);
}

#[tokio::test]
async fn orchestrator_runs_enabled_phases_in_order() {
    let connector = Arc::new(MockConnector::new(MockBehavior {
        structures: vec!["existing_index".to_string()],
        ..MockBehavior::default()
    }));
    let config = BenchConfig {
        structure_name: "bench_test_index".to_string(),
        input_location: "/tmp/input.csv".to_string(),
        trial_count: 5,
        worker_count: 2,
        elements_per_query: 10_000,
        request_data: false,
        suggested_ttl: 10,
        run_list: true,
        run_build: true,
        run_delete: true,
        csv: None,
    };
    let orchestrator_connector: Arc<dyn Connector> = connector.clone();
    let orchestrator = Orchestrator::new(config, orchestrator_connector);

    let list = orchestrator.run_list().await.unwrap();
    assert_eq!(list.structure_names, vec!["existing_index"]);

    let build = orchestrator.run_build().await.unwrap();
    assert_eq!(build.structure_name, "bench_test_index");

    let report = orchestrator.run_query_benchmark().await.unwrap();
    assert_eq!(report.trial_count, 5);
    assert_eq!(report.setup_times.len(), 5);
    assert_eq!(connector.start_query_calls(), 5);

    let dropped = orchestrator.run_drop().await.unwrap();
    assert_eq!(dropped.structure_name, "bench_test_index");
}

#[tokio::test]
async fn zero_trials_fail_aggregation_not_the_pool() {
    let connector = Arc::new(MockConnector::new(MockBehavior::default()));
    let config = BenchConfig {
        structure_name: "bench_test_index".to_string(),
        input_location: String::new(),
        trial_count: 0,
        worker_count: 1,
        elements_per_query: 10_000,
        request_data: false,
        suggested_ttl: 10,
        run_list: false,
        run_build: false,
        run_delete: false,
        csv: None,
    };
    let orchestrator = Orchestrator::new(config, connector);
    assert!(orchestrator.run_query_benchmark().await.is_err());
}
