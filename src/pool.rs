//! Fixed-size worker pool draining a shared queue of query trials.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, anyhow, ensure};
use futures::future::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info};

use crate::client::{ClientError, Connector};
use crate::executor::run_trial;
use crate::metrics::stats::TrialResult;
use crate::workload::{QueryWorkload, WorkloadGenerator};

/// Configuration of one query-benchmark phase. Fixed for its duration.
#[derive(Debug, Clone)]
pub struct QueryBenchConfig {
    /// Number of concurrent workers, each with its own connection.
    /// Must be at least 1; a single worker runs strictly sequentially.
    pub worker_count: usize,
    pub trial_count: u64,
    pub structure_name: String,
    /// Ask the server to return full element data with every sample.
    pub request_data: bool,
    /// Batch size passed to every Query call.
    pub elements_per_query: i32,
    /// Server-side query lifetime hint, in seconds.
    pub suggested_ttl: i32,
}

/// Runs `trial_count` randomized query trials across the worker pool and
/// returns one result per trial, in completion order.
///
/// The first worker error stops the phase: trials still sitting in the
/// queue are abandoned, trials already in flight on other workers finish,
/// and the error is returned with all collected results discarded.
pub async fn run_benchmark(
    connector: Arc<dyn Connector>,
    config: &QueryBenchConfig,
) -> Result<Vec<TrialResult>> {
    ensure!(config.worker_count >= 1, "worker_count must be at least 1");

    // The work queue is filled up front and closed; workers only pop.
    let mut generator = WorkloadGenerator::new();
    let (work_tx, work_rx) = flume::unbounded::<QueryWorkload>();
    for _ in 0..config.trial_count {
        let workload = generator.next_workload(
            &config.structure_name,
            config.request_data,
            config.suggested_ttl,
        );
        work_tx
            .send(workload)
            .map_err(|_| anyhow!("work queue closed while filling"))?;
    }
    drop(work_tx);

    info!(
        workers = config.worker_count,
        trials = config.trial_count,
        structure = %config.structure_name,
        "starting query benchmark"
    );

    let stop = Arc::new(AtomicBool::new(false));
    let (result_tx, result_rx) = flume::unbounded::<TrialResult>();

    let mut worker_handles = (0..config.worker_count)
        .map(|worker_id| {
            let connector = Arc::clone(&connector);
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let stop = Arc::clone(&stop);
            let elements_per_query = config.elements_per_query;
            let (fut, handle) = async move {
                let mut client = connector.connect().await?;
                while let Ok(workload) = work_rx.recv_async().await {
                    if stop.load(Ordering::Relaxed) {
                        debug!(worker_id, "stopping early, abandoning queued trials");
                        break;
                    }
                    let trial = run_trial(client.as_mut(), &workload, elements_per_query).await?;
                    let _ = result_tx.send(trial);
                }
                Ok::<(), ClientError>(())
            }
            .remote_handle();
            tokio::task::spawn(fut);
            handle
        })
        .collect::<FuturesUnordered<_>>();
    drop(work_rx);
    drop(result_tx);

    let mut first_error: Option<ClientError> = None;
    while let Some(worker_result) = worker_handles.next().await {
        if let Err(err) = worker_result {
            stop.store(true, Ordering::Relaxed);
            first_error.get_or_insert(err);
        }
    }

    if let Some(err) = first_error {
        return Err(err).context("query benchmark aborted");
    }

    Ok(result_rx.try_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockBehavior, MockConnector};

    fn config(worker_count: usize, trial_count: u64) -> QueryBenchConfig {
        QueryBenchConfig {
            worker_count,
            trial_count,
            structure_name: "test_index".to_string(),
            request_data: false,
            elements_per_query: 10_000,
            suggested_ttl: 10,
        }
    }

    #[tokio::test]
    async fn returns_one_result_per_trial() {
        for workers in [1, 2, 7] {
            let connector = Arc::new(MockConnector::new(MockBehavior::default()));
            let pool_connector: Arc<dyn Connector> = connector.clone();
            let results = run_benchmark(pool_connector, &config(workers, 20))
                .await
                .unwrap();
            assert_eq!(results.len(), 20);
            assert_eq!(connector.start_query_calls(), 20);
            assert_eq!(connector.query_calls(), 20);
        }
    }

    #[tokio::test]
    async fn every_worker_gets_its_own_connection() {
        let connector = Arc::new(MockConnector::new(MockBehavior::default()));
        let pool_connector: Arc<dyn Connector> = connector.clone();
        run_benchmark(pool_connector, &config(4, 12)).await.unwrap();
        assert_eq!(connector.connections_made(), 4);
    }

    #[tokio::test]
    async fn zero_trials_yield_empty_results() {
        let connector = Arc::new(MockConnector::new(MockBehavior::default()));
        let results = run_benchmark(connector, &config(3, 0)).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn rejects_zero_workers() {
        let connector = Arc::new(MockConnector::new(MockBehavior::default()));
        assert!(run_benchmark(connector, &config(0, 5)).await.is_err());
    }

    #[tokio::test]
    async fn first_failure_aborts_the_phase() {
        let connector = Arc::new(MockConnector::new(MockBehavior {
            fail_start_query_at: Some(2),
            ..MockBehavior::default()
        }));
        let pool_connector: Arc<dyn Connector> = connector.clone();
        let err = run_benchmark(pool_connector, &config(1, 3)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Rpc { method: "StartQuery", .. })
        ));
        // trial 1 completed before the failure, but its result is discarded
        // along with the run; trial 3 must never have been started
        assert_eq!(connector.start_query_calls(), 2);
    }

    #[tokio::test]
    async fn fixed_latency_results_carry_the_mock_estimate() {
        let connector = Arc::new(MockConnector::new(MockBehavior {
            total_count: 50,
            ..MockBehavior::default()
        }));
        let results = run_benchmark(connector, &config(1, 3)).await.unwrap();
        assert_eq!(results.len(), 3);
        for trial in &results {
            assert_eq!(trial.result_count_estimate, 50);
            assert!(trial.area >= 0.0);
        }
    }
}
