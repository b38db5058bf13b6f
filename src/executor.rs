//! Single-trial query execution: the two-step StartQuery/Query protocol.

use std::time::Instant;

use tracing::debug;

use crate::client::{ClientError, SamplingClient};
use crate::metrics::stats::TrialResult;
use crate::workload::QueryWorkload;

/// Runs one trial over an existing connection. No retry: an RPC failure
/// aborts the trial, and the caller is expected to abort the whole phase.
pub async fn run_trial(
    client: &mut dyn SamplingClient,
    workload: &QueryWorkload,
    elements_to_return: i32,
) -> Result<TrialResult, ClientError> {
    let setup_start = Instant::now();
    let query_id = client.start_query(workload).await?;
    let setup_time = setup_start.elapsed();

    let query_start = Instant::now();
    let reply = client.query(query_id, elements_to_return).await?;
    let query_time = query_start.elapsed();

    debug!(
        query_id,
        delivered = reply.element_count,
        estimate = reply.lat_last.total_count,
        "trial complete"
    );

    // The server reports the same total_count in every axis block; the
    // latitude block is the one this client reads, always.
    Ok(TrialResult {
        setup_time,
        query_time,
        result_count_estimate: reply.lat_last.total_count,
        area: workload.region.area(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::Connector;
    use crate::client::mock::{MockBehavior, MockConnector};
    use crate::workload::WorkloadGenerator;

    #[tokio::test]
    async fn trial_records_estimate_and_area() {
        let connector = MockConnector::new(MockBehavior {
            total_count: 123,
            ..MockBehavior::default()
        });
        let mut client = connector.connect().await.unwrap();
        let workload = WorkloadGenerator::with_seed(5).next_workload("idx", false, 10);

        let trial = run_trial(client.as_mut(), &workload, 10_000).await.unwrap();

        assert_eq!(trial.result_count_estimate, 123);
        // area must be recomputable bit-for-bit from the workload bounds
        let r = &workload.region;
        let recomputed = (r.max_lat - r.min_lat) * (r.max_lon - r.min_lon);
        assert_eq!(trial.area.to_bits(), recomputed.to_bits());
    }

    #[tokio::test]
    async fn trial_propagates_rpc_failure() {
        let connector = MockConnector::new(MockBehavior {
            fail_start_query_at: Some(1),
            ..MockBehavior::default()
        });
        let mut client = connector.connect().await.unwrap();
        let workload = WorkloadGenerator::with_seed(5).next_workload("idx", false, 10);

        let err = run_trial(client.as_mut(), &workload, 10_000)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rpc { method: "StartQuery", .. }));
    }

    #[tokio::test]
    async fn trial_latencies_cover_the_call_delays() {
        let connector = MockConnector::new(MockBehavior {
            setup_delay: Duration::from_millis(10),
            query_delay: Duration::from_millis(20),
            ..MockBehavior::default()
        });
        let mut client = connector.connect().await.unwrap();
        let workload = WorkloadGenerator::with_seed(5).next_workload("idx", false, 10);

        let trial = run_trial(client.as_mut(), &workload, 10_000).await.unwrap();

        assert!(trial.setup_time >= Duration::from_millis(10));
        assert!(trial.query_time >= Duration::from_millis(20));
    }
}
