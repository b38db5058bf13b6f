//! Scriptable in-process stand-in for the sampling server, used by tests
//! to exercise the benchmark phases without a live server.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::{AxisStatistics, BuildSpec, ClientError, Connector, QueryReply, SamplingClient};
use crate::workload::QueryWorkload;

/// What the mock server should do on each call.
#[derive(Debug, Clone)]
pub struct MockBehavior {
    /// Structure names returned by list_structures.
    pub structures: Vec<String>,
    /// Artificial latency of every StartQuery call.
    pub setup_delay: Duration,
    /// Artificial latency of every Query call.
    pub query_delay: Duration,
    /// total_count reported in every axis statistics block.
    pub total_count: i64,
    /// When set, the Nth StartQuery call (1-based, counted across all
    /// connections) fails with an RPC error.
    pub fail_start_query_at: Option<u64>,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            structures: Vec::new(),
            setup_delay: Duration::ZERO,
            query_delay: Duration::ZERO,
            total_count: 50,
            fail_start_query_at: None,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    start_query_calls: AtomicU64,
    query_calls: AtomicU64,
    next_query_id: AtomicI64,
}

/// Hands out [`MockSamplingClient`]s sharing one behavior script and one
/// call counter, so failure injection is global across connections just
/// like it would be on a single real server.
pub struct MockConnector {
    behavior: Arc<MockBehavior>,
    state: Arc<MockState>,
    connections: AtomicUsize,
}

impl MockConnector {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(behavior),
            state: Arc::new(MockState::default()),
            connections: AtomicUsize::new(0),
        }
    }

    /// Number of connections handed out so far.
    pub fn connections_made(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn start_query_calls(&self) -> u64 {
        self.state.start_query_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> u64 {
        self.state.query_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Connector for MockConnector {
    async fn connect(&self) -> Result<Box<dyn SamplingClient>, ClientError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSamplingClient {
            behavior: Arc::clone(&self.behavior),
            state: Arc::clone(&self.state),
        }))
    }
}

pub struct MockSamplingClient {
    behavior: Arc<MockBehavior>,
    state: Arc<MockState>,
}

#[async_trait::async_trait]
impl SamplingClient for MockSamplingClient {
    async fn list_structures(&mut self) -> Result<Vec<String>, ClientError> {
        Ok(self.behavior.structures.clone())
    }

    async fn build_structure(&mut self, _spec: &BuildSpec) -> Result<(), ClientError> {
        Ok(())
    }

    async fn start_query(&mut self, _workload: &QueryWorkload) -> Result<i64, ClientError> {
        let call = self.state.start_query_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.behavior.fail_start_query_at == Some(call) {
            return Err(ClientError::Rpc {
                method: "StartQuery",
                message: format!("injected failure on call {call}"),
            });
        }
        tokio::time::sleep(self.behavior.setup_delay).await;
        Ok(self.state.next_query_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn query(
        &mut self,
        _query_id: i64,
        elements_to_return: i32,
    ) -> Result<QueryReply, ClientError> {
        self.state.query_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.behavior.query_delay).await;
        let delivered = self.behavior.total_count.min(i64::from(elements_to_return.max(0)));
        let stats = AxisStatistics {
            total_count: self.behavior.total_count,
            sample_size: delivered,
        };
        Ok(QueryReply {
            element_count: delivered as usize,
            lat_last: stats,
            lon_last: stats,
            time_last: stats,
        })
    }

    async fn drop_structure(&mut self, _structure_name: &str) -> Result<(), ClientError> {
        Ok(())
    }
}
