//! Client binding for the remote sampling server: trait, types, and the
//! concrete gRPC/mock implementations.

pub mod grpc;
#[cfg(any(test, feature = "client-mock"))]
pub mod mock;
pub mod pb;

use crate::workload::QueryWorkload;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("connect {endpoint}: {message}")]
    Connect { endpoint: String, message: String },
    #[error("{method}: {message}")]
    Rpc {
        method: &'static str,
        message: String,
    },
    #[error("{method}: malformed response: {message}")]
    MalformedResponse {
        method: &'static str,
        message: String,
    },
}

/// Statistics block the server attaches to a query response for one
/// coordinate axis. `total_count` is the server's estimate of how many
/// stored elements match the query region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisStatistics {
    pub total_count: i64,
    pub sample_size: i64,
}

/// Domain-level view of one Query response.
#[derive(Debug, Clone)]
pub struct QueryReply {
    /// Number of sample elements actually delivered in this batch.
    pub element_count: usize,
    pub lat_last: AxisStatistics,
    pub lon_last: AxisStatistics,
    pub time_last: AxisStatistics,
}

#[derive(Debug, Clone)]
pub struct BuildSpec {
    pub name: String,
    /// Replace an existing structure of the same name.
    pub force: bool,
    /// Path to the input dataset, local to the index server.
    pub input_location: String,
    pub remove_input: bool,
}

/// One connection to the sampling server. Implementations are not assumed
/// safe for concurrent reuse; callers that want parallelism open one
/// client per worker through a [`Connector`].
#[async_trait::async_trait]
pub trait SamplingClient: Send {
    async fn list_structures(&mut self) -> Result<Vec<String>, ClientError>;
    async fn build_structure(&mut self, spec: &BuildSpec) -> Result<(), ClientError>;
    /// Registers a query region with the server and returns the server's
    /// query id for the follow-up [`SamplingClient::query`] call.
    async fn start_query(&mut self, workload: &QueryWorkload) -> Result<i64, ClientError>;
    async fn query(
        &mut self,
        query_id: i64,
        elements_to_return: i32,
    ) -> Result<QueryReply, ClientError>;
    async fn drop_structure(&mut self, structure_name: &str) -> Result<(), ClientError>;
}

/// Factory handing out independent client connections.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn SamplingClient>, ClientError>;
}
