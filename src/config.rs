/// Defines one full benchmark run against a sampling server.
///
/// The connection endpoint lives in the [`crate::client::Connector`] handed
/// to the orchestrator, not here, so tests can swap in a mock service
/// without touching the run configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Name of the index the run builds, queries and drops.
    pub structure_name: String,
    /// Path to the input dataset, local to the index server.
    pub input_location: String,
    /// Number of query trials in the query-benchmark phase.
    pub trial_count: u64,
    /// Number of concurrent query workers. Must be at least 1.
    pub worker_count: usize,
    /// Batch size for every Query call.
    pub elements_per_query: i32,
    /// Ask the server to return OIDs, locations, timestamps and payloads.
    pub request_data: bool,
    /// Server-side query lifetime hint, in seconds.
    pub suggested_ttl: i32,
    pub run_list: bool,
    pub run_build: bool,
    pub run_delete: bool,
    /// When set, the per-trial series are dumped as CSV rows to this path
    /// (`-` for stdout).
    pub csv: Option<String>,
}
