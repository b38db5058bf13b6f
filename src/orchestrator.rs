//! Sequencing of the four benchmark phases: list, build, query, delete.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use crate::client::{BuildSpec, Connector};
use crate::config::BenchConfig;
use crate::metrics::stats::{PhaseReport, fmt_duration, summarize};
use crate::output::OutputWriter;
use crate::pool::{QueryBenchConfig, run_benchmark};

pub struct ListReport {
    pub elapsed: Duration,
    pub structure_names: Vec<String>,
}

impl fmt::Display for ListReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "list results")?;
        writeln!(f, "  elapsed:     {}", fmt_duration(self.elapsed))?;
        writeln!(f, "  index count: {}", self.structure_names.len())?;
        write!(f, "  index names: {}", self.structure_names.join(", "))
    }
}

pub struct BuildReport {
    pub elapsed: Duration,
    pub structure_name: String,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "build results")?;
        writeln!(f, "  elapsed: {}", fmt_duration(self.elapsed))?;
        write!(f, "  index:   {}", self.structure_name)
    }
}

pub struct DropReport {
    pub elapsed: Duration,
    pub structure_name: String,
}

impl fmt::Display for DropReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "delete results")?;
        writeln!(f, "  elapsed: {}", fmt_duration(self.elapsed))?;
        write!(f, "  index:   {}", self.structure_name)
    }
}

/// Drives the phases in the fixed order list, build, query, delete.
/// The list, build and delete phases are each independently skippable;
/// any phase failure aborts the whole run.
pub struct Orchestrator {
    config: BenchConfig,
    connector: Arc<dyn Connector>,
}

impl Orchestrator {
    pub fn new(config: BenchConfig, connector: Arc<dyn Connector>) -> Self {
        Self { config, connector }
    }

    /// Runs every enabled phase in order, printing each report.
    pub async fn run(&self) -> Result<()> {
        if self.config.run_list {
            let report = self.run_list().await?;
            println!("{report}\n");
        }
        if self.config.run_build {
            let report = self.run_build().await?;
            println!("{report}\n");
        }
        let report = self.run_query_benchmark().await?;
        println!("{report}\n");
        if self.config.run_delete {
            let report = self.run_drop().await?;
            println!("{report}");
        }
        Ok(())
    }

    /// Single ListSamplingStructure call, timed as wall-clock around it.
    pub async fn run_list(&self) -> Result<ListReport> {
        info!("listing existing structures");
        let mut client = self.connector.connect().await?;
        let start = Instant::now();
        let structure_names = client.list_structures().await?;
        Ok(ListReport {
            elapsed: start.elapsed(),
            structure_names,
        })
    }

    /// Single BuildStructure call. `force` is always set so an existing
    /// index of the same name is replaced.
    pub async fn run_build(&self) -> Result<BuildReport> {
        info!(structure = %self.config.structure_name, "building structure");
        let mut client = self.connector.connect().await?;
        let spec = BuildSpec {
            name: self.config.structure_name.clone(),
            force: true,
            input_location: self.config.input_location.clone(),
            remove_input: false,
        };
        let start = Instant::now();
        client.build_structure(&spec).await?;
        Ok(BuildReport {
            elapsed: start.elapsed(),
            structure_name: self.config.structure_name.clone(),
        })
    }

    /// The query-benchmark phase: worker pool plus the summary fold.
    pub async fn run_query_benchmark(&self) -> Result<PhaseReport> {
        let pool_config = QueryBenchConfig {
            worker_count: self.config.worker_count,
            trial_count: self.config.trial_count,
            structure_name: self.config.structure_name.clone(),
            request_data: self.config.request_data,
            elements_per_query: self.config.elements_per_query,
            suggested_ttl: self.config.suggested_ttl,
        };
        let results = run_benchmark(Arc::clone(&self.connector), &pool_config).await?;

        if let Some(path) = &self.config.csv {
            let mut writer = OutputWriter::create(path).await?;
            for (index, trial) in results.iter().enumerate() {
                writer.write_trial(index, trial).await?;
            }
            writer.finish().await?;
        }

        summarize(
            &results,
            &self.config.structure_name,
            self.config.trial_count,
            self.config.request_data,
        )
        .context("no trials to summarize")
    }

    /// Single DropStructure call removing the benchmark index.
    pub async fn run_drop(&self) -> Result<DropReport> {
        info!(structure = %self.config.structure_name, "dropping structure");
        let mut client = self.connector.connect().await?;
        let start = Instant::now();
        client.drop_structure(&self.config.structure_name).await?;
        Ok(DropReport {
            elapsed: start.elapsed(),
            structure_name: self.config.structure_name.clone(),
        })
    }
}
