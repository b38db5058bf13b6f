use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sampling_bench::client::grpc::GrpcConnector;
use sampling_bench::config::BenchConfig;
use sampling_bench::datagen;
use sampling_bench::logging;
use sampling_bench::orchestrator::Orchestrator;

#[derive(Parser)]
#[command(name = "sampling-bench")]
#[command(about = "Benchmark harness for a remote spatial-sampling index server")]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark phases: list, build, query, delete
    Bench {
        /// Server to connect to
        #[arg(long, default_value = "localhost")]
        server: String,

        /// Port to use when connecting to the server
        #[arg(long, default_value = "40053")]
        port: u16,

        /// Input dataset for the build phase, local to the index server
        #[arg(long, default_value = "")]
        input_file: String,

        /// Number of query trials
        #[arg(long, default_value = "1000")]
        trials: u64,

        /// Name of the test index inserted into the sampling server
        #[arg(long, default_value = "bench_test_index")]
        index_name: String,

        /// Number of concurrent query workers, each with its own connection
        #[arg(long, default_value = "1")]
        workers: usize,

        /// Number of sample elements requested per query
        #[arg(long, default_value = "10000")]
        elements_per_query: i32,

        /// Server-side query lifetime hint (seconds)
        #[arg(long, default_value = "10")]
        ttl: i32,

        /// Request full element data (OID, location, time, payload)
        #[arg(long)]
        request_data: bool,

        /// Skip the list phase
        #[arg(long)]
        skip_list: bool,

        /// Skip the build phase
        #[arg(long)]
        skip_build: bool,

        /// Skip the delete phase
        #[arg(long)]
        skip_delete: bool,

        /// Optional CSV dump of the per-trial series (`-` for stdout)
        #[arg(long)]
        csv: Option<String>,
    },
    /// Generate uniform-random input records for the index server
    Datagen {
        /// Number of records to generate
        #[arg(long, default_value = "100")]
        count: u64,

        /// Output file path (stdout if omitted)
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level)?;

    match cli.command {
        Commands::Bench {
            server,
            port,
            input_file,
            trials,
            index_name,
            workers,
            elements_per_query,
            ttl,
            request_data,
            skip_list,
            skip_build,
            skip_delete,
            csv,
        } => {
            let config = BenchConfig {
                structure_name: index_name,
                input_location: input_file,
                trial_count: trials,
                worker_count: workers,
                elements_per_query,
                request_data,
                suggested_ttl: ttl,
                run_list: !skip_list,
                run_build: !skip_build,
                run_delete: !skip_delete,
                csv,
            };
            let connector = Arc::new(GrpcConnector::new(&server, port));
            Orchestrator::new(config, connector).run().await
        }
        Commands::Datagen { count, output } => {
            match output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(path)?);
                    datagen::write_records(&mut writer, count)?;
                    writer.flush()?;
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut writer = BufWriter::new(stdout.lock());
                    datagen::write_records(&mut writer, count)?;
                    writer.flush()?;
                }
            }
            Ok(())
        }
    }
}
