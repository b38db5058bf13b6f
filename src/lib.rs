pub mod client;
pub mod config;
pub mod datagen;
pub mod executor;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod output;
pub mod pool;
pub mod workload;
