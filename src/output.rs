use anyhow::Result;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::metrics::stats::TrialResult;

const CSV_HEADER: &str = "trial,setup_time_s,query_time_s,result_count_estimate,area";

/// Optional per-trial dump of the query-benchmark series. A path of `-`
/// writes to stdout.
pub enum OutputWriter {
    Csv(BufWriter<File>),
    Stdout,
}

impl OutputWriter {
    pub async fn create(path: &str) -> Result<Self> {
        if path == "-" {
            return Ok(Self::Stdout);
        }
        // Ensure parent directory exists
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.ok();
            }
        }
        let file = File::create(path).await?;
        let mut writer = BufWriter::new(file);
        writer.write_all(CSV_HEADER.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        Ok(Self::Csv(writer))
    }

    pub async fn write_trial(&mut self, index: usize, trial: &TrialResult) -> Result<()> {
        let row = format!(
            "{},{:.9},{:.9},{},{}",
            index,
            trial.setup_time.as_secs_f64(),
            trial.query_time.as_secs_f64(),
            trial.result_count_estimate,
            trial.area
        );
        match self {
            Self::Csv(writer) => {
                writer.write_all(row.as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }
            Self::Stdout => {
                println!("{row}");
            }
        }
        Ok(())
    }

    pub async fn finish(self) -> Result<()> {
        if let Self::Csv(mut writer) = self {
            writer.flush().await?;
        }
        Ok(())
    }
}
