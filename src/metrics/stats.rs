//! Per-trial results and the query-phase summary fold.

use std::fmt;
use std::time::Duration;

use hdrhistogram::Histogram;

/// Measurements of one completed query trial. Produced exactly once per
/// trial and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    /// Latency of the StartQuery call.
    pub setup_time: Duration,
    /// Latency of the follow-up Query call.
    pub query_time: Duration,
    /// Server-side estimate of the number of elements matching the region.
    pub result_count_estimate: i64,
    /// Coverage of the query region in degrees-squared, computed from the
    /// workload bounds, not reported by the server.
    pub area: f64,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot summarize an empty result set")]
pub struct EmptyInputError;

/// Summary of one query-benchmark phase. The three series preserve the
/// completion order the pool delivered results in; that order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReport {
    pub structure_name: String,
    pub trial_count: u64,
    pub data_returned: bool,
    /// Sum of every recorded setup and query latency. Deliberately not the
    /// wall-clock span of the pool, so the cost accounting is independent
    /// of how many workers ran.
    pub total_time: Duration,
    pub setup_times: Vec<Duration>,
    pub min_setup_time: Duration,
    pub max_setup_time: Duration,
    pub query_times: Vec<Duration>,
    pub min_query_time: Duration,
    pub max_query_time: Duration,
    pub areas: Vec<f64>,
    pub min_area: f64,
    pub max_area: f64,
}

/// Pure fold of the per-trial results into a [`PhaseReport`]. No result is
/// dropped, reordered, or filtered.
pub fn summarize(
    results: &[TrialResult],
    structure_name: &str,
    trial_count: u64,
    data_returned: bool,
) -> Result<PhaseReport, EmptyInputError> {
    if results.is_empty() {
        return Err(EmptyInputError);
    }
    debug_assert_eq!(results.len() as u64, trial_count);

    let setup_times: Vec<Duration> = results.iter().map(|r| r.setup_time).collect();
    let query_times: Vec<Duration> = results.iter().map(|r| r.query_time).collect();
    let areas: Vec<f64> = results.iter().map(|r| r.area).collect();

    let (min_setup_time, max_setup_time) = duration_extremes(&setup_times);
    let (min_query_time, max_query_time) = duration_extremes(&query_times);
    let (min_area, max_area) = area_extremes(&areas);

    let total_time = setup_times.iter().sum::<Duration>() + query_times.iter().sum::<Duration>();

    Ok(PhaseReport {
        structure_name: structure_name.to_string(),
        trial_count,
        data_returned,
        total_time,
        setup_times,
        min_setup_time,
        max_setup_time,
        query_times,
        min_query_time,
        max_query_time,
        areas,
        min_area,
        max_area,
    })
}

fn duration_extremes(series: &[Duration]) -> (Duration, Duration) {
    let mut min = series[0];
    let mut max = series[0];
    for &v in series {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

fn area_extremes(series: &[f64]) -> (f64, f64) {
    let mut min = series[0];
    let mut max = series[0];
    for &v in series {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

/// Histogram-backed latency percentiles for the rendered report.
pub struct LatencySummary {
    hist: Histogram<u64>,
}

impl LatencySummary {
    // 1ns to 60s range, 3 significant digits
    const MAX_NANOS: u64 = 60_000_000_000;

    pub fn of(series: &[Duration]) -> Self {
        let mut hist = Histogram::new_with_bounds(1, Self::MAX_NANOS, 3).unwrap();
        for d in series {
            let nanos = (d.as_nanos().min(u128::from(Self::MAX_NANOS)) as u64).max(1);
            let _ = hist.record(nanos);
        }
        Self { hist }
    }

    pub fn p50(&self) -> Duration {
        Duration::from_nanos(self.hist.value_at_quantile(0.5))
    }

    pub fn p95(&self) -> Duration {
        Duration::from_nanos(self.hist.value_at_quantile(0.95))
    }

    pub fn p99(&self) -> Duration {
        Duration::from_nanos(self.hist.value_at_quantile(0.99))
    }
}

pub fn fmt_duration(d: Duration) -> String {
    if d >= Duration::from_secs(1) {
        format!("{:.3}s", d.as_secs_f64())
    } else if d >= Duration::from_millis(1) {
        format!("{:.3}ms", d.as_secs_f64() * 1e3)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1e6)
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query_percentiles = LatencySummary::of(&self.query_times);
        writeln!(f, "query benchmark results")?;
        writeln!(f, "  index:         {}", self.structure_name)?;
        writeln!(f, "  trials:        {}", self.trial_count)?;
        writeln!(f, "  data returned: {}", self.data_returned)?;
        writeln!(f, "  total time:    {}", fmt_duration(self.total_time))?;
        writeln!(
            f,
            "  setup time:    min {}  max {}",
            fmt_duration(self.min_setup_time),
            fmt_duration(self.max_setup_time)
        )?;
        writeln!(
            f,
            "  query time:    min {}  max {}  p50 {}  p95 {}  p99 {}",
            fmt_duration(self.min_query_time),
            fmt_duration(self.max_query_time),
            fmt_duration(query_percentiles.p50()),
            fmt_duration(query_percentiles.p95()),
            fmt_duration(query_percentiles.p99())
        )?;
        write!(
            f,
            "  query area:    min {:.4}  max {:.4}",
            self.min_area, self.max_area
        )
    }
}
