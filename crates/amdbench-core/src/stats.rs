//! Speedup and efficiency statistics over repeated timing measurements.
//!
//! The sequential run (thread count 1) is the baseline. Its speedup and
//! efficiency are 1.0 by definition, never computed from timing ratios. For
//! every other thread count `t`:
//!
//! - per repetition, `speedup = mean_time(1) / duration` and
//!   `efficiency = speedup / t`;
//! - per aggregate, the speedup follows the selected [`SpeedupPolicy`].
//!
//! Missing measurements are excluded from every mean. A mean over no valid
//! durations is reported as 0.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timing::TimingError;

/// Thread count of the sequential baseline.
pub const BASELINE_THREADS: u32 = 1;

/// Why a repetition has no duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    /// The process ran but its output had no usable timing.
    Timing(TimingError),
    /// The process could not be run.
    Exec(String),
    /// Read back from a results file, where the reason is not kept.
    Unrecorded,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timing(e) => write!(f, "{e}"),
            Self::Exec(detail) => write!(f, "execution failed: {detail}"),
            Self::Unrecorded => f.write_str("missing measurement"),
        }
    }
}

/// Outcome of one repetition.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// Elapsed wall-clock seconds.
    Valid(f64),
    /// No duration could be obtained.
    Missing(MissingReason),
}

impl Measurement {
    /// Duration in seconds, if valid.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Self::Valid(s) => Some(*s),
            Self::Missing(_) => None,
        }
    }

    /// Returns `true` for a missing measurement.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// How the aggregate speedup of a thread count is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedupPolicy {
    /// `mean_time(1) / mean_time(t)`.
    #[default]
    RatioOfMeans,
    /// Mean of the per-repetition speedups.
    MeanOfRatios,
}

impl SpeedupPolicy {
    /// Kebab-case name, as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RatioOfMeans => "ratio-of-means",
            Self::MeanOfRatios => "mean-of-ratios",
        }
    }
}

impl fmt::Display for SpeedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All measurements for one thread count of one test file.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadSeries {
    /// Thread count (1 = sequential baseline).
    pub thread_count: u32,
    /// One entry per repetition, in run order.
    pub measurements: Vec<Measurement>,
}

impl ThreadSeries {
    /// Valid durations, in run order.
    pub fn valid_durations(&self) -> Vec<f64> {
        self.measurements
            .iter()
            .filter_map(Measurement::seconds)
            .collect()
    }

    /// Mean of the valid durations, or 0 when there are none.
    pub fn mean_time(&self) -> f64 {
        mean(&self.valid_durations())
    }
}

/// One persisted row: a single repetition of one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Test file name.
    pub file: String,
    /// Human-readable description of the test file.
    pub description: String,
    /// Thread count.
    pub thread_count: u32,
    /// 1-based repetition index.
    pub repetition: u32,
    /// The measured outcome.
    pub measurement: Measurement,
    /// Per-repetition speedup; `None` when the measurement is missing.
    pub speedup: Option<f64>,
    /// Per-repetition efficiency; `None` when the measurement is missing.
    pub efficiency: Option<f64>,
}

/// Statistics summarising every repetition of one (file, thread count).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRecord {
    /// Test file name.
    pub file: String,
    /// Human-readable description of the test file.
    pub description: String,
    /// Thread count.
    pub thread_count: u32,
    /// Valid durations, in repetition order.
    pub durations: Vec<f64>,
    /// Number of repetitions without a duration.
    pub missing: usize,
    /// Mean of `durations`, 0 when empty.
    pub mean_time: f64,
    /// Aggregate speedup under the chosen policy.
    pub mean_speedup: f64,
    /// Aggregate efficiency under the chosen policy.
    pub mean_efficiency: f64,
}

/// Arithmetic mean, or 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `baseline / value`, or 0 when `value` is not positive.
fn ratio(baseline: f64, value: f64) -> f64 {
    if value > 0.0 { baseline / value } else { 0.0 }
}

/// Speedup and efficiency of a single repetition.
///
/// Returns `(1.0, 1.0)` for the baseline thread count.
pub fn repetition_speedup(baseline_mean: f64, duration: f64, thread_count: u32) -> (f64, f64) {
    if thread_count <= BASELINE_THREADS {
        return (1.0, 1.0);
    }
    let speedup = ratio(baseline_mean, duration);
    (speedup, speedup / f64::from(thread_count))
}

/// Turns the series measured for one file into persisted rows.
///
/// The baseline mean is taken from the series with thread count 1; if none
/// is present it is 0 and every concurrent speedup is 0.
pub fn run_records(file: &str, description: &str, series: &[ThreadSeries]) -> Vec<RunRecord> {
    let baseline_mean = series
        .iter()
        .find(|s| s.thread_count == BASELINE_THREADS)
        .map_or(0.0, ThreadSeries::mean_time);

    let mut records = Vec::new();
    for s in series {
        for (idx, measurement) in s.measurements.iter().enumerate() {
            let (speedup, efficiency) = match measurement.seconds() {
                Some(d) => {
                    let (sp, ef) = repetition_speedup(baseline_mean, d, s.thread_count);
                    (Some(sp), Some(ef))
                }
                None => (None, None),
            };
            records.push(RunRecord {
                file: file.to_owned(),
                description: description.to_owned(),
                thread_count: s.thread_count,
                repetition: u32::try_from(idx + 1).unwrap_or(u32::MAX),
                measurement: measurement.clone(),
                speedup,
                efficiency,
            });
        }
    }
    records
}

/// Groups rows by (file, thread count) and computes aggregate statistics.
///
/// Output is sorted by file name, then thread count ascending.
pub fn aggregate(records: &[RunRecord], policy: SpeedupPolicy) -> Vec<AggregateRecord> {
    let mut groups: BTreeMap<(&str, u32), Vec<&RunRecord>> = BTreeMap::new();
    for r in records {
        groups
            .entry((r.file.as_str(), r.thread_count))
            .or_default()
            .push(r);
    }

    let mut baseline_means: BTreeMap<&str, f64> = BTreeMap::new();
    for ((file, threads), rows) in &groups {
        if *threads == BASELINE_THREADS {
            let durations: Vec<f64> = rows.iter().filter_map(|r| r.measurement.seconds()).collect();
            baseline_means.insert(file, mean(&durations));
        }
    }

    groups
        .into_iter()
        .map(|((file, thread_count), rows)| {
            let durations: Vec<f64> = rows.iter().filter_map(|r| r.measurement.seconds()).collect();
            let missing = rows.len() - durations.len();
            let mean_time = mean(&durations);
            let (mean_speedup, mean_efficiency) = if thread_count <= BASELINE_THREADS {
                (1.0, 1.0)
            } else {
                let speedup = match policy {
                    SpeedupPolicy::RatioOfMeans => ratio(
                        baseline_means.get(file).copied().unwrap_or(0.0),
                        mean_time,
                    ),
                    SpeedupPolicy::MeanOfRatios => {
                        let ratios: Vec<f64> = rows.iter().filter_map(|r| r.speedup).collect();
                        mean(&ratios)
                    }
                };
                (speedup, speedup / f64::from(thread_count))
            };
            AggregateRecord {
                file: file.to_owned(),
                description: rows
                    .first()
                    .map(|r| r.description.clone())
                    .unwrap_or_default(),
                thread_count,
                durations,
                missing,
                mean_time,
                mean_speedup,
                mean_efficiency,
            }
        })
        .collect()
}
