use serde::{Deserialize, Serialize};

/// Metric name written into every summary document.
pub const METRIC_NAME: &str = "calls_daily";

/// Presence flag value that marks a minute as "present".
pub const PRESENCE_VALUE: i64 = 1;

/// Default gap tolerance: consecutive presence minutes at most this far apart
/// belong to the same call event.
pub const DEFAULT_MAX_GAP_MINUTES: i64 = 1;

/// Parameters of one aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Only rows whose `presence` equals this value contribute.
    pub presence_value: i64,
    /// Gap tolerance used by call-event detection.
    pub max_gap_minutes: i64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            presence_value: PRESENCE_VALUE,
            max_gap_minutes: DEFAULT_MAX_GAP_MINUTES,
        }
    }
}

/// Minute-of-day index (`0..=1439` for well-formed input).
///
/// Returns `None` when `hour * 60 + minute` does not fit in an `i64`.
pub fn minute_of_day(hour: i64, minute: i64) -> Option<i64> {
    hour.checked_mul(60)?.checked_add(minute)
}

/// Zero-padded ISO day key, e.g. `"2024-01-05"`.
///
/// The fields are formatted as given; no calendar validation happens here.
pub fn day_key(year: i64, month: i64, day: i64) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// One entry of the per-day series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Day key in `YYYY-MM-DD` form.
    pub t: String,
    /// Distinct minutes with presence on this day.
    pub presence_minutes: u64,
    /// Gap-tolerant runs of presence minutes on this day.
    pub call_events: u64,
}

/// The JSON document written for one input CSV file.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// File name of the source CSV (no directory).
    pub source_csv: String,
    pub site: Option<String>,
    /// `None` only when the file had no data rows.
    pub year: Option<i64>,
    pub month: Option<i64>,
    /// Reserved; always `null`.
    pub bucket_minutes: Option<u32>,
    pub metric: String,
    pub presence_value: i64,
    pub max_gap_minutes: i64,
    pub total_presence_minutes: u64,
    pub total_call_events: u64,
    /// Ascending by `t`.
    pub series: Vec<DayRecord>,
}
