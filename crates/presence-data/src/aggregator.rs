//! Daily presence aggregation.
//!
//! Turns the per-day minute buckets of a [`PresenceLog`] into the
//! [`FileSummary`] document.

use presence_core::events::CallEventDetector;
use presence_core::models::{AggregationConfig, DayRecord, FileSummary, METRIC_NAME};

use crate::reader::PresenceLog;

// ── Totals ────────────────────────────────────────────────────────────────────

/// File-level totals across all days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub presence_minutes: u64,
    pub call_events: u64,
}

// ── DailyAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that builds daily call statistics.
pub struct DailyAggregator;

impl DailyAggregator {
    /// Aggregate each day bucket of `log`.
    ///
    /// Returns records sorted by day key (ascending).
    pub fn aggregate_daily(log: &PresenceLog, config: &AggregationConfig) -> Vec<DayRecord> {
        let detector = CallEventDetector::new(config.max_gap_minutes);

        // BTreeMap iteration is already in key order.
        log.minutes_by_day
            .iter()
            .map(|(day, minutes)| {
                let mut minutes = minutes.clone();
                let counts = detector.summarize_day(&mut minutes);
                DayRecord {
                    t: day.clone(),
                    presence_minutes: counts.presence_minutes,
                    call_events: counts.call_events,
                }
            })
            .collect()
    }

    /// Sum up the counts of all days.
    pub fn calculate_totals(series: &[DayRecord]) -> Totals {
        let mut totals = Totals::default();
        for day in series {
            totals.presence_minutes += day.presence_minutes;
            totals.call_events += day.call_events;
        }
        totals
    }

    /// Build the complete summary document for one file.
    pub fn summarize(log: &PresenceLog, config: &AggregationConfig) -> FileSummary {
        let series = Self::aggregate_daily(log, config);
        let totals = Self::calculate_totals(&series);

        FileSummary {
            source_csv: log.source_name.clone(),
            site: log.site.clone(),
            year: log.year,
            month: log.month,
            bucket_minutes: None,
            metric: METRIC_NAME.to_string(),
            presence_value: config.presence_value,
            max_gap_minutes: config.max_gap_minutes,
            total_presence_minutes: totals.presence_minutes,
            total_call_events: totals.call_events,
            series,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
