//! Top-level run: discover CSV files, aggregate each one and write its
//! summary.

use std::path::{Path, PathBuf};

use presence_core::error::{PresenceError, Result};
use presence_core::models::AggregationConfig;
use tracing::{debug, error, info};

use crate::aggregator::DailyAggregator;
use crate::reader::{find_csv_files, read_presence_file};
use crate::writer::{output_path_for, write_summary};

// ── Public types ──────────────────────────────────────────────────────────────

/// Outcome of [`run`].
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Summaries written, in processing order.
    pub written: Vec<PathBuf>,
    /// Input files that failed, with the error message. Only populated when
    /// `keep_going` is set.
    pub failed: Vec<(PathBuf, String)>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Aggregate one CSV file and write `<out_dir>/<stem>.json`.
///
/// Nothing is written unless the whole file was read successfully.
pub fn process_file(
    csv_path: &Path,
    out_dir: &Path,
    config: &AggregationConfig,
) -> Result<PathBuf> {
    let log = read_presence_file(csv_path, config.presence_value)?;
    let summary = DailyAggregator::summarize(&log, config);

    let out_path = output_path_for(csv_path, out_dir);
    write_summary(&summary, &out_path)?;

    debug!(
        "{}: {} days, {} presence minutes, {} call events",
        summary.source_csv,
        summary.series.len(),
        summary.total_presence_minutes,
        summary.total_call_events,
    );

    Ok(out_path)
}

/// Process every `.csv` file in `csv_dir`.
///
/// `out_dir` is created up front, even when there is nothing to process.
/// Without `keep_going` the first failing file aborts the run; with it, the
/// failure is recorded in the report and the next file is processed.
pub fn run(
    csv_dir: &Path,
    out_dir: &Path,
    config: &AggregationConfig,
    keep_going: bool,
) -> Result<RunReport> {
    std::fs::create_dir_all(out_dir).map_err(|source| PresenceError::FileWrite {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let files = find_csv_files(csv_dir);
    debug!("Found {} CSV files in {}", files.len(), csv_dir.display());

    let mut report = RunReport::default();

    for csv_path in files {
        match process_file(&csv_path, out_dir, config) {
            Ok(out_path) => {
                info!("wrote {}", out_path.display());
                report.written.push(out_path);
            }
            Err(e) if keep_going => {
                error!("Skipping {}: {}", csv_path.display(), e);
                report.failed.push((csv_path, e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
