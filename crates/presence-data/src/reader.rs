//! CSV file discovery and loading for the presence aggregator.
//!
//! Reads minute-level presence logs and folds the rows that carry the
//! presence sentinel into per-day minute buckets ([`PresenceLog`]).

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use presence_core::error::{PresenceError, Result};
use presence_core::models::{day_key, minute_of_day};
use tracing::{debug, warn};

// ── PresenceLog ───────────────────────────────────────────────────────────────

/// Everything the aggregator needs from one CSV file.
#[derive(Debug, Clone, Default)]
pub struct PresenceLog {
    /// File name of the source CSV.
    pub source_name: String,
    /// Site of the first data row; empty strings become `None`.
    pub site: Option<String>,
    /// Year of the first data row.
    pub year: Option<i64>,
    /// Month of the first data row.
    pub month: Option<i64>,
    /// Day key → minute indices with presence, in input order (may repeat).
    pub minutes_by_day: BTreeMap<String, Vec<i64>>,
    /// Data rows seen.
    pub rows_read: u64,
    /// Rows dropped because `presence` was not an integer.
    pub rows_skipped: u64,
    /// Rows whose presence matched the sentinel.
    pub rows_matched: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find the `.csv` files directly inside `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn find_csv_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("CSV directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Open `path` and read it with [`read_presence`].
pub fn read_presence_file(path: &Path, presence_value: i64) -> Result<PresenceLog> {
    let file = std::fs::File::open(path).map_err(|source| PresenceError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_presence(file, path, presence_value)
}

/// Read a presence CSV from `input`.
///
/// `path` is used for the source name and error messages only.
///
/// Rows with a non-integer (or missing) `presence` are skipped. On rows whose
/// presence equals `presence_value`, `year`, `month`, `day`, `hour` and
/// `minute` must all be integers, otherwise the whole read fails.
pub fn read_presence<R: Read>(input: R, path: &Path, presence_value: i64) -> Result<PresenceLog> {
    let csv_error = |source: csv::Error| PresenceError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = build_header_map(&headers);

    let mut log = PresenceLog {
        source_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ..PresenceLog::default()
    };

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let row = Row {
            record: &record,
            columns: &columns,
            path,
            // Header is line 1.
            line: record.position().map_or(idx as u64 + 2, |p| p.line()),
        };
        log.rows_read += 1;

        if log.rows_read == 1 {
            log.site = row.get("site").filter(|s| !s.is_empty()).map(str::to_string);
            log.year = Some(row.int("year")?);
            log.month = Some(row.int("month")?);
        }

        let Some(presence) = row.presence() else {
            log.rows_skipped += 1;
            continue;
        };
        if presence != presence_value {
            continue;
        }

        let key = day_key(row.int("year")?, row.int("month")?, row.int("day")?);
        let hour = row.int("hour")?;
        let minute = minute_of_day(hour, row.int("minute")?).ok_or_else(|| {
            // Blame the field that pushed the index out of range.
            let column = if hour.checked_mul(60).is_none() { "hour" } else { "minute" };
            row.invalid_field(column)
        })?;
        log.minutes_by_day.entry(key).or_default().push(minute);
        log.rows_matched += 1;
    }

    debug!(
        "File {}: {} read, {} skipped, {} matched, {} days",
        path.display(),
        log.rows_read,
        log.rows_skipped,
        log.rows_matched,
        log.minutes_by_day.len(),
    );

    Ok(log)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

/// Trim and drop a leading UTF-8 BOM so spreadsheet exports still match.
fn normalize_header_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}

/// Named access to the fields of one record.
struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<String, usize>,
    path: &'a Path,
    line: u64,
}

impl<'a> Row<'a> {
    /// Raw field value; `None` when the column or the field is absent.
    fn get(&self, name: &str) -> Option<&'a str> {
        let idx = *self.columns.get(name)?;
        self.record.get(idx)
    }

    /// Lenient presence parse: any failure reads as "no value".
    fn presence(&self) -> Option<i64> {
        self.get("presence")?.trim().parse().ok()
    }

    /// Strict integer parse of a required field.
    fn int(&self, name: &str) -> Result<i64> {
        let value = self.get(name).ok_or_else(|| PresenceError::MissingColumn {
            path: self.path.to_path_buf(),
            line: self.line,
            column: name.to_string(),
        })?;
        value.trim().parse().map_err(|_| self.invalid_field(name))
    }

    fn invalid_field(&self, name: &str) -> PresenceError {
        PresenceError::InvalidField {
            path: self.path.to_path_buf(),
            line: self.line,
            column: name.to_string(),
            value: self.get(name).unwrap_or_default().to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
