//! JSON output for file summaries.

use std::path::{Path, PathBuf};

use presence_core::error::{PresenceError, Result};
use presence_core::models::FileSummary;

/// Output path for `csv_path`: `<out_dir>/<stem>.json`.
pub fn output_path_for(csv_path: &Path, out_dir: &Path) -> PathBuf {
    let stem = csv_path.file_stem().unwrap_or(csv_path.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".json");
    out_dir.join(name)
}

/// Pretty-print `summary` with two-space indentation and literal UTF-8.
pub fn render_summary(summary: &FileSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Atomically write `summary` to `path`, creating parent directories if
/// needed.
pub fn write_summary(summary: &FileSummary, path: &Path) -> Result<()> {
    let write_error = |source: std::io::Error| PresenceError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let json = render_summary(summary)?;

    // Write to a temp file then rename for atomicity.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(write_error)?;
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_error(source));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_core::models::{DayRecord, METRIC_NAME};
    use tempfile::TempDir;

    fn sample_summary(site: Option<&str>) -> FileSummary {
        FileSummary {
            source_csv: "site-a.csv".to_string(),
            site: site.map(str::to_string),
            year: Some(2024),
            month: Some(1),
            bucket_minutes: None,
            metric: METRIC_NAME.to_string(),
            presence_value: 1,
            max_gap_minutes: 1,
            total_presence_minutes: 4,
            total_call_events: 2,
            series: vec![DayRecord {
                t: "2024-01-01".to_string(),
                presence_minutes: 4,
                call_events: 2,
            }],
        }
    }

    // ── output_path_for ───────────────────────────────────────────────────────

    #[test]
    fn test_output_path_uses_stem() {
        let out = output_path_for(Path::new("/in/site-a.csv"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/site-a.json"));
    }

    #[test]
    fn test_output_path_keeps_inner_dots() {
        let out = output_path_for(Path::new("/in/site.2024-01.csv"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/site.2024-01.json"));
    }

    // ── render_summary ────────────────────────────────────────────────────────

    #[test]
    fn test_render_layout() {
        let json = render_summary(&sample_summary(None)).unwrap();
        let expected = r#"{
  "sourceCsv": "site-a.csv",
  "site": null,
  "year": 2024,
  "month": 1,
  "bucketMinutes": null,
  "metric": "calls_daily",
  "presenceValue": 1,
  "maxGapMinutes": 1,
  "totalPresenceMinutes": 4,
  "totalCallEvents": 2,
  "series": [
    {
      "t": "2024-01-01",
      "presenceMinutes": 4,
      "callEvents": 2
    }
  ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_render_empty_series() {
        let mut summary = sample_summary(None);
        summary.series.clear();
        let json = render_summary(&summary).unwrap();
        assert!(json.contains("\"series\": []"));
    }

    #[test]
    fn test_render_non_ascii_literal() {
        let json = render_summary(&sample_summary(Some("Grüner Weg"))).unwrap();
        assert!(json.contains("\"site\": \"Grüner Weg\""));
        assert!(!json.contains("\\u"));
    }

    // ── write_summary ─────────────────────────────────────────────────────────

    #[test]
    fn test_write_creates_parents_and_leaves_no_tmp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("public").join("data").join("json").join("site-a.json");

        write_summary(&sample_summary(Some("Nord")), &path).unwrap();

        assert!(path.is_file());
        assert!(!path.with_extension("json.tmp").exists());
        let back: FileSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample_summary(Some("Nord")));
    }

    #[test]
    fn test_write_failed_rename_removes_tmp() {
        let tmp = TempDir::new().unwrap();
        // A non-empty directory in the way makes the rename fail.
        let path = tmp.path().join("site-a.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let err = write_summary(&sample_summary(None), &path).unwrap_err();

        assert!(matches!(err, PresenceError::FileWrite { .. }));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_write_overwrites_existing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site-a.json");
        std::fs::write(&path, "stale").unwrap();

        write_summary(&sample_summary(None), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('{'));
    }
}
