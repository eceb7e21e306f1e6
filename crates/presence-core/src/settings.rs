use clap::Parser;
use std::path::PathBuf;

use crate::models::{AggregationConfig, DEFAULT_MAX_GAP_MINUTES, PRESENCE_VALUE};

/// Default directory scanned for presence CSV files.
pub const DEFAULT_CSV_DIR: &str = "public/data/csv";

/// Default directory the JSON summaries are written to.
pub const DEFAULT_OUT_DIR: &str = "public/data/json";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Aggregate minute-level presence CSV logs into daily call statistics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "presence-aggregator",
    about = "Aggregate minute-level presence CSV logs into daily call statistics",
    version
)]
pub struct Settings {
    /// Directory containing the presence CSV files
    #[arg(long, default_value = DEFAULT_CSV_DIR)]
    pub csv_dir: PathBuf,

    /// Directory the JSON summaries are written to (created if missing)
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Largest gap in minutes that still counts as the same call event (0-1440)
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_GAP_MINUTES,
        value_parser = clap::value_parser!(i64).range(0..=1440)
    )]
    pub max_gap_minutes: i64,

    /// Continue with the remaining files when one file fails
    #[arg(long)]
    pub keep_going: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for AggregationConfig {
    fn from(s: &Settings) -> Self {
        AggregationConfig {
            presence_value: PRESENCE_VALUE,
            max_gap_minutes: s.max_gap_minutes,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
