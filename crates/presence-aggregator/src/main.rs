mod bootstrap;

use anyhow::{bail, Result};
use presence_core::models::AggregationConfig;
use presence_core::settings::Settings;
use presence_data::pipeline;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::debug!("Presence aggregator v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "CSV dir: {}, output dir: {}, max gap: {} min",
        settings.csv_dir.display(),
        settings.out_dir.display(),
        settings.max_gap_minutes
    );

    let config = AggregationConfig::from(&settings);
    let report = pipeline::run(
        &settings.csv_dir,
        &settings.out_dir,
        &config,
        settings.keep_going,
    )?;

    tracing::info!(
        "Wrote {} summaries, {} files failed",
        report.written.len(),
        report.failed.len()
    );

    if report.has_failures() {
        let total = report.written.len() + report.failed.len();
        bail!("{} of {} files failed", report.failed.len(), total);
    }

    Ok(())
}
