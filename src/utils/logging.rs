//! Logging utilities
//!
//! Standardized log lines for conversion runs, so every entry point reports
//! inputs, outputs and counts the same way.

use std::path::Path;
use std::time::Duration;

use crate::builder::BuildReport;
use crate::config::ConverterConfig;

/// Log the start of a conversion
///
/// # Arguments
/// * `input` - Table being converted
/// * `output` - Artifact that will be written
/// * `config` - Run configuration
pub fn log_conversion_start(input: &Path, output: &Path, config: &ConverterConfig) {
    let year = config
        .year
        .map_or_else(|| "unset".to_string(), |year| year.to_string());
    log::info!(
        "Converting {} -> {} (year {}, {} year policy, {} malformed rows)",
        input.display(),
        output.display(),
        year,
        config.year_policy,
        config.malformed_policy
    );
}

/// Log the completion of a conversion
///
/// # Arguments
/// * `output` - Artifact that was written
/// * `days` - Number of entries in the dataset
/// * `report` - Counters collected while building
/// * `elapsed` - Optional elapsed time
pub fn log_conversion_complete(
    output: &Path,
    days: usize,
    report: &BuildReport,
    elapsed: Option<Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Wrote {} days to {} in {:?} ({})",
            days,
            output.display(),
            duration,
            report
        );
    } else {
        log::info!("Wrote {} days to {} ({})", days, output.display(), report);
    }

    if report.skipped_malformed > 0 {
        log::warn!("{} malformed rows were skipped", report.skipped_malformed);
    }
}
