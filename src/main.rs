use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::{info, warn};

use activity_log::utils::year_from_path;
use activity_log::{
    ConverterConfig, Converter, Dataset, MalformedRowPolicy, Taxonomy, Timestamp, YearPolicy,
    builtin_registry, read_dataset,
};

#[derive(Parser)]
#[command(
    name = "activity-log",
    version,
    about = "Normalize activity logs into a day -> activity code dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a `date,label` table into a JSON dataset.
    Convert {
        /// Table to convert.
        #[arg(long, short)]
        input: PathBuf,

        /// Where to write the dataset.
        #[arg(long, short, default_value = "data.json")]
        output: PathBuf,

        /// Taxonomy year. Defaults to ACTIVITY_LOG_YEAR, then to a year in the input file name.
        #[arg(long)]
        year: Option<i32>,

        /// How to pick a taxonomy for a year without its own table (exact, carry-forward, nearest).
        #[arg(long)]
        year_policy: Option<YearPolicy>,

        /// Stop at the first malformed row instead of skipping it.
        #[arg(long)]
        abort_on_malformed: bool,
    },

    /// Show per-activity day counts for a written dataset.
    Summary {
        /// Dataset to summarize.
        #[arg(long, short, default_value = "data.json")]
        input: PathBuf,

        /// Taxonomy year used to name the codes.
        #[arg(long)]
        year: Option<i32>,
    },

    /// List the built-in taxonomies.
    Taxonomies,
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            year,
            year_policy,
            abort_on_malformed,
        } => convert(&input, &output, year, year_policy, abort_on_malformed),
        Commands::Summary { input, year } => summary(&input, year),
        Commands::Taxonomies => taxonomies(),
    }
}

fn convert(
    input: &Path,
    output: &Path,
    year: Option<i32>,
    year_policy: Option<YearPolicy>,
    abort_on_malformed: bool,
) -> Result<()> {
    let mut config = ConverterConfig::from_env();

    if let Some(year) = year {
        config.year = Some(year);
    }
    if config.year.is_none() {
        config.year = year_from_path(input);
        if let Some(year) = config.year {
            info!("Using taxonomy year {year} from file name {}", input.display());
        }
    }
    if let Some(policy) = year_policy {
        config.year_policy = policy;
    }
    if abort_on_malformed {
        config.malformed_policy = MalformedRowPolicy::Abort;
    }

    let registry = builtin_registry().context("Built-in taxonomies are invalid")?;
    let converter = Converter::new(&registry, config).context("Failed to select a taxonomy")?;

    let (dataset, report) = converter
        .convert_file(input, output)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!("{} days written to {}", dataset.len(), output.display());
    println!("{report}");
    Ok(())
}

fn summary(input: &Path, year: Option<i32>) -> Result<()> {
    let dataset =
        read_dataset(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let registry = builtin_registry().context("Built-in taxonomies are invalid")?;
    let year = year.or_else(|| dataset.span().and_then(|(first, _)| local_year(first)));
    let taxonomy = match registry.select(year, YearPolicy::CarryForward) {
        Ok(taxonomy) => Some(taxonomy),
        Err(e) => {
            warn!("Codes will not be named: {e}");
            None
        }
    };

    print_summary(&dataset, taxonomy);
    Ok(())
}

fn print_summary(dataset: &Dataset, taxonomy: Option<&Taxonomy>) {
    if let Some((first, last)) = dataset.span() {
        println!(
            "{} days from {} to {}",
            dataset.len(),
            format_day(first),
            format_day(last)
        );
    } else {
        println!("Dataset is empty");
        return;
    }

    for (code, days) in dataset.category_counts() {
        let labels = taxonomy
            .map(|t| t.labels_for(code).join("/"))
            .filter(|labels| !labels.is_empty())
            .unwrap_or_else(|| "?".to_string());
        println!("  {code} {labels:<12} {days}");
    }
}

fn taxonomies() -> Result<()> {
    let registry = builtin_registry().context("Built-in taxonomies are invalid")?;
    for (span, taxonomy) in registry.iter() {
        let entries = taxonomy
            .entries()
            .into_iter()
            .map(|(label, code)| format!("{label}={code}"))
            .join(" ");
        println!("{span}: {entries} (fallback: {})", taxonomy.fallback());
    }
    Ok(())
}

fn local_day(timestamp: Timestamp) -> Option<chrono::NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&Local).date_naive())
}

fn local_year(timestamp: Timestamp) -> Option<i32> {
    use chrono::Datelike;
    local_day(timestamp).map(|day| day.year())
}

fn format_day(timestamp: Timestamp) -> String {
    local_day(timestamp).map_or_else(
        || timestamp.to_string(),
        |day| day.format("%Y/%m/%d").to_string(),
    )
}
