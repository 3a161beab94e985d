use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use nearmiss_core::{OracleKind, ProfileConfig, ScanMode, determine_k};
use nearmiss_io::{ColumnSelector, ExperimentName, ResultWriter, ScanMetadata, SeriesReader};

#[derive(Parser)]
#[command(name = "nearmiss")]
#[command(about = "Near-miss detection: scan long time series for warped, rescaled occurrences of a query")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Build a distance profile of a query against a series
    Scan {
        /// CSV file holding the long series
        #[arg(long)]
        series: PathBuf,

        /// CSV file holding the query pattern
        #[arg(long)]
        query: PathBuf,

        /// Series column name (defaults to the first column)
        #[arg(long)]
        series_column: Option<String>,

        /// Query column name (defaults to the first column)
        #[arg(long)]
        query_column: Option<String>,

        /// Candidate generation: "fixed" or "variable"
        #[arg(long, default_value = "fixed")]
        mode: String,

        /// Warping radius (fixed mode only)
        #[arg(long, default_value_t = 3)]
        radius: usize,

        /// Variable-length half-width as a fraction of the query length
        #[arg(long, default_value_t = 0.5)]
        window_fraction: f64,

        /// Alignment oracle: "fast" (FastDTW) or "banded" (exact Sakoe-Chiba DTW)
        #[arg(long, default_value = "fast")]
        oracle: String,

        /// Flag positions scoring at or below this value
        #[arg(long)]
        threshold: Option<f64>,

        /// Experiment name for the JSON artifact (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: Option<String>,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Print the anchor stride chosen for a series and query length
    Stride {
        /// Series length
        #[arg(long)]
        n: usize,

        /// Query length
        #[arg(long)]
        m: usize,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ScanOutput {
    experiment: Option<String>,
    mode: &'static str,
    oracle: &'static str,
    n: usize,
    m: usize,
    stride: usize,
    profile_len: usize,
    computed: usize,
    best_position: Option<usize>,
    best_anchor: Option<usize>,
    best_score: Option<f64>,
    n_flagged: Option<usize>,
    artifact: Option<PathBuf>,
}

#[derive(Serialize)]
struct StrideOutput {
    n: usize,
    m: usize,
    stride: usize,
    profile_len: usize,
    anchors: usize,
}

fn parse_mode(s: &str) -> Result<ScanMode> {
    s.parse::<ScanMode>().map_err(anyhow::Error::msg)
}

fn parse_oracle(s: &str) -> Result<OracleKind> {
    s.parse::<OracleKind>().map_err(anyhow::Error::msg)
}

fn load_series(path: &Path, column: Option<String>, what: &str) -> Result<Vec<f64>> {
    let loaded = SeriesReader::new(path)
        .with_column(ColumnSelector::from_option(column))
        .read()
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    Ok(loaded.values)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Scan {
            series,
            query,
            series_column,
            query_column,
            mode,
            radius,
            window_fraction,
            oracle,
            threshold,
            experiment,
            output_dir,
        } => {
            let mode = parse_mode(&mode)?;
            let oracle = parse_oracle(&oracle)?;
            let experiment = experiment
                .map(ExperimentName::new)
                .transpose()
                .context("invalid experiment name")?;

            let series = load_series(&series, series_column, "series")?;
            let query = load_series(&query, query_column, "query")?;

            let config = ProfileConfig::new()
                .with_mode(mode)
                .with_radius(radius)
                .with_length_window_fraction(window_fraction);
            info!(n = series.len(), m = query.len(), %mode, %oracle, radius, "scanning");
            let profile = config
                .compute(&series, &query, &oracle)
                .context("near-miss scan failed")?;

            let artifact = match &experiment {
                Some(name) => {
                    let writer = ResultWriter::new(&output_dir, name.clone())
                        .context("failed to prepare output directory")?;
                    let meta = ScanMetadata {
                        mode,
                        oracle,
                        radius,
                        n: series.len(),
                        m: query.len(),
                    };
                    Some(
                        writer
                            .write_profile(&meta, &profile, threshold)
                            .context("failed to write profile")?,
                    )
                }
                None => None,
            };

            let best = profile.best();
            let output = ScanOutput {
                experiment: experiment.map(|e| e.as_str().to_string()),
                mode: mode.as_str(),
                oracle: oracle.as_str(),
                n: series.len(),
                m: query.len(),
                stride: profile.stride(),
                profile_len: profile.len(),
                computed: profile.computed(),
                best_position: best.map(|(i, _)| i),
                best_anchor: best.map(|(i, _)| i * profile.stride()),
                best_score: best.map(|(_, s)| s),
                n_flagged: threshold.map(|t| profile.positions_below(t).len()),
                artifact,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Stride { n, m } => {
            let stride = determine_k(n, m).context("invalid lengths")?;
            let profile_len = (n + 1).saturating_sub(m);
            let output = StrideOutput {
                n,
                m,
                stride,
                profile_len,
                anchors: profile_len.div_ceil(stride),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
