//! FactorLab CLI: factor computation and catalogue runs.
//!
//! Commands:
//! - `factors`: compute the factor-augmented panel from a raw CSV panel
//! - `run`: execute the strategy catalogue and persist run artifacts

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use factorlab_core::factors::compute_factors;
use factorlab_runner::{
    default_catalogue, export_factors_csv, load_panel, save_run_artifacts, RunConfig,
};

#[derive(Parser)]
#[command(
    name = "factorlab",
    about = "Cross-sectional factor backtesting over daily stock panels"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the factor-augmented panel and write it as CSV.
    Factors {
        /// Raw panel CSV (ticker, date, OHLCV, adj_close).
        #[arg(long)]
        panel: PathBuf,

        /// Output CSV path.
        #[arg(long, default_value = "data/factors/stocks_with_factors.csv")]
        out: PathBuf,
    },
    /// Run the default strategy catalogue and persist artifacts.
    Run {
        /// Raw panel CSV (ticker, date, OHLCV, adj_close).
        #[arg(long)]
        panel: PathBuf,

        /// Optional TOML run config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory override.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match Cli::parse().command {
        Commands::Factors { panel, out } => cmd_factors(&panel, &out),
        Commands::Run { panel, config, out } => cmd_run(&panel, config.as_deref(), out),
    }
}

fn cmd_factors(panel_path: &std::path::Path, out: &std::path::Path) -> Result<()> {
    let panel = load_panel(panel_path)?;
    let factors = compute_factors(&panel);
    let csv = export_factors_csv(&factors)?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, csv).with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "wrote factor panel: {} rows, {} tickers -> {}",
        factors.len(),
        factors.spans().len(),
        out.display()
    );
    Ok(())
}

fn cmd_run(
    panel_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(dir) = out {
        config.output.dir = dir;
    }

    let panel = load_panel(panel_path)?;
    let entries = default_catalogue()?;
    let report = factorlab_runner::run_catalogue(&panel, &entries, &config);

    for run in &report.completed {
        let (signals, summary) = save_run_artifacts(&config.output.dir, run)?;
        let m = &run.summary.metrics;
        println!(
            "{:<22} total {:>8.4}  ann {:>8.4}  vol {:>8.4}  sharpe {:>7.3}  maxdd {:>8.4}  win {:>6.3}  days {}",
            run.summary.strategy,
            m.total_return,
            m.annualized_return,
            m.annualized_volatility,
            m.sharpe_ratio,
            m.max_drawdown,
            m.win_rate,
            m.n_days,
        );
        tracing::debug!(
            signals = %signals.display(),
            summary = %summary.display(),
            "artifacts written"
        );
    }
    for failure in &report.failed {
        eprintln!("FAILED {:<15} {}", failure.strategy, failure.error);
    }

    if report.completed.is_empty() {
        bail!("no strategy run completed");
    }
    Ok(())
}
