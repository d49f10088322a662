//! Catalogue runner: factors once, strategies fanned out in parallel.
//!
//! Each entry reads the shared immutable factor panel and produces a private
//! evaluated panel, so the fan-out needs no synchronization beyond collecting
//! results. A failing entry is recorded and the rest of the catalogue keeps
//! running.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use factorlab_core::backtest::{apply_returns, compute_metrics, BacktestError, BacktestMetrics};
use factorlab_core::domain::{EvaluatedPanel, FactorPanel, RawPanel};
use factorlab_core::factors::compute_factors;
use factorlab_core::strategy::{run_strategy, StrategyError};

use crate::catalogue::CatalogueEntry;
use crate::config::RunConfig;

/// Current schema version for persisted run summaries.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors that abort one catalogue entry.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("backtest error: {0}")]
    Backtest(#[from] BacktestError),
}

/// Persisted summary of one strategy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRunResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Content hash of (strategy, parameters, initial_capital).
    pub run_id: String,
    pub strategy: String,
    pub parameters: serde_json::Value,
    pub initial_capital: f64,
    pub metrics: BacktestMetrics,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// A completed run: the summary plus the evaluated panel behind it.
pub struct CompletedRun {
    pub summary: StrategyRunResult,
    pub evaluated: EvaluatedPanel,
}

/// A recorded per-entry failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedRun {
    pub strategy: String,
    pub error: String,
}

/// Outcome of a whole catalogue run.
pub struct CatalogueReport {
    pub completed: Vec<CompletedRun>,
    pub failed: Vec<FailedRun>,
}

/// Run one catalogue entry against a precomputed factor panel.
pub fn run_entry(
    entry: &CatalogueEntry,
    factors: &FactorPanel,
    initial_capital: f64,
) -> Result<CompletedRun, RunError> {
    let signaled = run_strategy(entry.generator.as_ref(), factors)?;
    let evaluated = apply_returns(&signaled, initial_capital);
    let metrics = compute_metrics(&evaluated)?;

    Ok(CompletedRun {
        summary: StrategyRunResult {
            schema_version: SCHEMA_VERSION,
            run_id: run_id(&entry.name, &entry.params, initial_capital),
            strategy: entry.name.clone(),
            parameters: entry.params.clone(),
            initial_capital,
            metrics,
        },
        evaluated,
    })
}

/// Run the full catalogue: compute factors once, evaluate every entry in
/// parallel, isolate per-entry failures.
pub fn run_catalogue(
    panel: &RawPanel,
    entries: &[CatalogueEntry],
    config: &RunConfig,
) -> CatalogueReport {
    let initial_capital = config.backtest.initial_capital;
    tracing::info!(
        rows = panel.len(),
        tickers = panel.spans().len(),
        strategies = entries.len(),
        "running strategy catalogue"
    );
    let factors = compute_factors(panel);

    let outcomes: Vec<(String, Result<CompletedRun, RunError>)> = entries
        .par_iter()
        .map(|entry| (entry.name.clone(), run_entry(entry, &factors, initial_capital)))
        .collect();

    let mut report = CatalogueReport {
        completed: Vec::new(),
        failed: Vec::new(),
    };
    for (name, outcome) in outcomes {
        match outcome {
            Ok(run) => {
                tracing::info!(
                    strategy = %name,
                    total_return = run.summary.metrics.total_return,
                    sharpe = run.summary.metrics.sharpe_ratio,
                    "strategy run completed"
                );
                report.completed.push(run);
            }
            Err(err) => {
                tracing::error!(strategy = %name, error = %err, "strategy run failed");
                report.failed.push(FailedRun {
                    strategy: name,
                    error: err.to_string(),
                });
            }
        }
    }
    report
}

/// Deterministic run id from the summary's identifying fields.
fn run_id(strategy: &str, params: &serde_json::Value, initial_capital: f64) -> String {
    let payload = serde_json::json!({
        "strategy": strategy,
        "parameters": params,
        "initial_capital": initial_capital,
    });
    blake3::hash(payload.to_string().as_bytes())
        .to_hex()
        .to_string()
}
