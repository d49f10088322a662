//! FactorLab Runner: orchestration around the core pipeline.
//!
//! Loads the raw panel from CSV, iterates the strategy catalogue (factors
//! computed once, entries evaluated in parallel), isolates per-entry
//! failures, and persists artifacts: per-strategy signal panels and
//! versioned JSON run summaries.

pub mod catalogue;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use catalogue::{default_catalogue, CatalogueEntry};
pub use config::{ConfigError, RunConfig};
pub use data_loader::{load_panel, LoadError};
pub use export::{
    export_factors_csv, export_signals_csv, export_summary_json, import_summary_json,
    save_run_artifacts,
};
pub use runner::{
    run_catalogue, run_entry, CatalogueReport, CompletedRun, FailedRun, RunError,
    StrategyRunResult, SCHEMA_VERSION,
};
