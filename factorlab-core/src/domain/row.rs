//! Typed panel rows: one struct per pipeline stage.
//!
//! Each stage's row type is a strict superset of the previous stage:
//! `PanelRow` (raw input) → `FactorRow` → `SignalRow` → `EvaluatedRow`.
//! Downstream code reaches raw fields through the embedded previous stage,
//! so a factor that was never computed cannot be read by name at runtime.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::window::WindowValues;

/// Raw OHLCV record for a single ticker on a single day.
///
/// `volume` is carried as f64 so downstream ratios follow IEEE float
/// semantics (division by a zero rolling mean yields inf, not a panic).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
}

/// Panel row augmented with the full factor set.
///
/// Per-window families are `WindowValues` keyed by `Window`; the 1-day return
/// is a standalone field because it also drives the backtest evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorRow {
    pub raw: PanelRow,
    /// Percent change of adj_close over one row.
    pub return_1day: f64,
    /// Percent change of adj_close over each window.
    pub returns: WindowValues,
    /// Simple moving average of adj_close.
    pub ma: WindowValues,
    /// Exponential moving average of adj_close (span = window, adjust-free).
    pub ema: WindowValues,
    /// Rolling sample std of the 1-day return series.
    pub volatility: WindowValues,
    /// Rolling mean of volume.
    pub volume_ma: WindowValues,
    /// Current volume over its rolling mean.
    pub volume_to_ma: WindowValues,
    /// Relative-strength oscillator, bounded [0, 100].
    pub rsi: WindowValues,
}

/// Factor row plus the lagged position signal emitted by a strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRow {
    pub factor: FactorRow,
    /// Effective position for this row: -1/0/+1 for discrete strategies,
    /// already lagged one row within the ticker's series.
    pub signal: f64,
}

/// Signal row plus realized strategy returns and the equity curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedRow {
    pub signal: SignalRow,
    /// signal × 1-day return; NaN when the return is NaN.
    pub strategy_return: f64,
    /// Running product of (1 + strategy_return) from the ticker's first row.
    pub cumulative_strategy_return: f64,
    /// initial_capital × cumulative_strategy_return.
    pub equity_curve: f64,
}

/// Identity key shared by every pipeline stage.
///
/// Lets `Panel<R>` sort, de-duplicate, and partition any stage's rows
/// without knowing the stage.
pub trait PanelRecord {
    fn ticker(&self) -> &str;
    fn date(&self) -> NaiveDate;
}

impl PanelRecord for PanelRow {
    fn ticker(&self) -> &str {
        &self.ticker
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl PanelRecord for FactorRow {
    fn ticker(&self) -> &str {
        &self.raw.ticker
    }
    fn date(&self) -> NaiveDate {
        self.raw.date
    }
}

impl PanelRecord for SignalRow {
    fn ticker(&self) -> &str {
        self.factor.ticker()
    }
    fn date(&self) -> NaiveDate {
        self.factor.date()
    }
}

impl PanelRecord for EvaluatedRow {
    fn ticker(&self) -> &str {
        self.signal.ticker()
    }
    fn date(&self) -> NaiveDate {
        self.signal.date()
    }
}
