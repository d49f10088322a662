//! Summary metrics over the portfolio daily return series.
//!
//! The portfolio return for a date is the cross-ticker mean of that date's
//! non-NaN strategy returns; dates with no observation are dropped. Extreme
//! but defined conditions (zero volatility) propagate as NaN, never 0;
//! serialized JSON renders them as null.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{EvaluatedPanel, PanelRecord};

/// Annualization base for daily observations.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Boundary errors in metrics computation.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("no portfolio return observations: annualization is undefined")]
    NoReturns,
}

/// Fixed summary record for one strategy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub n_days: usize,
}

/// Date-ordered cross-ticker mean of strategy returns, NaN observations
/// skipped, empty dates dropped.
pub fn portfolio_daily_returns(panel: &EvaluatedPanel) -> Vec<f64> {
    let mut by_date: BTreeMap<chrono::NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in panel.rows() {
        if row.strategy_return.is_nan() {
            continue;
        }
        let entry = by_date.entry(row.date()).or_insert((0.0, 0));
        entry.0 += row.strategy_return;
        entry.1 += 1;
    }
    by_date
        .values()
        .map(|&(sum, count)| sum / count as f64)
        .collect()
}

/// Compute the summary record from an evaluated panel.
pub fn compute_metrics(panel: &EvaluatedPanel) -> Result<BacktestMetrics, BacktestError> {
    let daily = portfolio_daily_returns(panel);
    if daily.is_empty() {
        return Err(BacktestError::NoReturns);
    }
    let n_days = daily.len();

    let total_return = daily.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0;
    let annualized_return =
        (1.0 + total_return).powf(TRADING_DAYS_PER_YEAR / n_days as f64) - 1.0;
    let annualized_volatility = sample_std(&daily) * TRADING_DAYS_PER_YEAR.sqrt();
    let sharpe_ratio = if annualized_volatility == 0.0 {
        f64::NAN
    } else {
        annualized_return / annualized_volatility
    };

    Ok(BacktestMetrics {
        total_return,
        annualized_return,
        annualized_volatility,
        sharpe_ratio,
        max_drawdown: max_drawdown(&daily),
        win_rate: daily.iter().filter(|&&r| r > 0.0).count() as f64 / n_days as f64,
        n_days,
    })
}

/// Sample standard deviation (ddof = 1); NaN for fewer than two observations.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
        / (values.len() - 1) as f64;
    var.sqrt()
}

/// Deepest decline from a running peak of the compounded portfolio curve,
/// as a non-positive fraction.
fn max_drawdown(daily_returns: &[f64]) -> f64 {
    let mut equity = 1.0;
    let mut peak = 1.0;
    let mut worst = 0.0_f64;
    for &r in daily_returns {
        equity *= 1.0 + r;
        if equity > peak {
            peak = equity;
        }
        let dd = (equity - peak) / peak;
        if dd < worst {
            worst = dd;
        }
    }
    worst
}
