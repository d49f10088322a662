//! Backtest evaluator: realized returns, equity curves, summary metrics.

pub mod metrics;
pub mod returns;

pub use metrics::{
    compute_metrics, portfolio_daily_returns, BacktestError, BacktestMetrics,
    TRADING_DAYS_PER_YEAR,
};
pub use returns::apply_returns;
