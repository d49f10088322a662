//! FactorLab Core: factor-to-signal-to-performance pipeline.
//!
//! This crate contains the algorithmic heart of the backtester:
//! - Typed panel rows per pipeline stage (raw → factor → signal → evaluated)
//! - Multi-window factor engine over per-ticker spans
//! - Pluggable signal generators with a uniform no-lookahead lag
//! - Backtest evaluator: equity curves and risk-adjusted summary metrics
//!
//! Data flows strictly one way: RawPanel → FactorPanel → SignalPanel →
//! EvaluatedPanel → BacktestMetrics. Each stage produces a new panel; nothing
//! is mutated in place. The core performs no I/O and emits no logs.

pub mod backtest;
pub mod domain;
pub mod factors;
pub mod strategy;
