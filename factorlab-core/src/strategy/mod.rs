//! Strategy layer: pluggable signal generators under one contract.
//!
//! A generator maps the factor panel to one raw signal per row. `run_strategy`
//! then applies the uniform no-lookahead step: every ticker's signal series is
//! lagged one row (a position decided at t's close is effective at t+1), with
//! the first row of each ticker forced to 0. The lag is applied per span and
//! can never carry ticker A's last signal into ticker B's first row.

pub mod cross_section;
pub mod ma_crossover;
pub mod mean_reversion;
pub mod momentum;
pub mod rsi_reversion;
pub mod volume_breakout;

pub use ma_crossover::MaCrossover;
pub use mean_reversion::MeanReversion;
pub use momentum::{Momentum, MomentumMode};
pub use rsi_reversion::RsiReversion;
pub use volume_breakout::VolumeBreakout;

use thiserror::Error;

use crate::domain::{FactorPanel, SignalPanel, SignalRow, TickerSpan, Window};

/// Strategy configuration and invocation errors.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("no weight configured for factor return_{0}day")]
    MissingWeight(Window),

    #[error("momentum factor list is empty")]
    NoFactors,

    #[error("inverted thresholds: lower {lower} must be below upper {upper}")]
    InvertedThresholds { lower: f64, upper: f64 },

    #[error("short window {short} must be below long window {long}")]
    WindowOrder { short: usize, long: usize },

    #[error("generator produced {got} signals for a panel of {expected} rows")]
    SignalLength { got: usize, expected: usize },
}

/// A position-signal generator over the factor panel.
///
/// `generate` returns one raw (un-lagged) signal per panel row, aligned with
/// `panel.rows()`. Discrete strategies emit {-1.0, 0.0, +1.0}; generators
/// must not apply their own lag; that is `run_strategy`'s job.
pub trait SignalGenerator: Send + Sync {
    /// Short machine-readable name (e.g., "momentum").
    fn name(&self) -> &str;

    fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError>;
}

/// Run a generator and apply the per-ticker one-row lag, producing the
/// signal panel.
pub fn run_strategy(
    generator: &dyn SignalGenerator,
    panel: &FactorPanel,
) -> Result<SignalPanel, StrategyError> {
    let mut signals = generator.generate(panel)?;
    if signals.len() != panel.len() {
        return Err(StrategyError::SignalLength {
            got: signals.len(),
            expected: panel.len(),
        });
    }
    lag_by_ticker(panel.spans(), &mut signals);

    let rows = panel
        .rows()
        .iter()
        .zip(&signals)
        .map(|(factor, &signal)| SignalRow {
            factor: factor.clone(),
            signal,
        })
        .collect();
    Ok(SignalPanel::from_sorted_rows(rows, panel.spans().to_vec()))
}

/// Shift each ticker's signal series down one row; the first row becomes 0.
pub fn lag_by_ticker(spans: &[TickerSpan], signals: &mut [f64]) {
    for span in spans {
        for i in (span.start + 1..span.end).rev() {
            signals[i] = signals[i - 1];
        }
        signals[span.start] = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{make_raw_rows, Panel, PanelRecord};
    use crate::factors::compute_factors;

    struct ConstantOne;

    impl SignalGenerator for ConstantOne {
        fn name(&self) -> &str {
            "constant_one"
        }
        fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
            Ok(vec![1.0; panel.len()])
        }
    }

    struct WrongLength;

    impl SignalGenerator for WrongLength {
        fn name(&self) -> &str {
            "wrong_length"
        }
        fn generate(&self, _panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
            Ok(vec![1.0])
        }
    }

    fn factor_panel() -> FactorPanel {
        let raw = Panel::new(make_raw_rows(&[
            ("A", &[10.0, 11.0, 12.0]),
            ("B", &[20.0, 19.0, 18.0]),
        ]))
        .unwrap();
        compute_factors(&raw)
    }

    #[test]
    fn first_row_of_every_ticker_lags_to_zero() {
        let panel = factor_panel();
        let signaled = run_strategy(&ConstantOne, &panel).unwrap();
        for span in signaled.spans() {
            assert_eq!(signaled.rows()[span.start].signal, 0.0);
            for row in &signaled.span_rows(span)[1..] {
                assert_eq!(row.signal, 1.0);
            }
        }
    }

    #[test]
    fn lag_never_crosses_ticker_boundary() {
        let panel = factor_panel();
        // Distinguishable last value for ticker A: A gets -1 everywhere,
        // B gets +1 everywhere; after the lag B's first row must be 0,
        // never A's trailing -1.
        let mut signals: Vec<f64> = panel
            .rows()
            .iter()
            .map(|r| if r.ticker() == "A" { -1.0 } else { 1.0 })
            .collect();
        lag_by_ticker(panel.spans(), &mut signals);
        let b_span = &panel.spans()[1];
        assert_eq!(signals[b_span.start], 0.0);
        assert_eq!(signals[b_span.start + 1], 1.0);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let panel = factor_panel();
        let err = run_strategy(&WrongLength, &panel).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::SignalLength { got: 1, expected: 6 }
        ));
    }
}
