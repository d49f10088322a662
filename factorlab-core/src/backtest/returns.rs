//! Return application: turns lagged signals into per-ticker equity curves.
//!
//! The signal carried by the panel is already effective (lagged by the
//! strategy layer); no further shift happens here. A NaN 1-day return leaves
//! the row's strategy_return NaN but compounds as 0; the position simply
//! earned nothing observable that day.

use crate::domain::{EvaluatedPanel, EvaluatedRow, SignalPanel};

/// Compute per-row strategy returns and per-ticker compounded equity curves.
pub fn apply_returns(panel: &SignalPanel, initial_capital: f64) -> EvaluatedPanel {
    let mut out = Vec::with_capacity(panel.len());

    for span in panel.spans() {
        let mut cumulative = 1.0;
        for row in panel.span_rows(span) {
            let strategy_return = row.signal * row.factor.return_1day;
            if !strategy_return.is_nan() {
                cumulative *= 1.0 + strategy_return;
            }
            out.push(EvaluatedRow {
                signal: row.clone(),
                strategy_return,
                cumulative_strategy_return: cumulative,
                equity_curve: initial_capital * cumulative,
            });
        }
    }

    EvaluatedPanel::from_sorted_rows(out, panel.spans().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{make_raw_rows, FactorPanel, Panel};
    use crate::factors::{assert_approx, compute_factors};
    use crate::strategy::{run_strategy, SignalGenerator, StrategyError};

    struct AlwaysLong;

    impl SignalGenerator for AlwaysLong {
        fn name(&self) -> &str {
            "always_long"
        }
        fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
            Ok(vec![1.0; panel.len()])
        }
    }

    #[test]
    fn lagged_long_compounds_forward_returns() {
        let raw = Panel::new(make_raw_rows(&[("A", &[100.0, 110.0, 99.0])])).unwrap();
        let signaled = run_strategy(&AlwaysLong, &compute_factors(&raw)).unwrap();
        let evaluated = apply_returns(&signaled, 1_000.0);
        let rows = evaluated.rows();

        // Row 0: no effective position, NaN return compounds as nothing.
        assert_eq!(rows[0].signal.signal, 0.0);
        assert!(rows[0].strategy_return.is_nan());
        assert_approx(rows[0].cumulative_strategy_return, 1.0, 1e-12);

        // Row 1: the lagged position from row 0 captures the +10% day.
        assert_approx(rows[1].strategy_return, 0.10, 1e-12);
        assert_approx(rows[1].cumulative_strategy_return, 1.10, 1e-12);
        assert_approx(rows[1].equity_curve, 1_100.0, 1e-9);

        // Row 2: -10% day.
        assert_approx(rows[2].strategy_return, -0.10, 1e-12);
        assert_approx(rows[2].cumulative_strategy_return, 0.99, 1e-12);
        assert_approx(rows[2].equity_curve, 990.0, 1e-9);
    }

    #[test]
    fn equity_over_capital_equals_cumulative_exactly() {
        let raw = Panel::new(make_raw_rows(&[
            ("A", &[100.0, 103.0, 101.0, 104.0]),
            ("B", &[50.0, 49.0, 51.0, 50.0]),
        ]))
        .unwrap();
        let signaled = run_strategy(&AlwaysLong, &compute_factors(&raw)).unwrap();
        // Power-of-two capital keeps the scaling exact in both directions.
        let capital = 131_072.0;
        let evaluated = apply_returns(&signaled, capital);
        for row in evaluated.rows() {
            assert_eq!(
                (row.equity_curve / capital).to_bits(),
                row.cumulative_strategy_return.to_bits()
            );
        }
    }

    #[test]
    fn curves_restart_per_ticker() {
        let raw = Panel::new(make_raw_rows(&[
            ("A", &[100.0, 120.0]),
            ("B", &[100.0, 100.0]),
        ]))
        .unwrap();
        let signaled = run_strategy(&AlwaysLong, &compute_factors(&raw)).unwrap();
        let evaluated = apply_returns(&signaled, 1.0);
        let b_span = &evaluated.spans()[1];
        assert_approx(
            evaluated.rows()[b_span.start].cumulative_strategy_return,
            1.0,
            1e-12,
        );
    }
}
