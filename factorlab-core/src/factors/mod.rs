//! Factor engine: multi-window factors computed per ticker span.
//!
//! `compute_factors` is a pure function of the raw panel: row count and
//! (ticker, date) identity are preserved exactly, every windowed computation
//! is confined to one ticker's span, and the output is deterministic
//! bit-for-bit across runs.

pub mod moving_average;
pub mod returns;
pub mod rolling;
pub mod rsi;
pub mod volatility;
pub mod volume;

use crate::domain::{FactorPanel, FactorRow, RawPanel, Window, WindowValues};

/// Compute the full factor set for every row of the panel.
pub fn compute_factors(panel: &RawPanel) -> FactorPanel {
    let mut out = Vec::with_capacity(panel.len());

    for span in panel.spans() {
        let rows = panel.span_rows(span);
        let closes: Vec<f64> = rows.iter().map(|r| r.adj_close).collect();
        let volumes: Vec<f64> = rows.iter().map(|r| r.volume).collect();
        let return_1day = returns::one_day(&closes);

        let mut factor_rows: Vec<FactorRow> = rows
            .iter()
            .zip(&return_1day)
            .map(|(row, &r1)| FactorRow {
                raw: row.clone(),
                return_1day: r1,
                returns: WindowValues::nan(),
                ma: WindowValues::nan(),
                ema: WindowValues::nan(),
                volatility: WindowValues::nan(),
                volume_ma: WindowValues::nan(),
                volume_to_ma: WindowValues::nan(),
                rsi: WindowValues::nan(),
            })
            .collect();

        for window in Window::ALL {
            let ret = returns::over_window(&closes, window);
            let ma = moving_average::simple(&closes, window);
            let ema = moving_average::exponential(&closes, window);
            let vol = volatility::rolling(&return_1day, window);
            let volume_ma = volume::moving_average(&volumes, window);
            let volume_ratio = volume::ratio_to_ma(&volumes, &volume_ma);
            let rsi = rsi::rolling(&closes, window);

            for (i, row) in factor_rows.iter_mut().enumerate() {
                row.returns.set(window, ret[i]);
                row.ma.set(window, ma[i]);
                row.ema.set(window, ema[i]);
                row.volatility.set(window, vol[i]);
                row.volume_ma.set(window, volume_ma[i]);
                row.volume_to_ma.set(window, volume_ratio[i]);
                row.rsi.set(window, rsi[i]);
            }
        }

        out.extend(factor_rows);
    }

    FactorPanel::from_sorted_rows(out, panel.spans().to_vec())
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for factor tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
