//! Return factors: percent change of adj_close over 1 row and each window.

use super::rolling::pct_change;
use crate::domain::Window;

/// 1-row percent change. NaN at the series start.
pub fn one_day(closes: &[f64]) -> Vec<f64> {
    pct_change(closes, 1)
}

/// N-row percent change for one window.
pub fn over_window(closes: &[f64], window: Window) -> Vec<f64> {
    pct_change(closes, window.periods())
}
