//! Volatility factors: rolling sample std of the 1-row return series.

use super::rolling::rolling_std_partial;
use crate::domain::Window;

/// Rolling sample standard deviation of the daily returns over one window.
///
/// The return series starts with a NaN (no prior close), so the first two
/// rows are NaN and values appear from the third row of the ticker's series.
pub fn rolling(daily_returns: &[f64], window: Window) -> Vec<f64> {
    rolling_std_partial(daily_returns, window.periods())
}
