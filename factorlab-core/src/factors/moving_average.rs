//! Moving-average factors: simple and exponential means of adj_close.
//!
//! Both are defined from the ticker's first row: the simple mean uses the
//! partial window, the exponential mean seeds at the first observation.

use super::rolling::{ewm_mean, rolling_mean_partial};
use crate::domain::Window;

/// Simple moving average with partial windows at the series start.
pub fn simple(closes: &[f64], window: Window) -> Vec<f64> {
    rolling_mean_partial(closes, window.periods())
}

/// Exponential moving average, decay span = window.
pub fn exponential(closes: &[f64], window: Window) -> Vec<f64> {
    ewm_mean(closes, window.periods())
}
