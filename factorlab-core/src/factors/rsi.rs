//! Relative-strength oscillator, bounded [0, 100].
//!
//! Price deltas split into gain and loss parts, each averaged over a rolling
//! partial window:
//!
//!   rsi = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! Edge cases are defined, not errors: avg_loss == 0 with any gain saturates
//! at 100; no movement at all (both averages 0) is NaN, an undefined
//! reading, deliberately not coerced to a neutral 50.

use super::rolling::rolling_mean_partial;
use crate::domain::Window;

/// Rolling RSI over one window of a ticker's adj_close series.
pub fn rolling(closes: &[f64], window: Window) -> Vec<f64> {
    let n = closes.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = closes[i] - closes[i - 1];
        // NaN deltas contribute to neither side, same as the first row.
        if delta > 0.0 {
            gains[i] = delta;
        } else if delta < 0.0 {
            losses[i] = -delta;
        }
    }

    let avg_gain = rolling_mean_partial(&gains, window.periods());
    let avg_loss = rolling_mean_partial(&losses, window.periods());

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| oscillator(g, l))
        .collect()
}

fn oscillator(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        f64::NAN
    } else if avg_loss == 0.0 && avg_gain == 0.0 {
        f64::NAN
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
