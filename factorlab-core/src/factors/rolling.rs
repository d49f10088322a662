//! Rolling-window primitives with partial-window semantics.
//!
//! All functions operate on one ticker's date-ordered series and never see
//! rows from another ticker. Partial windows are permitted from the first
//! row: a window shorter than the available history uses whatever non-NaN
//! observations exist. NaN inputs are skipped, not coerced; an aggregate
//! with no usable observations is NaN.

/// Rolling mean over the trailing `window` rows, skipping NaN.
///
/// NaN only when the window holds zero non-NaN observations.
pub fn rolling_mean_partial(values: &[f64], window: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 0..values.len() {
        let lo = (i + 1).saturating_sub(window);
        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in &values[lo..=i] {
            if !v.is_nan() {
                sum += v;
                count += 1;
            }
        }
        if count > 0 {
            result[i] = sum / count as f64;
        }
    }
    result
}

/// Rolling sample standard deviation (ddof = 1) over the trailing `window`
/// rows, skipping NaN. Needs at least two observations; NaN otherwise.
pub fn rolling_std_partial(values: &[f64], window: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 0..values.len() {
        let lo = (i + 1).saturating_sub(window);
        let obs: Vec<f64> = values[lo..=i].iter().copied().filter(|v| !v.is_nan()).collect();
        if obs.len() < 2 {
            continue;
        }
        let mean = obs.iter().sum::<f64>() / obs.len() as f64;
        let var = obs.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
            / (obs.len() - 1) as f64;
        result[i] = var.sqrt();
    }
    result
}

/// Exponentially weighted mean with decay span, seeded at the first
/// observation (no SMA warmup, no adjustment weighting):
///
///   ewm[t] = alpha * x[t] + (1 - alpha) * ewm[t-1],  alpha = 2 / (span + 1)
///
/// A NaN input produces a NaN output for that row but does not disturb the
/// running state.
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if span == 0 {
        return result;
    }
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut state: Option<f64> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        let next = match state {
            None => v,
            Some(prev) => alpha * v + (1.0 - alpha) * prev,
        };
        result[i] = next;
        state = Some(next);
    }
    result
}

/// Percent change over `periods` rows: x[t] / x[t-periods] - 1.
///
/// NaN for the first `periods` rows and wherever either endpoint is NaN;
/// a zero base follows IEEE semantics (inf / -inf / NaN).
pub fn pct_change(values: &[f64], periods: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in periods..values.len() {
        let base = values[i - periods];
        let current = values[i];
        if base.is_nan() || current.is_nan() {
            continue;
        }
        result[i] = current / base - 1.0;
    }
    result
}
