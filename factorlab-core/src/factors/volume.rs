//! Volume factors: rolling mean of volume and the volume-to-mean ratio.

use super::rolling::rolling_mean_partial;
use crate::domain::Window;

/// Rolling mean of volume with partial windows.
pub fn moving_average(volumes: &[f64], window: Window) -> Vec<f64> {
    rolling_mean_partial(volumes, window.periods())
}

/// Current volume over its rolling mean.
///
/// A zero rolling mean yields inf (or NaN for 0/0) per IEEE semantics;
/// callers see the extreme condition instead of a masked value.
pub fn ratio_to_ma(volumes: &[f64], volume_ma: &[f64]) -> Vec<f64> {
    volumes
        .iter()
        .zip(volume_ma)
        .map(|(&v, &ma)| v / ma)
        .collect()
}
