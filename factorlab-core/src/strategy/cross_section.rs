//! Cross-sectional helpers: per-date z-scores and ranking.
//!
//! A cross-section is the set of rows sharing one date. Helpers take the
//! column values for one date group and never see other dates.

use std::cmp::Ordering;

/// Denominator guard for zero-variance cross-sections.
pub const ZSCORE_EPSILON: f64 = 1e-9;

/// Z-score each value against the group's mean and sample std.
///
/// NaN values stay NaN and are excluded from the moments. The epsilon in the
/// denominator keeps a zero-variance day at (near-)zero scores instead of
/// dividing by zero. A group with fewer than two valid values has an
/// undefined std, so every score is NaN.
pub fn zscores(values: &[f64]) -> Vec<f64> {
    let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if valid.len() < 2 {
        return vec![f64::NAN; values.len()];
    }
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    let var = valid.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
        / (valid.len() - 1) as f64;
    let denom = var.sqrt() + ZSCORE_EPSILON;
    values.iter().map(|&v| (v - mean) / denom).collect()
}

/// Panel indices of the group ranked by score, best first, NaN scores
/// excluded. The sort is stable: equal scores keep panel order.
pub fn rank_descending(indices: &[usize], scores: &[f64]) -> Vec<usize> {
    let mut ranked: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| !scores[i].is_nan())
        .collect();
    ranked.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Panel indices of the group ranked by score, smallest first, NaN excluded.
pub fn rank_ascending(indices: &[usize], scores: &[f64]) -> Vec<usize> {
    let mut ranked: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| !scores[i].is_nan())
        .collect();
    ranked.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
