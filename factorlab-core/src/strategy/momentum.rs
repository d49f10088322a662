//! Cross-sectional multi-factor momentum.
//!
//! Per date, each configured return window is z-scored across that date's
//! tickers; a row's momentum score is the weighted sum of its z-scores (a NaN
//! z contributes 0, but rows with fewer valid z-scores than the configured
//! minimum are struck from the ranking entirely). Per date, the ranked
//! universe fills the long book from the top and, in long/short mode, the
//! short book from the bottom of the pool that *remains* after the longs are
//! removed, so the books can never overlap.

use std::collections::HashMap;

use super::cross_section::{rank_descending, zscores};
use super::{SignalGenerator, StrategyError};
use crate::domain::{FactorPanel, Window};

/// Book-building mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumMode {
    /// Top `top_n` by score go long; everything else is flat.
    LongOnly { top_n: usize },
    /// Top `long_n` go long; bottom `short_n` of the remaining pool go short.
    LongShort { long_n: usize, short_n: usize },
}

/// Cross-sectional momentum generator.
#[derive(Debug, Clone)]
pub struct Momentum {
    factors: Vec<Window>,
    weights: HashMap<Window, f64>,
    min_valid_factors: usize,
    mode: MomentumMode,
}

impl Momentum {
    /// Build a momentum generator.
    ///
    /// The weight map must cover every configured factor; a missing entry is
    /// a configuration error, never a silent default.
    pub fn new(
        factors: Vec<Window>,
        weights: HashMap<Window, f64>,
        min_valid_factors: usize,
        mode: MomentumMode,
    ) -> Result<Self, StrategyError> {
        if factors.is_empty() {
            return Err(StrategyError::NoFactors);
        }
        for factor in &factors {
            if !weights.contains_key(factor) {
                return Err(StrategyError::MissingWeight(*factor));
            }
        }
        Ok(Self {
            factors,
            weights,
            min_valid_factors,
            mode,
        })
    }
}

impl SignalGenerator for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
        let rows = panel.rows();
        let groups = panel.date_groups();

        // Score pass: weighted z-score sum per row, NaN where the row does
        // not have enough valid factors to rank that date.
        let mut scores = vec![f64::NAN; rows.len()];
        for indices in groups.values() {
            let z_per_factor: Vec<Vec<f64>> = self
                .factors
                .iter()
                .map(|&factor| {
                    let values: Vec<f64> =
                        indices.iter().map(|&i| rows[i].returns.get(factor)).collect();
                    zscores(&values)
                })
                .collect();

            for (gi, &ri) in indices.iter().enumerate() {
                let valid = z_per_factor.iter().filter(|z| !z[gi].is_nan()).count();
                if valid < self.min_valid_factors {
                    continue;
                }
                let mut score = 0.0;
                for (z, factor) in z_per_factor.iter().zip(&self.factors) {
                    if !z[gi].is_nan() {
                        score += self.weights[factor] * z[gi];
                    }
                }
                scores[ri] = score;
            }
        }

        // Selection pass: rank each date and fill the books.
        let mut signals = vec![0.0; rows.len()];
        for indices in groups.values() {
            let ranked = rank_descending(indices, &scores);
            if ranked.is_empty() {
                continue;
            }
            match self.mode {
                MomentumMode::LongOnly { top_n } => {
                    for &i in ranked.iter().take(top_n) {
                        signals[i] = 1.0;
                    }
                }
                MomentumMode::LongShort { long_n, short_n } => {
                    let n_long = long_n.min(ranked.len());
                    for &i in &ranked[..n_long] {
                        signals[i] = 1.0;
                    }
                    let remaining = &ranked[n_long..];
                    let n_short = short_n.min(remaining.len());
                    for &i in &remaining[remaining.len() - n_short..] {
                        signals[i] = -1.0;
                    }
                }
            }
        }

        Ok(signals)
    }
}
