//! Short-horizon mean reversion: buy the date's biggest losers.
//!
//! Per date, eligible rows (non-NaN 5-day return) are ranked ascending and
//! the `top_n` most-fallen go long. A `top_n` larger than the eligible pool
//! simply takes the whole pool.

use super::cross_section::rank_ascending;
use super::{SignalGenerator, StrategyError};
use crate::domain::{FactorPanel, Window};

#[derive(Debug, Clone)]
pub struct MeanReversion {
    pub top_n: usize,
}

impl MeanReversion {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl SignalGenerator for MeanReversion {
    fn name(&self) -> &str {
        "mean_reversion"
    }

    fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
        let rows = panel.rows();
        let short_returns: Vec<f64> = rows.iter().map(|r| r.returns.get(Window::W5)).collect();

        let mut signals = vec![0.0; rows.len()];
        for indices in panel.date_groups().values() {
            let ranked = rank_ascending(indices, &short_returns);
            for &i in ranked.iter().take(self.top_n) {
                signals[i] = 1.0;
            }
        }
        Ok(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{make_raw_rows, Panel};
    use crate::factors::compute_factors;

    #[test]
    fn biggest_loser_goes_long() {
        // Six rows per ticker so the 5-day return exists on the last date.
        // A climbs, B falls.
        let raw = Panel::new(make_raw_rows(&[
            ("A", &[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]),
            ("B", &[100.0, 98.0, 96.0, 94.0, 92.0, 90.0]),
        ]))
        .unwrap();
        let panel = compute_factors(&raw);
        let signals = MeanReversion::new(1).generate(&panel).unwrap();

        // Only the final date has a valid return_5day for both tickers;
        // the loser (B) is row index 11.
        assert_eq!(signals[11], 1.0);
        assert_eq!(signals[5], 0.0);
    }

    #[test]
    fn oversized_n_takes_the_whole_eligible_pool() {
        let raw = Panel::new(make_raw_rows(&[
            ("A", &[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]),
            ("B", &[100.0, 98.0, 96.0, 94.0, 92.0, 90.0]),
        ]))
        .unwrap();
        let panel = compute_factors(&raw);
        let signals = MeanReversion::new(50).generate(&panel).unwrap();
        // Final date: both rows eligible, both long. Early dates: no
        // eligible rows, all flat.
        assert_eq!(signals[5], 1.0);
        assert_eq!(signals[11], 1.0);
        assert_eq!(signals[0], 0.0);
        assert_eq!(signals[6], 0.0);
    }
}
