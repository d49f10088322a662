//! Moving-average trend filter: long while the short MA sits above the
//! long MA.
//!
//! Stateless per row; no cross-sectional ranking. With partial windows both
//! MAs equal the close on a ticker's first row, so the comparison is false
//! and the row is flat.

use super::{SignalGenerator, StrategyError};
use crate::domain::{FactorPanel, Window};

#[derive(Debug, Clone)]
pub struct MaCrossover {
    pub short: Window,
    pub long: Window,
}

impl MaCrossover {
    pub fn new(short: Window, long: Window) -> Result<Self, StrategyError> {
        if short.periods() >= long.periods() {
            return Err(StrategyError::WindowOrder {
                short: short.periods(),
                long: long.periods(),
            });
        }
        Ok(Self { short, long })
    }
}

impl SignalGenerator for MaCrossover {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
        let signals = panel
            .rows()
            .iter()
            .map(|row| {
                // NaN comparisons are false → flat, never a spurious long.
                if row.ma.get(self.short) > row.ma.get(self.long) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        Ok(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{make_raw_rows, Panel};
    use crate::factors::compute_factors;

    #[test]
    fn inverted_windows_are_a_config_error() {
        let err = MaCrossover::new(Window::W20, Window::W5).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::WindowOrder { short: 20, long: 5 }
        ));
    }

    #[test]
    fn partial_windows_keep_short_series_flat() {
        // Until the series is longer than the short window both partial
        // means cover the same rows and are equal, so no position opens.
        let raw = Panel::new(make_raw_rows(&[("A", &[10.0, 11.0, 12.0])])).unwrap();
        let panel = compute_factors(&raw);
        let strategy = MaCrossover::new(Window::W5, Window::W20).unwrap();
        let signals = strategy.generate(&panel).unwrap();
        assert_eq!(signals, vec![0.0, 0.0, 0.0]);
        // Same for a falling series.
        let raw = Panel::new(make_raw_rows(&[("B", &[10.0, 9.0, 8.0])])).unwrap();
        let panel = compute_factors(&raw);
        let signals = strategy.generate(&panel).unwrap();
        assert_eq!(signals, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn long_once_short_window_detaches() {
        // Seven rising rows: from row 5 the 5-row mean drops early history
        // and moves above the 20-row (full-history) mean.
        let closes: Vec<f64> = (0..7).map(|i| 100.0 + i as f64).collect();
        let raw = Panel::new(make_raw_rows(&[("A", &closes)])).unwrap();
        let panel = compute_factors(&raw);
        let strategy = MaCrossover::new(Window::W5, Window::W20).unwrap();
        let signals = strategy.generate(&panel).unwrap();
        assert_eq!(&signals[..5], &[0.0; 5]);
        assert_eq!(&signals[5..], &[1.0, 1.0]);
    }
}
