//! Oscillator reversion: fade overbought and oversold readings.
//!
//! Long below the lower threshold, short above the upper, flat between
//! (and flat on an undefined NaN reading).

use super::{SignalGenerator, StrategyError};
use crate::domain::{FactorPanel, Window};

#[derive(Debug, Clone)]
pub struct RsiReversion {
    pub window: Window,
    pub lower_threshold: f64,
    pub upper_threshold: f64,
}

impl RsiReversion {
    pub fn new(window: Window, lower_threshold: f64, upper_threshold: f64) -> Result<Self, StrategyError> {
        if lower_threshold >= upper_threshold {
            return Err(StrategyError::InvertedThresholds {
                lower: lower_threshold,
                upper: upper_threshold,
            });
        }
        Ok(Self {
            window,
            lower_threshold,
            upper_threshold,
        })
    }
}

impl SignalGenerator for RsiReversion {
    fn name(&self) -> &str {
        "rsi_reversion"
    }

    fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
        let signals = panel
            .rows()
            .iter()
            .map(|row| {
                let rsi = row.rsi.get(self.window);
                if rsi < self.lower_threshold {
                    1.0
                } else if rsi > self.upper_threshold {
                    -1.0
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
    fn inverted_thresholds_are_a_config_error() {
        let err = RsiReversion::new(Window::W10, 70.0, 30.0).unwrap_err();
        assert!(matches!(err, StrategyError::InvertedThresholds { .. }));
    }

    #[test]
    fn saturated_readings_map_to_positions() {
        // A only gains → RSI 100 → short; B only loses → RSI 0 → long.
        let raw = Panel::new(make_raw_rows(&[
            ("A", &[100.0, 101.0, 102.0]),
            ("B", &[100.0, 99.0, 98.0]),
        ]))
        .unwrap();
        let panel = compute_factors(&raw);
        let strategy = RsiReversion::new(Window::W10, 30.0, 70.0).unwrap();
        let signals = strategy.generate(&panel).unwrap();
        assert_eq!(signals, vec![0.0, -1.0, -1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn undefined_rsi_stays_flat() {
        // Flat prices: RSI is NaN (undefined), never treated as oversold.
        let raw = Panel::new(make_raw_rows(&[("A", &[100.0, 100.0, 100.0])])).unwrap();
        let panel = compute_factors(&raw);
        let strategy = RsiReversion::new(Window::W10, 30.0, 70.0).unwrap();
        let signals = strategy.generate(&panel).unwrap();
        assert_eq!(signals, vec![0.0; 3]);
    }
}
