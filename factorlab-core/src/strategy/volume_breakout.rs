//! Volume-confirmed breakout: price above its 20-row MA on elevated volume.
//!
//! Long when adj_close sits above ma_20 and today's volume runs above its
//! 20-row mean by the configured ratio (1.5 in the default catalogue).

use super::{SignalGenerator, StrategyError};
use crate::domain::{FactorPanel, Window};

#[derive(Debug, Clone)]
pub struct VolumeBreakout {
    pub volume_ratio: f64,
}

impl VolumeBreakout {
    pub fn new(volume_ratio: f64) -> Self {
        Self { volume_ratio }
    }
}

impl SignalGenerator for VolumeBreakout {
    fn name(&self) -> &str {
        "volume_breakout"
    }

    fn generate(&self, panel: &FactorPanel) -> Result<Vec<f64>, StrategyError> {
        let signals = panel
            .rows()
            .iter()
            .map(|row| {
                let above_ma = row.raw.adj_close > row.ma.get(Window::W20);
                let volume_surge = row.volume_to_ma.get(Window::W20) > self.volume_ratio;
                if above_ma && volume_surge {
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
    use crate::domain::{make_raw_rows_with_volume, Panel};
    use crate::factors::compute_factors;

    #[test]
    fn fires_only_on_price_and_volume_together() {
        // Rising close; the last row triples its volume.
        let rows = make_raw_rows_with_volume(
            &[("A", &[100.0, 101.0, 102.0, 103.0])],
            |_, i| if i == 3 { 3000.0 } else { 1000.0 },
        );
        let panel = compute_factors(&Panel::new(rows).unwrap());
        let signals = VolumeBreakout::new(1.5).generate(&panel).unwrap();

        // Rows 1-2: price above its partial-window MA but volume flat.
        assert_eq!(&signals[..3], &[0.0, 0.0, 0.0]);
        // Row 3: close 103 > ma_20 101.5 and volume 3000 / 1500 = 2 > 1.5.
        assert_eq!(signals[3], 1.0);
    }

    #[test]
    fn volume_surge_without_price_stays_flat() {
        let rows = make_raw_rows_with_volume(
            &[("A", &[100.0, 99.0, 98.0, 97.0])],
            |_, i| if i == 3 { 3000.0 } else { 1000.0 },
        );
        let panel = compute_factors(&Panel::new(rows).unwrap());
        let signals = VolumeBreakout::new(1.5).generate(&panel).unwrap();
        assert_eq!(signals, vec![0.0; 4]);
    }
}
