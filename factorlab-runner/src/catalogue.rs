//! The strategy catalogue: the fixed set of (name, parameters, generator)
//! entries a run iterates.
//!
//! Parameters are kept alongside the generator as plain JSON so the run
//! summary can record exactly what was evaluated without re-deriving it from
//! the generator.

use std::collections::HashMap;

use serde_json::json;

use factorlab_core::domain::Window;
use factorlab_core::strategy::{
    MaCrossover, MeanReversion, Momentum, MomentumMode, RsiReversion, SignalGenerator,
    StrategyError, VolumeBreakout,
};

/// One runnable catalogue entry.
pub struct CatalogueEntry {
    pub name: String,
    pub params: serde_json::Value,
    pub generator: Box<dyn SignalGenerator>,
}

impl CatalogueEntry {
    pub fn new(
        name: impl Into<String>,
        params: serde_json::Value,
        generator: Box<dyn SignalGenerator>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            generator,
        }
    }
}

const MOMENTUM_FACTORS: [Window; 4] = [Window::W20, Window::W60, Window::W120, Window::W250];

fn momentum_weights() -> HashMap<Window, f64> {
    HashMap::from([
        (Window::W20, 0.4),
        (Window::W60, 0.3),
        (Window::W120, 0.2),
        (Window::W250, 0.1),
    ])
}

fn momentum_weights_json() -> serde_json::Value {
    json!({
        "return_20day": 0.4,
        "return_60day": 0.3,
        "return_120day": 0.2,
        "return_250day": 0.1,
    })
}

/// The default catalogue: every shipped strategy with its standard
/// parameters.
pub fn default_catalogue() -> Result<Vec<CatalogueEntry>, StrategyError> {
    let mut entries = Vec::new();

    entries.push(CatalogueEntry::new(
        "momentum",
        json!({
            "factors": [20, 60, 120, 250],
            "weights": momentum_weights_json(),
            "min_valid_factors": 2,
            "top_n": 10,
            "long_short": false,
        }),
        Box::new(Momentum::new(
            MOMENTUM_FACTORS.to_vec(),
            momentum_weights(),
            2,
            MomentumMode::LongOnly { top_n: 10 },
        )?),
    ));

    entries.push(CatalogueEntry::new(
        "momentum_long_short",
        json!({
            "factors": [20, 60, 120, 250],
            "weights": momentum_weights_json(),
            "min_valid_factors": 2,
            "long_n": 5,
            "short_n": 5,
            "long_short": true,
        }),
        Box::new(Momentum::new(
            MOMENTUM_FACTORS.to_vec(),
            momentum_weights(),
            2,
            MomentumMode::LongShort {
                long_n: 5,
                short_n: 5,
            },
        )?),
    ));

    entries.push(CatalogueEntry::new(
        "mean_reversion",
        json!({ "top_n": 10 }),
        Box::new(MeanReversion::new(10)),
    ));

    entries.push(CatalogueEntry::new(
        "ma_crossover",
        json!({ "short_window": 5, "long_window": 20 }),
        Box::new(MaCrossover::new(Window::W5, Window::W20)?),
    ));

    entries.push(CatalogueEntry::new(
        "volume_breakout",
        json!({ "volume_ratio": 1.5 }),
        Box::new(VolumeBreakout::new(1.5)),
    ));

    entries.push(CatalogueEntry::new(
        "rsi_reversion",
        json!({ "window": 10, "lower_threshold": 30.0, "upper_threshold": 70.0 }),
        Box::new(RsiReversion::new(Window::W10, 30.0, 70.0)?),
    ));

    Ok(entries)
}
