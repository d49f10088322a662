//! Artifact export: factor/signal panel CSVs and run-summary JSON.
//!
//! Persisted summaries carry a `schema_version`; unknown newer versions are
//! rejected on load. Panel CSVs use the stable column naming scheme
//! (`return_{N}day`, `ma_{N}`, `ema_{N}`, `volatility_{N}day`,
//! `volume_ma_{N}`, `volume_to_ma_{N}`, `rsi_{N}`); NaN cells are written
//! empty, the way spreadsheet tools expect missing data.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use factorlab_core::domain::{EvaluatedPanel, FactorPanel, Window};

use crate::runner::{CompletedRun, StrategyRunResult, SCHEMA_VERSION};

// -----------------------------------------------------------------------
// JSON summaries
// -----------------------------------------------------------------------

/// Serialize a run summary to pretty JSON.
pub fn export_summary_json(summary: &StrategyRunResult) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize run summary")
}

/// Deserialize a run summary, rejecting unknown schema versions.
pub fn import_summary_json(json: &str) -> Result<StrategyRunResult> {
    let summary: StrategyRunResult =
        serde_json::from_str(json).context("failed to deserialize run summary")?;
    if summary.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            summary.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(summary)
}

// -----------------------------------------------------------------------
// CSV panels
// -----------------------------------------------------------------------

fn cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:.8}")
    }
}

/// Export the factor-augmented panel with one column per (factor, window).
pub fn export_factors_csv(panel: &FactorPanel) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec![
        "ticker".to_string(),
        "date".to_string(),
        "open".to_string(),
        "high".to_string(),
        "low".to_string(),
        "close".to_string(),
        "adj_close".to_string(),
        "volume".to_string(),
        "return_1day".to_string(),
    ];
    for w in Window::ALL {
        header.push(format!("return_{w}day"));
    }
    for w in Window::ALL {
        header.push(format!("ma_{w}"));
        header.push(format!("ema_{w}"));
    }
    for w in Window::ALL {
        header.push(format!("volatility_{w}day"));
    }
    for w in Window::ALL {
        header.push(format!("volume_ma_{w}"));
        header.push(format!("volume_to_ma_{w}"));
    }
    for w in Window::ALL {
        header.push(format!("rsi_{w}"));
    }
    wtr.write_record(&header)?;

    for row in panel.rows() {
        let mut record = vec![
            row.raw.ticker.clone(),
            row.raw.date.to_string(),
            cell(row.raw.open),
            cell(row.raw.high),
            cell(row.raw.low),
            cell(row.raw.close),
            cell(row.raw.adj_close),
            cell(row.raw.volume),
            cell(row.return_1day),
        ];
        for w in Window::ALL {
            record.push(cell(row.returns.get(w)));
        }
        for w in Window::ALL {
            record.push(cell(row.ma.get(w)));
            record.push(cell(row.ema.get(w)));
        }
        for w in Window::ALL {
            record.push(cell(row.volatility.get(w)));
        }
        for w in Window::ALL {
            record.push(cell(row.volume_ma.get(w)));
            record.push(cell(row.volume_to_ma.get(w)));
        }
        for w in Window::ALL {
            record.push(cell(row.rsi.get(w)));
        }
        wtr.write_record(&record)?;
    }

    let bytes = wtr.into_inner().context("failed to flush factor CSV")?;
    String::from_utf8(bytes).context("factor CSV is not valid UTF-8")
}

/// Export the evaluated panel as the flat per-run signal record set.
pub fn export_signals_csv(panel: &EvaluatedPanel) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "ticker",
        "date",
        "adj_close",
        "return_1day",
        "signal",
        "strategy_return",
        "cumulative_strategy_return",
        "equity_curve",
    ])?;

    for row in panel.rows() {
        let factor = &row.signal.factor;
        wtr.write_record([
            factor.raw.ticker.clone(),
            factor.raw.date.to_string(),
            cell(factor.raw.adj_close),
            cell(factor.return_1day),
            cell(row.signal.signal),
            cell(row.strategy_return),
            cell(row.cumulative_strategy_return),
            cell(row.equity_curve),
        ])?;
    }

    let bytes = wtr.into_inner().context("failed to flush signal CSV")?;
    String::from_utf8(bytes).context("signal CSV is not valid UTF-8")
}

// -----------------------------------------------------------------------
// Filesystem artifacts
// -----------------------------------------------------------------------

/// Persist one completed run under `dir`: `{strategy}_signals.csv` and
/// `{strategy}_summary.json`. Returns the two paths written.
pub fn save_run_artifacts(dir: &Path, run: &CompletedRun) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;

    let signals_path = dir.join(format!("{}_signals.csv", run.summary.strategy));
    std::fs::write(&signals_path, export_signals_csv(&run.evaluated)?)
        .with_context(|| format!("failed to write {}", signals_path.display()))?;

    let summary_path = dir.join(format!("{}_summary.json", run.summary.strategy));
    std::fs::write(&summary_path, export_summary_json(&run.summary)?)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    Ok((signals_path, summary_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::default_catalogue;
    use crate::config::RunConfig;
    use crate::runner::run_catalogue;
    use chrono::NaiveDate;
    use factorlab_core::domain::{Panel, PanelRow, RawPanel};
    use factorlab_core::factors::compute_factors;

    fn small_panel() -> RawPanel {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut rows = Vec::new();
        for (ticker, closes) in [("AAA", [100.0, 104.0, 99.0]), ("BBB", [50.0, 49.0, 51.0])] {
            for (i, close) in closes.into_iter().enumerate() {
                rows.push(PanelRow {
                    ticker: ticker.to_string(),
                    date: base_date + chrono::Duration::days(i as i64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    adj_close: close,
                    volume: 1000.0,
                });
            }
        }
        Panel::new(rows).unwrap()
    }

    #[test]
    fn factor_csv_has_stable_column_names() {
        let factors = compute_factors(&small_panel());
        let csv = export_factors_csv(&factors).unwrap();
        let header = csv.lines().next().unwrap();
        for expected in [
            "return_1day",
            "return_250day",
            "ma_5",
            "ema_20",
            "volatility_60day",
            "volume_ma_120",
            "volume_to_ma_20",
            "rsi_10",
        ] {
            assert!(header.contains(expected), "missing column {expected}");
        }
        assert_eq!(csv.lines().count(), 7);
    }

    #[test]
    fn summary_json_round_trips() {
        let panel = small_panel();
        let entries = default_catalogue().unwrap();
        let report = run_catalogue(&panel, &entries, &RunConfig::default());
        let summary = &report.completed[0].summary;
        let json = export_summary_json(summary).unwrap();
        let back = import_summary_json(&json).unwrap();
        assert_eq!(back.strategy, summary.strategy);
        assert_eq!(back.run_id, summary.run_id);
        assert_eq!(back.metrics.n_days, summary.metrics.n_days);
    }

    #[test]
    fn newer_schema_versions_are_rejected() {
        let panel = small_panel();
        let entries = default_catalogue().unwrap();
        let report = run_catalogue(&panel, &entries, &RunConfig::default());
        let mut summary = report.completed[0].summary.clone();
        summary.schema_version = SCHEMA_VERSION + 1;
        let json = export_summary_json(&summary).unwrap();
        assert!(import_summary_json(&json).is_err());
    }

    #[test]
    fn artifacts_land_in_the_output_dir() {
        let panel = small_panel();
        let entries = default_catalogue().unwrap();
        let report = run_catalogue(&panel, &entries, &RunConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let (signals, summary) = save_run_artifacts(dir.path(), &report.completed[0]).unwrap();
        assert!(signals.exists());
        assert!(summary.exists());
        let contents = std::fs::read_to_string(signals).unwrap();
        assert!(contents.starts_with("ticker,date,adj_close"));
    }
}
