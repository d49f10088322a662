//! Domain types: typed panel rows, the window set, and the panel container.

pub mod panel;
pub mod row;
pub mod window;

pub use panel::{EvaluatedPanel, FactorPanel, Panel, PanelError, RawPanel, SignalPanel, TickerSpan};
pub use row::{EvaluatedRow, FactorRow, PanelRecord, PanelRow, SignalRow};
pub use window::{Window, WindowValues};

/// Build raw rows for one or more tickers from adj_close series, for testing.
///
/// Dates start at 2024-01-02 and advance one day per row. OHLC fields are
/// derived from the close; volume is a constant 1000.
#[cfg(test)]
pub fn make_raw_rows(series: &[(&str, &[f64])]) -> Vec<PanelRow> {
    make_raw_rows_with_volume(series, |_, _| 1000.0)
}

/// Like `make_raw_rows` but with per-row volume chosen by `(ticker, row index)`.
#[cfg(test)]
pub fn make_raw_rows_with_volume(
    series: &[(&str, &[f64])],
    volume: impl Fn(&str, usize) -> f64,
) -> Vec<PanelRow> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut rows = Vec::new();
    for (ticker, closes) in series {
        for (i, &close) in closes.iter().enumerate() {
            let open = if i == 0 { close } else { closes[i - 1] };
            rows.push(PanelRow {
                ticker: ticker.to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                adj_close: close,
                volume: volume(ticker, i),
            });
        }
    }
    rows
}
