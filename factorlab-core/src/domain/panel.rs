//! Panel: rows sorted by (ticker, date) with an explicit per-ticker span
//! index.
//!
//! Every windowed, rolling, or lag operation in the pipeline works on one
//! ticker's span at a time; the span index makes that partitioning explicit
//! instead of relying on any cross-row iteration trick. Cross-sectional
//! (per-date) work uses the on-demand `date_groups` index.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use super::row::{EvaluatedRow, FactorRow, PanelRecord, PanelRow, SignalRow};

/// Half-open row range `[start, end)` holding one ticker's date-ordered series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerSpan {
    pub ticker: String,
    pub start: usize,
    pub end: usize,
}

impl TickerSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Structural errors raised at panel construction.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("panel has no rows")]
    Empty,

    #[error("duplicate (ticker, date) key: {ticker} {date}")]
    DuplicateKey { ticker: String, date: NaiveDate },
}

/// A (ticker, date)-keyed table for one pipeline stage.
#[derive(Debug, Clone)]
pub struct Panel<R> {
    rows: Vec<R>,
    spans: Vec<TickerSpan>,
}

pub type RawPanel = Panel<PanelRow>;
pub type FactorPanel = Panel<FactorRow>;
pub type SignalPanel = Panel<SignalRow>;
pub type EvaluatedPanel = Panel<EvaluatedRow>;

impl<R: PanelRecord> Panel<R> {
    /// Build a panel from rows in any order.
    ///
    /// Sorts by (ticker, date), rejects empty input and duplicate keys,
    /// and builds the ticker span index.
    pub fn new(mut rows: Vec<R>) -> Result<Self, PanelError> {
        if rows.is_empty() {
            return Err(PanelError::Empty);
        }
        rows.sort_by(|a, b| (a.ticker(), a.date()).cmp(&(b.ticker(), b.date())));

        for pair in rows.windows(2) {
            if pair[0].ticker() == pair[1].ticker() && pair[0].date() == pair[1].date() {
                return Err(PanelError::DuplicateKey {
                    ticker: pair[1].ticker().to_string(),
                    date: pair[1].date(),
                });
            }
        }

        let spans = build_spans(&rows);
        Ok(Self { rows, spans })
    }

    /// Rebuild a panel from rows already in (ticker, date) order with a span
    /// index derived from the same rows. Used by pipeline stages, which map
    /// rows one-to-one and therefore preserve identity and ordering.
    pub(crate) fn from_sorted_rows(rows: Vec<R>, spans: Vec<TickerSpan>) -> Self {
        debug_assert_eq!(
            spans.last().map(|s| s.end),
            Some(rows.len()),
            "span index does not cover the row vector"
        );
        Self { rows, spans }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-ticker spans in ticker order.
    pub fn spans(&self) -> &[TickerSpan] {
        &self.spans
    }

    /// The date-ordered rows of one ticker.
    pub fn span_rows(&self, span: &TickerSpan) -> &[R] {
        &self.rows[span.start..span.end]
    }

    /// Row indices grouped by date, in date order. Indices within a group
    /// keep panel (ticker) order, which makes cross-sectional tie-breaking
    /// deterministic.
    pub fn date_groups(&self) -> BTreeMap<NaiveDate, Vec<usize>> {
        let mut groups: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (i, row) in self.rows.iter().enumerate() {
            groups.entry(row.date()).or_default().push(i);
        }
        groups
    }
}

fn build_spans<R: PanelRecord>(rows: &[R]) -> Vec<TickerSpan> {
    let mut spans = Vec::new();
    let mut start = 0usize;
    for i in 1..=rows.len() {
        if i == rows.len() || rows[i].ticker() != rows[start].ticker() {
            spans.push(TickerSpan {
                ticker: rows[start].ticker().to_string(),
                start,
                end: i,
            });
            start = i;
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_raw_rows;

    #[test]
    fn panel_sorts_and_partitions_by_ticker() {
        // Rows deliberately interleaved and out of date order.
        let mut rows = make_raw_rows(&[("B", &[9.0, 8.0]), ("A", &[10.0, 11.0, 12.0])]);
        rows.swap(0, 3);
        let panel = Panel::new(rows).unwrap();

        let spans = panel.spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].ticker, "A");
        assert_eq!(spans[0].len(), 3);
        assert_eq!(spans[1].ticker, "B");
        assert_eq!(spans[1].len(), 2);

        // Dates ascend within each span.
        for span in spans {
            let rows = panel.span_rows(span);
            for pair in rows.windows(2) {
                assert!(pair[0].date < pair[1].date);
            }
        }
    }

    #[test]
    fn panel_rejects_empty_input() {
        let rows: Vec<crate::domain::PanelRow> = Vec::new();
        assert!(matches!(Panel::new(rows), Err(PanelError::Empty)));
    }

    #[test]
    fn panel_rejects_duplicate_keys() {
        let mut rows = make_raw_rows(&[("A", &[10.0, 11.0])]);
        rows[1].date = rows[0].date;
        let err = Panel::new(rows).unwrap_err();
        assert!(matches!(err, PanelError::DuplicateKey { ref ticker, .. } if ticker == "A"));
    }

    #[test]
    fn date_groups_keep_panel_order_within_group() {
        let rows = make_raw_rows(&[("A", &[10.0, 11.0]), ("B", &[20.0, 21.0])]);
        let panel = Panel::new(rows).unwrap();
        let groups = panel.date_groups();
        assert_eq!(groups.len(), 2);
        for idxs in groups.values() {
            assert_eq!(idxs.len(), 2);
            // A's row precedes B's row on every date.
            assert_eq!(panel.rows()[idxs[0]].ticker, "A");
            assert_eq!(panel.rows()[idxs[1]].ticker, "B");
        }
    }
}
