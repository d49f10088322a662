//! Panel loading: CSV with headers into the typed raw panel.
//!
//! Expected columns: ticker, date (YYYY-MM-DD), open, high, low, close,
//! adj_close, volume. Missing columns and malformed fields surface as load
//! errors; structural problems (empty panel, duplicate keys) come from panel
//! construction.

use std::path::{Path, PathBuf};

use thiserror::Error;

use factorlab_core::domain::{Panel, PanelError, PanelRow, RawPanel};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open panel {path}: {source}")]
    Open {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("malformed panel record in {path}: {source}")]
    Record {
        path: PathBuf,
        source: csv::Error,
    },

    #[error(transparent)]
    Panel(#[from] PanelError),
}

/// Load a raw panel from a CSV file.
pub fn load_panel(path: &Path) -> Result<RawPanel, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows: Vec<PanelRow> = Vec::new();
    for record in reader.deserialize() {
        let row: PanelRow = record.map_err(|source| LoadError::Record {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    Ok(Panel::new(rows)?)
}
