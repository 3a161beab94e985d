//! CSV series reader with full input validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{ColumnSelector, LoadedSeries};

/// Reads one numeric column of a headered CSV file as a series.
///
/// Expected CSV format:
/// - Header row required
/// - One observation per row, in time order
/// - Other columns (timestamps, labels) are ignored
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::MissingColumn`] | Named column absent from the header |
/// | [`IoError::MissingValue`] | Row too short for the selected column |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
pub struct SeriesReader {
    path: PathBuf,
    column: ColumnSelector,
}

impl SeriesReader {
    /// Create a reader for the first column of the given CSV file.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            column: ColumnSelector::First,
        }
    }

    /// Read a different column.
    #[must_use]
    pub fn with_column(mut self, column: ColumnSelector) -> Self {
        self.column = column;
        self
    }

    /// Read and validate the selected column.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<LoadedSeries, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so a short row reports MissingValue rather than CsvParse.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.parse_error(e))?.clone();
        let col_index = match &self.column {
            ColumnSelector::First if !header.is_empty() => 0,
            ColumnSelector::First => {
                return Err(IoError::EmptyDataset {
                    path: self.path.clone(),
                });
            }
            ColumnSelector::Named(name) => {
                header.iter().position(|h| h == name).ok_or_else(|| IoError::MissingColumn {
                    path: self.path.clone(),
                    column: name.clone(),
                    available: header.iter().collect::<Vec<_>>().join(","),
                })?
            }
        };
        let column = header.get(col_index).unwrap_or_default().to_string();
        debug!(column = %column, col_index, "selected column");

        let mut values = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.parse_error(e))?;
            let raw = record.get(col_index).ok_or_else(|| IoError::MissingValue {
                path: self.path.clone(),
                row_index,
                col_index,
            })?;
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    column: column.clone(),
                    raw: raw.to_string(),
                })?;
            values.push(value);
        }

        if values.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(column = %column, len = values.len(), "series loaded");
        Ok(LoadedSeries { column, values })
    }

    fn parse_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
