//! In-memory tabular data and the loader interface that produces it.

use std::path::Path;

use anyhow::{Context, Result, anyhow, ensure};
use encoding_rs::{Encoding, UTF_8};
use itertools::Itertools;
use log::debug;

use crate::{
    column::{Column, is_missing},
    io_utils,
};

/// Loads a [`Dataset`] from a path. Hosts can supply their own source; the
/// CLI uses [`CsvSource`].
pub trait DataSource {
    fn load(&self, path: &Path) -> Result<Dataset>;
}

#[derive(Debug, Clone)]
pub struct CsvSource {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

impl CsvSource {
    pub fn new(delimiter: Option<u8>, encoding: &'static Encoding) -> Self {
        Self {
            delimiter,
            encoding,
        }
    }
}

impl DataSource for CsvSource {
    fn load(&self, path: &Path) -> Result<Dataset> {
        let delimiter = io_utils::resolve_input_delimiter(path, self.delimiter);
        debug!(
            "Loading {:?} with delimiter '{}' and encoding {}",
            path,
            io_utils::printable_delimiter(delimiter),
            self.encoding.name()
        );
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, self.encoding)
            .with_context(|| format!("Reading headers from {path:?}"))?;
        let mut rows = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
            let decoded = io_utils::decode_record(&record, self.encoding)
                .with_context(|| format!("Decoding row {}", row_idx + 2))?;
            rows.push(decoded);
        }
        Dataset::new(headers, rows)
    }
}

/// Header names plus rows of cells; missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Dataset {
    /// Normalizes missing tokens to `None` and pads short rows. A row with
    /// more cells than there are headers is an error.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                ensure!(
                    row.len() <= width,
                    "Row {} has {} fields but the header has {}",
                    idx + 1,
                    row.len(),
                    width
                );
                let mut cells = row
                    .into_iter()
                    .map(|cell| (!is_missing(&cell)).then(|| cell.trim().to_string()))
                    .collect::<Vec<_>>();
                cells.resize(width, None);
                Ok(cells)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of one column, top to bottom.
    pub fn cells(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|c| c.as_deref()))
    }

    pub fn null_count(&self, index: usize) -> usize {
        self.cells(index).filter(Option::is_none).count()
    }

    pub fn unique_count(&self, index: usize) -> usize {
        self.cells(index).flatten().unique().count()
    }

    /// The column parsed as numbers, or `None` when it has no present cells
    /// or any present cell is not numeric.
    pub fn numeric_column(&self, index: usize) -> Option<Column> {
        if index >= self.headers.len() || self.cells(index).flatten().next().is_none() {
            return None;
        }
        Column::from_fields(self.cells(index)).ok()
    }

    /// All numeric columns as `(index, name, column)`, in header order.
    pub fn numeric_columns(&self) -> Vec<(usize, &str, Column)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                self.numeric_column(idx)
                    .map(|column| (idx, name.as_str(), column))
            })
            .collect()
    }

    /// Resolves `names` to numeric columns; an empty list selects every
    /// numeric column. Unknown or non-numeric names are errors.
    pub fn select_numeric(&self, names: &[String]) -> Result<Vec<(usize, &str, Column)>> {
        if names.is_empty() {
            return Ok(self.numeric_columns());
        }
        names
            .iter()
            .map(|name| {
                let idx = self
                    .column_index(name)
                    .ok_or_else(|| anyhow!("Column '{name}' not found in input"))?;
                if self.cells(idx).flatten().next().is_none() {
                    // Nothing present: an empty numeric column, reported as skipped downstream.
                    return Ok((idx, self.headers[idx].as_str(), Column::from_values([])));
                }
                let column = Column::from_fields(self.cells(idx))
                    .with_context(|| format!("Column '{name}' is not numeric"))?;
                Ok((idx, self.headers[idx].as_str(), column))
            })
            .collect()
    }
}
