//! Tabular sheet model.
//!
//! Every source (Google Sheets, JSONL file) produces a [`DataTable`]: the
//! first row of the sheet becomes the header row, every following row is a
//! record in source order. Records are aligned to the header width: short
//! rows are padded with [`CellValue::Empty`], overlong rows are cut.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell as delivered by the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Map a JSON cell (as returned by the Sheets values API or a JSONL row).
    ///
    /// Empty strings count as empty cells. Nested arrays and objects are kept
    /// as their JSON text.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Empty,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Empty, Self::Number),
            serde_json::Value::String(s) if s.is_empty() => Self::Empty,
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Format a measurement so whole numbers keep one decimal (`7.0`, `300.0`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// All rows of a sheet, aligned to its header row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Build a table from explicit headers and records.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Build a table from a raw grid whose first row is the header row.
    ///
    /// An empty grid, or one with only a header row, yields a table without
    /// records.
    #[must_use]
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Self {
        let mut grid = grid.into_iter();
        let Some(header_row) = grid.next() else {
            return Self::default();
        };
        let headers = header_row.iter().map(ToString::to_string).collect();
        Self::new(headers, grid.collect())
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of records (the header row is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// The most recent record, i.e. the last row in source order.
    #[must_use]
    pub fn last_record(&self) -> Option<Record<'_>> {
        self.rows.last().map(|cells| Record { table: self, cells })
    }
}

/// A borrowed view of one record with lookup by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a DataTable,
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    /// Cell under `column`, or `None` when the sheet has no such header.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.table
            .column_index(column)
            .and_then(|index| self.cells.get(index))
    }
}
