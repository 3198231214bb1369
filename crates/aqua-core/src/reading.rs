//! The current sensor reading, taken from the last record of the sheet.

use serde::{Deserialize, Serialize};

use crate::errors::ReadingError;
use crate::table::{CellValue, DataTable, Record, format_number};

pub const PH_COLUMN: &str = "pH";
pub const TDS_COLUMN: &str = "TDS";
pub const LOCATION_COLUMN: &str = "Location";

pub const DEFAULT_PH: f64 = 7.0;
pub const DEFAULT_TDS: f64 = 300.0;
pub const DEFAULT_LOCATION: &str = "Unknown";

/// A single water-quality sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub ph: f64,
    /// Total dissolved solids, mg/L.
    pub tds: f64,
    pub location: String,
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            ph: DEFAULT_PH,
            tds: DEFAULT_TDS,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl Reading {
    #[must_use]
    pub fn new(ph: f64, tds: f64, location: impl Into<String>) -> Self {
        Self {
            ph,
            tds,
            location: location.into(),
        }
    }

    /// Current reading of a sheet: its last record, or the defaults when the
    /// sheet has no records.
    ///
    /// # Errors
    ///
    /// Returns [`ReadingError::Conversion`] when the `pH` or `TDS` cell holds
    /// a value that is not a real number.
    pub fn latest(table: &DataTable) -> Result<Self, ReadingError> {
        table
            .last_record()
            .map_or_else(|| Ok(Self::default()), |record| Self::from_record(&record))
    }

    /// Coerce one record. Absent columns and empty cells take the field's
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`ReadingError::Conversion`] for non-numeric `pH`/`TDS` values.
    pub fn from_record(record: &Record<'_>) -> Result<Self, ReadingError> {
        let ph = numeric_field(record, PH_COLUMN, DEFAULT_PH)?;
        let tds = numeric_field(record, TDS_COLUMN, DEFAULT_TDS)?;
        let location = match record.get(LOCATION_COLUMN) {
            None | Some(CellValue::Empty) => DEFAULT_LOCATION.to_string(),
            Some(cell) => cell.to_string(),
        };
        Ok(Self { ph, tds, location })
    }

    /// pH for display, e.g. `7.0`.
    #[must_use]
    pub fn ph_display(&self) -> String {
        format_number(self.ph)
    }

    /// TDS for display, e.g. `300.0`.
    #[must_use]
    pub fn tds_display(&self) -> String {
        format_number(self.tds)
    }
}

fn numeric_field(record: &Record<'_>, column: &str, default: f64) -> Result<f64, ReadingError> {
    match record.get(column) {
        None | Some(CellValue::Empty) => Ok(default),
        Some(CellValue::Number(n)) => Ok(*n),
        Some(CellValue::Text(raw)) => raw.trim().parse::<f64>().map_err(|_| conversion(column, raw)),
        Some(CellValue::Bool(b)) => Err(conversion(column, &b.to_string())),
    }
}

fn conversion(column: &str, value: &str) -> ReadingError {
    ReadingError::Conversion {
        column: column.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sheet(rows: Vec<Vec<CellValue>>) -> DataTable {
        DataTable::new(
            vec!["pH".into(), "TDS".into(), "Location".into()],
            rows,
        )
    }

    #[test]
    fn empty_sheet_yields_defaults() {
        let reading = Reading::latest(&sheet(Vec::new())).expect("defaults");
        assert_eq!(reading, Reading::new(7.0, 300.0, "Unknown"));
    }

    #[test]
    fn last_row_is_the_current_reading() {
        let table = sheet(vec![
            vec![CellValue::Number(7.0), CellValue::Number(300.0), text("Well A")],
            vec![CellValue::Number(9.1), CellValue::Number(640.0), text("Well B")],
        ]);
        let reading = Reading::latest(&table).expect("reading");
        assert_eq!(reading, Reading::new(9.1, 640.0, "Well B"));
    }

    #[test]
    fn numeric_text_is_coerced() {
        let table = sheet(vec![vec![text(" 6.8 "), text("410"), text("Tap")]]);
        let reading = Reading::latest(&table).expect("reading");
        assert_eq!(reading.ph, 6.8);
        assert_eq!(reading.tds, 410.0);
    }

    #[test]
    fn non_numeric_value_is_a_conversion_error() {
        let table = sheet(vec![vec![text("acidic"), CellValue::Number(1.0), text("Tap")]]);
        let err = Reading::latest(&table).unwrap_err();
        assert_eq!(
            err,
            ReadingError::Conversion {
                column: "pH".into(),
                value: "acidic".into(),
            }
        );
    }

    #[test]
    fn boolean_tds_is_a_conversion_error() {
        let table = sheet(vec![vec![CellValue::Number(7.0), CellValue::Bool(true), text("Tap")]]);
        assert!(matches!(
            Reading::latest(&table),
            Err(ReadingError::Conversion { column, .. }) if column == "TDS"
        ));
    }

    #[test]
    fn missing_columns_and_empty_cells_fall_back_per_field() {
        let table = DataTable::new(vec!["pH".into()], vec![vec![CellValue::Number(8.0)]]);
        let reading = Reading::latest(&table).expect("reading");
        assert_eq!(reading, Reading::new(8.0, 300.0, "Unknown"));

        let table = sheet(vec![vec![CellValue::Empty, CellValue::Number(120.0), CellValue::Empty]]);
        let reading = Reading::latest(&table).expect("reading");
        assert_eq!(reading, Reading::new(7.0, 120.0, "Unknown"));
    }

    #[test]
    fn numeric_location_is_rendered_as_text() {
        let table = sheet(vec![vec![
            CellValue::Number(7.0),
            CellValue::Number(1.0),
            CellValue::Number(12.0),
        ]]);
        assert_eq!(Reading::latest(&table).expect("reading").location, "12.0");
    }

    #[test]
    fn display_keeps_a_decimal_for_whole_values() {
        let reading = Reading::default();
        assert_eq!(reading.ph_display(), "7.0");
        assert_eq!(reading.tds_display(), "300.0");
    }
}
