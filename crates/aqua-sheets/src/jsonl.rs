//! Local JSON Lines record source.
//!
//! Each line is one row object, e.g.
//! `{"pH": 7.1, "TDS": 320, "Location": "Well A"}`. Headers are the union of
//! keys in first-seen order; blank lines are skipped.

use std::path::{Path, PathBuf};

use aqua_core::{CellValue, DataTable};
use serde_json::{Map, Value};

use crate::RecordSource;
use crate::error::SourceError;

#[derive(Debug, Clone)]
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonlSource {
    fn describe(&self) -> String {
        format!("jsonl file {}", self.path.display())
    }

    async fn fetch_table(&self) -> Result<DataTable, SourceError> {
        let path = self.path.clone();
        let rows = tokio::task::spawn_blocking(move || read_rows(&path))
            .await
            .map_err(|e| SourceError::Parse(format!("jsonl reader task failed: {e}")))??;
        Ok(rows_to_table(rows))
    }
}

fn read_rows(path: &Path) -> Result<Vec<Map<String, Value>>, SourceError> {
    let contents = std::fs::read_to_string(path)?;
    let non_blank = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    serde_jsonlines::JsonLinesReader::new(non_blank.as_bytes())
        .read_all::<Map<String, Value>>()
        .enumerate()
        .map(|(index, row)| {
            row.map_err(|e| SourceError::Parse(format!("{} row {}: {e}", path.display(), index + 1)))
        })
        .collect()
}

fn rows_to_table(rows: Vec<Map<String, Value>>) -> DataTable {
    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let records = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| row.get(header).map_or(CellValue::Empty, CellValue::from_json))
                .collect()
        })
        .collect();

    DataTable::new(headers, records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::io::Write;

    use super::*;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[tokio::test]
    async fn reads_rows_in_order_with_first_seen_headers() {
        let file = write_file(
            "{\"pH\": 7.0, \"TDS\": 300, \"Location\": \"Well A\"}\n\n\
             {\"pH\": 9.2, \"TDS\": 640, \"Location\": \"Well B\", \"Notes\": \"cloudy\"}\n",
        );
        let table = JsonlSource::new(file.path()).fetch_table().await.expect("table");

        assert_eq!(table.headers(), ["pH", "TDS", "Location", "Notes"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][3], CellValue::Empty);
        let last = table.last_record().unwrap();
        assert_eq!(last.get("pH"), Some(&CellValue::Number(9.2)));
    }

    #[tokio::test]
    async fn empty_file_has_no_records() {
        let file = write_file("");
        let table = JsonlSource::new(file.path()).fetch_table().await.expect("table");
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn malformed_line_is_a_parse_error() {
        let file = write_file("{\"pH\": 7.0}\nnot json\n");
        let err = JsonlSource::new(file.path()).fetch_table().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(msg) if msg.contains("row 2")));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = JsonlSource::new("/nonexistent/readings.jsonl")
            .fetch_table()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
