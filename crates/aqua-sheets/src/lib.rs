//! # aqua-sheets
//!
//! Data provider adapters for aquawatch.
//!
//! A source yields the whole sheet as a [`DataTable`]; the current reading is
//! its last record. Sources:
//! - Google Sheets through a service account ([`SheetsSource`])
//! - a local JSON Lines file ([`JsonlSource`])
//!
//! Each fetch opens its own connection and releases it before returning.

pub mod credentials;
pub mod jsonl;
pub mod session;
pub mod sheets;

mod error;
mod http;

pub use error::SourceError;
pub use jsonl::JsonlSource;
pub use sheets::SheetsSource;

use std::future::Future;

use aqua_config::{AquaConfig, ConfigError, SourceKind};
use aqua_core::{DataTable, Reading};

/// A read-only tabular provider.
pub trait RecordSource {
    /// Short human description for logs and the dashboard footer.
    fn describe(&self) -> String;

    /// Read every row, header row first, in source order.
    fn fetch_table(&self) -> impl Future<Output = Result<DataTable, SourceError>> + Send;
}

/// The whole sheet plus its current reading, captured in one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub table: DataTable,
    pub reading: Reading,
}

/// Fetch the sheet and derive the current reading.
///
/// # Errors
///
/// Returns [`SourceError`] if the source cannot be read or the latest row
/// holds a non-numeric pH/TDS value.
pub async fn fetch_snapshot<S: RecordSource + Sync>(source: &S) -> Result<Snapshot, SourceError> {
    let table = source.fetch_table().await?;
    let reading = Reading::latest(&table)?;
    Ok(Snapshot { table, reading })
}

/// Fetch only the current reading. Empty sources yield the default reading.
///
/// # Errors
///
/// See [`fetch_snapshot`].
pub async fn fetch_latest<S: RecordSource + Sync>(source: &S) -> Result<Reading, SourceError> {
    fetch_snapshot(source).await.map(|snapshot| snapshot.reading)
}

/// Source selected by configuration.
#[derive(Debug, Clone)]
pub enum DataSource {
    Sheets(SheetsSource),
    Jsonl(JsonlSource),
}

impl DataSource {
    /// Build the configured source.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Credentials`] when the selected section is not
    /// configured or the service-account key cannot be parsed.
    pub fn from_config(config: &AquaConfig) -> Result<Self, SourceError> {
        config
            .require_source()
            .map_err(|e: ConfigError| SourceError::Credentials(e.to_string()))?;

        match config.source.kind {
            SourceKind::Sheets => SheetsSource::from_config(&config.sheets).map(Self::Sheets),
            SourceKind::Jsonl => {
                let path = config.source.jsonl_path.clone().ok_or_else(|| {
                    SourceError::Credentials("source.jsonl_path is not set".into())
                })?;
                Ok(Self::Jsonl(JsonlSource::new(path)))
            }
        }
    }
}

impl RecordSource for DataSource {
    fn describe(&self) -> String {
        match self {
            Self::Sheets(source) => source.describe(),
            Self::Jsonl(source) => source.describe(),
        }
    }

    async fn fetch_table(&self) -> Result<DataTable, SourceError> {
        match self {
            Self::Sheets(source) => source.fetch_table().await,
            Self::Jsonl(source) => source.fetch_table().await,
        }
    }
}
