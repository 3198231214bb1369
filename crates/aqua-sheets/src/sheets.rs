//! Google Sheets record source.

use aqua_config::SheetsConfig;
use aqua_core::DataTable;

use crate::RecordSource;
use crate::credentials::ServiceAccountKey;
use crate::error::SourceError;
use crate::session::SheetSession;

/// Reads the configured worksheet through a fresh [`SheetSession`] on every
/// call.
#[derive(Debug, Clone)]
pub struct SheetsSource {
    config: SheetsConfig,
    key: ServiceAccountKey,
}

impl SheetsSource {
    /// # Errors
    ///
    /// Returns [`SourceError::Credentials`] if the service-account key is
    /// missing or malformed.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, SourceError> {
        Ok(Self {
            key: ServiceAccountKey::from_config(config)?,
            config: config.clone(),
        })
    }

    #[must_use]
    pub const fn new(config: SheetsConfig, key: ServiceAccountKey) -> Self {
        Self { config, key }
    }
}

impl RecordSource for SheetsSource {
    fn describe(&self) -> String {
        match &self.config.spreadsheet_id {
            Some(id) => format!("google sheet {id}"),
            None => format!("google sheet '{}'", self.config.spreadsheet_name),
        }
    }

    async fn fetch_table(&self) -> Result<DataTable, SourceError> {
        let session = SheetSession::open(&self.config, &self.key).await?;

        let spreadsheet_id = match &self.config.spreadsheet_id {
            Some(id) => id.clone(),
            None => {
                session
                    .resolve_spreadsheet_id(&self.config.spreadsheet_name)
                    .await?
            }
        };
        let worksheet = match &self.config.worksheet {
            Some(title) => title.clone(),
            None => session.first_worksheet_title(&spreadsheet_id).await?,
        };

        let table = session.read_table(&spreadsheet_id, &worksheet).await?;
        tracing::debug!(
            spreadsheet = %spreadsheet_id,
            worksheet = %worksheet,
            rows = table.len(),
            "read worksheet"
        );
        Ok(table)
    }
}
