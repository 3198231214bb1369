//! Google Sheets connection settings.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Spreadsheet opened when no id is configured.
pub const DEFAULT_SPREADSHEET_NAME: &str = "Water Data";

fn default_spreadsheet_name() -> String {
    DEFAULT_SPREADSHEET_NAME.to_string()
}

fn default_sheets_api_base() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_drive_api_base() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

/// Scalar that belongs in a string field. Environment values such as
/// `AQUAWATCH_SHEETS__SPREADSHEET_ID=2024` are parsed as numbers before they
/// reach the struct.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(String::from))
}

/// Default HTTP timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// Spreadsheet title, resolved through the Drive API.
    #[serde(default = "default_spreadsheet_name", deserialize_with = "scalar_string")]
    pub spreadsheet_name: String,

    /// Spreadsheet id. Skips the name lookup when set.
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub spreadsheet_id: Option<String>,

    /// Worksheet title. The first worksheet is used when unset.
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub worksheet: Option<String>,

    /// Service-account key JSON, usually injected from the secret store.
    #[serde(default)]
    pub service_account_json: String,

    /// Path to a service-account key file.
    #[serde(default)]
    pub service_account_path: Option<PathBuf>,

    /// OAuth token endpoint override. The key's `token_uri` is used when unset.
    #[serde(default)]
    pub token_url: Option<String>,

    #[serde(default = "default_sheets_api_base")]
    pub sheets_api_base: String,

    #[serde(default = "default_drive_api_base")]
    pub drive_api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_name: default_spreadsheet_name(),
            spreadsheet_id: None,
            worksheet: None,
            service_account_json: String::new(),
            service_account_path: None,
            token_url: None,
            sheets_api_base: default_sheets_api_base(),
            drive_api_base: default_drive_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SheetsConfig {
    /// Check if service-account credentials are available.
    pub fn is_configured(&self) -> bool {
        !self.service_account_json.trim().is_empty() || self.service_account_path.is_some()
    }
}
