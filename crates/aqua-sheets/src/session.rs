//! Authorized, short-lived connection to the Google Sheets and Drive APIs.
//!
//! A [`SheetSession`] is opened at the start of a refresh cycle and dropped
//! at its end; nothing about it outlives the cycle.

use std::time::{Duration, Instant};

use aqua_config::SheetsConfig;
use aqua_core::{CellValue, DataTable};
use serde::Deserialize;

use crate::credentials::ServiceAccountKey;
use crate::error::SourceError;
use crate::http::check_response;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<WorksheetMeta>,
}

#[derive(Deserialize)]
struct WorksheetMeta {
    properties: WorksheetProperties,
}

#[derive(Deserialize)]
struct WorksheetProperties {
    title: String,
    #[serde(default)]
    index: u32,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

pub struct SheetSession {
    http: reqwest::Client,
    access_token: String,
    sheets_api_base: String,
    drive_api_base: String,
    opened_at: Instant,
}

impl SheetSession {
    /// Exchange a signed service-account assertion for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Auth`] when the token endpoint rejects the
    /// assertion, [`SourceError::Credentials`] when the key cannot sign, and
    /// [`SourceError::Http`] on transport failure.
    pub async fn open(config: &SheetsConfig, key: &ServiceAccountKey) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("aquawatch/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let token_url = config.token_url.as_deref().unwrap_or(&key.token_uri);
        let assertion = key.sign_assertion(token_url, chrono::Utc::now().timestamp())?;

        let resp = http
            .post(token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let resp = match check_response(resp).await {
            Ok(resp) => resp,
            Err(SourceError::Api { status, message }) => {
                return Err(SourceError::Auth(format!(
                    "token endpoint returned {status}: {message}"
                )));
            }
            Err(other) => return Err(other),
        };
        let token: TokenResponse = resp.json().await?;

        tracing::debug!(
            client = %key.client_email,
            expires_in = token.expires_in,
            "opened sheet session"
        );

        Ok(Self {
            http,
            access_token: token.access_token,
            sheets_api_base: config.sheets_api_base.trim_end_matches('/').to_string(),
            drive_api_base: config.drive_api_base.trim_end_matches('/').to_string(),
            opened_at: Instant::now(),
        })
    }

    /// Find the id of the spreadsheet titled `name` among files shared with
    /// the service account.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::SpreadsheetNotFound`] when nothing matches.
    pub async fn resolve_spreadsheet_id(&self, name: &str) -> Result<String, SourceError> {
        let url = format!("{}/files", self.drive_api_base);
        let query = drive_query(name);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "1"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;
        let list: DriveFileList = check_response(resp).await?.json().await?;

        first_file_id(list).ok_or_else(|| SourceError::SpreadsheetNotFound(name.to_string()))
    }

    /// Title of the first worksheet (lowest index).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] if the spreadsheet has no worksheets.
    pub async fn first_worksheet_title(&self, spreadsheet_id: &str) -> Result<String, SourceError> {
        let url = format!(
            "{}/spreadsheets/{}",
            self.sheets_api_base,
            urlencoding::encode(spreadsheet_id)
        );
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("fields", "sheets.properties(title,index)")])
            .send()
            .await?;
        let meta: SpreadsheetMeta = check_response(resp).await?.json().await?;

        first_worksheet(meta)
            .ok_or_else(|| SourceError::Parse(format!("spreadsheet {spreadsheet_id} has no worksheets")))
    }

    /// Every populated row of `worksheet`, header row first.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on HTTP or API failure.
    pub async fn read_table(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
    ) -> Result<DataTable, SourceError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.sheets_api_base,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(&a1_sheet_range(worksheet))
        );
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("valueRenderOption", "UNFORMATTED_VALUE"),
                ("majorDimension", "ROWS"),
            ])
            .send()
            .await?;
        let range: ValueRange = check_response(resp).await?.json().await?;

        Ok(values_to_table(range))
    }
}

impl Drop for SheetSession {
    fn drop(&mut self) {
        tracing::debug!(
            elapsed_ms = self.opened_at.elapsed().as_millis(),
            "released sheet session"
        );
    }
}

/// Drive search expression for a spreadsheet with an exact title.
fn drive_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{escaped}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false")
}

/// A1 range covering a whole worksheet: `'Sheet 1'`.
fn a1_sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn first_file_id(list: DriveFileList) -> Option<String> {
    list.files.into_iter().next().map(|file| file.id)
}

fn first_worksheet(meta: SpreadsheetMeta) -> Option<String> {
    meta.sheets
        .into_iter()
        .min_by_key(|sheet| sheet.properties.index)
        .map(|sheet| sheet.properties.title)
}

fn values_to_table(range: ValueRange) -> DataTable {
    let grid = range
        .values
        .iter()
        .map(|row| row.iter().map(CellValue::from_json).collect())
        .collect();
    DataTable::from_grid(grid)
}
