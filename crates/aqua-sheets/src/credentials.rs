//! Google service-account credentials and the signed JWT assertion used for
//! the OAuth 2.0 JWT bearer grant.

use std::path::Path;

use aqua_config::SheetsConfig;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Read-only scopes needed to find a spreadsheet by name and read its values.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Assertion lifetime; Google caps it at one hour.
const ASSERTION_TTL_SECS: i64 = 3600;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account key file that the connector uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Credentials`] if the JSON is malformed or a
    /// required field is missing.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let mut key: Self = serde_json::from_str(json)
            .map_err(|e| SourceError::Credentials(format!("malformed key JSON: {e}")))?;
        if key.client_email.trim().is_empty() {
            return Err(SourceError::Credentials("client_email is empty".into()));
        }
        // Keys pasted into env files often carry escaped newlines.
        if !key.private_key.contains('\n') && key.private_key.contains("\\n") {
            key.private_key = key.private_key.replace("\\n", "\n");
        }
        Ok(key)
    }

    /// Read and parse a key file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Credentials`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SourceError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Resolve the key from config: inline JSON wins over the key file path.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Credentials`] when neither is configured or the
    /// configured key cannot be parsed.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, SourceError> {
        if !config.service_account_json.trim().is_empty() {
            return Self::from_json(&config.service_account_json);
        }
        match &config.service_account_path {
            Some(path) => Self::from_file(path),
            None => Err(SourceError::Credentials(
                "set sheets.service_account_json or sheets.service_account_path".into(),
            )),
        }
    }

    /// Claims for a token request issued at `now` (unix seconds).
    #[must_use]
    pub fn claims(&self, audience: &str, now: i64) -> AssertionClaims {
        AssertionClaims {
            iss: self.client_email.clone(),
            scope: SCOPES.join(" "),
            aud: audience.to_string(),
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        }
    }

    /// Sign the RS256 assertion for the token endpoint `audience`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Credentials`] if the private key is not a valid
    /// RSA PEM or signing fails.
    pub fn sign_assertion(&self, audience: &str, now: i64) -> Result<String, SourceError> {
        let encoding_key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| SourceError::Credentials(format!("invalid private key: {e}")))?;
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.private_key_id);

        jsonwebtoken::encode(&header, &self.claims(audience, now), &encoding_key)
            .map_err(|e| SourceError::Credentials(format!("failed to sign assertion: {e}")))
    }
}
