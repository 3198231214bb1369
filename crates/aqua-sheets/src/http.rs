//! Status handling for Google API and OAuth responses.
//!
//! Google reports failures as JSON: the Sheets and Drive APIs use
//! `{"error": {"code", "message", "status"}}`, the token endpoint uses
//! `{"error": "...", "error_description": "..."}`. Both are reduced to a
//! single human-readable message.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Value,
    #[serde(default)]
    error_description: Option<String>,
}

/// Pass successful responses through; map 429 to
/// [`SourceError::RateLimited`] and every other failure to
/// [`SourceError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    Err(SourceError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Best-effort message from an error body. Non-JSON bodies are returned
/// trimmed.
fn error_message(body: &str) -> String {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return body.trim().to_string();
    };

    match (envelope.error, envelope.error_description) {
        (Value::String(code), Some(description)) => format!("{code}: {description}"),
        (Value::String(code), None) => code,
        (Value::Object(detail), _) => {
            let message = detail.get("message").and_then(Value::as_str).unwrap_or_default();
            match detail.get("status").and_then(Value::as_str) {
                Some(status) if !message.is_empty() => format!("{status}: {message}"),
                Some(status) => status.to_string(),
                None => message.to_string(),
            }
        }
        (other, _) => other.to_string(),
    }
}
