//! Which tabular source feeds the dashboard.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Google Sheets via a service account.
    #[default]
    Sheets,
    /// Local JSON Lines file, one object per row.
    Jsonl,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Path of the JSONL file when `kind = "jsonl"`.
    #[serde(default)]
    pub jsonl_path: Option<PathBuf>,
}
