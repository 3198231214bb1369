//! # aqua-config
//!
//! Layered configuration loading for aquawatch using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AQUAWATCH_*` prefix, `__` as separator)
//! 2. Secret-store overrides (same key names, fetched at startup)
//! 3. Project-level `.aquawatch/config.toml`
//! 4. User-level `~/.config/aquawatch/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AQUAWATCH_SHEETS__SPREADSHEET_NAME` -> `sheets.spreadsheet_name`,
//! `AQUAWATCH_REFRESH__INTERVAL_SECS` -> `refresh.interval_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use aqua_config::AquaConfig;
//!
//! let config = AquaConfig::load_with_dotenv().expect("config");
//! if config.sheets.is_configured() {
//!     println!("Spreadsheet: {}", config.sheets.spreadsheet_name);
//! }
//! ```

mod display;
mod error;
mod refresh;
mod sheets;
mod source;

pub use display::DisplayConfig;
pub use error::ConfigError;
pub use refresh::RefreshConfig;
pub use sheets::{DEFAULT_SPREADSHEET_NAME, SheetsConfig};
pub use source::{SourceConfig, SourceKind};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix shared by environment variables and secret-store keys.
pub const ENV_PREFIX: &str = "AQUAWATCH_";

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AquaConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AquaConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env_overrides(&[])
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load configuration with externally resolved `AQUAWATCH_*` values layered
    /// between the TOML files and the process environment.
    pub fn load_with_env_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with_overrides(overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain without external overrides.
    pub fn figment() -> Figment {
        Self::figment_with_overrides(&[])
    }

    fn figment_with_overrides(overrides: &[(String, String)]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".aquawatch/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        for (key, value) in overrides {
            if let Some(path) = override_key_path(key) {
                let value = override_value(&path, value);
                figment = figment.merge(Serialized::default(&path, value));
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values the refresh loop and renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh.interval_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.display.animation_step == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.animation_step".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.sheets.spreadsheet_name.trim().is_empty() && self.sheets.spreadsheet_id.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "sheets.spreadsheet_name".into(),
                reason: "must not be empty when no spreadsheet_id is set".into(),
            });
        }
        Ok(())
    }

    /// Require the section needed by the configured source.
    pub fn require_source(&self) -> Result<(), ConfigError> {
        match self.source.kind {
            SourceKind::Sheets if !self.sheets.is_configured() => Err(ConfigError::NotConfigured {
                section: "sheets".into(),
            }),
            SourceKind::Jsonl if self.source.jsonl_path.is_none() => {
                Err(ConfigError::NotConfigured {
                    section: "source.jsonl_path".into(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Copy with credential material masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.sheets.service_account_json.is_empty() {
            copy.sheets.service_account_json = REDACTED.to_string();
        }
        copy
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aquawatch").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

/// `AQUAWATCH_SHEETS__SPREADSHEET_ID` -> `sheets.spreadsheet_id`.
fn override_key_path(key: &str) -> Option<String> {
    let rest = key.strip_prefix(ENV_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_ascii_lowercase().replace("__", "."))
}

/// Config paths whose fields are numbers or booleans. Every other path is a
/// string field.
const TYPED_PATHS: &[&str] = &["refresh.", "display.", "sheets.timeout_secs"];

/// Secret values arrive as strings. Only values bound for numeric or boolean
/// fields are typed; a spreadsheet named `2024` stays a string.
fn override_value(path: &str, raw: &str) -> serde_json::Value {
    if !TYPED_PATHS.iter().any(|prefix| path.starts_with(prefix)) {
        return raw.into();
    }
    let trimmed = raw.trim();
    if let Ok(flag) = trimmed.parse::<bool>() {
        return flag.into();
    }
    if let Ok(number) = trimmed.parse::<u64>() {
        return number.into();
    }
    raw.into()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_loads() {
        let config = AquaConfig::default();
        assert!(!config.sheets.is_configured());
        assert_eq!(config.source.kind, SourceKind::Sheets);
        assert_eq!(config.refresh.interval_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: AquaConfig = AquaConfig::figment().extract()?;
            assert_eq!(config.sheets.spreadsheet_name, "Water Data");
            assert_eq!(config.display.animation_step, 2);
            Ok(())
        });
    }

    #[test]
    fn override_keys_map_to_nested_paths() {
        assert_eq!(
            override_key_path("AQUAWATCH_SHEETS__SERVICE_ACCOUNT_JSON").as_deref(),
            Some("sheets.service_account_json")
        );
        assert_eq!(override_key_path("OTHER_KEY"), None);
        assert_eq!(override_key_path("AQUAWATCH_"), None);
    }

    #[test]
    fn override_values_are_typed_by_field() {
        assert_eq!(override_value("refresh.interval_secs", "12"), serde_json::json!(12));
        assert_eq!(override_value("display.animate", "false"), serde_json::json!(false));
        assert_eq!(override_value("sheets.timeout_secs", " 30 "), serde_json::json!(30));
        assert_eq!(override_value("sheets.spreadsheet_id", "2024"), serde_json::json!("2024"));
        assert_eq!(override_value("sheets.worksheet", "true"), serde_json::json!("true"));
        assert_eq!(
            override_value("sheets.service_account_json", "{\"a\":1}"),
            serde_json::json!("{\"a\":1}")
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = AquaConfig::default();
        config.refresh.interval_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "refresh.interval_secs"
        ));
    }

    #[test]
    fn require_source_checks_the_selected_section() {
        let mut config = AquaConfig::default();
        assert!(matches!(
            config.require_source(),
            Err(ConfigError::NotConfigured { section }) if section == "sheets"
        ));

        config.source.kind = SourceKind::Jsonl;
        assert!(config.require_source().is_err());
        config.source.jsonl_path = Some("readings.jsonl".into());
        assert!(config.require_source().is_ok());
    }

    #[test]
    fn redacted_masks_the_service_account_key() {
        let mut config = AquaConfig::default();
        config.sheets.service_account_json = "{\"private_key\":\"secret\"}".into();
        assert_eq!(config.redacted().sheets.service_account_json, "<redacted>");
        assert!(AquaConfig::default().redacted().sheets.service_account_json.is_empty());
    }
}
