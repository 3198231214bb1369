//! # aqua-secrets
//!
//! Loads data-source credentials from an external secret store at startup.
//!
//! Secrets are stored under the same names as the environment variables they
//! stand in for (e.g. `AQUAWATCH_SHEETS__SERVICE_ACCOUNT_JSON`) and are handed
//! to `aqua-config` as overrides that sit below the process environment.

use infisical::{AuthMethod, Client, secrets::ListSecretsRequest};
use thiserror::Error;

const KEY_PREFIX: &str = "AQUAWATCH_";

const ENV_BACKEND: &str = "AQUAWATCH_SECRETS__BACKEND";
const ENV_INFISICAL_BASE_URL: &str = "AQUAWATCH_INFISICAL__BASE_URL";
const ENV_INFISICAL_CLIENT_ID: &str = "AQUAWATCH_INFISICAL__CLIENT_ID";
const ENV_INFISICAL_CLIENT_SECRET: &str = "AQUAWATCH_INFISICAL__CLIENT_SECRET";
const ENV_INFISICAL_PROJECT_ID: &str = "AQUAWATCH_INFISICAL__PROJECT_ID";
const ENV_INFISICAL_ENVIRONMENT: &str = "AQUAWATCH_INFISICAL__ENVIRONMENT";
const ENV_INFISICAL_PATH: &str = "AQUAWATCH_INFISICAL__PATH";

/// Result of resolving external secrets.
#[derive(Debug, Clone)]
pub enum SecretOverrides {
    Disabled,
    Values(Vec<(String, String)>),
}

impl SecretOverrides {
    /// Overrides as key/value pairs; empty when no backend is configured.
    #[must_use]
    pub fn into_values(self) -> Vec<(String, String)> {
        match self {
            Self::Disabled => Vec::new(),
            Self::Values(values) => values,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Backend {
    None,
    Infisical,
}

impl Backend {
    fn from_env() -> Result<Self, SecretError> {
        let raw = std::env::var(ENV_BACKEND).unwrap_or_default();
        let normalized = raw.trim().to_ascii_lowercase();

        match normalized.as_str() {
            "" | "none" | "off" | "disabled" => Ok(Self::None),
            "infisical" => Ok(Self::Infisical),
            value => Err(SecretError::UnsupportedBackend(value.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
struct InfisicalSettings {
    base_url: String,
    client_id: String,
    client_secret: String,
    project_id: String,
    environment: String,
    path: String,
}

impl InfisicalSettings {
    fn from_env() -> Result<Self, SecretError> {
        Ok(Self {
            base_url: std::env::var(ENV_INFISICAL_BASE_URL)
                .unwrap_or_else(|_| "https://app.infisical.com".to_string()),
            client_id: required_env(ENV_INFISICAL_CLIENT_ID)?,
            client_secret: required_env(ENV_INFISICAL_CLIENT_SECRET)?,
            project_id: required_env(ENV_INFISICAL_PROJECT_ID)?,
            environment: required_env(ENV_INFISICAL_ENVIRONMENT)?,
            path: std::env::var(ENV_INFISICAL_PATH).unwrap_or_else(|_| "/".to_string()),
        })
    }
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("unsupported secrets backend '{0}'")]
    UnsupportedBackend(String),
    #[error("required environment variable '{name}' is missing")]
    MissingEnvVar { name: &'static str },
    #[error("infisical error: {0}")]
    Infisical(#[from] infisical::InfisicalError),
}

fn required_env(name: &'static str) -> Result<String, SecretError> {
    std::env::var(name).map_err(|_| SecretError::MissingEnvVar { name })
}

/// Load `AQUAWATCH_*` key/value overrides from the configured backend.
pub async fn load_env_overrides() -> Result<SecretOverrides, SecretError> {
    match Backend::from_env()? {
        Backend::None => Ok(SecretOverrides::Disabled),
        Backend::Infisical => {
            let settings = InfisicalSettings::from_env()?;
            let values = load_from_infisical(&settings).await?;
            tracing::debug!(count = values.len(), "loaded secret overrides from infisical");
            Ok(SecretOverrides::Values(values))
        }
    }
}

async fn load_from_infisical(
    settings: &InfisicalSettings,
) -> Result<Vec<(String, String)>, SecretError> {
    let mut client = Client::builder()
        .base_url(&settings.base_url)
        .build()
        .await?;

    client
        .login(AuthMethod::new_universal_auth(
            &settings.client_id,
            &settings.client_secret,
        ))
        .await?;

    let request = ListSecretsRequest::builder(&settings.project_id, &settings.environment)
        .path(&settings.path)
        .recursive(true)
        .expand_secret_references(true)
        .build();

    let secrets = client
        .secrets()
        .list(request)
        .await?
        .into_iter()
        .map(|secret| (secret.secret_key, secret.secret_value));

    Ok(select_overrides(secrets))
}

/// Keep only application keys, sorted by name. Backend login settings never
/// pass through.
fn select_overrides(
    secrets: impl IntoIterator<Item = (String, String)>,
) -> Vec<(String, String)> {
    let mut values = secrets
        .into_iter()
        .filter(|(key, _)| key.starts_with(KEY_PREFIX))
        .filter(|(key, _)| {
            !key.starts_with("AQUAWATCH_SECRETS__") && !key.starts_with("AQUAWATCH_INFISICAL__")
        })
        .collect::<Vec<_>>();

    values.sort_by(|a, b| a.0.cmp(&b.0));
    values
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Backend, SecretError, SecretOverrides, select_overrides};

    #[test]
    fn backend_defaults_to_none_when_missing() {
        figment::Jail::expect_with(|_jail| {
            let backend = Backend::from_env().expect("backend should parse");
            assert_eq!(backend, Backend::None);
            Ok(())
        });
    }

    #[test]
    fn backend_parses_infisical() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AQUAWATCH_SECRETS__BACKEND", " Infisical ");
            let backend = Backend::from_env().expect("backend should parse");
            assert_eq!(backend, Backend::Infisical);
            Ok(())
        });
    }

    #[test]
    fn backend_rejects_unknown_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AQUAWATCH_SECRETS__BACKEND", "vault");
            let err = Backend::from_env().unwrap_err();
            assert!(matches!(err, SecretError::UnsupportedBackend(name) if name == "vault"));
            Ok(())
        });
    }

    #[test]
    fn infisical_settings_require_credentials() {
        figment::Jail::expect_with(|_jail| {
            let err = super::InfisicalSettings::from_env().unwrap_err();
            assert!(matches!(
                err,
                SecretError::MissingEnvVar {
                    name: "AQUAWATCH_INFISICAL__CLIENT_ID"
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn overrides_are_filtered_and_sorted() {
        let values = select_overrides(vec![
            ("AQUAWATCH_SHEETS__SPREADSHEET_ID".to_string(), "id".to_string()),
            ("DATABASE_URL".to_string(), "postgres://".to_string()),
            ("AQUAWATCH_INFISICAL__CLIENT_SECRET".to_string(), "s".to_string()),
            ("AQUAWATCH_REFRESH__INTERVAL_SECS".to_string(), "10".to_string()),
        ]);

        assert_eq!(
            values,
            vec![
                ("AQUAWATCH_REFRESH__INTERVAL_SECS".to_string(), "10".to_string()),
                ("AQUAWATCH_SHEETS__SPREADSHEET_ID".to_string(), "id".to_string()),
            ]
        );
    }

    #[test]
    fn disabled_overrides_are_empty() {
        assert!(SecretOverrides::Disabled.into_values().is_empty());
    }
}
