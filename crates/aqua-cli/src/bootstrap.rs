use anyhow::Context;

/// Resolve configuration: `.env`, secret-store overrides, TOML files, env.
pub async fn load_config() -> anyhow::Result<aqua_config::AquaConfig> {
    load_dotenv()?;

    let env_overrides = match aqua_secrets::load_env_overrides().await {
        Ok(overrides) => overrides.into_values(),
        Err(error) => {
            if is_ci() {
                return Err(anyhow::anyhow!(
                    "failed to load configured secret backend in CI: {error}"
                ));
            }

            tracing::warn!(%error, "failed to load external secrets; continuing with local config");
            Vec::new()
        }
    };

    aqua_config::AquaConfig::load_with_env_overrides(&env_overrides)
        .context("failed to load aquawatch configuration")
}

fn is_ci() -> bool {
    std::env::var("CI")
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    for candidate in [cwd.join(".aquawatch").join(".env"), cwd.join(".env")] {
        if candidate.exists() {
            dotenvy::from_path(&candidate)
                .with_context(|| format!("failed to load dotenv file at {}", candidate.display()))?;
            return Ok(());
        }
    }

    Ok(())
}
