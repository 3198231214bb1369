use anyhow::Context;
use aqua_config::AquaConfig;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// `aquawatch config`: print the effective configuration with credential
/// material masked.
pub fn handle(config: &AquaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let redacted = config.redacted();
    match flags.format {
        OutputFormat::Table => {
            let rendered =
                toml::to_string_pretty(&redacted).context("failed to render configuration as TOML")?;
            print!("{rendered}");
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => {
            output::output(&redacted, flags.format == OutputFormat::Json)
        }
    }
}
