use anyhow::Context;
use aqua_config::AquaConfig;
use aqua_sheets::DataSource;

use crate::cli::{CheckArgs, GlobalFlags};
use crate::dashboard::{self, RenderOptions};
use crate::pipeline;

/// `aquawatch check`: one fetch → score → render cycle. Unlike `watch`, a
/// failed cycle is an error exit.
pub async fn handle(args: &CheckArgs, config: &AquaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = DataSource::from_config(config).context("failed to configure data source")?;
    let snapshot = pipeline::run_cycle(&source)
        .await
        .context("refresh cycle failed")?;

    let options = RenderOptions::for_terminal(&config.display, args.no_animate, false, None);
    dashboard::show(&snapshot, flags.format, &options).await
}
