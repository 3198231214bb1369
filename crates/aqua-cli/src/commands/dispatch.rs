use aqua_config::AquaConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &AquaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Watch(args) => commands::watch::handle(&args, config, flags).await,
        Commands::Check(args) => commands::check::handle(&args, config, flags).await,
        Commands::Config => commands::config::handle(config, flags),
        Commands::Score(args) => commands::score::handle(&args, flags),
    }
}
