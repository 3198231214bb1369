use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::{CheckArgs, Commands, ScoreArgs, WatchArgs};

/// Top-level CLI parser for the `aquawatch` binary.
#[derive(Debug, Parser)]
#[command(
    name = "aquawatch",
    version,
    about = "Live water contamination risk dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Color output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, ColorMode, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["aquawatch", "--format", "json", "--verbose", "check"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["aquawatch", "watch", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert_eq!(cli.color, ColorMode::Auto);
    }

    #[test]
    fn watch_accepts_interval_and_limit() {
        let cli = Cli::try_parse_from([
            "aquawatch",
            "watch",
            "--interval",
            "10",
            "--limit",
            "3",
            "--no-animate",
        ])
        .expect("cli should parse");

        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(args.interval, Some(10));
        assert_eq!(args.limit, Some(3));
        assert!(args.no_animate);
    }

    #[test]
    fn watch_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["aquawatch", "watch", "--interval", "0"]).is_err());
    }

    #[test]
    fn score_parses_measurements() {
        let cli = Cli::try_parse_from(["aquawatch", "score", "--ph", "9.0", "--tds", "600"])
            .expect("cli should parse");

        let Commands::Score(args) = cli.command else {
            panic!("expected score");
        };
        assert!((args.ph - 9.0).abs() < f64::EPSILON);
        assert!((args.tds - 600.0).abs() < f64::EPSILON);
        assert_eq!(args.location, "Unknown");
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["aquawatch", "--format", "xml", "check"]);
        assert!(parsed.is_err());
    }
}
