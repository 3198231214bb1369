use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Poll the data source and redraw the dashboard on a fixed interval.
    Watch(WatchArgs),
    /// Run a single fetch → score → render cycle.
    Check(CheckArgs),
    /// Score a pH/TDS pair without contacting a data source.
    Score(ScoreArgs),
    /// Print the effective configuration with credentials masked.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct WatchArgs {
    /// Seconds between refreshes (overrides `refresh.interval_secs`).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Stop after this many refresh cycles.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Draw the gauge at its final value without ramping.
    #[arg(long)]
    pub no_animate: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Draw the gauge at its final value without ramping.
    #[arg(long)]
    pub no_animate: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    /// pH of the sample.
    #[arg(long, allow_negative_numbers = true)]
    pub ph: f64,

    /// Total dissolved solids in mg/L.
    #[arg(long, allow_negative_numbers = true)]
    pub tds: f64,

    /// Sampling location shown alongside the result.
    #[arg(long, default_value = "Unknown")]
    pub location: String,
}
