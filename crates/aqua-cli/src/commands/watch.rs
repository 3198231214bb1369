//! Refresh driver: fetch → score → render on a fixed interval.

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use aqua_config::AquaConfig;
use aqua_sheets::{DataSource, RecordSource, SourceError};
use tokio::time::MissedTickBehavior;

use crate::cli::{GlobalFlags, OutputFormat, WatchArgs};
use crate::dashboard::{self, RenderOptions};
use crate::pipeline::{self, DashboardSnapshot};

/// Receives the outcome of every cycle.
trait CycleSink {
    async fn snapshot(&mut self, cycle: u64, snapshot: &DashboardSnapshot) -> anyhow::Result<()>;

    fn failure(&mut self, cycle: u64, error: &SourceError) -> anyhow::Result<()>;
}

struct TerminalSink {
    format: OutputFormat,
    options: RenderOptions,
}

impl CycleSink for TerminalSink {
    async fn snapshot(&mut self, _cycle: u64, snapshot: &DashboardSnapshot) -> anyhow::Result<()> {
        dashboard::show(snapshot, self.format, &self.options).await
    }

    fn failure(&mut self, cycle: u64, error: &SourceError) -> anyhow::Result<()> {
        dashboard::show_failure(cycle, error, self.format, &self.options)
    }
}

/// `aquawatch watch`: redraw until Ctrl-C or the cycle limit.
pub async fn handle(args: &WatchArgs, config: &AquaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = DataSource::from_config(config).context("failed to configure data source")?;
    let interval_secs = args.interval.unwrap_or(config.refresh.interval_secs);
    let limit = args.limit.or(config.refresh.limit);

    tracing::info!(
        source = %source.describe(),
        interval_secs,
        limit = ?limit,
        "starting refresh loop"
    );

    let mut sink = TerminalSink {
        format: flags.format,
        options: RenderOptions::for_terminal(&config.display, args.no_animate, true, Some(interval_secs)),
    };
    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let cycles = run_loop(&source, Duration::from_secs(interval_secs), limit, &mut sink, shutdown).await?;
    tracing::info!(cycles, "refresh loop stopped");
    Ok(())
}

/// Run cycles until `shutdown` resolves or `limit` cycles have completed.
/// Returns the number of cycles started.
async fn run_loop<S, K, F>(
    source: &S,
    interval: Duration,
    limit: Option<u64>,
    sink: &mut K,
    shutdown: F,
) -> anyhow::Result<u64>
where
    S: RecordSource + Sync,
    K: CycleSink,
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut cycle = 0u64;
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        cycle += 1;
        tracing::debug!(cycle, "refresh cycle started");
        let outcome = tokio::select! {
            biased;
            () = &mut shutdown => break,
            outcome = pipeline::run_cycle(source) => outcome,
        };

        match outcome {
            Ok(snapshot) => {
                tokio::select! {
                    biased;
                    () = &mut shutdown => break,
                    shown = sink.snapshot(cycle, &snapshot) => shown?,
                }
            }
            Err(error) => {
                tracing::error!(cycle, %error, "refresh cycle failed");
                sink.failure(cycle, &error)?;
            }
        }

        if limit.is_some_and(|limit| cycle >= limit) {
            break;
        }
    }

    Ok(cycle)
}
