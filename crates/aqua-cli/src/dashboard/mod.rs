//! Terminal dashboard.
//!
//! Layout, top to bottom: title, latest reading, risk gauge, safe/unsafe
//! panel, awareness notes, footer, and the full table of recorded rows.

use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

use aqua_core::ranges::ParameterStatus;
use aqua_core::table::format_number;

use crate::cli::OutputFormat;
use crate::gauge::{self, GaugeOptions};
use crate::output;
use crate::output::table::{TableOptions, render_table};
use crate::pipeline::DashboardSnapshot;
use crate::ui;

const TITLE: &str = "Radioactive Water Contamination Detector";
const SUBTITLE: &str = "Water Safety | Live Sensor Data";

const AWARENESS: &[&str] = &[
    "Long-term exposure to contaminated water can increase cancer risk.",
    "High TDS or abnormal pH may indicate unsafe water.",
    "Always check your local water safety guidelines.",
];

/// How a cycle is drawn.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub gauge: GaugeOptions,
    pub table: TableOptions,
    pub show_table: bool,
    pub clear_screen: bool,
    /// Seconds until the next refresh, shown in the footer.
    pub next_refresh_secs: Option<u64>,
}

impl RenderOptions {
    /// Options for the current terminal. Animation and screen clearing only
    /// happen on an interactive terminal.
    #[must_use]
    pub fn for_terminal(
        display: &aqua_config::DisplayConfig,
        no_animate: bool,
        clear_screen: bool,
        next_refresh_secs: Option<u64>,
    ) -> Self {
        let prefs = ui::prefs();
        Self {
            gauge: gauge_options(display, prefs.interactive && !no_animate, prefs.color),
            table: output::table_options(),
            show_table: display.show_table,
            clear_screen: clear_screen && prefs.interactive,
            next_refresh_secs,
        }
    }
}

/// Print a cycle in the requested format: the dashboard for `table`, the
/// serialized snapshot otherwise.
pub async fn show(
    snapshot: &DashboardSnapshot,
    format: OutputFormat,
    options: &RenderOptions,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => present(snapshot, options).await,
        OutputFormat::Json | OutputFormat::Raw => {
            output::output(snapshot, format == OutputFormat::Json)
        }
    }
}

/// Print a failed cycle in the requested format.
pub fn show_failure(
    cycle: u64,
    error: &dyn std::fmt::Display,
    format: OutputFormat,
    options: &RenderOptions,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => present_failure(error, options),
        OutputFormat::Json | OutputFormat::Raw => output::output(
            &serde_json::json!({ "cycle": cycle, "error": error.to_string() }),
            format == OutputFormat::Json,
        ),
    }
}

/// Reading, verdict, static gauge and parameter panel, without any source
/// data. Used by `score`.
#[must_use]
pub fn render_summary(snapshot: &DashboardSnapshot, table: TableOptions) -> String {
    let mut out = render_header(snapshot, table.color);
    let _ = writeln!(out, "{}", section("Risk Gauge"));
    let _ = writeln!(out, "{}", gauge::render_static(snapshot.result.score, table.color));
    out.push_str(&render_status_panel(&snapshot.parameters, table));
    out
}

/// Print the whole dashboard for one cycle.
pub async fn present(snapshot: &DashboardSnapshot, options: &RenderOptions) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    if options.clear_screen {
        write!(stdout, "\u{1b}[2J\u{1b}[H")?;
    }
    write!(stdout, "{}", render_header(snapshot, options.table.color))?;
    writeln!(stdout, "{}", section("Risk Gauge"))?;
    stdout.flush()?;

    gauge::draw(snapshot.result.score, options.gauge).await;

    let mut rest = String::new();
    rest.push_str(&render_status_panel(&snapshot.parameters, options.table));
    rest.push_str(&render_awareness());
    rest.push_str(&render_footer(snapshot, options.next_refresh_secs));
    if options.show_table {
        rest.push_str(&render_data_table(snapshot, options.table));
    }
    write!(stdout, "{rest}")?;
    stdout.flush()?;
    Ok(())
}

/// Print a failed cycle. The refresh loop keeps going.
pub fn present_failure(error: &dyn std::fmt::Display, options: &RenderOptions) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    if options.clear_screen {
        write!(stdout, "\u{1b}[2J\u{1b}[H")?;
    }
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", section("Refresh Failed"));
    let _ = writeln!(out, "  {error}");
    if let Some(secs) = options.next_refresh_secs {
        let _ = writeln!(out, "  retrying in {secs}s");
    }
    write!(stdout, "{out}")?;
    stdout.flush()?;
    Ok(())
}

fn section(title: &str) -> String {
    format!("\n== {title} {}", "=".repeat(48usize.saturating_sub(title.len())))
}

fn render_header(snapshot: &DashboardSnapshot, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{SUBTITLE}");
    let _ = writeln!(out, "{}", section("Latest Reading"));
    let _ = writeln!(out, "  Location: {}", snapshot.reading.location);
    let _ = writeln!(out, "  pH:       {}", snapshot.reading.ph_display());
    let _ = writeln!(out, "  TDS:      {} mg/L", snapshot.reading.tds_display());

    let message = if color {
        let code = match snapshot.result.verdict {
            aqua_core::Verdict::Safe => "32",
            aqua_core::Verdict::ModerateRisk => "33",
            aqua_core::Verdict::HighRisk => "31",
        };
        format!("\u{1b}[1;{code}m{}\u{1b}[0m", snapshot.message)
    } else {
        snapshot.message.clone()
    };
    let _ = writeln!(out, "  {message}");
    out
}

fn render_status_panel(parameters: &[ParameterStatus], table: TableOptions) -> String {
    let rows = parameters
        .iter()
        .map(|status| {
            vec![
                status.parameter.clone(),
                format_number(status.value),
                format!(
                    "{} - {}",
                    format_number(status.range.low),
                    format_number(status.range.high)
                ),
                match status.state {
                    aqua_core::ranges::ParameterState::Safe => "Safe".to_string(),
                    aqua_core::ranges::ParameterState::Unsafe => "Unsafe".to_string(),
                },
            ]
        })
        .collect::<Vec<_>>();

    let mut out = String::new();
    let _ = writeln!(out, "{}", section("Safe vs Unsafe"));
    let _ = writeln!(
        out,
        "{}",
        render_table(&["parameter", "value", "safe range", "status"], &rows, table)
    );
    out
}

fn render_awareness() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section("Awareness"));
    for line in AWARENESS {
        let _ = writeln!(out, "  - {line}");
    }
    out
}

fn render_footer(snapshot: &DashboardSnapshot, next_refresh_secs: Option<u64>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "-".repeat(52));
    let _ = write!(
        out,
        "source: {} | updated {}",
        snapshot.source,
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(secs) = next_refresh_secs {
        let _ = write!(out, " | next refresh in {secs}s");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(52));
    out
}

fn render_data_table(snapshot: &DashboardSnapshot, table: TableOptions) -> String {
    let headers = snapshot
        .data
        .headers()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>();
    let rows = snapshot
        .data
        .rows()
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect::<Vec<Vec<String>>>();

    let mut out = String::new();
    let _ = writeln!(out, "{}", section("All Recorded Data"));
    if headers.is_empty() || rows.is_empty() {
        let _ = writeln!(out, "(no rows)");
    } else {
        let _ = writeln!(out, "{}", render_table(&headers, &rows, table));
    }
    out
}

/// Gauge settings for a cycle.
#[must_use]
pub fn gauge_options(display: &aqua_config::DisplayConfig, animate: bool, color: bool) -> GaugeOptions {
    GaugeOptions {
        animate: animate && display.animate,
        step: display.animation_step,
        delay: Duration::from_millis(display.animation_delay_ms),
        color,
    }
}

#[cfg(test)]
mod tests {
    use aqua_core::{CellValue, DataTable, Reading};
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn snapshot(ph: f64, tds: f64) -> DashboardSnapshot {
        let data = DataTable::new(
            vec!["pH".into(), "TDS".into(), "Location".into()],
            vec![
                vec![
                    CellValue::Number(7.0),
                    CellValue::Number(300.0),
                    CellValue::Text("Well A".into()),
                ],
                vec![
                    CellValue::Number(ph),
                    CellValue::Number(tds),
                    CellValue::Text("Well B".into()),
                ],
            ],
        );
        DashboardSnapshot::from_reading("test sheet", Reading::new(ph, tds, "Well B"), data)
    }

    #[test]
    fn header_shows_reading_and_verdict() {
        let header = render_header(&snapshot(9.0, 300.0), false);
        assert!(header.starts_with(TITLE));
        assert!(header.contains("Location: Well B"));
        assert!(header.contains("pH:       9.0"));
        assert!(header.contains("TDS:      300.0 mg/L"));
        assert!(header.contains("Moderate Risk: Some traces possible."));
    }

    #[test]
    fn status_panel_marks_each_parameter() {
        let panel = render_status_panel(&snapshot(9.0, 300.0).parameters, PLAIN);
        let ph_line = panel.lines().find(|l| l.starts_with("pH")).unwrap();
        let tds_line = panel.lines().find(|l| l.starts_with("TDS")).unwrap();
        assert!(ph_line.contains("6.5 - 8.5"));
        assert!(ph_line.ends_with("Unsafe"));
        assert!(tds_line.contains("0.0 - 500.0"));
        assert!(tds_line.ends_with("Safe"));
    }

    #[test]
    fn data_table_lists_every_row_in_order() {
        let table = render_data_table(&snapshot(9.0, 600.0), PLAIN);
        let rows: Vec<&str> = table
            .lines()
            .filter(|l| l.contains("Well"))
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Well A"));
        assert!(rows[1].contains("Well B"));
    }

    #[test]
    fn empty_data_table_says_so() {
        let dashboard = DashboardSnapshot::from_reading("x", Reading::default(), DataTable::default());
        assert!(render_data_table(&dashboard, PLAIN).contains("(no rows)"));
    }

    #[test]
    fn footer_mentions_next_refresh() {
        let footer = render_footer(&snapshot(7.0, 300.0), Some(5));
        assert!(footer.contains("source: test sheet"));
        assert!(footer.contains("next refresh in 5s"));
        assert!(!render_footer(&snapshot(7.0, 300.0), None).contains("next refresh"));
    }

    #[test]
    fn summary_has_gauge_but_no_source_data() {
        let summary = render_summary(&snapshot(9.0, 600.0), PLAIN);
        assert!(summary.contains("High Risk: Potential contamination detected!"));
        assert!(summary.contains("100/100 Risk Score %"));
        assert!(summary.contains("Safe vs Unsafe"));
        assert!(!summary.contains("All Recorded Data"));
        assert!(!summary.contains("Well A"));
    }

    #[test]
    fn awareness_block_is_static() {
        let block = render_awareness();
        assert_eq!(block.lines().filter(|l| l.starts_with("  - ")).count(), 3);
    }

    #[test]
    fn animation_requires_both_terminal_and_config() {
        let mut display = aqua_config::DisplayConfig::default();
        assert!(gauge_options(&display, true, false).animate);
        assert!(!gauge_options(&display, false, false).animate);
        display.animate = false;
        assert!(!gauge_options(&display, true, false).animate);
        assert_eq!(gauge_options(&display, true, false).delay, Duration::from_millis(20));
    }
}
