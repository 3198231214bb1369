use std::time::Duration;

use aqua_core::gauge::{GAUGE_MAX, GaugeBand, gauge_frames};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const GAUGE_WIDTH: usize = 40;
const GAUGE_LABEL: &str = "Risk Score %";

#[derive(Clone, Copy, Debug)]
pub struct GaugeOptions {
    pub animate: bool,
    pub step: u8,
    pub delay: Duration,
    pub color: bool,
}

/// Draw the gauge on stdout, ramping it from 0 to `score` when animated.
pub async fn draw(score: u8, options: GaugeOptions) {
    if !options.animate {
        println!("{}", render_static(score, options.color));
        println!("{}", legend());
        return;
    }

    let bar = ProgressBar::with_draw_target(Some(u64::from(GAUGE_MAX)), ProgressDrawTarget::stdout());
    bar.set_style(
        ProgressStyle::with_template(&bar_template(score, options.color))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    bar.set_message(GAUGE_LABEL);

    for value in gauge_frames(score, options.step) {
        bar.set_position(u64::from(value));
        tokio::time::sleep(options.delay).await;
    }
    bar.finish();
    println!("{}", legend());
}

fn band_color(band: GaugeBand) -> &'static str {
    match band {
        GaugeBand::Green => "green",
        GaugeBand::Yellow => "yellow",
        GaugeBand::Red => "red",
    }
}

fn ansi_code(band: GaugeBand) -> &'static str {
    match band {
        GaugeBand::Green => "32",
        GaugeBand::Yellow => "33",
        GaugeBand::Red => "31",
    }
}

/// The bar color follows the final score, not the current frame.
fn bar_template(score: u8, color: bool) -> String {
    if color {
        let color = band_color(GaugeBand::for_value(score));
        format!("{{bar:{GAUGE_WIDTH}.{color}/white}} {{pos:>3}}/{{len}} {{msg}}")
    } else {
        format!("{{bar:{GAUGE_WIDTH}}} {{pos:>3}}/{{len}} {{msg}}")
    }
}

/// Single-frame gauge, e.g. `██████████░░░…  50/100 Risk Score %`.
#[must_use]
pub fn render_static(score: u8, color: bool) -> String {
    let score = score.min(GAUGE_MAX);
    let filled = usize::from(score) * GAUGE_WIDTH / usize::from(GAUGE_MAX);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled));
    let bar = if color {
        format!("\u{1b}[{}m{bar}\u{1b}[0m", ansi_code(GaugeBand::for_value(score)))
    } else {
        bar
    };
    format!("{bar} {score:>3}/{GAUGE_MAX} {GAUGE_LABEL}")
}

fn legend() -> String {
    [GaugeBand::Green, GaugeBand::Yellow, GaugeBand::Red]
        .iter()
        .map(|band| {
            let (low, high) = band.span();
            format!("{low}-{high} {}", band_color(*band))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn static_gauge_fills_proportionally() {
        let half = render_static(50, false);
        assert_eq!(half.chars().filter(|c| *c == '█').count(), 20);
        assert!(half.ends_with(" 50/100 Risk Score %"));

        let empty = render_static(0, false);
        assert_eq!(empty.chars().filter(|c| *c == '░').count(), 40);
    }

    #[test]
    fn colored_gauge_uses_band_of_score() {
        assert!(render_static(100, true).starts_with("\u{1b}[31m"));
        assert!(render_static(50, true).starts_with("\u{1b}[33m"));
        assert!(render_static(0, true).starts_with("\u{1b}[32m"));
    }

    #[test]
    fn bar_template_is_valid_for_indicatif() {
        for score in [0, 50, 100] {
            for color in [true, false] {
                assert!(ProgressStyle::with_template(&bar_template(score, color)).is_ok());
            }
        }
        assert!(bar_template(100, true).contains(".red/white"));
    }

    #[test]
    fn legend_lists_all_bands() {
        assert_eq!(legend(), "0-30 green | 30-60 yellow | 60-100 red");
    }

    #[tokio::test]
    async fn static_draw_does_not_block() {
        draw(
            50,
            GaugeOptions {
                animate: false,
                step: 2,
                delay: Duration::from_millis(20),
                color: false,
            },
        )
        .await;
    }
}
