use aqua_core::{DataTable, Reading};

use crate::cli::{GlobalFlags, OutputFormat, ScoreArgs};
use crate::dashboard;
use crate::output;
use crate::pipeline::DashboardSnapshot;

/// `aquawatch score`: run the scorer on a pH/TDS pair.
pub fn handle(args: &ScoreArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = snapshot_for(args);

    match flags.format {
        OutputFormat::Table => {
            print!("{}", dashboard::render_summary(&snapshot, output::table_options()));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => {
            output::output(&snapshot, flags.format == OutputFormat::Json)
        }
    }
}

fn snapshot_for(args: &ScoreArgs) -> DashboardSnapshot {
    let reading = Reading::new(args.ph, args.tds, args.location.clone());
    DashboardSnapshot::from_reading("manual", reading, DataTable::default())
}

#[cfg(test)]
mod tests {
    use aqua_core::Verdict;
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(ph: f64, tds: f64) -> ScoreArgs {
        ScoreArgs {
            ph,
            tds,
            location: "Unknown".into(),
        }
    }

    #[test]
    fn scores_without_a_data_source() {
        let cases = [
            (7.0, 300.0, 0, Verdict::Safe),
            (9.0, 300.0, 50, Verdict::ModerateRisk),
            (9.0, 600.0, 100, Verdict::HighRisk),
        ];
        for (ph, tds, score, verdict) in cases {
            let snapshot = snapshot_for(&args(ph, tds));
            assert_eq!(snapshot.result.score, score);
            assert_eq!(snapshot.result.verdict, verdict);
            assert_eq!(snapshot.source, "manual");
            assert!(snapshot.data.is_empty());
        }
    }

    #[test]
    fn json_output_carries_parameters() {
        let snapshot = snapshot_for(&args(6.4, 500.0));
        let rendered = output::render(&snapshot, false).expect("render");
        let json: serde_json::Value = serde_json::from_str(&rendered).expect("json");

        assert_eq!(json["parameters"][0]["state"], "unsafe");
        assert_eq!(json["parameters"][1]["state"], "safe");
        assert_eq!(json["reading"]["location"], "Unknown");
    }
}
