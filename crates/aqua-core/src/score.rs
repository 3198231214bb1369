//! Two-factor contamination risk scoring.
//!
//! ```text
//! pH outside [6.5, 8.5]  → +50
//! TDS above 500 mg/L     → +50
//!
//! score < 30        → safe
//! 30 ≤ score < 60   → moderate_risk
//! score ≥ 60        → high_risk
//! ```
//!
//! Both range checks are inclusive: pH 6.5, pH 8.5 and TDS 500 are in range.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reading::Reading;

pub const PH_MIN: f64 = 6.5;
pub const PH_MAX: f64 = 8.5;
pub const TDS_MAX: f64 = 500.0;

/// Weight added by each failed check.
pub const FACTOR_WEIGHT: u8 = 50;

pub const MODERATE_THRESHOLD: u8 = 30;
pub const HIGH_THRESHOLD: u8 = 60;

/// Risk score for a pH/TDS pair. Always one of 0, 50 or 100.
#[must_use]
pub fn score(ph: f64, tds: f64) -> u8 {
    let mut total = 0;
    if ph < PH_MIN || ph > PH_MAX {
        total += FACTOR_WEIGHT;
    }
    if tds > TDS_MAX {
        total += FACTOR_WEIGHT;
    }
    total
}

/// Score a reading and classify it.
#[must_use]
pub fn assess(reading: &Reading) -> ScoreResult {
    ScoreResult::from_score(score(reading.ph, reading.tds))
}

/// Categorical verdict for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Safe,
    ModerateRisk,
    HighRisk,
}

impl Verdict {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score < MODERATE_THRESHOLD {
            Self::Safe
        } else if score < HIGH_THRESHOLD {
            Self::ModerateRisk
        } else {
            Self::HighRisk
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::ModerateRisk => "moderate_risk",
            Self::HighRisk => "high_risk",
        }
    }

    /// Human label, e.g. `Moderate Risk`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::ModerateRisk => "Moderate Risk",
            Self::HighRisk => "High Risk",
        }
    }

    /// One-line verdict shown on the dashboard.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Safe => "Safe: No significant contamination detected.",
            Self::ModerateRisk => "Moderate Risk: Some traces possible.",
            Self::HighRisk => "High Risk: Potential contamination detected!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub verdict: Verdict,
}

impl ScoreResult {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        Self {
            score,
            verdict: Verdict::from_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(7.0, 300.0, 0, Verdict::Safe)]
    #[case(9.0, 300.0, 50, Verdict::ModerateRisk)]
    #[case(9.0, 600.0, 100, Verdict::HighRisk)]
    #[case(5.0, 300.0, 50, Verdict::ModerateRisk)]
    #[case(7.0, 501.0, 50, Verdict::ModerateRisk)]
    #[case(6.5, 500.0, 0, Verdict::Safe)]
    #[case(8.5, 500.0, 0, Verdict::Safe)]
    #[case(6.49, 500.01, 100, Verdict::HighRisk)]
    fn scores_and_verdicts(
        #[case] ph: f64,
        #[case] tds: f64,
        #[case] expected: u8,
        #[case] verdict: Verdict,
    ) {
        let result = assess(&Reading::new(ph, tds, "test"));
        assert_eq!(result, ScoreResult { score: expected, verdict });
    }

    #[rstest]
    #[case(0, Verdict::Safe)]
    #[case(29, Verdict::Safe)]
    #[case(30, Verdict::ModerateRisk)]
    #[case(59, Verdict::ModerateRisk)]
    #[case(60, Verdict::HighRisk)]
    #[case(100, Verdict::HighRisk)]
    fn verdict_boundaries(#[case] score: u8, #[case] expected: Verdict) {
        assert_eq!(Verdict::from_score(score), expected);
    }

    #[test]
    fn default_reading_is_safe() {
        let result = assess(&Reading::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.verdict, Verdict::Safe);
    }

    #[test]
    fn verdict_labels_and_serialization() {
        assert_eq!(Verdict::ModerateRisk.to_string(), "Moderate Risk");
        assert_eq!(Verdict::HighRisk.label(), "High Risk");
        assert_eq!(
            serde_json::to_string(&Verdict::ModerateRisk).unwrap(),
            "\"moderate_risk\""
        );
        assert!(Verdict::Safe.message().starts_with("Safe"));
    }
}
