//! Per-parameter safe ranges for the "Safe vs Unsafe" panel.
//!
//! Uses the same thresholds as the scorer. The TDS range has a lower bound of
//! zero, so a negative TDS shows as unsafe here even though the scorer only
//! checks the upper bound.

use serde::{Deserialize, Serialize};

use crate::reading::Reading;
use crate::score::{PH_MAX, PH_MIN, TDS_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterState {
    Safe,
    Unsafe,
}

impl ParameterState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Unsafe => "unsafe",
        }
    }
}

/// Inclusive `[low, high]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeRange {
    pub low: f64,
    pub high: f64,
}

impl SafeRange {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

pub const PH_RANGE: SafeRange = SafeRange {
    low: PH_MIN,
    high: PH_MAX,
};

pub const TDS_RANGE: SafeRange = SafeRange {
    low: 0.0,
    high: TDS_MAX,
};

/// One row of the status panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterStatus {
    pub parameter: String,
    pub value: f64,
    pub range: SafeRange,
    pub state: ParameterState,
}

impl ParameterStatus {
    #[must_use]
    pub fn check(parameter: &str, value: f64, range: SafeRange) -> Self {
        let state = if range.contains(value) {
            ParameterState::Safe
        } else {
            ParameterState::Unsafe
        };
        Self {
            parameter: parameter.to_string(),
            value,
            range,
            state,
        }
    }
}

/// Status of pH and TDS for a reading, in display order.
#[must_use]
pub fn parameter_statuses(reading: &Reading) -> Vec<ParameterStatus> {
    vec![
        ParameterStatus::check("pH", reading.ph, PH_RANGE),
        ParameterStatus::check("TDS (mg/L)", reading.tds, TDS_RANGE),
    ]
}
