//! Gauge bands and the cosmetic 0 → score ramp.

use serde::{Deserialize, Serialize};

use crate::score::{HIGH_THRESHOLD, MODERATE_THRESHOLD, Verdict};

pub const GAUGE_MAX: u8 = 100;

/// Colored band of the gauge dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Green,
    Yellow,
    Red,
}

impl GaugeBand {
    /// Band a value falls into: `[0, 30)` green, `[30, 60)` yellow,
    /// `[60, 100]` red.
    #[must_use]
    pub const fn for_value(value: u8) -> Self {
        match Verdict::from_score(value) {
            Verdict::Safe => Self::Green,
            Verdict::ModerateRisk => Self::Yellow,
            Verdict::HighRisk => Self::Red,
        }
    }

    /// `(low, high)` bounds of the band on the dial. A value on a shared
    /// bound belongs to the higher band; `GAUGE_MAX` belongs to red.
    #[must_use]
    pub const fn span(self) -> (u8, u8) {
        match self {
            Self::Green => (0, MODERATE_THRESHOLD),
            Self::Yellow => (MODERATE_THRESHOLD, HIGH_THRESHOLD),
            Self::Red => (HIGH_THRESHOLD, GAUGE_MAX),
        }
    }
}

/// Values drawn while the gauge ramps up: `0, step, 2*step, ...` up to and
/// including the last value not above `score`.
///
/// A zero `step` yields only the final score.
pub fn gauge_frames(score: u8, step: u8) -> impl Iterator<Item = u8> {
    let step = usize::from(step);
    let frames: Vec<u8> = if step == 0 {
        vec![score]
    } else {
        (0..=score).step_by(step).collect()
    };
    frames.into_iter()
}
