//! Dashboard rendering options.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

const fn default_animation_step() -> u8 {
    2
}

const fn default_animation_delay_ms() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Ramp the gauge from 0 up to the score.
    #[serde(default = "default_true")]
    pub animate: bool,

    #[serde(default = "default_animation_step")]
    pub animation_step: u8,

    /// Pause between two gauge frames.
    #[serde(default = "default_animation_delay_ms")]
    pub animation_delay_ms: u64,

    /// Print every recorded row under the dashboard.
    #[serde(default = "default_true")]
    pub show_table: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            animate: true,
            animation_step: default_animation_step(),
            animation_delay_ms: default_animation_delay_ms(),
            show_table: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = DisplayConfig::default();
        assert!(config.animate);
        assert_eq!(config.animation_step, 2);
        assert_eq!(config.animation_delay_ms, 20);
        assert!(config.show_table);
    }
}
