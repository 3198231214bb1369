//! Refresh loop timing.

use serde::{Deserialize, Serialize};

/// Default refresh interval in seconds.
const fn default_interval_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshConfig {
    /// Seconds between the start of two refresh cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Stop after this many cycles. Runs forever when unset.
    #[serde(default)]
    pub limit: Option<u64>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            limit: None,
        }
    }
}
