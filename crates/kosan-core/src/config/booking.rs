//! Booking quote and submission configuration.

use serde::{Deserialize, Serialize};

/// Settings for the booking submission flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Upper bound on a single availability oracle call, in milliseconds.
    #[serde(default = "default_call_timeout")]
    pub availability_timeout_ms: u64,
    /// Upper bound on a single booking store insert, in milliseconds.
    #[serde(default = "default_call_timeout")]
    pub persistence_timeout_ms: u64,
    /// Replacement duration catalog. `None` keeps the built-in catalog.
    #[serde(default)]
    pub durations: Option<Vec<DurationOptionConfig>>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            availability_timeout_ms: default_call_timeout(),
            persistence_timeout_ms: default_call_timeout(),
            durations: None,
        }
    }
}

/// One configured duration option, validated when the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationOptionConfig {
    /// Display label, e.g. `"6 Jam"`.
    pub label: String,
    /// Magnitude in hours (ignored for date arithmetic on monthly options).
    pub value: u32,
    /// `"hourly"`, `"daily"` or `"monthly"`.
    pub kind: String,
    /// Price table key.
    pub key: String,
}

fn default_call_timeout() -> u64 {
    5_000
}
