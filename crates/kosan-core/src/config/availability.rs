//! Availability oracle configuration.

use serde::{Deserialize, Serialize};

/// Which availability oracle implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityProvider {
    /// Call the `check_room_availability` SQL function on the booking database.
    #[default]
    Database,
    /// Call the hosted backend's RPC endpoint over HTTP.
    Rest,
}

/// Availability oracle configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    /// Selected provider.
    #[serde(default)]
    pub provider: AvailabilityProvider,
    /// Settings for the HTTP provider. Required when `provider = "rest"`.
    #[serde(default)]
    pub rest: Option<RestOracleConfig>,
}

/// HTTP RPC endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestOracleConfig {
    /// Base URL of the REST API, e.g. `https://<project>/rest/v1`.
    pub base_url: String,
    /// API key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Name of the remote procedure.
    #[serde(default = "default_function")]
    pub function: String,
    /// HTTP client timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_function() -> String {
    "check_room_availability".to_string()
}

fn default_timeout() -> u64 {
    5_000
}
