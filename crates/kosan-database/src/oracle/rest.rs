//! Availability oracle reached over the hosted backend's HTTP RPC endpoint.
//!
//! The call is `POST {base_url}/rpc/{function}` with a JSON body of
//! `p_room_id`, `p_start_time` and `p_end_time` (RFC 3339) and the API key
//! in both the `apikey` and `Authorization: Bearer` headers. The response
//! body is a bare JSON boolean.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use kosan_core::config::RestOracleConfig;
use kosan_core::error::{AppError, ErrorKind};
use kosan_core::result::AppResult;
use kosan_core::traits::AvailabilityOracle;
use kosan_core::types::RoomId;

#[derive(Debug, Serialize)]
struct AvailabilityParams {
    p_room_id: RoomId,
    p_start_time: String,
    p_end_time: String,
}

/// HTTP client for the remote availability procedure.
#[derive(Debug, Clone)]
pub struct RestAvailabilityOracle {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl RestAvailabilityOracle {
    /// Build a client from configuration.
    pub fn new(config: &RestOracleConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build availability HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: rpc_endpoint(&config.base_url, &config.function),
            api_key: config.api_key.clone(),
        })
    }
}

fn rpc_endpoint(base_url: &str, function: &str) -> String {
    format!("{}/rpc/{}", base_url.trim_end_matches('/'), function)
}

#[async_trait]
impl AvailabilityOracle for RestAvailabilityOracle {
    async fn is_available(
        &self,
        room_id: RoomId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let params = AvailabilityParams {
            p_room_id: room_id,
            p_start_time: start.to_rfc3339_opts(SecondsFormat::Secs, true),
            p_end_time: end.to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Availability service unreachable",
                    e,
                )
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, "Availability service rejected credentials");
            return Err(AppError::external_service(format!(
                "Availability service rejected credentials ({status})"
            )));
        }
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Availability service returned {status}"
            )));
        }

        let available: bool = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Availability service returned a non-boolean body",
                e,
            )
        })?;

        debug!(room_id = %room_id, available, "Remote availability checked");
        Ok(available)
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            rpc_endpoint("https://example.co/rest/v1/", "check_room_availability"),
            "https://example.co/rest/v1/rpc/check_room_availability"
        );
    }

    #[test]
    fn test_params_shape() {
        let room_id = RoomId::new();
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let params = AvailabilityParams {
            p_room_id: room_id,
            p_start_time: start.to_rfc3339_opts(SecondsFormat::Secs, true),
            p_end_time: start.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["p_room_id"], room_id.to_string());
        assert_eq!(value["p_start_time"], "2025-03-01T10:00:00Z");
    }
}
