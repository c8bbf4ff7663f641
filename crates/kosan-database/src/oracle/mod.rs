//! Availability oracle implementations and provider selection.

pub mod rest;
pub mod sql;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use kosan_core::config::{AvailabilityConfig, AvailabilityProvider};
use kosan_core::error::AppError;
use kosan_core::traits::AvailabilityOracle;

pub use rest::RestAvailabilityOracle;
pub use sql::SqlAvailabilityOracle;

/// Build the oracle selected by configuration.
pub fn build_oracle(
    config: &AvailabilityConfig,
    pool: &PgPool,
) -> Result<Arc<dyn AvailabilityOracle>, AppError> {
    let oracle: Arc<dyn AvailabilityOracle> = match config.provider {
        AvailabilityProvider::Database => Arc::new(SqlAvailabilityOracle::new(pool.clone())),
        AvailabilityProvider::Rest => {
            let rest = config.rest.as_ref().ok_or_else(|| {
                AppError::configuration("availability.rest is required when provider = \"rest\"")
            })?;
            Arc::new(RestAvailabilityOracle::new(rest)?)
        }
    };

    info!(oracle = oracle.name(), "Availability oracle initialized");
    Ok(oracle)
}
