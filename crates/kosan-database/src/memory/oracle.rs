//! Fixed-answer availability oracle.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use kosan_core::result::AppResult;
use kosan_core::traits::AvailabilityOracle;
use kosan_core::types::RoomId;

/// Oracle that always gives the same answer and counts how often it was asked.
#[derive(Debug, Clone)]
pub struct StaticAvailabilityOracle {
    available: bool,
    calls: Arc<AtomicUsize>,
}

impl StaticAvailabilityOracle {
    /// An oracle that reports every interval as free.
    pub fn always_available() -> Self {
        Self::new(true)
    }

    /// An oracle that reports every interval as taken.
    pub fn never_available() -> Self {
        Self::new(false)
    }

    fn new(available: bool) -> Self {
        Self {
            available,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `is_available` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilityOracle for StaticAvailabilityOracle {
    async fn is_available(
        &self,
        _room_id: RoomId,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> AppResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.available)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
