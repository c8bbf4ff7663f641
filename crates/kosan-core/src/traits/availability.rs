//! Availability oracle trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::id::RoomId;

/// External authority deciding whether a room is free for an interval.
///
/// The answer is advisory: it is not a lock. Callers that persist a
/// booking afterwards must rely on the booking store to reject an
/// overlapping insert that slipped in between the check and the write.
#[async_trait]
pub trait AvailabilityOracle: Send + Sync + 'static {
    /// Returns `true` if `room_id` has no live booking overlapping
    /// the half-open interval `[start, end)`.
    ///
    /// Transport and authorization failures are reported as `Err`,
    /// never as `Ok(false)`.
    async fn is_available(
        &self,
        room_id: RoomId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
