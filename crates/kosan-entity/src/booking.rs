//! Booking entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kosan_core::types::{BookingId, RoomId, Rupiah, UserId};

use crate::duration::DurationType;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Persisted, awaiting payment confirmation.
    Pending,
    /// Paid and confirmed.
    Confirmed,
    /// Cancelled by the guest before confirmation.
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status holds its room interval.
    pub fn holds_room(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The row submitted to the booking store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Guest making the booking.
    pub user_id: UserId,
    /// Room being booked.
    pub room_id: RoomId,
    /// Check-in instant.
    pub start_time: DateTime<Utc>,
    /// Check-out instant.
    pub end_time: DateTime<Utc>,
    /// Duration tier the price was resolved for.
    pub duration_type: DurationType,
    /// Total price in rupiah.
    pub total_price: Rupiah,
    /// Initial status, always `pending` for new submissions.
    pub status: BookingStatus,
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookingRecord {
    /// Booking identifier.
    pub id: BookingId,
    /// Guest who made the booking.
    pub user_id: UserId,
    /// Booked room.
    pub room_id: RoomId,
    /// Check-in instant.
    pub start_time: DateTime<Utc>,
    /// Check-out instant.
    pub end_time: DateTime<Utc>,
    /// Duration tier.
    pub duration_type: DurationType,
    /// Total price in rupiah.
    pub total_price: Rupiah,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last modified.
    pub updated_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Whether this booking blocks `[start, end)` on its room.
    ///
    /// Intervals are half-open: a stay ending at 13:00 does not clash with
    /// one starting at 13:00.
    pub fn blocks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.status.holds_room() && self.start_time < end && start < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(status: BookingStatus) -> BookingRecord {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        BookingRecord {
            id: BookingId::new(),
            user_id: UserId::new(),
            room_id: RoomId::new(),
            start_time: start,
            end_time: start + chrono::Duration::hours(3),
            duration_type: DurationType::Hourly,
            total_price: Rupiah(45_000),
            status,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_blocks_overlapping_interval() {
        let booking = record(BookingStatus::Pending);
        let at = |h| Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap();

        assert!(booking.blocks(at(12), at(14)));
        assert!(booking.blocks(at(9), at(11)));
        assert!(!booking.blocks(at(13), at(15)));
        assert!(!booking.blocks(at(7), at(10)));
    }

    #[test]
    fn test_cancelled_booking_never_blocks() {
        let booking = record(BookingStatus::Cancelled);
        assert!(!booking.blocks(booking.start_time, booking.end_time));
    }
}
