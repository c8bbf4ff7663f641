//! Booking submission errors.

use thiserror::Error;

use kosan_core::error::{AppError, ErrorKind};

use crate::quote::QuoteRejection;

/// Why a booking submission did not produce a pending booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The quote was built from missing or unparseable input.
    #[error("Data tidak lengkap")]
    IncompleteInput,
    /// The selected duration has no bookable price.
    #[error("Duration {label} is not available for this property")]
    DurationUnavailable {
        /// Label of the rejected duration option.
        label: String,
    },
    /// The availability oracle failed or did not answer in time.
    #[error("Availability check failed: {0}")]
    AvailabilityCheckFailed(String),
    /// The room is already booked for an overlapping interval.
    #[error("Room is not available for the selected time")]
    RoomUnavailable,
    /// The booking store failed or did not answer in time.
    #[error("Failed to save booking: {0}")]
    PersistenceFailed(String),
}

impl From<QuoteRejection> for BookingError {
    fn from(rejection: QuoteRejection) -> Self {
        match rejection {
            QuoteRejection::IncompleteInput => Self::IncompleteInput,
            QuoteRejection::DurationUnavailable { label } => Self::DurationUnavailable { label },
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let kind = match &err {
            BookingError::IncompleteInput | BookingError::DurationUnavailable { .. } => {
                ErrorKind::Validation
            }
            BookingError::RoomUnavailable => ErrorKind::Conflict,
            BookingError::AvailabilityCheckFailed(_) => ErrorKind::ExternalService,
            BookingError::PersistenceFailed(_) => ErrorKind::Database,
        };
        AppError::new(kind, err.to_string())
    }
}
