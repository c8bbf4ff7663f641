//! State machine for a single booking submission attempt.
//!
//! ```text
//! Idle -> CheckingAvailability -> Unavailable
//!                              -> Failed
//!                              -> Available -> Persisting -> Unavailable
//!                                                         -> Failed
//!                                                         -> Persisted
//! ```
//!
//! No intermediate state is resumable; a failed attempt starts over at
//! `Idle` with a fresh tracker.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use kosan_core::types::RoomId;

/// Where a submission attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing has been called yet.
    Idle,
    /// Waiting for the availability oracle.
    CheckingAvailability,
    /// The oracle reported the interval as free.
    Available,
    /// Waiting for the booking store.
    Persisting,
    /// The booking was stored.
    Persisted,
    /// The room is taken for the requested interval.
    Unavailable,
    /// A collaborator failed or timed out.
    Failed,
}

impl SubmissionState {
    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, CheckingAvailability)
                | (CheckingAvailability, Available)
                | (CheckingAvailability, Unavailable)
                | (CheckingAvailability, Failed)
                | (Available, Persisting)
                | (Persisting, Persisted)
                | (Persisting, Unavailable)
                | (Persisting, Failed)
        )
    }

    /// Whether the attempt is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Persisted | Self::Unavailable | Self::Failed)
    }

    /// Return the state as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CheckingAvailability => "checking_availability",
            Self::Available => "available",
            Self::Persisting => "persisting",
            Self::Persisted => "persisted",
            Self::Unavailable => "unavailable",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks the state of one submission attempt.
#[derive(Debug)]
pub(crate) struct SubmissionAttempt {
    room_id: RoomId,
    state: SubmissionState,
}

impl SubmissionAttempt {
    pub(crate) fn start(room_id: RoomId) -> Self {
        Self {
            room_id,
            state: SubmissionState::Idle,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SubmissionState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal submission transition {} -> {}",
            self.state,
            next
        );
        debug!(
            room_id = %self.room_id,
            from = %self.state,
            to = %next,
            "Booking submission transition"
        );
        self.state = next;
    }
}
