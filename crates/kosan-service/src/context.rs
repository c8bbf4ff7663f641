//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kosan_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from the identity forwarded by the gateway and
/// passed into service methods so every operation knows who is acting and
/// what "now" is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context stamped with the current time.
    pub fn new(user_id: UserId) -> Self {
        Self::at(user_id, Utc::now())
    }

    /// Creates a context with an explicit request time.
    pub fn at(user_id: UserId, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            request_time,
        }
    }
}
