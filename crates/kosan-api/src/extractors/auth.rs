//! `AuthUser` extractor: reads the user id forwarded by the identity gateway.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use kosan_core::error::AppError;
use kosan_core::types::UserId;
use kosan_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing x-user-id header"))?;

        let user_id: UserId = raw
            .trim()
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid x-user-id header"))?;

        Ok(AuthUser(RequestContext::new(user_id)))
    }
}
