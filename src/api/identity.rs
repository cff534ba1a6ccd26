//! Request identity extraction
//!
//! The authentication transport (magic link / one-time code) lives outside
//! this service; by the time a request arrives, the session token in the
//! Authorization header carries the authenticated user id. Absent or
//! unparseable tokens resolve to Anonymous rather than rejecting the
//! request, since most read operations degrade gracefully for anonymous
//! callers.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use uuid::Uuid;

use crate::models::Identity;

/// Extractor resolving the caller's identity from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| Uuid::parse_str(token.trim()).ok())
            .map(Identity::User)
            .unwrap_or(Identity::Anonymous);

        Ok(CurrentIdentity(identity))
    }
}
