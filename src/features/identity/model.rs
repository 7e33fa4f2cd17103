use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;

/// Staff member resolved from the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub uid: String,
    pub email: String,
}

/// Outcome of resolving a session token.
///
/// The third state of the gate - "checking" - is the in-flight resolution
/// itself: until it completes, no protected content is produced.
#[derive(Debug, Clone)]
pub enum AuthState {
    Authenticated(AuthenticatedUser),
    Unauthenticated,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
