use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::identity::clients::{IdentityError, IdentityProvider, SignedInSession};
use crate::features::identity::model::AuthState;

/// Service for session operations: credential exchange on login and token
/// resolution on every gated request.
pub struct SessionService {
    provider: Arc<dyn IdentityProvider>,
}

impl SessionService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Exchange a credential pair for a session.
    ///
    /// `None` means the provider rejected the pair; an `Err` means the
    /// provider itself could not be consulted.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Option<SignedInSession>> {
        match self.provider.sign_in(email, password).await {
            Ok(session) => {
                tracing::info!("Session opened for {}", session.email);
                Ok(Some(session))
            }
            Err(IdentityError::InvalidCredentials) => {
                tracing::warn!("Rejected credentials for {}", email);
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Credential exchange failed: {}", e);
                Err(AppError::Identity(e))
            }
        }
    }

    /// Resolve a session token to an auth state.
    ///
    /// The transition happens exactly once per call; a stale token is the
    /// ordinary `Unauthenticated` state, a provider outage is an error.
    pub async fn authenticate(&self, token: &str) -> Result<AuthState> {
        match self.provider.lookup(token).await {
            Ok(Some(user)) => Ok(AuthState::Authenticated(user)),
            Ok(None) => Ok(AuthState::Unauthenticated),
            Err(e) => {
                tracing::error!("Session lookup failed: {}", e);
                Err(AppError::Identity(e))
            }
        }
    }
}
