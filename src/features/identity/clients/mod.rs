mod firebase_auth_client;

pub use firebase_auth_client::FirebaseAuthClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::features::identity::model::AuthenticatedUser;

/// Session material returned by a successful credential exchange.
#[derive(Debug, Clone)]
pub struct SignedInSession {
    pub id_token: String,
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("identity request failed: {0}")]
    Request(String),

    #[error("identity provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode identity response: {0}")]
    Decode(String),
}

/// The identity provider seen through its two operations this system uses.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an email/password pair for a session token.
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<SignedInSession, IdentityError>;

    /// Resolve a session token to its user, or `None` if the token is no
    /// longer valid.
    async fn lookup(&self, id_token: &str) -> Result<Option<AuthenticatedUser>, IdentityError>;
}
