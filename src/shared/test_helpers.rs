#[cfg(test)]
use crate::features::identity::clients::{IdentityError, IdentityProvider, SignedInSession};

#[cfg(test)]
use crate::features::identity::model::AuthenticatedUser;

#[cfg(test)]
use crate::modules::store::{Document, DocumentStore, StoreError};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
pub fn staff_user() -> AuthenticatedUser {
    AuthenticatedUser {
        uid: "test-uid".to_string(),
        email: "staff@example.com".to_string(),
    }
}

#[cfg(test)]
async fn inject_staff_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(staff_user());
    next.run(request).await
}

/// Wraps a router so every request carries an authenticated staff user,
/// bypassing the session gate in route tests.
#[cfg(test)]
pub fn with_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_staff_middleware))
}

/// Builds a store document from a plain JSON object literal.
#[cfg(test)]
pub fn doc(id: &str, fields: serde_json::Value) -> Document {
    Document {
        id: id.to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
    }
}

/// In-memory store that returns the same documents for every collection.
#[cfg(test)]
pub struct StubStore {
    pub documents: Vec<Document>,
}

#[cfg(test)]
#[async_trait]
impl DocumentStore for StubStore {
    async fn list_documents(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.clone())
    }
}

/// Store whose every read fails, for the explicit-error-state paths.
#[cfg(test)]
pub struct FailingStore;

#[cfg(test)]
#[async_trait]
impl DocumentStore for FailingStore {
    async fn list_documents(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Request("connection refused".to_string()))
    }
}

/// Identity provider accepting exactly one credential pair and one token.
#[cfg(test)]
pub struct StubIdentityProvider;

#[cfg(test)]
pub const STUB_TOKEN: &str = "stub-session-token";

#[cfg(test)]
#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignedInSession, IdentityError> {
        if email == "staff@example.com" && password == "secret" {
            Ok(SignedInSession {
                id_token: STUB_TOKEN.to_string(),
                uid: "test-uid".to_string(),
                email: email.to_string(),
            })
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    async fn lookup(&self, id_token: &str) -> Result<Option<AuthenticatedUser>, IdentityError> {
        if id_token == STUB_TOKEN {
            Ok(Some(staff_user()))
        } else {
            Ok(None)
        }
    }
}

/// Identity provider that is unreachable, for outage paths.
#[cfg(test)]
pub struct UnreachableIdentityProvider;

#[cfg(test)]
#[async_trait]
impl IdentityProvider for UnreachableIdentityProvider {
    async fn sign_in(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<SignedInSession, IdentityError> {
        Err(IdentityError::Request("connection refused".to_string()))
    }

    async fn lookup(&self, _id_token: &str) -> Result<Option<AuthenticatedUser>, IdentityError> {
        Err(IdentityError::Request("connection refused".to_string()))
    }
}
