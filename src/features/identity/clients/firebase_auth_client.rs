use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::IdentityConfig;
use crate::features::identity::clients::{IdentityError, IdentityProvider, SignedInSession};
use crate::features::identity::model::AuthenticatedUser;

/// Error codes the provider reports for a wrong credential pair. Anything
/// else on a 4xx is an integration problem, not a user mistake.
const CREDENTIAL_ERRORS: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
];

/// Error codes that mean a session token is simply no longer valid.
const STALE_TOKEN_ERRORS: &[&str] = &["INVALID_ID_TOKEN", "USER_NOT_FOUND", "TOKEN_EXPIRED"];

/// Request to the credential sign-in endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    local_id: String,
    #[serde(default)]
    email: String,
}

/// Request to the token lookup endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
}

/// Provider error envelope
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error: ProviderError,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// Client for the Identity Toolkit REST API auth operations
pub struct FirebaseAuthClient {
    config: IdentityConfig,
    http_client: reqwest::Client,
}

impl FirebaseAuthClient {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/accounts:{}", self.config.base_url, action)
    }

    /// Extracts the provider's error code from a failed response body.
    fn error_code(body: &str) -> String {
        serde_json::from_str::<ProviderErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_default()
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignedInSession, IdentityError> {
        let request_body = SignInRequest {
            email,
            password,
            return_secure_token: true,
        };

        tracing::debug!("Exchanging credentials for: {}", email);

        let response = self
            .http_client
            .post(self.endpoint("signInWithPassword"))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let signed_in = response
                .json::<SignInResponse>()
                .await
                .map_err(|e| IdentityError::Decode(e.to_string()))?;

            return Ok(SignedInSession {
                id_token: signed_in.id_token,
                uid: signed_in.local_id,
                email: signed_in.email,
            });
        }

        let body = response.text().await.unwrap_or_default();
        let code = Self::error_code(&body);

        if CREDENTIAL_ERRORS.iter().any(|c| code.starts_with(c)) {
            return Err(IdentityError::InvalidCredentials);
        }

        tracing::error!("Identity API error: HTTP {} - {}", status, body);
        Err(IdentityError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn lookup(&self, id_token: &str) -> Result<Option<AuthenticatedUser>, IdentityError> {
        let response = self
            .http_client
            .post(self.endpoint("lookup"))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&LookupRequest { id_token })
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let lookup = response
                .json::<LookupResponse>()
                .await
                .map_err(|e| IdentityError::Decode(e.to_string()))?;

            return Ok(lookup.users.into_iter().next().map(|u| AuthenticatedUser {
                uid: u.local_id,
                email: u.email,
            }));
        }

        let body = response.text().await.unwrap_or_default();
        let code = Self::error_code(&body);

        // A stale token is an ordinary signed-out state, not a failure
        if STALE_TOKEN_ERRORS.iter().any(|c| code.starts_with(c)) {
            return Ok(None);
        }

        tracing::error!("Identity API error: HTTP {} - {}", status, body);
        Err(IdentityError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
