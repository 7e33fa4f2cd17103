use crate::core::error::AppError;
use crate::features::identity::model::AuthState;
use crate::features::identity::SessionService;
use crate::shared::constants::SESSION_COOKIE;
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        // Parse origins into HeaderValue
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Session gate for the dashboard pages.
///
/// Resolves the session cookie against the identity provider exactly once per
/// request. While the verification is in flight no protected content is
/// produced; an unauthenticated viewer is redirected to the login screen.
/// A provider outage is surfaced as an error, not treated as "logged out".
pub async fn session_gate(
    State(sessions): State<Arc<SessionService>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(Redirect::to("/login").into_response());
    };

    match sessions.authenticate(cookie.value()).await? {
        AuthState::Authenticated(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        AuthState::Unauthenticated => Ok(Redirect::to("/login").into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::identity::clients::IdentityProvider;
    use crate::shared::test_helpers::StubIdentityProvider;
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    fn gated_router() -> Router {
        let sessions = Arc::new(SessionService::new(Arc::new(StubIdentityProvider)));
        Router::new()
            .route("/dashboard/vales", get(|| async { "protegido" }))
            .route_layer(axum::middleware::from_fn_with_state(sessions, session_gate))
    }

    #[tokio::test]
    async fn missing_cookie_redirects_to_login() {
        let server = TestServer::new(gated_router()).unwrap();

        let response = server.get("/dashboard/vales").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/login");
        assert!(!response.text().contains("protegido"));
    }

    #[tokio::test]
    async fn invalid_token_redirects_to_login() {
        let server = TestServer::new(gated_router()).unwrap();

        let response = server
            .get("/dashboard/vales")
            .add_header("cookie", format!("{}=expired-token", SESSION_COOKIE))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/login");
    }

    #[tokio::test]
    async fn valid_token_reaches_protected_content() {
        let provider = StubIdentityProvider;
        let session = provider.sign_in("staff@example.com", "secret").await.unwrap();

        let server = TestServer::new(gated_router()).unwrap();
        let response = server
            .get("/dashboard/vales")
            .add_header("cookie", format!("{}={}", SESSION_COOKIE, session.id_token))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "protegido");
    }
}
