use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::identity::handlers;
use crate::features::identity::services::SessionService;
use crate::shared::templates::TemplateEngine;

#[derive(Clone)]
pub struct IdentityState {
    pub sessions: Arc<SessionService>,
    pub templates: Arc<TemplateEngine>,
}

/// Create routes for the login screen
///
/// Note: These routes are public; everything else sits behind the session gate
pub fn routes(sessions: Arc<SessionService>, templates: Arc<TemplateEngine>) -> Router {
    let state = IdentityState {
        sessions,
        templates,
    };

    Router::new()
        .route(
            "/login",
            get(handlers::login_page).post(handlers::login_submit),
        )
        .with_state(state)
}
