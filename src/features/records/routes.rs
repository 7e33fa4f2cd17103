use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::records::handlers;
use crate::features::records::services::RecordService;
use crate::shared::templates::TemplateEngine;

#[derive(Clone)]
pub struct RecordsState {
    pub records: Arc<RecordService>,
    pub templates: Arc<TemplateEngine>,
}

/// Create routes for the record tables
///
/// Note: This feature requires an authenticated session
pub fn routes(records: Arc<RecordService>, templates: Arc<TemplateEngine>) -> Router {
    let state = RecordsState { records, templates };

    Router::new()
        .route("/dashboard/{slug}", get(handlers::show_table))
        .route("/dashboard/{slug}/export", get(handlers::export_table))
        .with_state(state)
}
