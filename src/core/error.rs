use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::features::identity::clients::IdentityError;
use crate::modules::store::StoreError;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Unauthenticated viewers are sent to the login screen instead of
            // receiving an error body; no protected content is rendered.
            AppError::Unauthorized(ref msg) => {
                tracing::debug!("Unauthorized request: {}", msg);
                Redirect::to("/login").into_response()
            }
            AppError::NotFound(ref msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, error_page("No encontrado")).into_response()
            }
            AppError::BadRequest(ref msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, error_page("Solicitud inválida")).into_response()
            }
            // A failed store read is an explicit error state, never an empty
            // table: an empty collection and an unreachable store must stay
            // distinguishable.
            AppError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    error_page("No se pudo consultar el registro remoto"),
                )
                    .into_response()
            }
            AppError::Identity(ref e) => {
                tracing::error!("Identity provider error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    error_page("No se pudo verificar la sesión"),
                )
                    .into_response()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, error_page("Error interno")).into_response()
            }
        }
    }
}

// Error responses render without the template engine so they cannot fail.
fn error_page(message: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
         <title>Grúas Metro</title></head>\
         <body><p>{}</p><p><a href=\"/\">Volver</a></p></body></html>",
        message
    ))
}

pub type Result<T> = std::result::Result<T, AppError>;
