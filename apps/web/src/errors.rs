use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::HtmlEscape;
use thiserror::Error;

use crate::llm_client::GenerationError;
use crate::storage::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Failures a user can fix (bad credentials, short passwords, stale record
/// ids) are not errors here; handlers render them inline in the view.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match &self {
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The AI service request failed",
                    e.to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred",
                    e.to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A rendering error occurred",
                    String::new(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                    String::new(),
                )
            }
        };

        let body = format!(
            "<!doctype html><html><head><title>{title}</title></head><body>\
             <h1>{title}</h1><pre>{}</pre>\
             <form method=\"get\" action=\"/\"><button type=\"submit\">Back</button></form>\
             </body></html>",
            HtmlEscape(&detail)
        );

        (status, Html(body)).into_response()
    }
}
