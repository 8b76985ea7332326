use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::tailoring::{TailorError, TailorErrorKind};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tailoring error: {0}")]
    Tailor(#[from] TailorError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn tailor_status(kind: TailorErrorKind) -> StatusCode {
    match kind {
        TailorErrorKind::MissingFile
        | TailorErrorKind::MissingJobDescription
        | TailorErrorKind::UnsupportedFileType => StatusCode::BAD_REQUEST,
        TailorErrorKind::SafetyBlocked | TailorErrorKind::UnparseableInput => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        TailorErrorKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        TailorErrorKind::InvalidCredential | TailorErrorKind::Network => StatusCode::BAD_GATEWAY,
        TailorErrorKind::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        TailorErrorKind::Other => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR".to_string(), msg.clone())
            }
            AppError::Tailor(e) => {
                let status = tailor_status(e.kind);
                if status.is_server_error() {
                    tracing::error!("Tailoring error: {e}");
                }
                let code = serde_json::to_value(e.kind)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| "TAILOR_ERROR".to_string());
                (status, code, e.user_message())
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR".to_string(),
                    "The page could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR".to_string(),
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
