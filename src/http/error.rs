use crate::utils::error::{ErrorCategory, RentalError};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Rental(#[from] RentalError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            ApiError::Rental(e) => match e {
                RentalError::InvalidDate { .. } => (StatusCode::BAD_REQUEST, "InvalidDate"),
                RentalError::InvalidDuration { .. } => {
                    (StatusCode::BAD_REQUEST, "InvalidDuration")
                }
                _ => match e.category() {
                    ErrorCategory::Input => (StatusCode::BAD_REQUEST, "ValidationError"),
                    ErrorCategory::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
                    ErrorCategory::Storage => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "StorageError")
                    }
                    ErrorCategory::Configuration => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "ConfigError")
                    }
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        let message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Rental(e) if status.is_server_error() => {
                tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
                e.user_friendly_message()
            }
            ApiError::Rental(e) => e.to_string(),
        };

        if status.is_client_error() {
            tracing::warn!("{}: {}", kind, message);
        }

        let body = Json(ErrorResponse {
            error: kind.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
