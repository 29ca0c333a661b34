use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::users::repo::StoreError;
use crate::users::validate::ValidationErrors;

/// Domain errors surfaced by the user service. Each variant maps to exactly
/// one HTTP status at the API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(ValidationErrors),
    #[error("User with ID {0} not found")]
    UserNotFound(i64),
    #[error("Email already exists")]
    EmailExists,
    #[error("Invalid email or password")]
    AuthenticationFailed,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::EmailExists,
            StoreError::Other(e) => ApiError::Unexpected(e.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "message": errors }),
            ),
            ApiError::UserNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("User with ID {id} not found") }),
            ),
            ApiError::EmailExists => (
                StatusCode::CONFLICT,
                json!({ "error": "Email already exists" }),
            ),
            ApiError::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid email or password" }),
            ),
            ApiError::Unexpected(err) => {
                // Internal detail goes to the log, never to the client.
                error!(error = %err, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An unexpected error occurred" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
