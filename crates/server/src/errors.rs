use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::pet::errors::PetError;
use service::post::errors::PostError;

/// Error envelope returned by every handler: `{"error": ..., "code": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pet(#[from] PetError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, u16) {
        match self {
            ApiError::Pet(e) => {
                let status = match e {
                    PetError::Validation(_) => StatusCode::BAD_REQUEST,
                    PetError::PetExists => StatusCode::CONFLICT,
                    PetError::PetNotFound | PetError::AddressNotFound => StatusCode::NOT_FOUND,
                    PetError::TokenMismatch => StatusCode::FORBIDDEN,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.code())
            }
            ApiError::Post(e) => {
                let status = match e {
                    PostError::Validation(_) => StatusCode::BAD_REQUEST,
                    PostError::PetNotFound => StatusCode::NOT_FOUND,
                    PostError::TokenMismatch => StatusCode::FORBIDDEN,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.code())
            }
            ApiError::Auth(e) => {
                let status = match e {
                    AuthError::Unauthorized | AuthError::TokenError(_) => StatusCode::UNAUTHORIZED,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.code())
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, 4000),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(error = %msg, code, "request failed");
        }
        (status, Json(serde_json::json!({"error": msg, "code": code}))).into_response()
    }
}
