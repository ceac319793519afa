//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by API handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Content not found")]
    NotFound,

    #[error("{0}")]
    ValidationMissing(String),

    #[error("Content already exists: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    AuthMismatch,

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ValidationMissing(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::AuthMismatch => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => ApiError::Conflict(id),
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::AuthMismatch => json!({
                "success": false,
                "authenticated": false,
                "error": self.to_string(),
            }),
            ApiError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                json!({ "error": "Storage failure" })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
