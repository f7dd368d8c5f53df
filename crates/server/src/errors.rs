use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// JSON error body: `{error, detail, status, timestamp}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }

    pub fn null_input(detail: impl Into<String>) -> Self {
        ServiceError::NullInput(detail.into()).into()
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        ServiceError::InvalidInput(detail.into()).into()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let (status, title) = match &e {
            ServiceError::AlreadyExists(_) => (StatusCode::CONFLICT, "Already Exists"),
            ServiceError::AlreadyDeleted(_) => (StatusCode::CONFLICT, "Already Deleted"),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid Input"),
            ServiceError::NullInput(_) => (StatusCode::BAD_REQUEST, "Null Input"),
            ServiceError::Db(_) => {
                error!(err = %e, "database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database Error")
            }
        };
        let detail = match e {
            ServiceError::AlreadyExists(m)
            | ServiceError::AlreadyDeleted(m)
            | ServiceError::NotFound(m)
            | ServiceError::InvalidInput(m)
            | ServiceError::NullInput(m)
            | ServiceError::Db(m) => m,
        };
        Self::new(status, title, Some(detail))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.title,
            "detail": self.detail,
            "status": self.status.as_u16(),
            "timestamp": Utc::now(),
        });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("migration failed: {0}")]
    Migration(String),
}
