use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use prontuario_core::draft::FieldErrors;
use prontuario_core::error::CoreError;
use prontuario_export::error::ExportError;
use prontuario_storage::error::{RepositoryError, StorageError};

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    /// Per-field form errors, returned all at once.
    Validation(serde_json::Value),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation failed".to_string(),
                Some(fields),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error: message, fields })).into_response()
    }
}

impl<F: Ord + Serialize> From<FieldErrors<F>> for ApiError {
    fn from(errors: FieldErrors<F>) -> Self {
        match serde_json::to_value(&errors) {
            Ok(fields) => ApiError::Validation(fields),
            Err(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        let message = e.to_string();
        match e {
            RepositoryError::Storage(inner) => inner.into(),
            RepositoryError::PatientNotFound(_) => {
                ApiError::NotFound(format!("{message}; reload the patient list"))
            }
            RepositoryError::SessionNotFound(_) | RepositoryError::DocumentNotFound(_) => {
                ApiError::NotFound(format!("{message}; reload the session list"))
            }
            RepositoryError::ProfileNotFound => ApiError::NotFound(message),
            RepositoryError::StatusUnchanged
            | RepositoryError::MissingReason
            | RepositoryError::AttachmentTooLarge { .. } => ApiError::BadRequest(message),
            RepositoryError::PartialDelete { .. } => ApiError::Conflict(message),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
