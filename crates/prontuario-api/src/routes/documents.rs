use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use prontuario_core::models::{PendingAttachment, SessionDocument};
use prontuario_core::reference::DocumentType;
use prontuario_storage::store::ObjectStore;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::exports::attachment;
use crate::state::AppState;

pub async fn list_documents<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<SessionDocument>>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    Ok(Json(repo.list_documents(session_id).await?))
}

#[derive(Deserialize)]
pub struct UploadParams {
    pub file_name: String,
    /// Document type code, `other` when absent.
    pub document_type: Option<String>,
    pub description: Option<String>,
}

/// Single upload: the body is the raw file, metadata comes in the query.
pub async fn upload_document<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionDocument>), ApiError> {
    if params.file_name.trim().is_empty() {
        return Err(ApiError::BadRequest("file_name is required".to_string()));
    }
    let document_type = match params.document_type.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.parse::<DocumentType>()?,
        _ => DocumentType::default(),
    };
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let pending = PendingAttachment {
        file_name: params.file_name,
        document_type,
        description: params.description,
        content_type,
        bytes: body.to_vec(),
    };

    let mut repo = state.repository(user.user_id).await?;
    let document = repo.upload_document(session_id, pending).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// One queued file in a batch upload.
#[derive(Deserialize)]
pub struct AttachmentPayload {
    pub file_name: String,
    #[serde(default)]
    pub document_type: DocumentType,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub content_base64: String,
}

#[derive(Serialize)]
pub struct FailedAttachment {
    pub file_name: String,
    pub error: String,
}

#[derive(Serialize)]
pub struct AttachmentReport {
    pub uploaded: Vec<SessionDocument>,
    pub failed: Vec<FailedAttachment>,
}

/// Uploads the files queued on the session form, one by one. Files that
/// fail are reported and do not stop the rest.
pub async fn flush_attachments<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(payloads): Json<Vec<AttachmentPayload>>,
) -> Result<Json<AttachmentReport>, ApiError> {
    let mut pending = Vec::with_capacity(payloads.len());
    let mut failed = Vec::new();
    for payload in payloads {
        match STANDARD.decode(payload.content_base64.as_bytes()) {
            Ok(bytes) => pending.push(PendingAttachment {
                file_name: payload.file_name,
                document_type: payload.document_type,
                description: payload.description,
                content_type: payload.content_type,
                bytes,
            }),
            Err(e) => failed.push(FailedAttachment {
                file_name: payload.file_name,
                error: format!("invalid base64 content: {e}"),
            }),
        }
    }

    let mut repo = state.repository(user.user_id).await?;
    repo.get_session(session_id)?;
    let report = repo.flush_attachments(session_id, pending).await;
    failed.extend(report.failed.into_iter().map(|f| FailedAttachment {
        file_name: f.file_name,
        error: f.error.to_string(),
    }));

    Ok(Json(AttachmentReport {
        uploaded: report.uploaded,
        failed,
    }))
}

pub async fn download_document<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path((session_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, ApiError> {
    let repo = state.repository(user.user_id).await?;
    let (document, object) = repo.download_document(session_id, document_id).await?;
    let file_name = document
        .file_path
        .rsplit('/')
        .next()
        .unwrap_or(&document.file_path)
        .to_string();
    let content_type = object
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(attachment(&file_name, &content_type, object.body).into_response())
}

pub async fn delete_document<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path((session_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let mut repo = state.repository(user.user_id).await?;
    repo.delete_document(session_id, document_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
