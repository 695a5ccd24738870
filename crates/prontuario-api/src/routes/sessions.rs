use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use prontuario_core::draft::{SessionDraft, SessionInput};
use prontuario_core::models::Session;
use prontuario_storage::store::ObjectStore;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Every session of the user, newest first.
pub async fn list_sessions<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    Ok(Json(repo.sessions().to_vec()))
}

pub async fn get_session<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    Ok(Json(repo.get_session(id)?.clone()))
}

pub async fn update_session<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<SessionInput>,
) -> Result<Json<Session>, ApiError> {
    let details = SessionDraft::from_input(input).submit()?;
    let mut repo = state.repository(user.user_id).await?;
    Ok(Json(repo.update_session(id, details).await?))
}

/// Removes the session together with its documents.
pub async fn delete_session<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut repo = state.repository(user.user_id).await?;
    repo.delete_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
