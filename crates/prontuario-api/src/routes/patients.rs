use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use prontuario_core::draft::{PatientDraft, PatientInput, SessionDraft, SessionInput};
use prontuario_core::models::{Patient, Session, StatusChange, TreatmentStatus};
use prontuario_storage::store::ObjectStore;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    /// Name fragment or CPF digits.
    pub q: Option<String>,
}

pub async fn list_patients<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    let patients = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => repo.search_patients(q).into_iter().cloned().collect(),
        _ => repo.patients().to_vec(),
    };
    Ok(Json(patients))
}

pub async fn get_patient<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    Ok(Json(repo.get_patient(id)?.clone()))
}

pub async fn create_patient<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<PatientInput>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let details = PatientDraft::from_input(input, today()).submit()?;
    let mut repo = state.repository(user.user_id).await?;
    let patient = repo.create_patient(details).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn update_patient<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Patient>, ApiError> {
    let mut repo = state.repository(user.user_id).await?;
    let mut draft = PatientDraft::from_patient(repo.get_patient(id)?);
    draft.apply_input(input, today());
    let details = draft.submit()?;
    Ok(Json(repo.update_patient(id, details).await?))
}

/// Removes the patient with every session, document and history entry.
pub async fn delete_patient<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut repo = state.repository(user.user_id).await?;
    repo.delete_patient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct StatusChangeRequest {
    pub status: TreatmentStatus,
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn change_status<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<(StatusCode, Json<StatusChange>), ApiError> {
    let mut repo = state.repository(user.user_id).await?;
    let change = repo
        .change_status(id, req.status, &req.reason, req.notes)
        .await?;
    Ok((StatusCode::CREATED, Json(change)))
}

pub async fn status_history<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StatusChange>>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    Ok(Json(repo.status_history(id).await?))
}

pub async fn list_patient_sessions<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    repo.get_patient(id)?;
    Ok(Json(repo.sessions_for(id).into_iter().cloned().collect()))
}

pub async fn create_session<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<SessionInput>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let details = SessionDraft::from_input(input).submit()?;
    let mut repo = state.repository(user.user_id).await?;
    let session = repo.create_session(id, details).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub(crate) fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}
