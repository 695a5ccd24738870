use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use prontuario_audit::{AuditAction, AuditEvent};
use prontuario_core::models::Session;
use prontuario_export::docx::narrative_docx;
use prontuario_export::dossier::{
    DossierSummary, compose_dossier, dossier_file_name, dossier_summary,
};
use prontuario_export::narrative::{
    clinical_narrative, clinical_narrative_file_name, patient_report, patient_report_file_name,
};
use prontuario_export::pdf::render_pdf;
use prontuario_export::styles::DocumentStyles;
use prontuario_storage::store::ObjectStore;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const PDF: &str = "application/pdf";

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeFormat {
    #[default]
    Text,
    Docx,
}

#[derive(Deserialize)]
pub struct NarrativeParams {
    #[serde(default)]
    pub format: NarrativeFormat,
}

/// Clinical record text for one session, as text or DOCX.
pub async fn session_narrative<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<NarrativeParams>,
) -> Result<Response, ApiError> {
    let repo = state.repository(user.user_id).await?;
    let session = repo.get_session(id)?;
    let patient = repo.get_patient(session.patient_id)?;

    let text = clinical_narrative(session, patient)?;
    let file_name = clinical_narrative_file_name(patient, session);
    AuditEvent::new(AuditAction::Export, "session", id, user.user_id)
        .with_details(serde_json::json!({ "kind": "clinical_narrative" }))
        .emit();

    render_as(params.format, text, &file_name, &state.styles)
}

/// Patient-facing report for one session, as text or DOCX.
pub async fn session_report<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<NarrativeParams>,
) -> Result<Response, ApiError> {
    let repo = state.repository(user.user_id).await?;
    let session = repo.get_session(id)?;
    let patient = repo.get_patient(session.patient_id)?;

    let text = patient_report(session, patient)?;
    let file_name = patient_report_file_name(patient, session);
    AuditEvent::new(AuditAction::Export, "session", id, user.user_id)
        .with_details(serde_json::json!({ "kind": "patient_report" }))
        .emit();

    render_as(params.format, text, &file_name, &state.styles)
}

pub async fn patient_dossier_summary<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DossierSummary>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    let patient = repo.get_patient(id)?;
    let sessions: Vec<Session> = repo.sessions_for(id).into_iter().cloned().collect();
    Ok(Json(dossier_summary(patient, &sessions)))
}

/// The complete record of one patient as a PDF. Needs the practitioner
/// profile for the page header and signature.
pub async fn patient_dossier<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let mut repo = state.repository(user.user_id).await?;
    let profile = repo.get_profile().await?;
    let patient = repo.get_patient(id)?;
    let sessions: Vec<Session> = repo.sessions_for(id).into_iter().cloned().collect();

    let now = jiff::Zoned::now();
    let layout = compose_dossier(&profile, patient, &sessions, now.datetime(), &state.styles);
    let bytes = render_pdf(&layout)?;

    info!(patient_id = %id, sessions = sessions.len(), pages = layout.pages.len(), "dossier exported");
    AuditEvent::new(AuditAction::Export, "patient", id, user.user_id)
        .with_details(serde_json::json!({ "kind": "dossier", "sessions": sessions.len() }))
        .emit();

    Ok(attachment(
        &dossier_file_name(patient, now.date()),
        PDF,
        bytes,
    ))
}

fn render_as(
    format: NarrativeFormat,
    text: String,
    file_name: &str,
    styles: &DocumentStyles,
) -> Result<Response, ApiError> {
    match format {
        NarrativeFormat::Text => Ok(attachment(file_name, TEXT_PLAIN, text.into_bytes())),
        NarrativeFormat::Docx => {
            let bytes = narrative_docx(&text, styles)?;
            let file_name = file_name.replace(".txt", ".docx");
            Ok(attachment(&file_name, DOCX, bytes))
        }
    }
}

/// File download response with a `Content-Disposition` file name.
pub(crate) fn attachment(file_name: &str, content_type: &str, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file_name.replace('"', ""));
    let mut response = body.into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_bytes(disposition.as_bytes()) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
