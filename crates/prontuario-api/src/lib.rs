//! prontuario-api
//!
//! HTTP surface of the practice records, served from AWS Lambda.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use prontuario_core::models::MAX_ATTACHMENT_BYTES;
use prontuario_storage::store::ObjectStore;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Base64 inflates batch uploads by a third, and a batch holds several files.
const BATCH_BODY_LIMIT: usize = 8 * MAX_ATTACHMENT_BYTES;

pub fn app<S>(state: AppState<S>) -> Router
where
    S: ObjectStore + Clone + 'static,
{
    use routes::{documents, exports, patients, profile, sessions, summary};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route(
            "/patients",
            get(patients::list_patients::<S>).post(patients::create_patient::<S>),
        )
        .route(
            "/patients/{id}",
            get(patients::get_patient::<S>)
                .put(patients::update_patient::<S>)
                .delete(patients::delete_patient::<S>),
        )
        .route(
            "/patients/{id}/status",
            get(patients::status_history::<S>).post(patients::change_status::<S>),
        )
        .route(
            "/patients/{id}/sessions",
            get(patients::list_patient_sessions::<S>).post(patients::create_session::<S>),
        )
        .route("/patients/{id}/dossier", get(exports::patient_dossier::<S>))
        .route(
            "/patients/{id}/dossier/summary",
            get(exports::patient_dossier_summary::<S>),
        )
        .route("/sessions", get(sessions::list_sessions::<S>))
        .route(
            "/sessions/{id}",
            get(sessions::get_session::<S>)
                .put(sessions::update_session::<S>)
                .delete(sessions::delete_session::<S>),
        )
        .route(
            "/sessions/{id}/documents",
            get(documents::list_documents::<S>)
                .post(documents::upload_document::<S>)
                .layer(DefaultBodyLimit::max(MAX_ATTACHMENT_BYTES + 1)),
        )
        .route(
            "/sessions/{id}/attachments",
            post(documents::flush_attachments::<S>)
                .layer(DefaultBodyLimit::max(BATCH_BODY_LIMIT)),
        )
        .route(
            "/sessions/{id}/documents/{document_id}",
            get(documents::download_document::<S>).delete(documents::delete_document::<S>),
        )
        .route("/sessions/{id}/narrative", get(exports::session_narrative::<S>))
        .route("/sessions/{id}/report", get(exports::session_report::<S>))
        .route(
            "/profile",
            get(profile::get_profile::<S>).put(profile::update_profile::<S>),
        )
        .route("/summary", get(summary::practice_summary::<S>))
        .route_layer(axum_mw::from_fn_with_state(
            state.verifier.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Health and reference tables (no auth)
        .route("/health", get(routes::health::health_check))
        .route("/reference", get(routes::reference::reference_tables))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
