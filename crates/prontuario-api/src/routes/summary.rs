use axum::extract::State;
use axum::{Extension, Json};

use prontuario_storage::repository::PracticeSummary;
use prontuario_storage::store::ObjectStore;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn practice_summary<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PracticeSummary>, ApiError> {
    let repo = state.repository(user.user_id).await?;
    Ok(Json(repo.summary()))
}
