use axum::extract::State;
use axum::{Extension, Json};

use prontuario_core::models::{Profile, ProfileUpdate};
use prontuario_storage::store::ObjectStore;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn get_profile<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>, ApiError> {
    let mut repo = state.repository(user.user_id).await?;
    Ok(Json(repo.get_profile().await?))
}

pub async fn update_profile<S: ObjectStore + Clone>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    if update.full_name.trim().is_empty() || update.crp.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "full_name and crp are required".to_string(),
        ));
    }
    let mut repo = state.repository(user.user_id).await?;
    Ok(Json(repo.update_profile(update).await?))
}
