use std::sync::Arc;

use uuid::Uuid;

use prontuario_export::styles::DocumentStyles;
use prontuario_storage::repository::PracticeRepository;
use prontuario_storage::store::ObjectStore;

use crate::error::ApiError;
use crate::middleware::auth::TokenVerifier;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Holds the store and nothing per user: each request opens its own
/// repository, so no snapshot is shared between requests.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub styles: Arc<DocumentStyles>,
    pub verifier: Arc<TokenVerifier>,
}

impl<S: ObjectStore + Clone> AppState<S> {
    pub fn new(store: S, styles: DocumentStyles, verifier: TokenVerifier) -> Self {
        Self {
            store,
            styles: Arc::new(styles),
            verifier: Arc::new(verifier),
        }
    }

    /// Repository for `user_id` with a fresh snapshot.
    pub async fn repository(&self, user_id: Uuid) -> Result<PracticeRepository<S>, ApiError> {
        Ok(PracticeRepository::open(self.store.clone(), user_id).await?)
    }
}
