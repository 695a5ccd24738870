use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 DeleteObject error: {0}")]
    DeleteObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("profile not found")]
    ProfileNotFound,

    #[error("patient is already in this status")]
    StatusUnchanged,

    #[error("a reason is required to change the treatment status")]
    MissingReason,

    #[error("{file_name} is {size} bytes, above the {limit} byte limit")]
    AttachmentTooLarge {
        file_name: String,
        size: usize,
        limit: usize,
    },

    /// Some children of `id` could not be removed. The parent was kept.
    #[error("{resource} {id} was not deleted; {} object(s) could not be removed", .failed.len())]
    PartialDelete {
        resource: &'static str,
        id: Uuid,
        failed: Vec<String>,
    },
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepositoryError::PatientNotFound(_)
                | RepositoryError::SessionNotFound(_)
                | RepositoryError::DocumentNotFound(_)
                | RepositoryError::ProfileNotFound
        )
    }
}
