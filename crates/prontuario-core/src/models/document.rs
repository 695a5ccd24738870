use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::reference::DocumentType;

/// Uploads above this size are rejected before anything is stored.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionDocument {
    pub id: Uuid,
    pub session_id: Uuid,
    pub owner_id: Uuid,
    pub document_type: DocumentType,
    pub description: String,
    /// Object-store key of the binary content.
    pub file_path: String,
    pub created_at: jiff::Timestamp,
}

/// A file queued on the session form, uploaded after the session is saved.
#[derive(Debug, Clone)]
pub struct PendingAttachment {
    pub file_name: String,
    pub document_type: DocumentType,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PendingAttachment {
    /// Extension taken from the file name, lower-cased; empty when absent.
    pub fn extension(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => String::new(),
        }
    }

    /// Falls back to the file name when no description was typed.
    pub fn resolved_description(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.file_name)
            .to_string()
    }
}
