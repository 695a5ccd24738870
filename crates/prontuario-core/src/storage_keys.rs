//! Object key conventions.
//!
//! Pure string functions with no AWS SDK dependency. Every key lives under the
//! owning user's namespace, so one user's rows and files never collide with
//! another's.

use uuid::Uuid;

fn user_root(owner: Uuid) -> String {
    format!("users/{owner}/")
}

pub fn patients_prefix(owner: Uuid) -> String {
    format!("{}patients/", user_root(owner))
}

pub fn patient(owner: Uuid, id: Uuid) -> String {
    format!("{}{id}.json", patients_prefix(owner))
}

pub fn sessions_prefix(owner: Uuid) -> String {
    format!("{}sessions/", user_root(owner))
}

pub fn session(owner: Uuid, id: Uuid) -> String {
    format!("{}{id}.json", sessions_prefix(owner))
}

pub fn status_history_prefix(owner: Uuid, patient_id: Uuid) -> String {
    format!("{}status-history/{patient_id}/", user_root(owner))
}

pub fn status_change(owner: Uuid, patient_id: Uuid, id: Uuid) -> String {
    format!("{}{id}.json", status_history_prefix(owner, patient_id))
}

pub fn documents_prefix(owner: Uuid, session_id: Uuid) -> String {
    format!("{}documents/{session_id}/", user_root(owner))
}

pub fn document(owner: Uuid, session_id: Uuid, id: Uuid) -> String {
    format!("{}{id}.json", documents_prefix(owner, session_id))
}

/// Binary content of an uploaded attachment.
pub fn document_file(owner: Uuid, session_id: Uuid, millis: i64, extension: &str) -> String {
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        format!("{}files/{session_id}/{millis}", user_root(owner))
    } else {
        format!("{}files/{session_id}/{millis}.{ext}", user_root(owner))
    }
}

pub fn profile(owner: Uuid) -> String {
    format!("{}profile.json", user_root(owner))
}
