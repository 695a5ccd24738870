use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Practitioner identity stamped on exported documents. One per user; `id`
/// is the user id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub crp: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub crp: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
