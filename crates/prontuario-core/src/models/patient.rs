use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::TreatmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub details: PatientDetails,
    /// Only moved by a status change, never by a plain edit.
    pub current_status: TreatmentStatus,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// The editable part of a patient record, as produced by a submitted draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientDetails {
    pub name: String,
    /// Digits only.
    pub cpf: String,
    pub birth_date: jiff::civil::Date,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub profession: Option<String>,
    pub is_minor: bool,
    pub guardian: Option<Guardian>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Guardian {
    pub name: String,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

impl Patient {
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Guardian to show on documents: only for minors with a named guardian.
    pub fn named_guardian(&self) -> Option<&Guardian> {
        if !self.details.is_minor {
            return None;
        }
        self.details
            .guardian
            .as_ref()
            .filter(|g| !g.name.trim().is_empty())
    }

    /// Street, city, state and CEP joined with `, `, skipping blanks.
    pub fn full_address(&self) -> Option<String> {
        let d = &self.details;
        let parts: Vec<&str> = [&d.address, &d.city, &d.state, &d.zip_code]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
