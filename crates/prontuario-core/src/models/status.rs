use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TreatmentStatus {
    #[default]
    Active,
    Discharged,
    Abandoned,
    Referred,
    Suspended,
}

impl TreatmentStatus {
    pub const ALL: [TreatmentStatus; 5] = [
        TreatmentStatus::Active,
        TreatmentStatus::Discharged,
        TreatmentStatus::Abandoned,
        TreatmentStatus::Referred,
        TreatmentStatus::Suspended,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TreatmentStatus::Active => "Active",
            TreatmentStatus::Discharged => "Discharged",
            TreatmentStatus::Abandoned => "Abandoned",
            TreatmentStatus::Referred => "Referred",
            TreatmentStatus::Suspended => "Suspended",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TreatmentStatus::Active => "Patient in ongoing treatment",
            TreatmentStatus::Discharged => "Treatment completed successfully",
            TreatmentStatus::Abandoned => "Patient stopped attending without notice",
            TreatmentStatus::Referred => "Patient referred to another professional",
            TreatmentStatus::Suspended => "Treatment temporarily paused",
        }
    }
}

/// One entry of the append-only status log.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusChange {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub owner_id: Uuid,
    pub status: TreatmentStatus,
    pub reason: String,
    pub notes: Option<String>,
    pub changed_at: jiff::Timestamp,
    pub changed_by: Uuid,
}
