use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::reference::{
    Approach, EatingPattern, MedicationStatus, Mood, SleepPattern, TechniqueOrigin,
    technique_origin,
};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub details: SessionDetails,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Session {
    pub fn session_type(&self) -> SessionType {
        self.details.kind.session_type()
    }

    pub fn intake(&self) -> Option<&IntakePayload> {
        self.details.kind.intake()
    }
}

/// Everything a session form edits. Storage accepts any combination; the
/// required-field rules live in `draft::SessionDraft`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionDetails {
    pub kind: SessionKind,
    pub date: jiff::civil::Date,
    #[ts(type = "string")]
    pub time: jiff::civil::Time,
    pub duration_minutes: u16,
    pub modality: Modality,
    #[serde(default)]
    pub state: ClinicalState,
    #[serde(default)]
    pub therapy: Therapy,
    #[serde(default)]
    pub diagnoses: Diagnoses,
    #[serde(default)]
    pub evolution: Evolution,
    pub referral: Option<Referral>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum SessionKind {
    Intake(IntakePayload),
    Regular,
    Closure,
}

impl SessionKind {
    pub fn session_type(&self) -> SessionType {
        match self {
            SessionKind::Intake(_) => SessionType::Intake,
            SessionKind::Regular => SessionType::Regular,
            SessionKind::Closure => SessionType::Closure,
        }
    }

    pub fn intake(&self) -> Option<&IntakePayload> {
        match self {
            SessionKind::Intake(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Fields that only exist on the first encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakePayload {
    pub main_complaint: String,
    pub complaint_history: Option<String>,
    pub relevant_history: Option<String>,
    pub therapeutic_goals: Option<String>,
    pub treatment_plan: Option<String>,
}

/// Discriminant of `SessionKind`, for forms and listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionType {
    Intake,
    #[default]
    Regular,
    Closure,
}

impl SessionType {
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Intake => "Intake",
            SessionType::Regular => "Regular Session",
            SessionType::Closure => "Closure",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Modality {
    #[default]
    InPerson,
    Remote,
}

impl Modality {
    pub fn label(self) -> &'static str {
        match self {
            Modality::InPerson => "In-person",
            Modality::Remote => "Remote",
        }
    }
}

/// Snapshot of the patient's state as reported in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalState {
    pub topics: Vec<String>,
    pub sleep: Option<SleepPattern>,
    pub moods: Vec<Mood>,
    pub eating: Option<EatingPattern>,
    pub medication: Option<MedicationStatus>,
    /// Only kept when `medication` is `Changed`.
    pub new_medication: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Therapy {
    pub approach: Option<Approach>,
    pub techniques: Vec<String>,
}

impl Therapy {
    /// Techniques paired with whether they come from the approach's preset list.
    pub fn classified_techniques(&self) -> Vec<(&str, TechniqueOrigin)> {
        self.techniques
            .iter()
            .map(|t| (t.as_str(), technique_origin(self.approach, t)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Diagnoses {
    pub dsm: Vec<String>,
    pub cid: Vec<String>,
}

impl Diagnoses {
    pub fn is_empty(&self) -> bool {
        self.dsm.is_empty() && self.cid.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evolution {
    pub clinical_observations: Option<String>,
    pub clinical_hypotheses: Option<String>,
    pub observed_progress: Option<String>,
    pub interventions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Referral {
    pub to: Option<String>,
    pub reason: Option<String>,
}
