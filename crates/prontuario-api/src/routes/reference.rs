use axum::Json;
use serde::Serialize;

use prontuario_core::models::{Modality, SessionType, TreatmentStatus};
use prontuario_core::reference::{
    Approach, CID_DIAGNOSES, DSM_DIAGNOSES, DURATION_OPTIONS, DEFAULT_DURATION_MINUTES,
    Diagnosis, DocumentType, EatingPattern, MedicationStatus, Mood, SESSION_TOPICS, SleepPattern,
};

/// A coded value with its display label.
#[derive(Serialize)]
pub struct Choice<T> {
    value: T,
    label: &'static str,
}

#[derive(Serialize)]
pub struct ApproachChoice {
    value: Approach,
    label: &'static str,
    techniques: &'static [&'static str],
}

/// Every option list the forms need, in display order.
#[derive(Serialize)]
pub struct ReferenceTables {
    session_types: Vec<Choice<SessionType>>,
    modalities: Vec<Choice<Modality>>,
    statuses: Vec<Choice<TreatmentStatus>>,
    topics: &'static [&'static str],
    durations: &'static [u16],
    default_duration: u16,
    sleep_patterns: Vec<Choice<SleepPattern>>,
    moods: Vec<Choice<Mood>>,
    eating_patterns: Vec<Choice<EatingPattern>>,
    medication_statuses: Vec<Choice<MedicationStatus>>,
    approaches: Vec<ApproachChoice>,
    document_types: Vec<Choice<DocumentType>>,
    dsm: &'static [Diagnosis],
    cid: &'static [Diagnosis],
}

fn choices<T: Copy>(all: &[T], label: fn(T) -> &'static str) -> Vec<Choice<T>> {
    all.iter()
        .map(|&value| Choice {
            value,
            label: label(value),
        })
        .collect()
}

pub async fn reference_tables() -> Json<ReferenceTables> {
    Json(ReferenceTables {
        session_types: choices(
            &[SessionType::Intake, SessionType::Regular, SessionType::Closure],
            SessionType::label,
        ),
        modalities: choices(&[Modality::InPerson, Modality::Remote], Modality::label),
        statuses: choices(&TreatmentStatus::ALL, TreatmentStatus::label),
        topics: &SESSION_TOPICS,
        durations: &DURATION_OPTIONS,
        default_duration: DEFAULT_DURATION_MINUTES,
        sleep_patterns: choices(&SleepPattern::ALL, SleepPattern::label),
        moods: choices(&Mood::ALL, Mood::label),
        eating_patterns: choices(&EatingPattern::ALL, EatingPattern::label),
        medication_statuses: choices(&MedicationStatus::ALL, MedicationStatus::label),
        approaches: Approach::ALL
            .into_iter()
            .map(|value| ApproachChoice {
                value,
                label: value.label(),
                techniques: value.techniques(),
            })
            .collect(),
        document_types: choices(&DocumentType::ALL, DocumentType::label),
        dsm: &DSM_DIAGNOSES,
        cid: &CID_DIAGNOSES,
    })
}
