//! Session narratives.
//!
//! Two texts per session: the clinical record, and a reduced report that can
//! be handed to the patient. Labels, placeholders and list joining are
//! resolved here; the templates only arrange the result.
//!
//! The patient report is built from its own context type that has no field
//! for clinical observations, hypotheses, diagnoses or the referral reason,
//! so none of those can reach it.

use serde::Serialize;

use prontuario_core::age::age_on;
use prontuario_core::models::{Patient, Session, SessionKind, SessionType};
use prontuario_core::reference::{MedicationStatus, cid_diagnosis, dsm_diagnosis};

use crate::error::ExportError;
use crate::render::render_text;
use crate::text::{
    NOT_INFORMED, NOT_SPECIFIED, clock, file_name_part, iso_date, join_lower, join_natural,
    long_date, minutes, present,
};

const CLINICAL_INTAKE: &str = include_str!("../templates/clinical_intake.txt");
const CLINICAL_SESSION: &str = include_str!("../templates/clinical_session.txt");
const PATIENT_REPORT: &str = include_str!("../templates/patient_report.txt");

#[derive(Serialize)]
struct Header {
    title: &'static str,
    patient: String,
    date: String,
    time: String,
    duration: String,
    modality: &'static str,
}

#[derive(Serialize)]
struct ReferralBlock {
    to: String,
    reason: Option<String>,
}

#[derive(Serialize)]
struct IntakeContext {
    header: Header,
    modality_lower: String,
    age: i16,
    profession: Option<String>,
    guardian: Option<String>,
    main_complaint: Option<String>,
    complaint_history: Option<String>,
    relevant_history: Option<String>,
    state_paragraph: String,
    clinical_observations: Option<String>,
    clinical_hypotheses: Option<String>,
    therapeutic_goals: Option<String>,
    treatment_plan: Option<String>,
    approach: Option<&'static str>,
    techniques: Option<String>,
    referral: Option<ReferralBlock>,
    dsm: Option<String>,
    cid: Option<String>,
    notes: Option<String>,
}

#[derive(Serialize)]
struct SessionContext {
    header: Header,
    modality_lower: String,
    topics: String,
    state_paragraph: String,
    approach: &'static str,
    techniques: Option<String>,
    clinical_observations: Option<String>,
    clinical_hypotheses: Option<String>,
    observed_progress: Option<String>,
    interventions: Option<String>,
    referral: Option<ReferralBlock>,
    dsm: Option<String>,
    cid: Option<String>,
    notes: Option<String>,
}

#[derive(Serialize)]
struct ReportContext {
    header: Header,
    topics: String,
    approach: &'static str,
    has_techniques: bool,
}

/// Clinician-facing record text for one session.
pub fn clinical_narrative(session: &Session, patient: &Patient) -> Result<String, ExportError> {
    let d = &session.details;
    let header = header(session, patient);
    let modality_lower = d.modality.label().to_lowercase();
    let state_paragraph = state_paragraph(session);
    let techniques = join_natural(&d.therapy.techniques);
    let referral = referral_block(session);
    let (dsm, cid) = diagnoses(session);
    let notes = owned(&d.notes);

    match &d.kind {
        SessionKind::Intake(intake) => {
            let context = IntakeContext {
                header,
                modality_lower,
                age: age_on(patient.details.birth_date, d.date),
                profession: owned(&patient.details.profession),
                guardian: patient.named_guardian().map(|g| g.name.trim().to_string()),
                main_complaint: Some(intake.main_complaint.trim().to_string())
                    .filter(|c| !c.is_empty()),
                complaint_history: owned(&intake.complaint_history),
                relevant_history: owned(&intake.relevant_history),
                state_paragraph,
                clinical_observations: owned(&d.evolution.clinical_observations),
                clinical_hypotheses: owned(&d.evolution.clinical_hypotheses),
                therapeutic_goals: owned(&intake.therapeutic_goals),
                treatment_plan: owned(&intake.treatment_plan),
                approach: d.therapy.approach.map(|a| a.label()),
                techniques,
                referral,
                dsm,
                cid,
                notes,
            };
            render_text("clinical_intake.txt", CLINICAL_INTAKE, &context)
        }
        SessionKind::Regular | SessionKind::Closure => {
            let context = SessionContext {
                header,
                modality_lower,
                topics: join_lower(&d.state.topics).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                state_paragraph,
                approach: d.therapy.approach.map_or(NOT_SPECIFIED, |a| a.label()),
                techniques,
                clinical_observations: owned(&d.evolution.clinical_observations),
                clinical_hypotheses: owned(&d.evolution.clinical_hypotheses),
                observed_progress: owned(&d.evolution.observed_progress),
                interventions: owned(&d.evolution.interventions),
                referral,
                dsm,
                cid,
                notes,
            };
            render_text("clinical_session.txt", CLINICAL_SESSION, &context)
        }
    }
}

/// Patient-facing attendance report for one session.
pub fn patient_report(session: &Session, patient: &Patient) -> Result<String, ExportError> {
    let d = &session.details;
    let context = ReportContext {
        header: Header {
            title: "PSYCHOLOGICAL CARE REPORT",
            ..header(session, patient)
        },
        topics: join_lower(&d.state.topics).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        approach: d.therapy.approach.map_or(NOT_SPECIFIED, |a| a.label()),
        has_techniques: !d.therapy.techniques.is_empty(),
    };
    render_text("patient_report.txt", PATIENT_REPORT, &context)
}

/// `report_Ana_Souza_2026-10-01.txt`
pub fn patient_report_file_name(patient: &Patient, session: &Session) -> String {
    format!(
        "report_{}_{}.txt",
        file_name_part(patient.name()),
        iso_date(session.details.date)
    )
}

/// `session_Ana_Souza_2026-10-01.txt`
pub fn clinical_narrative_file_name(patient: &Patient, session: &Session) -> String {
    format!(
        "session_{}_{}.txt",
        file_name_part(patient.name()),
        iso_date(session.details.date)
    )
}

fn header(session: &Session, patient: &Patient) -> Header {
    let d = &session.details;
    Header {
        title: match session.session_type() {
            SessionType::Intake => "SESSION RECORD - INTAKE",
            SessionType::Regular => "SESSION RECORD",
            SessionType::Closure => "SESSION RECORD - CLOSURE",
        },
        patient: patient.name().trim().to_string(),
        date: long_date(d.date),
        time: clock(d.time),
        duration: minutes(d.duration_minutes),
        modality: d.modality.label(),
    }
}

/// Mood, sleep and eating in one sentence, then the medication clause.
fn state_paragraph(session: &Session) -> String {
    let state = &session.details.state;
    let moods: Vec<&str> = state.moods.iter().map(|m| m.label()).collect();
    let mood = join_lower(&moods).unwrap_or_else(|| NOT_INFORMED.to_string());
    let sleep = state
        .sleep
        .map_or_else(|| NOT_INFORMED.to_string(), |s| s.label().to_lowercase());
    let eating = state
        .eating
        .map_or_else(|| NOT_INFORMED.to_string(), |e| e.label().to_lowercase());

    let mut paragraph = format!(
        "The patient presented with {mood} mood, sleep described as {sleep} and eating described as {eating}."
    );

    match state.medication {
        Some(MedicationStatus::NoMedication) | None => {}
        Some(status) => {
            paragraph.push_str(&format!(
                " Regarding medication, the patient reports: {}",
                status.label().to_lowercase()
            ));
            if let Some(new) = present(&state.new_medication) {
                paragraph.push_str(&format!(", the new medication being {new}"));
            }
            paragraph.push('.');
        }
    }
    paragraph
}

fn referral_block(session: &Session) -> Option<ReferralBlock> {
    let referral = session.details.referral.as_ref()?;
    Some(ReferralBlock {
        to: present(&referral.to)?.to_string(),
        reason: owned(&referral.reason),
    })
}

/// `Name (code); Name (code)` per system. Unknown codes are shown bare.
fn diagnoses(session: &Session) -> (Option<String>, Option<String>) {
    let dx = &session.details.diagnoses;
    let dsm: Vec<String> = dx
        .dsm
        .iter()
        .map(|code| dsm_diagnosis(code).map_or_else(|| code.clone(), |d| d.narrative_label()))
        .collect();
    let cid: Vec<String> = dx
        .cid
        .iter()
        .map(|code| cid_diagnosis(code).map_or_else(|| code.clone(), |d| d.narrative_label()))
        .collect();
    (
        Some(dsm.join("; ")).filter(|s| !s.is_empty()),
        Some(cid.join("; ")).filter(|s| !s.is_empty()),
    )
}

fn owned(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}
