//! The complete patient record as a paginated document.

use jiff::civil::{Date, DateTime};
use serde::Serialize;
use ts_rs::TS;

use prontuario_core::age::age_on;
use prontuario_core::format::format_cpf;
use prontuario_core::models::{Patient, Profile, Session, TreatmentStatus};
use prontuario_core::reference::{cid_diagnosis, dsm_diagnosis};

use crate::layout::{LayoutDocument, PageComposer, PageGeometry, RunningHeader};
use crate::styles::DocumentStyles;
use crate::text::{clock, file_name_part, generated_on, iso_date, minutes, present, short_date};

const TITLE: &str = "PSYCHOLOGICAL RECORD";
const CONFIDENTIALITY: &str =
    "CONFIDENTIAL DOCUMENT - Psychological record under CFP Resolution No. 001/2009";

/// What the export dialog shows before the file is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DossierSummary {
    pub patient_name: String,
    pub status: TreatmentStatus,
    pub session_count: usize,
    pub first_session: Option<Date>,
    pub last_session: Option<Date>,
}

pub fn dossier_summary(patient: &Patient, sessions: &[Session]) -> DossierSummary {
    DossierSummary {
        patient_name: patient.name().to_string(),
        status: patient.current_status,
        session_count: sessions.len(),
        first_session: sessions.iter().map(|s| s.details.date).min(),
        last_session: sessions.iter().map(|s| s.details.date).max(),
    }
}

/// `record_Ana_Souza_2026-10-19.pdf`
pub fn dossier_file_name(patient: &Patient, export_date: Date) -> String {
    format!(
        "record_{}_{}.pdf",
        file_name_part(patient.name()),
        iso_date(export_date)
    )
}

/// Lay out the full record: practitioner header on every page, patient
/// data, guardian, then every session oldest first, then the signature
/// footer. Sessions may be passed in any order.
pub fn compose_dossier(
    profile: &Profile,
    patient: &Patient,
    sessions: &[Session],
    generated_at: DateTime,
    styles: &DocumentStyles,
) -> LayoutDocument {
    let contact: Vec<&str> = [present(&profile.phone), present(&profile.email)]
        .into_iter()
        .flatten()
        .collect();
    let header = RunningHeader {
        title: profile.full_name.clone(),
        subtitle: format!("Psychologist - CRP: {}", profile.crp),
        contact: (!contact.is_empty()).then(|| contact.join(" | ")),
    };
    let mut page = PageComposer::new(PageGeometry::from_styles(styles), header);

    page.title(TITLE);
    patient_data(&mut page, patient, generated_at.date());
    guardian(&mut page, patient);
    page.gap(6.0);

    page.section("ATTENDANCE HISTORY");
    page.paragraph(&format!("Total sessions recorded: {}", sessions.len()));
    page.gap(4.0);

    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by_key(|s| (s.details.date, s.details.time, s.created_at));
    for (index, session) in ordered.into_iter().enumerate() {
        session_block(&mut page, index + 1, session);
    }

    page.signature(&profile.full_name, &format!("CRP: {}", profile.crp));
    page.caption(&[&generated_on(generated_at), CONFIDENTIALITY]);

    page.finish(format!("{TITLE} - {}", patient.name()))
}

fn patient_data(page: &mut PageComposer, patient: &Patient, today: Date) {
    let d = &patient.details;
    page.section("PATIENT DATA");
    page.field("Name", &d.name);
    page.field("CPF", &format_cpf(&d.cpf));
    page.field(
        "Birth Date",
        &format!(
            "{} ({} years)",
            short_date(d.birth_date),
            age_on(d.birth_date, today)
        ),
    );
    page.field("Status", patient.current_status.label());
    page.field("Phone", present(&d.phone).unwrap_or_default());
    page.field("Email", present(&d.email).unwrap_or_default());
    page.field("Profession", present(&d.profession).unwrap_or_default());
    if let Some(address) = patient.full_address() {
        page.field("Address", &address);
    }
}

fn guardian(page: &mut PageComposer, patient: &Patient) {
    let Some(guardian) = patient.named_guardian() else {
        return;
    };
    page.gap(4.0);
    page.section("LEGAL GUARDIAN");
    page.field("Name", &guardian.name);
    if let Some(cpf) = present(&guardian.cpf) {
        page.field("CPF", &format_cpf(cpf));
    }
    page.field("Relationship", present(&guardian.relationship).unwrap_or_default());
    page.field("Phone", present(&guardian.phone).unwrap_or_default());
}

fn session_block(page: &mut PageComposer, number: usize, session: &Session) {
    let d = &session.details;
    page.band(&format!(
        "Session {number} - {} - {}",
        short_date(d.date),
        session.session_type().label()
    ));

    page.field("Time", &clock(d.time));
    page.field("Duration", &minutes(d.duration_minutes));
    page.field("Modality", d.modality.label());
    if let Some(approach) = d.therapy.approach {
        page.field("Approach", approach.label());
    }
    page.field("Techniques", &d.therapy.techniques.join(", "));
    page.field("Topics", &d.state.topics.join(", "));
    let moods: Vec<&str> = d.state.moods.iter().map(|m| m.label()).collect();
    page.field("Mood", &moods.join(", "));
    if let Some(sleep) = d.state.sleep {
        page.field("Sleep Pattern", sleep.label());
    }
    if let Some(eating) = d.state.eating {
        page.field("Eating", eating.label());
    }
    if let Some(medication) = d.state.medication {
        page.field("Medication", medication.label());
    }
    page.field(
        "New Medication",
        present(&d.state.new_medication).unwrap_or_default(),
    );

    if let Some(intake) = session.intake() {
        page.field("Main Complaint", &intake.main_complaint);
        page.field(
            "Complaint History",
            present(&intake.complaint_history).unwrap_or_default(),
        );
        page.field(
            "Relevant History",
            present(&intake.relevant_history).unwrap_or_default(),
        );
        page.field(
            "Therapeutic Goals",
            present(&intake.therapeutic_goals).unwrap_or_default(),
        );
        page.field(
            "Treatment Plan",
            present(&intake.treatment_plan).unwrap_or_default(),
        );
    }

    let evolution = &d.evolution;
    page.field(
        "Clinical Observations",
        present(&evolution.clinical_observations).unwrap_or_default(),
    );
    page.field(
        "Clinical Hypotheses",
        present(&evolution.clinical_hypotheses).unwrap_or_default(),
    );
    page.field(
        "Observed Progress",
        present(&evolution.observed_progress).unwrap_or_default(),
    );
    page.field(
        "Interventions",
        present(&evolution.interventions).unwrap_or_default(),
    );

    let dsm: Vec<String> = d
        .diagnoses
        .dsm
        .iter()
        .map(|code| dsm_diagnosis(code).map_or_else(|| code.clone(), |dx| dx.listing_label()))
        .collect();
    page.field("DSM-5 Diagnosis", &dsm.join("; "));
    let cid: Vec<String> = d
        .diagnoses
        .cid
        .iter()
        .map(|code| cid_diagnosis(code).map_or_else(|| code.clone(), |dx| dx.listing_label()))
        .collect();
    page.field("ICD-10 Diagnosis", &cid.join("; "));

    if let Some(referral) = &d.referral {
        page.field("Referral", present(&referral.to).unwrap_or("Yes"));
        page.field(
            "Referral Reason",
            present(&referral.reason).unwrap_or_default(),
        );
    }

    page.field("Notes", present(&d.notes).unwrap_or_default());
    page.gap(6.0);
}
