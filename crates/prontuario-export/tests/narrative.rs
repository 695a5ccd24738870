mod common;

use prontuario_core::models::{IntakePayload, Modality, Referral, SessionKind};
use prontuario_core::reference::{Approach, EatingPattern, MedicationStatus, Mood, SleepPattern};
use prontuario_export::narrative::{
    clinical_narrative, clinical_narrative_file_name, patient_report, patient_report_file_name,
};

use common::{adult, intake, minor, regular};

const CLOSING: &str = "Record made in accordance with CFP Resolution No. 001/2009.";

fn full_regular_session(patient: &prontuario_core::models::Patient) -> prontuario_core::models::Session {
    let mut session = regular(patient);
    let d = &mut session.details;
    d.modality = Modality::Remote;
    d.state.topics = vec!["Anxiety".into(), "Work".into()];
    d.state.moods = vec![Mood::Anxious, Mood::Irritable];
    d.state.sleep = Some(SleepPattern::Insomnia);
    d.state.eating = Some(EatingPattern::EatingLittle);
    d.state.medication = Some(MedicationStatus::Changed);
    d.state.new_medication = Some("Sertraline".into());
    d.therapy.approach = Some(Approach::CognitiveBehavioral);
    d.therapy.techniques = vec!["Cognitive Restructuring".into(), "Exposure".into()];
    d.diagnoses.dsm = vec!["F41.1".into()];
    d.diagnoses.cid = vec!["F41.1".into()];
    d.evolution.clinical_hypotheses = Some("Possible generalized anxiety".into());
    d.referral = Some(Referral {
        to: Some("Psychiatry".into()),
        reason: Some("Medication review".into()),
    });
    session
}

#[test]
fn intake_with_only_main_complaint() {
    let patient = adult();
    let session = intake(&patient, "Insomnia for two months");
    let text = clinical_narrative(&session, &patient).unwrap();

    assert!(text.starts_with("SESSION RECORD - INTAKE"));
    assert!(text.contains("Patient: Ana Souza"));
    assert!(text.contains("Date: October 01, 2026"));
    assert!(text.contains("Time: 14:30"));
    assert!(text.contains("Duration: 50 minutes"));
    assert!(text.contains("The patient, 36 years old, working as engineer"));
    assert!(text.contains("MAIN COMPLAINT\n\nInsomnia for two months"));
    assert!(text.contains("CURRENT STATE ASSESSMENT"));
    assert!(text.contains(
        "The patient presented with not informed mood, sleep described as not informed and eating described as not informed."
    ));

    for absent in [
        "COMPLAINT HISTORY",
        "RELEVANT HISTORY",
        "CLINICAL OBSERVATIONS",
        "CLINICAL HYPOTHESES",
        "THERAPEUTIC GOALS",
        "TREATMENT PLAN",
        "THERAPEUTIC APPROACH",
        "REFERRAL",
        "INITIAL DIAGNOSTIC HYPOTHESIS",
        "ADDITIONAL OBSERVATIONS",
        "Regarding medication",
    ] {
        assert!(!text.contains(absent), "unexpected {absent:?} in:\n{text}");
    }
    assert!(!text.contains("\n\n\n"));
    assert!(text.ends_with(CLOSING));
}

#[test]
fn intake_for_minor_names_guardian() {
    let patient = minor();
    let mut session = intake(&patient, "School refusal");
    session.details.kind = SessionKind::Intake(IntakePayload {
        main_complaint: "School refusal".into(),
        treatment_plan: Some("Weekly sessions".into()),
        ..IntakePayload::default()
    });
    let text = clinical_narrative(&session, &patient).unwrap();

    assert!(text.contains("The patient, 14 years old, attended an intake session"));
    assert!(text.contains("accompanied by their legal guardian, Maria Lima"));
    assert!(text.contains("TREATMENT PLAN\n\nWeekly sessions"));
}

#[test]
fn regular_session_narrative() {
    let patient = adult();
    let session = full_regular_session(&patient);
    let text = clinical_narrative(&session, &patient).unwrap();

    assert!(text.starts_with("SESSION RECORD\n"));
    assert!(text.contains("Modality: Remote"));
    assert!(text.contains(
        "In the session held on October 01, 2026, in remote format, the topics addressed were related to anxiety and work."
    ));
    assert!(text.contains(
        "The patient presented with anxious and irritable mood, sleep described as insomnia and eating described as eating little."
    ));
    assert!(text.contains(
        "Regarding medication, the patient reports: medication changed, the new medication being Sertraline."
    ));
    assert!(text.contains(
        "from the perspective of Cognitive-Behavioral Therapy (CBT), using the following techniques: Cognitive Restructuring and Exposure."
    ));
    assert!(text.contains("CLINICAL HYPOTHESES\n\nPossible generalized anxiety"));
    assert!(text.contains("Referred to Psychiatry. Reason: Medication review"));
    assert!(text.contains("DSM-5-TR: Generalized Anxiety Disorder (F41.1)"));
    assert!(text.contains("ICD-10: Generalized anxiety disorder (F41.1)"));
    assert!(!text.contains("OBSERVED PROGRESS"));
    assert!(text.ends_with(CLOSING));
}

#[test]
fn closure_title() {
    let patient = adult();
    let mut session = regular(&patient);
    session.details.kind = SessionKind::Closure;
    let text = clinical_narrative(&session, &patient).unwrap();
    assert!(text.starts_with("SESSION RECORD - CLOSURE"));
}

#[test]
fn missing_fields_use_placeholders() {
    let patient = adult();
    let session = regular(&patient);
    let text = clinical_narrative(&session, &patient).unwrap();

    assert!(text.contains("the topics addressed were related to not specified."));
    assert!(text.contains("from the perspective of not specified."));
    assert!(!text.contains("using the following techniques"));
    assert!(!text.contains("DIAGNOSTIC CLASSIFICATION"));

    let report = patient_report(&session, &patient).unwrap();
    assert!(report.contains("topics related to not specified were addressed, using the not specified approach."));
}

#[test]
fn medication_clause_omitted_without_medication() {
    let patient = adult();
    let mut session = regular(&patient);
    session.details.state.medication = Some(MedicationStatus::NoMedication);
    session.details.state.new_medication = Some("ignored".into());
    let text = clinical_narrative(&session, &patient).unwrap();
    assert!(!text.contains("Regarding medication"));

    session.details.state.medication = Some(MedicationStatus::TakingRegularly);
    session.details.state.new_medication = None;
    let text = clinical_narrative(&session, &patient).unwrap();
    assert!(text.contains("Regarding medication, the patient reports: taking regularly."));
}

#[test]
fn referral_without_destination_is_not_written() {
    let patient = adult();
    let mut session = regular(&patient);
    session.details.referral = Some(Referral {
        to: Some("  ".into()),
        reason: Some("Follow-up".into()),
    });
    let text = clinical_narrative(&session, &patient).unwrap();
    assert!(!text.contains("REFERRAL"));
}

#[test]
fn patient_report_withholds_clinical_content() {
    let patient = adult();
    let session = full_regular_session(&patient);
    let report = patient_report(&session, &patient).unwrap();

    assert!(report.starts_with("PSYCHOLOGICAL CARE REPORT"));
    assert!(report.contains("Date of Care: October 01, 2026"));
    assert!(report.contains(
        "During the session, topics related to anxiety and work were addressed, using the Cognitive-Behavioral Therapy (CBT) approach with the application of therapeutic techniques appropriate to the case."
    ));
    assert!(report.contains("CFP Resolution No. 010/2005"));

    for private in [
        "F41.1",
        "Generalized",
        "Possible generalized anxiety",
        "Medication review",
        "Psychiatry",
        "Sertraline",
        "Cognitive Restructuring",
    ] {
        assert!(!report.contains(private), "report leaked {private:?}");
    }
}

#[test]
fn report_without_techniques_drops_clause() {
    let patient = adult();
    let mut session = full_regular_session(&patient);
    session.details.therapy.techniques.clear();
    let report = patient_report(&session, &patient).unwrap();
    assert!(report.contains("using the Cognitive-Behavioral Therapy (CBT) approach."));
}

#[test]
fn file_names() {
    let patient = adult();
    let session = regular(&patient);
    assert_eq!(
        patient_report_file_name(&patient, &session),
        "report_Ana_Souza_2026-10-01.txt"
    );
    assert_eq!(
        clinical_narrative_file_name(&patient, &session),
        "session_Ana_Souza_2026-10-01.txt"
    );
}

#[test]
fn free_text_keeps_its_own_spacing() {
    let patient = adult();
    let mut session = full_regular_session(&patient);
    session.details.notes = Some("First point.  \n\n\nSecond point.".into());
    let text = clinical_narrative(&session, &patient).unwrap();
    assert!(text.contains("ADDITIONAL OBSERVATIONS\n\nFirst point.  \n\n\nSecond point.\n\n---"));
    assert!(text.ends_with(CLOSING));
}
