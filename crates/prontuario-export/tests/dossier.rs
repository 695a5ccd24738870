mod common;

use jiff::civil::{date, time};
use prontuario_core::models::{IntakePayload, SessionKind};
use prontuario_export::dossier::{compose_dossier, dossier_file_name, dossier_summary};
use prontuario_export::styles::DocumentStyles;

use common::{adult, minor, profile, session};

fn generated_at() -> jiff::civil::DateTime {
    date(2026, 10, 19).at(9, 15, 0, 0)
}

#[test]
fn sessions_are_listed_oldest_first() {
    let patient = adult();
    let sessions = vec![
        session(&patient, SessionKind::Closure, date(2026, 9, 29), time(10, 0, 0, 0)),
        session(
            &patient,
            SessionKind::Intake(IntakePayload {
                main_complaint: "Panic attacks".into(),
                ..IntakePayload::default()
            }),
            date(2026, 9, 1),
            time(10, 0, 0, 0),
        ),
        session(&patient, SessionKind::Regular, date(2026, 9, 15), time(10, 0, 0, 0)),
    ];

    let doc = compose_dossier(
        &profile(),
        &patient,
        &sessions,
        generated_at(),
        &DocumentStyles::default(),
    );
    let bands: Vec<&str> = doc.texts().filter(|t| t.starts_with("Session ")).collect();
    assert_eq!(
        bands,
        vec![
            "Session 1 - 01/09/2026 - Intake",
            "Session 2 - 15/09/2026 - Regular Session",
            "Session 3 - 29/09/2026 - Closure",
        ]
    );

    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"Total sessions recorded: 3"));
    assert!(texts.contains(&"Panic attacks"));
    assert_eq!(doc.title, "PSYCHOLOGICAL RECORD - Ana Souza");
}

#[test]
fn patient_data_and_footer() {
    let patient = adult();
    let doc = compose_dossier(
        &profile(),
        &patient,
        &[],
        generated_at(),
        &DocumentStyles::default(),
    );
    let texts: Vec<&str> = doc.texts().collect();

    assert_eq!(texts[0], "Helena Prado");
    assert_eq!(texts[1], "Psychologist - CRP: 06/123456");
    assert_eq!(texts[2], "(11) 98765-4321 | helena@example.com");
    assert!(texts.contains(&"PSYCHOLOGICAL RECORD"));
    assert!(texts.contains(&"PATIENT DATA"));
    assert!(texts.contains(&"123.456.789-01"));
    assert!(texts.contains(&"10/05/1990 (36 years)"));
    assert!(texts.contains(&"Rua das Flores, 10, São Paulo, SP"));
    assert!(texts.contains(&"Total sessions recorded: 0"));
    assert!(texts.contains(&"CRP: 06/123456"));
    assert!(texts.contains(&"Document generated on 19/10/2026 at 09:15:00"));
    assert!(
        texts
            .last()
            .is_some_and(|t| t.starts_with("CONFIDENTIAL DOCUMENT"))
    );

    // No email on the patient, no guardian for an adult.
    assert!(!texts.contains(&"Email: "));
    assert!(!texts.contains(&"LEGAL GUARDIAN"));
}

#[test]
fn guardian_section_for_minor() {
    let patient = minor();
    let doc = compose_dossier(
        &profile(),
        &patient,
        &[],
        generated_at(),
        &DocumentStyles::default(),
    );
    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"LEGAL GUARDIAN"));
    assert!(texts.contains(&"Maria Lima"));
    assert!(texts.contains(&"111.222.333-44"));
    assert!(texts.contains(&"Mother"));
}

#[test]
fn empty_session_fields_are_skipped() {
    let patient = adult();
    let mut with_notes = session(&patient, SessionKind::Regular, date(2026, 9, 1), time(9, 0, 0, 0));
    with_notes.details.notes = Some("Brought a drawing".into());
    let without_notes = session(&patient, SessionKind::Regular, date(2026, 9, 8), time(9, 0, 0, 0));

    let doc = compose_dossier(
        &profile(),
        &patient,
        &[with_notes, without_notes],
        generated_at(),
        &DocumentStyles::default(),
    );
    let texts: Vec<&str> = doc.texts().collect();
    assert_eq!(texts.iter().filter(|t| **t == "Notes: ").count(), 1);
    assert_eq!(texts.iter().filter(|t| **t == "Time: ").count(), 2);
    assert!(!texts.contains(&"Approach: "));
    assert!(!texts.contains(&"DSM-5 Diagnosis: "));
}

#[test]
fn long_records_repeat_header_on_every_page() {
    let patient = adult();
    let sessions: Vec<_> = (1..=28)
        .map(|day| {
            let mut s = session(&patient, SessionKind::Regular, date(2026, 2, day), time(9, 0, 0, 0));
            s.details.notes = Some("Patient described the week in detail. ".repeat(8));
            s
        })
        .collect();

    let doc = compose_dossier(
        &profile(),
        &patient,
        &sessions,
        generated_at(),
        &DocumentStyles::default(),
    );
    assert!(doc.pages.len() > 1);
    for page in &doc.pages {
        assert_eq!(page.texts().next(), Some("Helena Prado"));
    }
    let bands = doc.texts().filter(|t| t.starts_with("Session ")).count();
    assert_eq!(bands, 28);
}

#[test]
fn summary_and_file_name() {
    let patient = adult();
    let sessions = vec![
        session(&patient, SessionKind::Regular, date(2026, 9, 15), time(10, 0, 0, 0)),
        session(&patient, SessionKind::Regular, date(2026, 8, 3), time(10, 0, 0, 0)),
    ];
    let summary = dossier_summary(&patient, &sessions);
    assert_eq!(summary.patient_name, "Ana Souza");
    assert_eq!(summary.session_count, 2);
    assert_eq!(summary.first_session, Some(date(2026, 8, 3)));
    assert_eq!(summary.last_session, Some(date(2026, 9, 15)));

    let empty = dossier_summary(&patient, &[]);
    assert_eq!(empty.first_session, None);

    assert_eq!(
        dossier_file_name(&patient, date(2026, 10, 19)),
        "record_Ana_Souza_2026-10-19.pdf"
    );
}
