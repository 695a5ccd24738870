use jiff::civil::{date, time};
use prontuario_core::models::{
    ClinicalState, Diagnoses, Evolution, IntakePayload, Modality, Session, SessionDetails,
    SessionKind, SessionType, Therapy,
};
use prontuario_core::reference::{Approach, DocumentType, TechniqueOrigin};
use uuid::Uuid;

fn intake_session() -> Session {
    Session {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        details: SessionDetails {
            kind: SessionKind::Intake(IntakePayload {
                main_complaint: "Insomnia".into(),
                ..IntakePayload::default()
            }),
            date: date(2026, 9, 1),
            time: time(8, 0, 0, 0),
            duration_minutes: 50,
            modality: Modality::Remote,
            state: ClinicalState::default(),
            therapy: Therapy::default(),
            diagnoses: Diagnoses::default(),
            evolution: Evolution::default(),
            referral: None,
            notes: None,
        },
        created_at: jiff::Timestamp::now(),
        updated_at: jiff::Timestamp::now(),
    }
}

#[test]
fn session_kind_is_tagged_in_json() {
    let session = intake_session();
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["kind"]["type"], "intake");
    assert_eq!(json["kind"]["main_complaint"], "Insomnia");
    assert_eq!(json["modality"], "remote");

    let back: Session = serde_json::from_value(json).unwrap();
    assert_eq!(back.session_type(), SessionType::Intake);
    assert_eq!(back.intake().unwrap().main_complaint, "Insomnia");
}

#[test]
fn regular_kind_has_no_payload() {
    let json = serde_json::to_value(SessionKind::Regular).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "regular" }));
}

#[test]
fn techniques_classified_against_approach() {
    let therapy = Therapy {
        approach: Some(Approach::Humanistic),
        techniques: vec!["Empty Chair".into(), "Music therapy".into()],
    };
    assert_eq!(
        therapy.classified_techniques(),
        vec![
            ("Empty Chair", TechniqueOrigin::Preset),
            ("Music therapy", TechniqueOrigin::Custom),
        ]
    );
}

#[test]
fn document_type_parses_codes() {
    assert_eq!("certificate".parse::<DocumentType>().unwrap(), DocumentType::Certificate);
    assert!("invoice".parse::<DocumentType>().is_err());
    assert_eq!(DocumentType::default(), DocumentType::Other);
}
