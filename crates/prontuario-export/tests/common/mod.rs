#![allow(dead_code)]

use jiff::civil::{Date, Time, date, time};
use prontuario_core::models::{
    ClinicalState, Diagnoses, Evolution, Guardian, IntakePayload, Modality, Patient,
    PatientDetails, Profile, Session, SessionDetails, SessionKind, Therapy, TreatmentStatus,
};
use uuid::Uuid;

pub fn profile() -> Profile {
    Profile {
        id: Uuid::new_v4(),
        full_name: "Helena Prado".into(),
        crp: "06/123456".into(),
        email: Some("helena@example.com".into()),
        phone: Some("(11) 98765-4321".into()),
        created_at: jiff::Timestamp::now(),
        updated_at: jiff::Timestamp::now(),
    }
}

pub fn adult() -> Patient {
    patient(PatientDetails {
        name: "Ana Souza".into(),
        cpf: "12345678901".into(),
        birth_date: date(1990, 5, 10),
        address: Some("Rua das Flores, 10".into()),
        city: Some("São Paulo".into()),
        state: Some("SP".into()),
        zip_code: None,
        phone: Some("(11) 91234-5678".into()),
        email: None,
        profession: Some("engineer".into()),
        is_minor: false,
        guardian: None,
    })
}

pub fn minor() -> Patient {
    patient(PatientDetails {
        name: "Pedro Lima".into(),
        cpf: "98765432100".into(),
        birth_date: date(2012, 3, 1),
        address: None,
        city: None,
        state: None,
        zip_code: None,
        phone: None,
        email: None,
        profession: None,
        is_minor: true,
        guardian: Some(Guardian {
            name: "Maria Lima".into(),
            cpf: Some("11122233344".into()),
            phone: None,
            relationship: Some("Mother".into()),
        }),
    })
}

fn patient(details: PatientDetails) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        details,
        current_status: TreatmentStatus::Active,
        created_at: jiff::Timestamp::now(),
        updated_at: jiff::Timestamp::now(),
    }
}

pub fn session(patient: &Patient, kind: SessionKind, on: Date, at: Time) -> Session {
    Session {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        owner_id: patient.owner_id,
        details: SessionDetails {
            kind,
            date: on,
            time: at,
            duration_minutes: 50,
            modality: Modality::InPerson,
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

pub fn intake(patient: &Patient, main_complaint: &str) -> Session {
    session(
        patient,
        SessionKind::Intake(IntakePayload {
            main_complaint: main_complaint.into(),
            ..IntakePayload::default()
        }),
        date(2026, 10, 1),
        time(14, 30, 0, 0),
    )
}

pub fn regular(patient: &Patient) -> Session {
    session(
        patient,
        SessionKind::Regular,
        date(2026, 10, 1),
        time(14, 30, 0, 0),
    )
}
