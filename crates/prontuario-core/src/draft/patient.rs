use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{FieldErrors, optional_text};
use crate::age::is_minor_on;
use crate::format::{digits_only, format_cep, format_cpf, format_phone, is_valid_cpf};
use crate::models::{Guardian, Patient, PatientDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PatientField {
    Name,
    Cpf,
    BirthDate,
    GuardianName,
}

/// Patient form state.
///
/// Validated fields are private and go through setters so their error can be
/// cleared on edit. `is_minor` is private because a birth date can force it.
#[derive(Debug, Clone, Default)]
pub struct PatientDraft {
    name: String,
    cpf: String,
    birth_date: Option<Date>,
    is_minor: bool,
    guardian_name: String,
    pub guardian_cpf: String,
    pub guardian_phone: String,
    pub guardian_relationship: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub email: String,
    pub profession: String,
    errors: FieldErrors<PatientField>,
}

impl PatientDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_patient(patient: &Patient) -> Self {
        let d = &patient.details;
        let guardian = d.guardian.clone().unwrap_or_else(|| Guardian {
            name: String::new(),
            cpf: None,
            phone: None,
            relationship: None,
        });
        Self {
            name: d.name.clone(),
            cpf: format_cpf(&d.cpf),
            birth_date: Some(d.birth_date),
            is_minor: d.is_minor,
            guardian_name: guardian.name,
            guardian_cpf: guardian.cpf.as_deref().map(format_cpf).unwrap_or_default(),
            guardian_phone: guardian.phone.unwrap_or_default(),
            guardian_relationship: guardian.relationship.unwrap_or_default(),
            address: d.address.clone().unwrap_or_default(),
            city: d.city.clone().unwrap_or_default(),
            state: d.state.clone().unwrap_or_default(),
            zip_code: d.zip_code.clone().unwrap_or_default(),
            phone: d.phone.clone().unwrap_or_default(),
            email: d.email.clone().unwrap_or_default(),
            profession: d.profession.clone().unwrap_or_default(),
            errors: FieldErrors::default(),
        }
    }

    /// Replays a request body through the setters, so minor inference applies
    /// exactly as it does on the form.
    pub fn from_input(input: PatientInput, today: Date) -> Self {
        let mut draft = Self::new();
        draft.apply_input(input, today);
        draft
    }

    /// Overwrites every field from a request body. The birth date only goes
    /// through minor inference when it differs from the one already held, so
    /// an unchecked `is_minor` survives an edit that keeps the date.
    pub fn apply_input(&mut self, input: PatientInput, today: Date) {
        self.set_name(input.name);
        self.set_cpf(&input.cpf);
        self.set_is_minor(input.is_minor);
        if input.birth_date != self.birth_date {
            self.set_birth_date(input.birth_date, today);
        }
        self.set_guardian_name(input.guardian_name.unwrap_or_default());
        self.guardian_cpf = format_cpf(input.guardian_cpf.as_deref().unwrap_or_default());
        self.guardian_phone = format_phone(input.guardian_phone.as_deref().unwrap_or_default());
        self.guardian_relationship = input.guardian_relationship.unwrap_or_default();
        self.address = input.address.unwrap_or_default();
        self.city = input.city.unwrap_or_default();
        self.state = input.state.unwrap_or_default();
        self.zip_code = format_cep(input.zip_code.as_deref().unwrap_or_default());
        self.phone = format_phone(input.phone.as_deref().unwrap_or_default());
        self.email = input.email.unwrap_or_default();
        self.profession = input.profession.unwrap_or_default();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.errors.clear(PatientField::Name);
    }

    /// Masked as typed.
    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn set_cpf(&mut self, cpf: &str) {
        self.cpf = format_cpf(cpf);
        self.errors.clear(PatientField::Cpf);
    }

    pub fn birth_date(&self) -> Option<Date> {
        self.birth_date
    }

    /// Sets the birth date and marks the patient as a minor when under 18 on
    /// `today`. Never clears the flag.
    pub fn set_birth_date(&mut self, birth_date: Option<Date>, today: Date) {
        self.birth_date = birth_date;
        self.errors.clear(PatientField::BirthDate);
        if birth_date.is_some_and(|date| is_minor_on(date, today)) {
            self.is_minor = true;
        }
    }

    pub fn is_minor(&self) -> bool {
        self.is_minor
    }

    pub fn set_is_minor(&mut self, is_minor: bool) {
        self.is_minor = is_minor;
    }

    pub fn guardian_name(&self) -> &str {
        &self.guardian_name
    }

    pub fn set_guardian_name(&mut self, name: impl Into<String>) {
        self.guardian_name = name.into();
        self.errors.clear(PatientField::GuardianName);
    }

    pub fn errors(&self) -> &FieldErrors<PatientField> {
        &self.errors
    }

    pub fn validate(&self) -> FieldErrors<PatientField> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.insert(PatientField::Name, "Name is required");
        }
        if digits_only(&self.cpf).is_empty() {
            errors.insert(PatientField::Cpf, "CPF is required");
        } else if !is_valid_cpf(&self.cpf) {
            errors.insert(PatientField::Cpf, "CPF must have 11 digits");
        }
        if self.birth_date.is_none() {
            errors.insert(PatientField::BirthDate, "Birth date is required");
        }
        if self.is_minor && self.guardian_name.trim().is_empty() {
            errors.insert(
                PatientField::GuardianName,
                "Guardian name is required for minors",
            );
        }
        errors
    }

    /// Re-validates every field. On failure the draft keeps the full error
    /// set for display and the same set is returned.
    pub fn submit(&mut self) -> Result<PatientDetails, FieldErrors<PatientField>> {
        self.errors = self.validate();
        let birth_date = match self.birth_date {
            Some(date) if self.errors.is_empty() => date,
            _ => return Err(self.errors.clone()),
        };

        let guardian = optional_text(&self.guardian_name).map(|name| Guardian {
            name,
            cpf: Some(digits_only(&self.guardian_cpf)).filter(|c| !c.is_empty()),
            phone: optional_text(&self.guardian_phone),
            relationship: optional_text(&self.guardian_relationship),
        });

        Ok(PatientDetails {
            name: self.name.trim().to_string(),
            cpf: digits_only(&self.cpf),
            birth_date,
            address: optional_text(&self.address),
            city: optional_text(&self.city),
            state: optional_text(&self.state),
            zip_code: optional_text(&self.zip_code),
            phone: optional_text(&self.phone),
            email: optional_text(&self.email),
            profession: optional_text(&self.profession),
            is_minor: self.is_minor,
            guardian,
        })
    }
}

/// Request body for creating or updating a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PatientInput {
    pub name: String,
    pub cpf: String,
    pub birth_date: Option<Date>,
    pub is_minor: bool,
    pub guardian_name: Option<String>,
    pub guardian_cpf: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_relationship: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub profession: Option<String>,
}
