use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{FieldErrors, optional_text, toggle};
use crate::models::{
    ClinicalState, Diagnoses, Evolution, IntakePayload, Modality, Referral, Session,
    SessionDetails, SessionKind, SessionType, Therapy,
};
use crate::reference::{
    Approach, DEFAULT_DURATION_MINUTES, EatingPattern, MedicationStatus, Mood, SleepPattern,
    TechniqueOrigin, technique_origin,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionField {
    Date,
    Time,
    MainComplaint,
    Topics,
    SleepPattern,
    Mood,
    Eating,
    MedicationStatus,
    Approach,
}

/// Session form state.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub session_type: SessionType,
    date: Option<Date>,
    time: Option<Time>,
    pub duration_minutes: u16,
    pub modality: Modality,

    topics: Vec<String>,
    sleep: Option<SleepPattern>,
    moods: Vec<Mood>,
    eating: Option<EatingPattern>,
    medication: Option<MedicationStatus>,
    pub new_medication: String,

    approach: Option<Approach>,
    techniques: Vec<String>,

    dsm: Vec<String>,
    cid: Vec<String>,

    pub clinical_observations: String,
    pub clinical_hypotheses: String,
    pub observed_progress: String,
    pub interventions: String,

    main_complaint: String,
    pub complaint_history: String,
    pub relevant_history: String,
    pub therapeutic_goals: String,
    pub treatment_plan: String,

    pub needs_referral: bool,
    pub referral_to: String,
    pub referral_reason: String,

    pub notes: String,
    errors: FieldErrors<SessionField>,
}

impl Default for SessionDraft {
    fn default() -> Self {
        Self {
            session_type: SessionType::default(),
            date: None,
            time: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            modality: Modality::default(),
            topics: Vec::new(),
            sleep: None,
            moods: Vec::new(),
            eating: None,
            medication: None,
            new_medication: String::new(),
            approach: None,
            techniques: Vec::new(),
            dsm: Vec::new(),
            cid: Vec::new(),
            clinical_observations: String::new(),
            clinical_hypotheses: String::new(),
            observed_progress: String::new(),
            interventions: String::new(),
            main_complaint: String::new(),
            complaint_history: String::new(),
            relevant_history: String::new(),
            therapeutic_goals: String::new(),
            treatment_plan: String::new(),
            needs_referral: false,
            referral_to: String::new(),
            referral_reason: String::new(),
            notes: String::new(),
            errors: FieldErrors::default(),
        }
    }
}

impl SessionDraft {
    pub fn new(session_type: SessionType) -> Self {
        Self {
            session_type,
            ..Self::default()
        }
    }

    pub fn from_session(session: &Session) -> Self {
        let d = &session.details;
        let intake = d.kind.intake().cloned().unwrap_or_default();
        let referral = d.referral.clone();
        Self {
            session_type: d.kind.session_type(),
            date: Some(d.date),
            time: Some(d.time),
            duration_minutes: d.duration_minutes,
            modality: d.modality,
            topics: d.state.topics.clone(),
            sleep: d.state.sleep,
            moods: d.state.moods.clone(),
            eating: d.state.eating,
            medication: d.state.medication,
            new_medication: d.state.new_medication.clone().unwrap_or_default(),
            approach: d.therapy.approach,
            techniques: d.therapy.techniques.clone(),
            dsm: d.diagnoses.dsm.clone(),
            cid: d.diagnoses.cid.clone(),
            clinical_observations: text(&d.evolution.clinical_observations),
            clinical_hypotheses: text(&d.evolution.clinical_hypotheses),
            observed_progress: text(&d.evolution.observed_progress),
            interventions: text(&d.evolution.interventions),
            main_complaint: intake.main_complaint,
            complaint_history: intake.complaint_history.unwrap_or_default(),
            relevant_history: intake.relevant_history.unwrap_or_default(),
            therapeutic_goals: intake.therapeutic_goals.unwrap_or_default(),
            treatment_plan: intake.treatment_plan.unwrap_or_default(),
            needs_referral: referral.is_some(),
            referral_to: referral.as_ref().map(|r| text(&r.to)).unwrap_or_default(),
            referral_reason: referral.as_ref().map(|r| text(&r.reason)).unwrap_or_default(),
            notes: text(&d.notes),
            errors: FieldErrors::default(),
        }
    }

    /// Replays a request body through the setters. The approach is applied
    /// before the techniques so preset techniques survive. Lists are taken as
    /// selections, so a repeated entry is kept once.
    pub fn from_input(input: SessionInput) -> Self {
        let mut draft = Self::new(input.session_type);
        draft.set_date(input.date);
        draft.set_time(input.time);
        if let Some(minutes) = input.duration_minutes {
            draft.duration_minutes = minutes;
        }
        draft.modality = input.modality;
        for topic in input.topics {
            if !draft.topics.contains(&topic) {
                draft.toggle_topic(topic);
            }
        }
        draft.set_sleep(input.sleep);
        for mood in input.moods {
            if !draft.moods.contains(&mood) {
                draft.toggle_mood(mood);
            }
        }
        draft.set_eating(input.eating);
        draft.set_medication(input.medication);
        draft.new_medication = input.new_medication.unwrap_or_default();
        draft.set_approach(input.approach);
        for technique in input.techniques {
            draft.add_technique(&technique);
        }
        for code in input.dsm {
            if !draft.dsm.contains(&code) {
                draft.toggle_dsm(code);
            }
        }
        for code in input.cid {
            if !draft.cid.contains(&code) {
                draft.toggle_cid(code);
            }
        }
        draft.clinical_observations = input.clinical_observations.unwrap_or_default();
        draft.clinical_hypotheses = input.clinical_hypotheses.unwrap_or_default();
        draft.observed_progress = input.observed_progress.unwrap_or_default();
        draft.interventions = input.interventions.unwrap_or_default();
        draft.set_main_complaint(input.main_complaint.unwrap_or_default());
        draft.complaint_history = input.complaint_history.unwrap_or_default();
        draft.relevant_history = input.relevant_history.unwrap_or_default();
        draft.therapeutic_goals = input.therapeutic_goals.unwrap_or_default();
        draft.treatment_plan = input.treatment_plan.unwrap_or_default();
        if let Some(referral) = input.referral {
            draft.needs_referral = true;
            draft.referral_to = text(&referral.to);
            draft.referral_reason = text(&referral.reason);
        }
        draft.notes = input.notes.unwrap_or_default();
        draft
    }

    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<Date>) {
        self.date = date;
        self.errors.clear(SessionField::Date);
    }

    pub fn time(&self) -> Option<Time> {
        self.time
    }

    pub fn set_time(&mut self, time: Option<Time>) {
        self.time = time;
        self.errors.clear(SessionField::Time);
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn toggle_topic(&mut self, topic: impl Into<String>) {
        toggle(&mut self.topics, topic.into());
        self.errors.clear(SessionField::Topics);
    }

    pub fn sleep(&self) -> Option<SleepPattern> {
        self.sleep
    }

    pub fn set_sleep(&mut self, sleep: Option<SleepPattern>) {
        self.sleep = sleep;
        self.errors.clear(SessionField::SleepPattern);
    }

    pub fn moods(&self) -> &[Mood] {
        &self.moods
    }

    pub fn toggle_mood(&mut self, mood: Mood) {
        toggle(&mut self.moods, mood);
        self.errors.clear(SessionField::Mood);
    }

    pub fn eating(&self) -> Option<EatingPattern> {
        self.eating
    }

    pub fn set_eating(&mut self, eating: Option<EatingPattern>) {
        self.eating = eating;
        self.errors.clear(SessionField::Eating);
    }

    pub fn medication(&self) -> Option<MedicationStatus> {
        self.medication
    }

    pub fn set_medication(&mut self, medication: Option<MedicationStatus>) {
        self.medication = medication;
        self.errors.clear(SessionField::MedicationStatus);
    }

    pub fn approach(&self) -> Option<Approach> {
        self.approach
    }

    /// Switching approach drops the previous approach's preset techniques
    /// unless the new approach lists them too. Custom techniques stay.
    pub fn set_approach(&mut self, approach: Option<Approach>) {
        let previous = self.approach;
        self.techniques.retain(|t| {
            technique_origin(previous, t) == TechniqueOrigin::Custom
                || technique_origin(approach, t) == TechniqueOrigin::Preset
        });
        self.approach = approach;
        self.errors.clear(SessionField::Approach);
    }

    /// Techniques in selection order.
    pub fn techniques(&self) -> &[String] {
        &self.techniques
    }

    pub fn toggle_technique(&mut self, technique: impl Into<String>) {
        toggle(&mut self.techniques, technique.into());
    }

    /// Adds a preset or free-text technique. Blank and duplicate labels are
    /// ignored.
    pub fn add_technique(&mut self, technique: &str) {
        let technique = technique.trim();
        if technique.is_empty() || self.techniques.iter().any(|t| t == technique) {
            return;
        }
        self.techniques.push(technique.to_string());
    }

    pub fn dsm(&self) -> &[String] {
        &self.dsm
    }

    pub fn toggle_dsm(&mut self, code: impl Into<String>) {
        toggle(&mut self.dsm, code.into());
    }

    pub fn cid(&self) -> &[String] {
        &self.cid
    }

    pub fn toggle_cid(&mut self, code: impl Into<String>) {
        toggle(&mut self.cid, code.into());
    }

    pub fn main_complaint(&self) -> &str {
        &self.main_complaint
    }

    pub fn set_main_complaint(&mut self, complaint: impl Into<String>) {
        self.main_complaint = complaint.into();
        self.errors.clear(SessionField::MainComplaint);
    }

    pub fn errors(&self) -> &FieldErrors<SessionField> {
        &self.errors
    }

    pub fn validate(&self) -> FieldErrors<SessionField> {
        let mut errors = FieldErrors::default();
        if self.date.is_none() {
            errors.insert(SessionField::Date, "Date is required");
        }
        if self.time.is_none() {
            errors.insert(SessionField::Time, "Time is required");
        }

        if self.session_type == SessionType::Intake {
            if self.main_complaint.trim().is_empty() {
                errors.insert(SessionField::MainComplaint, "Main complaint is required");
            }
            return errors;
        }

        if self.topics.is_empty() {
            errors.insert(SessionField::Topics, "Select at least one topic");
        }
        if self.sleep.is_none() {
            errors.insert(SessionField::SleepPattern, "Sleep pattern is required");
        }
        if self.moods.is_empty() {
            errors.insert(SessionField::Mood, "Select at least one mood");
        }
        if self.eating.is_none() {
            errors.insert(SessionField::Eating, "Eating pattern is required");
        }
        if self.medication.is_none() {
            errors.insert(SessionField::MedicationStatus, "Medication status is required");
        }
        if self.approach.is_none() {
            errors.insert(SessionField::Approach, "Therapeutic approach is required");
        }
        errors
    }

    pub fn submit(&mut self) -> Result<SessionDetails, FieldErrors<SessionField>> {
        self.errors = self.validate();
        let (date, time) = match (self.date, self.time) {
            (Some(date), Some(time)) if self.errors.is_empty() => (date, time),
            _ => return Err(self.errors.clone()),
        };

        let kind = match self.session_type {
            SessionType::Intake => SessionKind::Intake(IntakePayload {
                main_complaint: self.main_complaint.trim().to_string(),
                complaint_history: optional_text(&self.complaint_history),
                relevant_history: optional_text(&self.relevant_history),
                therapeutic_goals: optional_text(&self.therapeutic_goals),
                treatment_plan: optional_text(&self.treatment_plan),
            }),
            SessionType::Regular => SessionKind::Regular,
            SessionType::Closure => SessionKind::Closure,
        };

        let new_medication = match self.medication {
            Some(MedicationStatus::Changed) => optional_text(&self.new_medication),
            _ => None,
        };

        let referral = self.needs_referral.then(|| Referral {
            to: optional_text(&self.referral_to),
            reason: optional_text(&self.referral_reason),
        });

        Ok(SessionDetails {
            kind,
            date,
            time,
            duration_minutes: self.duration_minutes,
            modality: self.modality,
            state: ClinicalState {
                topics: self.topics.clone(),
                sleep: self.sleep,
                moods: self.moods.clone(),
                eating: self.eating,
                medication: self.medication,
                new_medication,
            },
            therapy: Therapy {
                approach: self.approach,
                techniques: self.techniques.clone(),
            },
            diagnoses: Diagnoses {
                dsm: self.dsm.clone(),
                cid: self.cid.clone(),
            },
            evolution: Evolution {
                clinical_observations: optional_text(&self.clinical_observations),
                clinical_hypotheses: optional_text(&self.clinical_hypotheses),
                observed_progress: optional_text(&self.observed_progress),
                interventions: optional_text(&self.interventions),
            },
            referral,
            notes: optional_text(&self.notes),
        })
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Request body for creating or updating a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct SessionInput {
    pub session_type: SessionType,
    pub date: Option<Date>,
    #[ts(type = "string | null")]
    pub time: Option<Time>,
    pub duration_minutes: Option<u16>,
    pub modality: Modality,
    pub topics: Vec<String>,
    pub sleep: Option<SleepPattern>,
    pub moods: Vec<Mood>,
    pub eating: Option<EatingPattern>,
    pub medication: Option<MedicationStatus>,
    pub new_medication: Option<String>,
    pub approach: Option<Approach>,
    pub techniques: Vec<String>,
    pub dsm: Vec<String>,
    pub cid: Vec<String>,
    pub clinical_observations: Option<String>,
    pub clinical_hypotheses: Option<String>,
    pub observed_progress: Option<String>,
    pub interventions: Option<String>,
    pub main_complaint: Option<String>,
    pub complaint_history: Option<String>,
    pub relevant_history: Option<String>,
    pub therapeutic_goals: Option<String>,
    pub treatment_plan: Option<String>,
    pub referral: Option<Referral>,
    pub notes: Option<String>,
}
