//! Static reference tables.
//!
//! Coded values stored on sessions, their display labels, the preset
//! technique lists per therapeutic approach and the DSM/CID code lists.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SleepPattern {
    Normal,
    SleepingLittle,
    SleepingALot,
    Insomnia,
}

impl SleepPattern {
    pub const ALL: [SleepPattern; 4] = [
        SleepPattern::Normal,
        SleepPattern::SleepingLittle,
        SleepPattern::SleepingALot,
        SleepPattern::Insomnia,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SleepPattern::Normal => "Normal",
            SleepPattern::SleepingLittle => "Sleeping little",
            SleepPattern::SleepingALot => "Sleeping a lot",
            SleepPattern::Insomnia => "Insomnia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Mood {
    Depressive,
    Irritable,
    Melancholic,
    Angry,
    Joyful,
    Anxious,
    Calm,
    Apathetic,
    Euphoric,
}

impl Mood {
    pub const ALL: [Mood; 9] = [
        Mood::Depressive,
        Mood::Irritable,
        Mood::Melancholic,
        Mood::Angry,
        Mood::Joyful,
        Mood::Anxious,
        Mood::Calm,
        Mood::Apathetic,
        Mood::Euphoric,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Depressive => "Depressive",
            Mood::Irritable => "Irritable",
            Mood::Melancholic => "Melancholic",
            Mood::Angry => "Angry",
            Mood::Joyful => "Joyful",
            Mood::Anxious => "Anxious",
            Mood::Calm => "Calm",
            Mood::Apathetic => "Apathetic",
            Mood::Euphoric => "Euphoric",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EatingPattern {
    Normal,
    EatingALot,
    EatingLittle,
    NotEating,
}

impl EatingPattern {
    pub const ALL: [EatingPattern; 4] = [
        EatingPattern::Normal,
        EatingPattern::EatingALot,
        EatingPattern::EatingLittle,
        EatingPattern::NotEating,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EatingPattern::Normal => "Eating normally",
            EatingPattern::EatingALot => "Eating a lot",
            EatingPattern::EatingLittle => "Eating little",
            EatingPattern::NotEating => "Not eating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MedicationStatus {
    TakingRegularly,
    IrregularSchedule,
    SkippingDays,
    StoppedOnOwn,
    /// Gates the free-text new medication field.
    Changed,
    NoMedication,
}

impl MedicationStatus {
    pub const ALL: [MedicationStatus; 6] = [
        MedicationStatus::TakingRegularly,
        MedicationStatus::IrregularSchedule,
        MedicationStatus::SkippingDays,
        MedicationStatus::StoppedOnOwn,
        MedicationStatus::Changed,
        MedicationStatus::NoMedication,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MedicationStatus::TakingRegularly => "Taking regularly",
            MedicationStatus::IrregularSchedule => "Irregular schedule",
            MedicationStatus::SkippingDays => "Forgetting some days",
            MedicationStatus::StoppedOnOwn => "Stopped on their own",
            MedicationStatus::Changed => "Medication changed",
            MedicationStatus::NoMedication => "Does not use medication",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Approach {
    CognitiveBehavioral,
    Psychodynamic,
    Humanistic,
    BehaviorAnalysis,
}

impl Approach {
    pub const ALL: [Approach; 4] = [
        Approach::CognitiveBehavioral,
        Approach::Psychodynamic,
        Approach::Humanistic,
        Approach::BehaviorAnalysis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Approach::CognitiveBehavioral => "Cognitive-Behavioral Therapy (CBT)",
            Approach::Psychodynamic => "Psychodynamic",
            Approach::Humanistic => "Humanistic",
            Approach::BehaviorAnalysis => "Behavior Analysis",
        }
    }

    /// Preset techniques offered for this approach, in display order.
    pub fn techniques(self) -> &'static [&'static str] {
        match self {
            Approach::CognitiveBehavioral => &[
                "Cognitive Restructuring",
                "Socratic Questioning",
                "Thought Records",
                "Behavioral Activation",
                "Exposure",
                "Problem Solving",
                "Relaxation Training",
                "Psychoeducation",
                "Homework Assignment",
                "Role-play",
            ],
            Approach::Psychodynamic => &[
                "Free Association",
                "Interpretation",
                "Transference Analysis",
                "Dream Work",
                "Clarification",
                "Confrontation",
                "Working Through",
                "Defense Analysis",
            ],
            Approach::Humanistic => &[
                "Active Listening",
                "Empathic Reflection",
                "Unconditional Positive Regard",
                "Empty Chair",
                "Focusing",
                "Here-and-Now Awareness",
                "Congruence",
            ],
            Approach::BehaviorAnalysis => &[
                "Functional Analysis",
                "Positive Reinforcement",
                "Shaping",
                "Extinction",
                "Modeling",
                "Systematic Desensitization",
                "Token Economy",
                "Self-monitoring",
            ],
        }
    }

    pub fn is_preset_technique(self, technique: &str) -> bool {
        self.techniques().iter().any(|t| *t == technique)
    }
}

/// Where a technique label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TechniqueOrigin {
    Preset,
    Custom,
}

/// Classify a stored technique label against the preset list of `approach`.
/// Without an approach every technique is custom.
pub fn technique_origin(approach: Option<Approach>, technique: &str) -> TechniqueOrigin {
    match approach {
        Some(a) if a.is_preset_technique(technique) => TechniqueOrigin::Preset,
        _ => TechniqueOrigin::Custom,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DocumentType {
    PsychologicalReport,
    Certificate,
    Declaration,
    ConsentForm,
    TestInstrument,
    Report,
    #[default]
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::PsychologicalReport,
        DocumentType::Certificate,
        DocumentType::Declaration,
        DocumentType::ConsentForm,
        DocumentType::TestInstrument,
        DocumentType::Report,
        DocumentType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentType::PsychologicalReport => "Psychological Report",
            DocumentType::Certificate => "Certificate",
            DocumentType::Declaration => "Declaration",
            DocumentType::ConsentForm => "Consent Form",
            DocumentType::TestInstrument => "Test Instrument",
            DocumentType::Report => "Report",
            DocumentType::Other => "Other",
        }
    }

    fn code(self) -> &'static str {
        match self {
            DocumentType::PsychologicalReport => "psychological_report",
            DocumentType::Certificate => "certificate",
            DocumentType::Declaration => "declaration",
            DocumentType::ConsentForm => "consent_form",
            DocumentType::TestInstrument => "test_instrument",
            DocumentType::Report => "report",
            DocumentType::Other => "other",
        }
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| CoreError::UnknownReference {
                table: "document type",
                value: s.to_string(),
            })
    }
}

/// Preset session topics. Sessions may also carry free-text topics.
pub const SESSION_TOPICS: [&str; 20] = [
    "Family Issues",
    "Relationships",
    "Work",
    "Self-esteem",
    "Anxiety",
    "Depression",
    "Trauma",
    "Grief",
    "Addictions",
    "Sexuality",
    "Identity",
    "Academic Life",
    "Finances",
    "Health",
    "Social Isolation",
    "Life Transitions",
    "Parenting",
    "Stress",
    "Sleep",
    "Eating Behavior",
];

/// Typical session lengths offered by the session form, in minutes.
pub const DURATION_OPTIONS: [u16; 6] = [30, 45, 50, 60, 90, 120];

pub const DEFAULT_DURATION_MINUTES: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub code: &'static str,
    pub name: &'static str,
}

impl Diagnosis {
    /// `name (code)`, the form used in narrative text.
    pub fn narrative_label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    /// `code - name`, the form used in listings and the exported record.
    pub fn listing_label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

const fn dx(code: &'static str, name: &'static str) -> Diagnosis {
    Diagnosis { code, name }
}

pub const DSM_DIAGNOSES: [Diagnosis; 19] = [
    dx("F32", "Major Depressive Disorder, single episode"),
    dx("F33", "Major Depressive Disorder, recurrent episode"),
    dx("F34.1", "Persistent Depressive Disorder (Dysthymia)"),
    dx("F41.1", "Generalized Anxiety Disorder"),
    dx("F41.0", "Panic Disorder"),
    dx("F40.10", "Social Anxiety Disorder"),
    dx("F40.00", "Agoraphobia"),
    dx("F42.2", "Obsessive-Compulsive Disorder"),
    dx("F43.10", "Posttraumatic Stress Disorder"),
    dx("F43.2", "Adjustment Disorder"),
    dx("F31", "Bipolar I Disorder"),
    dx("F31.81", "Bipolar II Disorder"),
    dx("F90", "Attention-Deficit/Hyperactivity Disorder"),
    dx("F84.0", "Autism Spectrum Disorder"),
    dx("F50.0", "Anorexia Nervosa"),
    dx("F50.2", "Bulimia Nervosa"),
    dx("F51.01", "Insomnia Disorder"),
    dx("F60.3", "Borderline Personality Disorder"),
    dx("F10.20", "Alcohol Use Disorder, moderate"),
];

pub const CID_DIAGNOSES: [Diagnosis; 22] = [
    dx("F32.0", "Mild depressive episode"),
    dx("F32.1", "Moderate depressive episode"),
    dx("F32.2", "Severe depressive episode without psychotic symptoms"),
    dx("F33.0", "Recurrent depressive disorder, current episode mild"),
    dx("F34.1", "Dysthymia"),
    dx("F41.0", "Panic disorder"),
    dx("F41.1", "Generalized anxiety disorder"),
    dx("F41.2", "Mixed anxiety and depressive disorder"),
    dx("F40.0", "Agoraphobia"),
    dx("F40.1", "Social phobias"),
    dx("F42.0", "Predominantly obsessional thoughts or ruminations"),
    dx("F43.0", "Acute stress reaction"),
    dx("F43.1", "Post-traumatic stress disorder"),
    dx("F43.2", "Adjustment disorders"),
    dx("F31.0", "Bipolar affective disorder, current episode hypomanic"),
    dx("F90.0", "Disturbance of activity and attention"),
    dx("F84.0", "Childhood autism"),
    dx("F50.0", "Anorexia nervosa"),
    dx("F50.2", "Bulimia nervosa"),
    dx("F51.0", "Nonorganic insomnia"),
    dx("F60.3", "Emotionally unstable personality disorder"),
    dx("F10.2", "Alcohol use disorder, dependence syndrome"),
];

pub fn dsm_diagnosis(code: &str) -> Option<&'static Diagnosis> {
    DSM_DIAGNOSES.iter().find(|d| d.code == code)
}

pub fn cid_diagnosis(code: &str) -> Option<&'static Diagnosis> {
    CID_DIAGNOSES.iter().find(|d| d.code == code)
}
