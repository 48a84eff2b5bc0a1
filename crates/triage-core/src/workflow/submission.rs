//! Per-stage form submissions.

use serde::{Deserialize, Serialize};

use crate::models::{Demographics, LabPanel, Stage, SymptomAssessment, VitalSigns};

/// Data submitted when leaving a stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StageSubmission {
    Registration(RegistrationForm),
    /// Vitals as currently entered on the triage form
    Triage(VitalSigns),
    SymptomEntry(SymptomAssessment),
    LabResults(LabPanel),
    Diagnosis(DiagnosisForm),
    /// Advance the current stage with the data already on the record
    Unchanged,
}

impl StageSubmission {
    /// Stage this submission belongs to; `None` for [`StageSubmission::Unchanged`].
    pub fn stage(&self) -> Option<Stage> {
        match self {
            StageSubmission::Registration(_) => Some(Stage::Registration),
            StageSubmission::Triage(_) => Some(Stage::Triage),
            StageSubmission::SymptomEntry(_) => Some(Stage::SymptomEntry),
            StageSubmission::LabResults(_) => Some(Stage::LabResults),
            StageSubmission::Diagnosis(_) => Some(Stage::Diagnosis),
            StageSubmission::Unchanged => None,
        }
    }
}

/// Registration form: demographics plus the reason for consultation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistrationForm {
    pub demographics: Demographics,
    pub chief_complaint: String,
}

impl RegistrationForm {
    pub fn new(demographics: Demographics, chief_complaint: impl Into<String>) -> Self {
        Self {
            demographics,
            chief_complaint: chief_complaint.into(),
        }
    }
}

/// Diagnosis form: selected diagnoses, observations and the treatment plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiagnosisForm {
    pub selected: Vec<String>,
    pub observations: String,
    pub treatment: String,
}

impl DiagnosisForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnosis. Blank input and exact duplicates are ignored.
    pub fn add(&mut self, diagnosis: &str) -> bool {
        let diagnosis = diagnosis.trim();
        if diagnosis.is_empty() || self.selected.iter().any(|d| d == diagnosis) {
            return false;
        }
        self.selected.push(diagnosis.to_string());
        true
    }

    pub fn remove(&mut self, diagnosis: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|d| d != diagnosis);
        self.selected.len() != before
    }

    pub fn with_diagnosis(mut self, diagnosis: &str) -> Self {
        self.add(diagnosis);
        self
    }

    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = observations.into();
        self
    }

    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = treatment.into();
        self
    }
}
