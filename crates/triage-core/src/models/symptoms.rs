//! Symptom assessment entered after triage.

use serde::{Deserialize, Serialize};

/// Whether a symptom is a presenting complaint or an accompanying one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SymptomKind {
    Primary,
    Associated,
}

/// One symptom slot. Slots may be blank and duplicates are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomEntry {
    pub kind: SymptomKind,
    pub description: String,
}

/// Unit for the time since onset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OnsetUnit {
    Minutes,
    #[default]
    Hours,
    Days,
    Weeks,
    Months,
}

/// Time since onset, as entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Onset {
    pub amount: String,
    pub unit: OnsetUnit,
}

/// Everything captured on the symptom entry stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SymptomAssessment {
    /// Symptom slots in entry order
    pub entries: Vec<SymptomEntry>,
    pub onset: Onset,
    /// How the condition has evolved
    pub evolution: String,
    pub aggravating_factors: String,
    pub relieving_factors: String,
    pub notes: String,
}

impl SymptomAssessment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, description: impl Into<String>) -> Self {
        self.entries.push(SymptomEntry {
            kind: SymptomKind::Primary,
            description: description.into(),
        });
        self
    }

    pub fn with_associated(mut self, description: impl Into<String>) -> Self {
        self.entries.push(SymptomEntry {
            kind: SymptomKind::Associated,
            description: description.into(),
        });
        self
    }

    pub fn with_onset(mut self, amount: impl Into<String>, unit: OnsetUnit) -> Self {
        self.onset = Onset {
            amount: amount.into(),
            unit,
        };
        self
    }

    /// Descriptions of the given kind, in entry order.
    pub fn of_kind(&self, kind: SymptomKind) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |entry| entry.kind == kind)
            .map(|entry| entry.description.as_str())
    }

    /// Non-blank descriptions of every kind, in entry order.
    pub fn described(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|entry| entry.description.trim())
            .filter(|description| !description.is_empty())
    }
}
