//! Workflow stages and the screens that render them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Encounter stage, strictly ordered forward.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Stage {
    #[default]
    Registration,
    Triage,
    SymptomEntry,
    LabResults,
    Diagnosis,
    /// Terminal: the encounter has been saved
    Closed,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Registration,
        Stage::Triage,
        Stage::SymptomEntry,
        Stage::LabResults,
        Stage::Diagnosis,
        Stage::Closed,
    ];

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Registration => Some(Stage::Triage),
            Stage::Triage => Some(Stage::SymptomEntry),
            Stage::SymptomEntry => Some(Stage::LabResults),
            Stage::LabResults => Some(Stage::Diagnosis),
            Stage::Diagnosis => Some(Stage::Closed),
            Stage::Closed => None,
        }
    }

    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Registration => None,
            Stage::Triage => Some(Stage::Registration),
            Stage::SymptomEntry => Some(Stage::Triage),
            Stage::LabResults => Some(Stage::SymptomEntry),
            Stage::Diagnosis => Some(Stage::LabResults),
            Stage::Closed => Some(Stage::Diagnosis),
        }
    }

    /// Screen that edits this stage. A closed encounter is shown in history.
    pub fn screen(self) -> Screen {
        match self {
            Stage::Registration => Screen::Registration,
            Stage::Triage => Screen::Triage,
            Stage::SymptomEntry => Screen::SymptomEntry,
            Stage::LabResults => Screen::LabResults,
            Stage::Diagnosis => Screen::Diagnosis,
            Stage::Closed => Screen::History,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Closed
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Registration => "Registration",
            Stage::Triage => "Triage",
            Stage::SymptomEntry => "SymptomEntry",
            Stage::LabResults => "LabResults",
            Stage::Diagnosis => "Diagnosis",
            Stage::Closed => "Closed",
        };
        f.write_str(name)
    }
}

/// Screen identifiers for an external router keyed by patient id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Screen {
    Registration,
    Triage,
    SymptomEntry,
    LabResults,
    Diagnosis,
    History,
}

impl Screen {
    pub fn identifier(self) -> &'static str {
        match self {
            Screen::Registration => "Registration",
            Screen::Triage => "Triage",
            Screen::SymptomEntry => "SymptomEntry",
            Screen::LabResults => "LabResults",
            Screen::Diagnosis => "Diagnosis",
            Screen::History => "History",
        }
    }

    /// The editable stage behind a screen; history has none.
    pub fn stage(self) -> Option<Stage> {
        match self {
            Screen::Registration => Some(Stage::Registration),
            Screen::Triage => Some(Stage::Triage),
            Screen::SymptomEntry => Some(Stage::SymptomEntry),
            Screen::LabResults => Some(Stage::LabResults),
            Screen::Diagnosis => Some(Stage::Diagnosis),
            Screen::History => None,
        }
    }
}
