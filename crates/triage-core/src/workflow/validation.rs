//! Stage gates and the fields they require.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EncounterRecord, Stage};

/// A field a stage requires before the encounter may advance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Name,
    Surname,
    Birthdate,
    Gender,
    ChiefComplaint,
    /// A computed acuity level
    AcuityLevel,
}

impl RequiredField {
    pub fn field_name(self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Surname => "surname",
            RequiredField::Birthdate => "birthdate",
            RequiredField::Gender => "gender",
            RequiredField::ChiefComplaint => "chief_complaint",
            RequiredField::AcuityLevel => "acuity_level",
        }
    }

    fn is_present(self, record: &EncounterRecord) -> bool {
        let demographics = &record.demographics;
        match self {
            RequiredField::Name => !demographics.name.trim().is_empty(),
            RequiredField::Surname => !demographics.surname.trim().is_empty(),
            RequiredField::Birthdate => demographics.birthdate.is_some(),
            RequiredField::Gender => demographics.gender.is_some(),
            RequiredField::ChiefComplaint => !record.chief_complaint.trim().is_empty(),
            RequiredField::AcuityLevel => record.acuity().is_some(),
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

const REGISTRATION_FIELDS: &[RequiredField] = &[
    RequiredField::Name,
    RequiredField::Surname,
    RequiredField::Birthdate,
    RequiredField::Gender,
    RequiredField::ChiefComplaint,
];

const TRIAGE_FIELDS: &[RequiredField] = &[RequiredField::AcuityLevel];

/// Fields `stage` requires before advancing.
pub fn requirements(stage: Stage) -> &'static [RequiredField] {
    match stage {
        Stage::Registration => REGISTRATION_FIELDS,
        Stage::Triage => TRIAGE_FIELDS,
        _ => &[],
    }
}

/// An advance was blocked by unmet required fields.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("cannot leave {stage}: missing {}", join(.missing))]
pub struct ValidationError {
    pub stage: Stage,
    pub missing: Vec<RequiredField>,
}

fn join(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.field_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply the gate for leaving `record`'s current stage.
///
/// Every earlier stage's requirements must still hold as well.
pub(crate) fn check_gate(record: &EncounterRecord) -> Result<(), ValidationError> {
    check_reached(record)?;
    check_stage(record, record.stage())
}

/// Check that `record` satisfies every stage it has already left.
pub(crate) fn check_reached(record: &EncounterRecord) -> Result<(), ValidationError> {
    Stage::ALL
        .into_iter()
        .take_while(|stage| *stage < record.stage())
        .try_for_each(|stage| check_stage(record, stage))
}

fn check_stage(record: &EncounterRecord, stage: Stage) -> Result<(), ValidationError> {
    let missing: Vec<RequiredField> = requirements(stage)
        .iter()
        .copied()
        .filter(|field| !field.is_present(record))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { stage, missing })
    }
}
