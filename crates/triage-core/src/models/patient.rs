//! Patient demographics captured at registration.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Administrative gender as selected on the registration form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
    Other,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown gender: {0}")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" | "femenino" => Ok(Gender::Female),
            "male" | "m" | "masculino" => Ok(Gender::Male),
            "other" | "otro" => Ok(Gender::Other),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Demographic and background data for the patient of an encounter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Demographics {
    /// Given name (required)
    pub name: String,
    /// Surname(s) (required)
    pub surname: String,
    /// Date of birth (required)
    pub birthdate: Option<NaiveDate>,
    /// Gender (required)
    pub gender: Option<Gender>,
    /// National/hospital identification number
    pub id_number: String,
    pub address: String,
    pub phone: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    /// Known allergies, free text
    pub allergies: String,
    /// Current medication, free text
    pub current_medication: String,
    /// Relevant medical history, free text
    pub medical_history: String,
    pub pregnant: bool,
}

impl Demographics {
    /// Demographics with the four required fields filled in.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        birthdate: NaiveDate,
        gender: Gender,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            birthdate: Some(birthdate),
            gender: Some(gender),
            ..Self::default()
        }
    }

    /// "Name Surname", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.trim(), self.surname.trim())
            .trim()
            .to_string()
    }

    /// Age in whole years on the given date.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let birthdate = self.birthdate?;
        if birthdate > today {
            return None;
        }
        let mut years = today.year() - birthdate.year();
        if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    pub fn has_allergies(&self) -> bool {
        !self.allergies.trim().is_empty()
    }
}
