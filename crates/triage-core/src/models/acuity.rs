//! Acuity levels and their presentation data.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standardized urgency of an encounter, most severe first.
///
/// `Ord` follows severity: `Emergency` is the greatest value, so
/// `levels.iter().max()` yields the most severe one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AcuityLevel {
    /// Immediate attention required
    Emergency,
    /// Must be seen within 15 minutes
    Urgent,
    /// Abnormal but stable
    Standard,
    /// No vital-sign criterion met
    NonUrgent,
}

/// Severity palette consumed by presentation collaborators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeverityPalette {
    Error,
    Warning,
    Info,
    Success,
}

impl SeverityPalette {
    /// Theme key (`error`, `warning`, `info`, `success`).
    pub fn theme_key(self) -> &'static str {
        match self {
            SeverityPalette::Error => "error",
            SeverityPalette::Warning => "warning",
            SeverityPalette::Info => "info",
            SeverityPalette::Success => "success",
        }
    }

    /// Plain color name.
    pub fn color_name(self) -> &'static str {
        match self {
            SeverityPalette::Error => "red",
            SeverityPalette::Warning => "amber",
            SeverityPalette::Info => "blue",
            SeverityPalette::Success => "green",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown acuity level: {0}")]
pub struct UnknownAcuityLevel(pub String);

impl AcuityLevel {
    /// All levels, most severe first.
    pub const ALL: [AcuityLevel; 4] = [
        AcuityLevel::Emergency,
        AcuityLevel::Urgent,
        AcuityLevel::Standard,
        AcuityLevel::NonUrgent,
    ];

    /// Priority rank (1 = most severe).
    pub fn priority(self) -> u8 {
        match self {
            AcuityLevel::Emergency => 1,
            AcuityLevel::Urgent => 2,
            AcuityLevel::Standard => 3,
            AcuityLevel::NonUrgent => 4,
        }
    }

    /// Stable enumerant identifier shared with report components.
    pub fn identifier(self) -> &'static str {
        match self {
            AcuityLevel::Emergency => "Emergency",
            AcuityLevel::Urgent => "Urgent",
            AcuityLevel::Standard => "Standard",
            AcuityLevel::NonUrgent => "NonUrgent",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            AcuityLevel::Emergency => "Emergency",
            AcuityLevel::Urgent => "Urgent",
            AcuityLevel::Standard => "Standard",
            AcuityLevel::NonUrgent => "Non-urgent",
        }
    }

    /// Label used by the existing Spanish-language reports.
    pub fn spanish_label(self) -> &'static str {
        match self {
            AcuityLevel::Emergency => "Emergencia",
            AcuityLevel::Urgent => "Urgente",
            AcuityLevel::Standard => "Estándar",
            AcuityLevel::NonUrgent => "No urgente",
        }
    }

    pub fn palette(self) -> SeverityPalette {
        match self {
            AcuityLevel::Emergency => SeverityPalette::Error,
            AcuityLevel::Urgent => SeverityPalette::Warning,
            AcuityLevel::Standard => SeverityPalette::Info,
            AcuityLevel::NonUrgent => SeverityPalette::Success,
        }
    }

    /// Operator advisory shown alongside the two highest tiers.
    pub fn advisory(self) -> Option<&'static str> {
        match self {
            AcuityLevel::Emergency => {
                Some("Immediate attention required. Notify the physician on duty.")
            }
            AcuityLevel::Urgent => Some("Patient must be seen within 15 minutes."),
            AcuityLevel::Standard | AcuityLevel::NonUrgent => None,
        }
    }

    fn severity(self) -> u8 {
        5 - self.priority()
    }
}

impl Ord for AcuityLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialOrd for AcuityLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AcuityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for AcuityLevel {
    type Err = UnknownAcuityLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AcuityLevel::ALL
            .into_iter()
            .find(|level| {
                [level.identifier(), level.label(), level.spanish_label()]
                    .iter()
                    .any(|candidate| candidate.to_lowercase() == wanted)
            })
            .ok_or_else(|| UnknownAcuityLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AcuityLevel::Emergency > AcuityLevel::Urgent);
        assert!(AcuityLevel::Urgent > AcuityLevel::Standard);
        assert!(AcuityLevel::Standard > AcuityLevel::NonUrgent);
        assert_eq!(
            AcuityLevel::ALL.iter().max(),
            Some(&AcuityLevel::Emergency)
        );
    }

    #[test]
    fn test_palette_mapping() {
        assert_eq!(AcuityLevel::Emergency.palette().theme_key(), "error");
        assert_eq!(AcuityLevel::Urgent.palette().color_name(), "amber");
        assert_eq!(AcuityLevel::Standard.palette().theme_key(), "info");
        assert_eq!(AcuityLevel::NonUrgent.palette().color_name(), "green");
    }

    #[test]
    fn test_parse_any_label() {
        assert_eq!("NonUrgent".parse::<AcuityLevel>(), Ok(AcuityLevel::NonUrgent));
        assert_eq!("non-urgent".parse::<AcuityLevel>(), Ok(AcuityLevel::NonUrgent));
        assert_eq!("No urgente".parse::<AcuityLevel>(), Ok(AcuityLevel::NonUrgent));
        assert_eq!("Estándar".parse::<AcuityLevel>(), Ok(AcuityLevel::Standard));
        assert_eq!(" emergencia ".parse::<AcuityLevel>(), Ok(AcuityLevel::Emergency));
        assert!("critical".parse::<AcuityLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&AcuityLevel::NonUrgent).unwrap();
        assert_eq!(json, "\"NonUrgent\"");
    }

    #[test]
    fn test_advisory_only_for_top_tiers() {
        assert!(AcuityLevel::Emergency.advisory().is_some());
        assert!(AcuityLevel::Urgent.advisory().is_some());
        assert!(AcuityLevel::Standard.advisory().is_none());
    }
}
