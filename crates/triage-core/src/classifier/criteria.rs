//! Threshold criteria for each acuity tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::VitalReadings;

/// A classified vital sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Vital {
    HeartRate,
    RespiratoryRate,
    OxygenSaturation,
    Temperature,
    PainScore,
}

impl Vital {
    pub fn name(self) -> &'static str {
        match self {
            Vital::HeartRate => "heart rate",
            Vital::RespiratoryRate => "respiratory rate",
            Vital::OxygenSaturation => "oxygen saturation",
            Vital::Temperature => "temperature",
            Vital::PainScore => "pain score",
        }
    }

    fn reading(self, readings: &VitalReadings) -> Option<f64> {
        match self {
            Vital::HeartRate => readings.heart_rate,
            Vital::RespiratoryRate => readings.respiratory_rate,
            Vital::OxygenSaturation => readings.oxygen_saturation,
            Vital::Temperature => readings.temperature,
            Vital::PainScore => readings.pain_score,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Comparison {
    Above,
    Below,
    AtLeast,
    Equals,
}

impl Comparison {
    fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Above => value > threshold,
            Comparison::Below => value < threshold,
            Comparison::AtLeast => value >= threshold,
            Comparison::Equals => value == threshold,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::Above => ">",
            Comparison::Below => "<",
            Comparison::AtLeast => ">=",
            Comparison::Equals => "==",
        }
    }
}

/// One threshold test, e.g. heart rate > 130.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Criterion {
    pub vital: Vital,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Criterion {
    const fn new(vital: Vital, comparison: Comparison, threshold: f64) -> Self {
        Self {
            vital,
            comparison,
            threshold,
        }
    }

    /// Unparseable readings never match.
    pub fn matches(&self, readings: &VitalReadings) -> bool {
        self.vital
            .reading(readings)
            .is_some_and(|value| self.comparison.holds(value, self.threshold))
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.vital.name(),
            self.comparison.symbol(),
            self.threshold
        )
    }
}

use Comparison::{Above, AtLeast, Below, Equals};
use Vital::{HeartRate, OxygenSaturation, PainScore, RespiratoryRate, Temperature};

pub(super) const EMERGENCY: &[Criterion] = &[
    Criterion::new(HeartRate, Above, 130.0),
    Criterion::new(HeartRate, Below, 40.0),
    Criterion::new(RespiratoryRate, Above, 30.0),
    Criterion::new(RespiratoryRate, Below, 8.0),
    Criterion::new(OxygenSaturation, Below, 90.0),
    Criterion::new(Temperature, Above, 40.0),
    Criterion::new(Temperature, Below, 35.0),
    Criterion::new(PainScore, Equals, 10.0),
];

pub(super) const URGENT: &[Criterion] = &[
    Criterion::new(HeartRate, Above, 120.0),
    Criterion::new(HeartRate, Below, 50.0),
    Criterion::new(RespiratoryRate, Above, 25.0),
    Criterion::new(RespiratoryRate, Below, 10.0),
    Criterion::new(OxygenSaturation, Below, 92.0),
    Criterion::new(Temperature, Above, 39.0),
    Criterion::new(Temperature, Below, 35.5),
    Criterion::new(PainScore, AtLeast, 8.0),
];

pub(super) const STANDARD: &[Criterion] = &[
    Criterion::new(HeartRate, Above, 100.0),
    Criterion::new(HeartRate, Below, 60.0),
    Criterion::new(RespiratoryRate, Above, 20.0),
    Criterion::new(RespiratoryRate, Below, 12.0),
    Criterion::new(OxygenSaturation, Below, 95.0),
    Criterion::new(Temperature, Above, 38.0),
    Criterion::new(Temperature, Below, 36.0),
    Criterion::new(PainScore, AtLeast, 5.0),
];
