//! Vital-sign bundle captured at triage.

use serde::{Deserialize, Serialize};

use crate::numeric::{leading_decimal, leading_integer};

/// Vital signs as entered by the operator.
///
/// Values stay as text; an entry that does not start with a number simply
/// never triggers a classifier criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VitalSigns {
    /// Blood pressure (e.g., "120/80"), recorded but not classified
    pub blood_pressure: String,
    /// Heart rate in beats per minute
    pub heart_rate: String,
    /// Respiratory rate in breaths per minute
    pub respiratory_rate: String,
    /// Temperature in °C
    pub temperature: String,
    /// Oxygen saturation in %
    pub oxygen_saturation: String,
    /// Pain score 0-10
    pub pain_score: String,
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            blood_pressure: String::new(),
            heart_rate: String::new(),
            respiratory_rate: String::new(),
            temperature: String::new(),
            oxygen_saturation: String::new(),
            pain_score: "0".into(),
        }
    }
}

/// Numeric view of a [`VitalSigns`] bundle. `None` means unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VitalReadings {
    pub heart_rate: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub temperature: Option<f64>,
    pub pain_score: Option<f64>,
}

impl VitalSigns {
    /// Bundle with the default pain score and nothing else entered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle from measured numbers.
    pub fn measured(
        heart_rate: f64,
        respiratory_rate: f64,
        oxygen_saturation: f64,
        temperature: f64,
        pain_score: f64,
    ) -> Self {
        Self {
            blood_pressure: String::new(),
            heart_rate: heart_rate.to_string(),
            respiratory_rate: respiratory_rate.to_string(),
            temperature: temperature.to_string(),
            oxygen_saturation: oxygen_saturation.to_string(),
            pain_score: pain_score.to_string(),
        }
    }

    pub fn with_blood_pressure(mut self, value: impl Into<String>) -> Self {
        self.blood_pressure = value.into();
        self
    }

    pub fn with_heart_rate(mut self, value: impl Into<String>) -> Self {
        self.heart_rate = value.into();
        self
    }

    pub fn with_respiratory_rate(mut self, value: impl Into<String>) -> Self {
        self.respiratory_rate = value.into();
        self
    }

    pub fn with_temperature(mut self, value: impl Into<String>) -> Self {
        self.temperature = value.into();
        self
    }

    pub fn with_oxygen_saturation(mut self, value: impl Into<String>) -> Self {
        self.oxygen_saturation = value.into();
        self
    }

    pub fn with_pain_score(mut self, value: impl Into<String>) -> Self {
        self.pain_score = value.into();
        self
    }

    /// Read the classified vitals.
    ///
    /// Rates, saturation and pain are whole numbers (fractions truncate);
    /// temperature keeps its decimals.
    pub fn readings(&self) -> VitalReadings {
        VitalReadings {
            heart_rate: leading_integer(&self.heart_rate),
            respiratory_rate: leading_integer(&self.respiratory_rate),
            oxygen_saturation: leading_integer(&self.oxygen_saturation),
            temperature: leading_decimal(&self.temperature),
            pain_score: leading_integer(&self.pain_score),
        }
    }
}
