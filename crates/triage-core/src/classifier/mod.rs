//! Rule-based acuity classifier.
//!
//! Tiers are checked from most to least severe and the first tier with any
//! matching criterion wins. A bundle that matches nothing, including one with
//! every vital blank, is [`AcuityLevel::NonUrgent`].
//!
//! Not a validated clinical algorithm.

mod criteria;

pub use criteria::{Comparison, Criterion, Vital};

use serde::{Deserialize, Serialize};

use crate::models::{AcuityLevel, VitalReadings, VitalSigns};

/// A level with the criteria that put the bundle there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub level: AcuityLevel,
    /// Matching criteria of the winning tier; empty for the default tier
    pub triggered: Vec<Criterion>,
}

/// Pure mapping from vital signs to an acuity level.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcuityClassifier;

impl AcuityClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, vitals: &VitalSigns) -> AcuityLevel {
        self.classify_readings(&vitals.readings())
    }

    pub fn classify_readings(&self, readings: &VitalReadings) -> AcuityLevel {
        Self::tiers()
            .into_iter()
            .find(|(_, criteria)| criteria.iter().any(|c| c.matches(readings)))
            .map(|(level, _)| level)
            .unwrap_or(AcuityLevel::NonUrgent)
    }

    /// Classify and report which criteria fired.
    pub fn explain(&self, vitals: &VitalSigns) -> Classification {
        let readings = vitals.readings();
        for (level, criteria) in Self::tiers() {
            let triggered: Vec<Criterion> = criteria
                .iter()
                .filter(|c| c.matches(&readings))
                .copied()
                .collect();
            if !triggered.is_empty() {
                return Classification { level, triggered };
            }
        }
        Classification {
            level: AcuityLevel::NonUrgent,
            triggered: Vec::new(),
        }
    }

    fn tiers() -> [(AcuityLevel, &'static [Criterion]); 3] {
        [
            (AcuityLevel::Emergency, criteria::EMERGENCY),
            (AcuityLevel::Urgent, criteria::URGENT),
            (AcuityLevel::Standard, criteria::STANDARD),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vitals(hr: f64, rr: f64, spo2: f64, temp: f64, pain: f64) -> VitalSigns {
        VitalSigns::measured(hr, rr, spo2, temp, pain)
    }

    #[test]
    fn test_reference_examples() {
        let classifier = AcuityClassifier::new();
        assert_eq!(
            classifier.classify(&vitals(150.0, 18.0, 97.0, 37.0, 2.0)),
            AcuityLevel::Emergency
        );
        assert_eq!(
            classifier.classify(&vitals(110.0, 18.0, 97.0, 37.0, 2.0)),
            AcuityLevel::Standard
        );
        assert_eq!(
            classifier.classify(&vitals(80.0, 16.0, 98.0, 36.5, 1.0)),
            AcuityLevel::NonUrgent
        );
        assert_eq!(
            classifier.classify(&vitals(80.0, 16.0, 98.0, 36.5, 9.0)),
            AcuityLevel::Urgent
        );
    }

    #[test]
    fn test_blank_vitals_are_non_urgent() {
        let classifier = AcuityClassifier::new();
        let blank = VitalSigns::new().with_pain_score("");
        assert_eq!(classifier.classify(&blank), AcuityLevel::NonUrgent);
        assert_eq!(classifier.classify(&VitalSigns::new()), AcuityLevel::NonUrgent);
    }

    #[test]
    fn test_unparseable_values_never_trigger() {
        let classifier = AcuityClassifier::new();
        let garbled = VitalSigns::new()
            .with_heart_rate("fast")
            .with_oxygen_saturation("n/a")
            .with_temperature("hot");
        assert_eq!(classifier.classify(&garbled), AcuityLevel::NonUrgent);
    }

    #[test]
    fn test_integer_vitals_truncate() {
        let classifier = AcuityClassifier::new();
        // 89.9 reads as 89, below the emergency saturation threshold
        let low = VitalSigns::new().with_oxygen_saturation("89.9");
        assert_eq!(classifier.classify(&low), AcuityLevel::Emergency);
        // 35.4 stays a decimal for temperature
        let cold = VitalSigns::new().with_temperature("35.4");
        assert_eq!(classifier.classify(&cold), AcuityLevel::Urgent);
    }

    #[test]
    fn test_boundaries_are_strict() {
        let classifier = AcuityClassifier::new();
        assert_eq!(
            classifier.classify(&VitalSigns::new().with_heart_rate("130")),
            AcuityLevel::Urgent
        );
        assert_eq!(
            classifier.classify(&VitalSigns::new().with_heart_rate("100")),
            AcuityLevel::NonUrgent
        );
        assert_eq!(
            classifier.classify(&VitalSigns::new().with_oxygen_saturation("95")),
            AcuityLevel::NonUrgent
        );
        assert_eq!(
            classifier.classify(&VitalSigns::new().with_pain_score("5")),
            AcuityLevel::Standard
        );
    }

    #[test]
    fn test_explain_lists_triggered_criteria() {
        let classifier = AcuityClassifier::new();
        let explained = classifier.explain(&vitals(150.0, 35.0, 97.0, 37.0, 2.0));

        assert_eq!(explained.level, AcuityLevel::Emergency);
        let reasons: Vec<String> = explained.triggered.iter().map(|c| c.to_string()).collect();
        assert_eq!(reasons, vec!["heart rate > 130", "respiratory rate > 30"]);

        let calm = classifier.explain(&vitals(80.0, 16.0, 98.0, 36.5, 1.0));
        assert_eq!(calm.level, AcuityLevel::NonUrgent);
        assert!(calm.triggered.is_empty());
    }

    fn baseline() -> VitalReadings {
        VitalReadings {
            heart_rate: Some(80.0),
            respiratory_rate: Some(16.0),
            oxygen_saturation: Some(98.0),
            temperature: Some(36.8),
            pain_score: Some(0.0),
        }
    }

    proptest! {
        #[test]
        fn prop_classify_is_total_and_deterministic(
            hr in "\\PC{0,6}",
            rr in "\\PC{0,6}",
            spo2 in "\\PC{0,6}",
            temp in "\\PC{0,6}",
            pain in "\\PC{0,6}",
        ) {
            let classifier = AcuityClassifier::new();
            let vitals = VitalSigns::new()
                .with_heart_rate(hr)
                .with_respiratory_rate(rr)
                .with_oxygen_saturation(spo2)
                .with_temperature(temp)
                .with_pain_score(pain);

            let first = classifier.classify(&vitals);
            prop_assert!(AcuityLevel::ALL.contains(&first));
            prop_assert_eq!(first, classifier.classify(&vitals));
            prop_assert_eq!(first, classifier.explain(&vitals).level);
        }

        #[test]
        fn prop_pain_is_monotonic(low in 0u8..=10, high in 0u8..=10) {
            prop_assume!(low <= high);
            let classifier = AcuityClassifier::new();
            let at = |pain: u8| classifier.classify_readings(&VitalReadings {
                pain_score: Some(f64::from(pain)),
                ..baseline()
            });
            prop_assert!(at(high) >= at(low));
        }

        #[test]
        fn prop_saturation_is_monotonic(low in 50u8..=100, high in 50u8..=100) {
            prop_assume!(low <= high);
            let classifier = AcuityClassifier::new();
            let at = |spo2: u8| classifier.classify_readings(&VitalReadings {
                oxygen_saturation: Some(f64::from(spo2)),
                ..baseline()
            });
            // Lower saturation is never less severe
            prop_assert!(at(low) >= at(high));
        }

        #[test]
        fn prop_heart_rate_severity_grows_above_normal(hr in 60u16..=220) {
            let classifier = AcuityClassifier::new();
            let at = |hr: u16| classifier.classify_readings(&VitalReadings {
                heart_rate: Some(f64::from(hr)),
                ..baseline()
            });
            prop_assert!(at(hr + 1) >= at(hr));
        }

        #[test]
        fn prop_heart_rate_severity_grows_below_normal(hr in 1u16..=60) {
            let classifier = AcuityClassifier::new();
            let at = |hr: u16| classifier.classify_readings(&VitalReadings {
                heart_rate: Some(f64::from(hr)),
                ..baseline()
            });
            prop_assert!(at(hr - 1) >= at(hr));
        }

        #[test]
        fn prop_respiratory_rate_severity_grows_above_normal(rr in 16u8..=60) {
            let classifier = AcuityClassifier::new();
            let at = |rr: u8| classifier.classify_readings(&VitalReadings {
                respiratory_rate: Some(f64::from(rr)),
                ..baseline()
            });
            prop_assert!(at(rr + 1) >= at(rr));
        }

        #[test]
        fn prop_respiratory_rate_severity_grows_below_normal(rr in 1u8..=16) {
            let classifier = AcuityClassifier::new();
            let at = |rr: u8| classifier.classify_readings(&VitalReadings {
                respiratory_rate: Some(f64::from(rr)),
                ..baseline()
            });
            prop_assert!(at(rr - 1) >= at(rr));
        }

        // Temperatures are swept in tenths of a degree from 36.8
        #[test]
        fn prop_temperature_severity_grows_above_normal(tenths in 368u16..=450) {
            let classifier = AcuityClassifier::new();
            let at = |tenths: u16| classifier.classify_readings(&VitalReadings {
                temperature: Some(f64::from(tenths) / 10.0),
                ..baseline()
            });
            prop_assert!(at(tenths + 1) >= at(tenths));
        }

        #[test]
        fn prop_temperature_severity_grows_below_normal(tenths in 300u16..=368) {
            let classifier = AcuityClassifier::new();
            let at = |tenths: u16| classifier.classify_readings(&VitalReadings {
                temperature: Some(f64::from(tenths) / 10.0),
                ..baseline()
            });
            prop_assert!(at(tenths - 1) >= at(tenths));
        }

        #[test]
        fn prop_level_matches_its_explanation(
            hr in 20u16..=200,
            rr in 4u8..=40,
            spo2 in 70u8..=100,
            temp in 330u16..=420,
            pain in 0u8..=10,
        ) {
            let classifier = AcuityClassifier::new();
            let vitals = VitalSigns::measured(
                f64::from(hr),
                f64::from(rr),
                f64::from(spo2),
                f64::from(temp) / 10.0,
                f64::from(pain),
            );
            let explained = classifier.explain(&vitals);
            prop_assert_eq!(
                explained.triggered.is_empty(),
                explained.level == AcuityLevel::NonUrgent
            );
        }
    }
}
