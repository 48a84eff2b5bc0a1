//! Lab reference ranges and abnormal-value flagging.
//!
//! Three notations are understood, checked in this order:
//!
//! - `min-max` (e.g. `70-100`): abnormal below `min` or above `max`
//! - `< bound` (e.g. `< 0.04`): abnormal at or above `bound`
//! - `> bound` (e.g. `> 5`): abnormal at or below `bound`
//!
//! Anything else is unrecognized and never flags. Evaluation fails closed:
//! blank or unparseable input is "not abnormal", never an error.

mod grammar;

pub use grammar::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric::leading_decimal;

/// A parsed reference range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ReferenceRange {
    /// Normal between the bounds, inclusive. A missing bound never flags.
    Interval { min: Option<f64>, max: Option<f64> },
    /// Normal strictly below the bound
    Below(f64),
    /// Normal strictly above the bound
    Above(f64),
}

impl ReferenceRange {
    /// Parse with the given grammar. `None` for unrecognized notation.
    pub fn parse(text: &str, grammar: RangeGrammar) -> Option<Self> {
        grammar.parse(text)
    }

    /// Whether `value` falls outside this range.
    pub fn flags(&self, value: f64) -> bool {
        match *self {
            ReferenceRange::Interval { min, max } => {
                min.is_some_and(|min| value < min) || max.is_some_and(|max| value > max)
            }
            ReferenceRange::Below(bound) => value >= bound,
            ReferenceRange::Above(bound) => value <= bound,
        }
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceRange::Interval { min, max } => {
                if let Some(min) = min {
                    write!(f, "{}", min)?;
                }
                f.write_str("-")?;
                if let Some(max) = max {
                    write!(f, "{}", max)?;
                }
                Ok(())
            }
            ReferenceRange::Below(bound) => write!(f, "< {}", bound),
            ReferenceRange::Above(bound) => write!(f, "> {}", bound),
        }
    }
}

/// Flags lab values against free-text reference ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceRangeEvaluator {
    grammar: RangeGrammar,
}

impl ReferenceRangeEvaluator {
    pub fn new(grammar: RangeGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> RangeGrammar {
        self.grammar
    }

    /// Whether the entered `value` is outside `reference_range`.
    ///
    /// Returns false when either side is blank or unparseable.
    pub fn is_abnormal(&self, value: &str, reference_range: &str) -> bool {
        if value.is_empty() || reference_range.is_empty() {
            return false;
        }
        match leading_decimal(value) {
            Some(value) => self.is_abnormal_value(value, reference_range),
            None => false,
        }
    }

    /// Whether a numeric `value` is outside `reference_range`.
    pub fn is_abnormal_value(&self, value: f64, reference_range: &str) -> bool {
        self.grammar
            .parse(reference_range)
            .is_some_and(|range| range.flags(value))
    }
}

/// [`ReferenceRangeEvaluator::is_abnormal`] with the default grammar.
pub fn is_abnormal(value: &str, reference_range: &str) -> bool {
    ReferenceRangeEvaluator::default().is_abnormal(value, reference_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval() {
        assert!(is_abnormal("115", "70-100"));
        assert!(!is_abnormal("90", "70-100"));
        assert!(is_abnormal("65", "70-100"));
        assert!(!is_abnormal("70", "70-100"));
        assert!(!is_abnormal("100", "70-100"));
        assert!(is_abnormal("12.3", "4.5-11.0"));
    }

    #[test]
    fn test_upper_bound() {
        assert!(is_abnormal("0.08", "< 0.04"));
        assert!(!is_abnormal("0.02", "< 0.04"));
        assert!(is_abnormal("0.04", "< 0.04"));
        assert!(is_abnormal("5", "<5"));
    }

    #[test]
    fn test_lower_bound() {
        assert!(is_abnormal("3", "> 5"));
        assert!(is_abnormal("5", "> 5"));
        assert!(!is_abnormal("6", "> 5"));
    }

    #[test]
    fn test_fails_closed() {
        assert!(!is_abnormal("", "70-100"));
        assert!(!is_abnormal("115", ""));
        assert!(!is_abnormal("high", "70-100"));
        assert!(!is_abnormal("115", "negative"));
        assert!(!is_abnormal("115", "<= 100"));
        assert!(!is_abnormal("115", "< abc"));
    }

    #[test]
    fn test_half_open_interval() {
        assert!(is_abnormal("50", "70-"));
        assert!(!is_abnormal("500", "70-"));
        // A lone leading dash is a sign, not a separator.
        assert!(!is_abnormal("500", "-100"));
    }

    #[test]
    fn test_value_with_unit_suffix() {
        assert!(is_abnormal("115 mg/dL", "70-100"));
    }

    #[test]
    fn test_numeric_value_entry() {
        let evaluator = ReferenceRangeEvaluator::default();
        assert!(evaluator.is_abnormal_value(115.0, "70-100"));
        assert!(!evaluator.is_abnormal_value(f64::NAN, "70-100"));
    }

    #[test]
    fn test_display() {
        let range = ReferenceRange::parse("70-100", RangeGrammar::Signed).unwrap();
        assert_eq!(range.to_string(), "70-100");
        let range = ReferenceRange::parse("< 0.04", RangeGrammar::Signed).unwrap();
        assert_eq!(range.to_string(), "< 0.04");
    }
}
