//! Workflow configuration resolved once at startup.
//!
//! The core only resolves values from a key lookup; reading the process
//! environment belongs to the binary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference_range::RangeGrammar;

pub const ACUITY_POLICY_VAR: &str = "TRIAGE_ACUITY_POLICY";
pub const RANGE_GRAMMAR_VAR: &str = "TRIAGE_RANGE_GRAMMAR";
pub const SUGGESTION_LIMIT_VAR: &str = "TRIAGE_SUGGESTION_LIMIT";
pub const LOG_LEVEL_VAR: &str = "TRIAGE_LOG_LEVEL";

/// What happens to a computed acuity level when vitals change afterwards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AcuityPolicy {
    /// Keep the level and mark it stale until the operator recalculates
    #[default]
    Sticky,
    /// Reclassify on every vitals merge once a level exists
    Recompute,
}

impl FromStr for AcuityPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sticky" => Ok(AcuityPolicy::Sticky),
            "recompute" => Ok(AcuityPolicy::Recompute),
            _ => Err(ConfigError::InvalidValue {
                var: ACUITY_POLICY_VAR,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AcuityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcuityPolicy::Sticky => f.write_str("sticky"),
            AcuityPolicy::Recompute => f.write_str("recompute"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}'")]
    InvalidValue { var: &'static str, value: String },

    #[error("TRIAGE_SUGGESTION_LIMIT must be a positive integer, got '{0}'")]
    InvalidSuggestionLimit(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub acuity_policy: AcuityPolicy,
    pub range_grammar: RangeGrammar,
    /// Maximum catalog suggestions per query
    pub suggestion_limit: usize,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            acuity_policy: AcuityPolicy::default(),
            range_grammar: RangeGrammar::default(),
            suggestion_limit: 8,
            log_level: "info".to_string(),
        }
    }
}

impl WorkflowConfig {
    /// Load from an arbitrary key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let acuity_policy = match lookup(ACUITY_POLICY_VAR) {
            Some(value) => value.parse()?,
            None => defaults.acuity_policy,
        };

        let range_grammar = match lookup(RANGE_GRAMMAR_VAR) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    var: RANGE_GRAMMAR_VAR,
                    value,
                })?,
            None => defaults.range_grammar,
        };

        let suggestion_limit = match lookup(SUGGESTION_LIMIT_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidSuggestionLimit(value)),
            },
            None => defaults.suggestion_limit,
        };

        let log_level = lookup(LOG_LEVEL_VAR).unwrap_or(defaults.log_level);

        Ok(Self {
            acuity_policy,
            range_grammar,
            suggestion_limit,
            log_level,
        })
    }
}
