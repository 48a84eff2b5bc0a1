//! Scripted encounters replayed through the workflow.
//!
//! A script is a JSON document naming the operator and an ordered list of
//! steps, each one an action an operator would take on the wizard:
//!
//! ```json
//! {
//!   "operator": "nurse.garcia",
//!   "token": "demo",
//!   "steps": [
//!     { "action": "advance", "submission": { "Registration": { ... } } },
//!     { "action": "classify", "vitals": { "heart_rate": "135" } },
//!     { "action": "advance", "submission": "Unchanged" },
//!     { "action": "back" }
//!   ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use triage_core::models::{AcuityLevel, EncounterRecord, LabFinding, Stage, VitalSigns};
use triage_core::workflow::{EncounterWorkflow, StageSubmission, WorkflowError};
use triage_core::Session;

/// Script errors.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid script: {0}")]
    InvalidFormat(String),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

pub type ScriptResult<T> = Result<T, ScriptError>;

/// A scripted encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterScript {
    pub operator: String,
    pub token: String,
    /// Arrival time; now when absent
    #[serde(default)]
    pub arrived_at: Option<DateTime<Utc>>,
    pub steps: Vec<ScriptStep>,
}

/// One operator action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Press "calculate acuity" with these vitals
    Classify { vitals: VitalSigns },
    /// Submit the current stage
    Advance { submission: StageSubmission },
    /// Return to the previous stage
    Back,
}

/// What happened on one step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Classified {
        level: AcuityLevel,
        triggered: Vec<String>,
    },
    Advanced {
        from: Stage,
        to: Stage,
        replayed: bool,
        lab_findings: Vec<LabFinding>,
    },
    WentBack {
        to: Stage,
    },
    /// The workflow refused the step; the record is unchanged
    Rejected {
        reason: String,
    },
}

/// Final record plus a log of every step.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub record: EncounterRecord,
    pub steps: Vec<StepOutcome>,
}

/// Parse a script. Leading or trailing text around the JSON object is ignored.
pub fn parse_script(json: &str) -> ScriptResult<EncounterScript> {
    let json_start = json
        .find('{')
        .ok_or_else(|| ScriptError::InvalidFormat("No JSON object found in script".into()))?;
    let json_end = json
        .rfind('}')
        .ok_or_else(|| ScriptError::InvalidFormat("No closing brace found in script".into()))?;

    let script: EncounterScript = serde_json::from_str(&json[json_start..=json_end])?;
    if script.operator.trim().is_empty() {
        return Err(ScriptError::InvalidFormat("operator is required".into()));
    }
    Ok(script)
}

/// Run every step against a fresh encounter.
///
/// Rejected steps are logged and the replay continues, the way an operator
/// would see the error and carry on. Session failures abort the replay.
pub fn replay(
    workflow: &EncounterWorkflow,
    script: &EncounterScript,
) -> ScriptResult<ReplayReport> {
    let session = Session::new(script.operator.clone(), script.token.clone());
    let mut record = workflow.open(&session, script.arrived_at.unwrap_or_else(Utc::now))?;
    let mut steps = Vec::with_capacity(script.steps.len());

    for (index, step) in script.steps.iter().enumerate() {
        let outcome = match step {
            ScriptStep::Classify { vitals } => workflow
                .classify(&session, &record, vitals)
                .map(|classified| {
                    record = classified.record;
                    StepOutcome::Classified {
                        level: classified.classification.level,
                        triggered: classified
                            .classification
                            .triggered
                            .iter()
                            .map(ToString::to_string)
                            .collect(),
                    }
                }),
            ScriptStep::Advance { submission } => workflow
                .advance(&session, &record, submission)
                .map(|advance| {
                    record = advance.record;
                    StepOutcome::Advanced {
                        from: advance.from,
                        to: advance.to,
                        replayed: advance.replayed,
                        lab_findings: advance.lab_findings,
                    }
                }),
            ScriptStep::Back => workflow.go_back(&session, &record).map(|previous| {
                record = previous;
                StepOutcome::WentBack {
                    to: record.stage(),
                }
            }),
        };

        match outcome {
            Ok(outcome) => steps.push(outcome),
            Err(WorkflowError::Session(err)) => return Err(WorkflowError::Session(err).into()),
            Err(err) => {
                warn!(step = index, error = %err, "Script step rejected");
                steps.push(StepOutcome::Rejected {
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(ReplayReport { record, steps })
}
