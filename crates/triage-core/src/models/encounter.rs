//! The encounter record accumulated across workflow stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::acuity::AcuityLevel;
use super::lab::LabResult;
use super::patient::Demographics;
use super::stage::Stage;
use super::symptoms::SymptomAssessment;
use super::vitals::VitalSigns;
use crate::reference_range::ReferenceRangeEvaluator;
use crate::workflow::{check_reached, ValidationError};

/// Digest-stamped record of a successful stage advance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageCommit {
    /// Stage whose submission was committed
    pub stage: Stage,
    /// SHA-256 (hex) of the canonical submission payload
    pub digest: String,
    pub committed_at: DateTime<Utc>,
}

/// One patient visit from registration through diagnosis.
///
/// Stage data fields are public so presentation code can render them.
/// Workflow state (stage, acuity, commits) is only changed by
/// [`crate::workflow::EncounterWorkflow`]. Deserializing a record at a stage
/// whose earlier gates do not hold fails with a [`ValidationError`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StoredRecord")]
pub struct EncounterRecord {
    /// Unique encounter ID (UUID v4)
    pub encounter_id: String,
    /// Patient ID (UUID v4)
    pub patient_id: String,
    pub demographics: Demographics,
    pub arrived_at: DateTime<Utc>,
    /// Reason for consultation
    pub chief_complaint: String,
    /// Absent until triage
    pub vitals: Option<VitalSigns>,
    pub symptoms: SymptomAssessment,
    /// The lab stage's include toggle
    pub labs_included: bool,
    pub lab_results: Vec<LabResult>,
    /// Selected diagnoses, no duplicates
    pub diagnoses: Vec<String>,
    pub observations: String,
    /// Treatment plan
    pub treatment: String,
    /// Operator who opened the encounter
    pub recorded_by: String,
    pub(crate) stage: Stage,
    pub(crate) acuity: Option<AcuityLevel>,
    pub(crate) acuity_stale: bool,
    pub(crate) commits: Vec<StageCommit>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Wire form of [`EncounterRecord`], checked on the way in.
#[derive(Deserialize)]
struct StoredRecord {
    encounter_id: String,
    patient_id: String,
    demographics: Demographics,
    arrived_at: DateTime<Utc>,
    chief_complaint: String,
    vitals: Option<VitalSigns>,
    symptoms: SymptomAssessment,
    labs_included: bool,
    lab_results: Vec<LabResult>,
    diagnoses: Vec<String>,
    observations: String,
    treatment: String,
    recorded_by: String,
    stage: Stage,
    acuity: Option<AcuityLevel>,
    acuity_stale: bool,
    commits: Vec<StageCommit>,
    closed_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoredRecord> for EncounterRecord {
    type Error = ValidationError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let record = EncounterRecord {
            encounter_id: stored.encounter_id,
            patient_id: stored.patient_id,
            demographics: stored.demographics,
            arrived_at: stored.arrived_at,
            chief_complaint: stored.chief_complaint,
            vitals: stored.vitals,
            symptoms: stored.symptoms,
            labs_included: stored.labs_included,
            lab_results: stored.lab_results,
            diagnoses: stored.diagnoses,
            observations: stored.observations,
            treatment: stored.treatment,
            recorded_by: stored.recorded_by,
            stage: stored.stage,
            acuity: stored.acuity,
            acuity_stale: stored.acuity_stale,
            commits: stored.commits,
            closed_at: stored.closed_at,
            updated_at: stored.updated_at,
        };
        check_reached(&record)?;
        Ok(record)
    }
}

impl EncounterRecord {
    /// Create a new record at registration for a new patient.
    pub(crate) fn new(recorded_by: String, arrived_at: DateTime<Utc>) -> Self {
        Self {
            encounter_id: uuid::Uuid::new_v4().to_string(),
            patient_id: uuid::Uuid::new_v4().to_string(),
            demographics: Demographics::default(),
            arrived_at,
            chief_complaint: String::new(),
            vitals: None,
            symptoms: SymptomAssessment::default(),
            labs_included: false,
            lab_results: Vec::new(),
            diagnoses: Vec::new(),
            observations: String::new(),
            treatment: String::new(),
            recorded_by,
            stage: Stage::Registration,
            acuity: None,
            acuity_stale: false,
            commits: Vec::new(),
            closed_at: None,
            updated_at: arrived_at,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Computed acuity level, if triage has classified this record.
    pub fn acuity(&self) -> Option<AcuityLevel> {
        self.acuity
    }

    /// Vitals changed after the level was last computed.
    pub fn acuity_stale(&self) -> bool {
        self.acuity_stale
    }

    pub fn commits(&self) -> &[StageCommit] {
        &self.commits
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn is_closed(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Lab rows flagged as outside their reference range.
    pub fn abnormal_labs<'a>(
        &'a self,
        evaluator: &'a ReferenceRangeEvaluator,
    ) -> impl Iterator<Item = &'a LabResult> + 'a {
        self.lab_results
            .iter()
            .filter(move |lab| lab.is_abnormal_with(evaluator))
    }

    /// Serialize to canonical JSON (deterministic output).
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
