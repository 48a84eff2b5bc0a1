//! Encounter workflow state machine.
//!
//! Stages advance strictly forward:
//!
//! ```text
//! Registration → Triage → SymptomEntry → LabResults → Diagnosis → Closed
//!      │           │
//!  required     computed
//!   fields    acuity level
//! ```
//!
//! Every operation takes the record by reference and returns a new one, so a
//! rejected submission leaves the caller's record untouched. Backward
//! navigation never re-validates or discards entered data.

mod digest;
mod submission;
mod validation;

pub use digest::hash_data;
pub use submission::*;
pub(crate) use validation::check_reached;
pub use validation::{requirements, RequiredField, ValidationError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classifier::{AcuityClassifier, Classification};
use crate::config::{AcuityPolicy, WorkflowConfig};
use crate::models::{EncounterRecord, LabFinding, LabResult, Stage, StageCommit, VitalSigns};
use crate::reference_range::ReferenceRangeEvaluator;
use crate::session::{Session, SessionError};

/// Workflow errors.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Submission for {submitted} does not match current stage {current}")]
    StageMismatch { current: Stage, submitted: Stage },

    #[error("Encounter {0} is closed")]
    EncounterClosed(String),

    #[error("No stage before {0}")]
    NoPreviousStage(Stage),

    #[error("Acuity can only be calculated at triage, encounter is at {0}")]
    NotAtTriage(Stage),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Outcome of a successful advance.
#[derive(Debug, Clone, Serialize)]
pub struct Advance {
    pub record: EncounterRecord,
    pub from: Stage,
    pub to: Stage,
    /// The submission had already been committed; nothing changed
    pub replayed: bool,
    /// Abnormality of every merged lab row (lab stage only)
    pub lab_findings: Vec<LabFinding>,
}

/// Outcome of the explicit "calculate acuity" action.
#[derive(Debug, Clone, Serialize)]
pub struct Classified {
    pub record: EncounterRecord,
    pub classification: Classification,
}

/// Drives an [`EncounterRecord`] through its stages.
#[derive(Debug, Clone, Default)]
pub struct EncounterWorkflow {
    config: WorkflowConfig,
    classifier: AcuityClassifier,
    evaluator: ReferenceRangeEvaluator,
}

impl EncounterWorkflow {
    pub fn new(config: WorkflowConfig) -> Self {
        let evaluator = ReferenceRangeEvaluator::new(config.range_grammar);
        Self {
            config,
            classifier: AcuityClassifier::new(),
            evaluator,
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &ReferenceRangeEvaluator {
        &self.evaluator
    }

    /// Fields `stage` requires before advancing.
    pub fn requirements(&self, stage: Stage) -> &'static [RequiredField] {
        requirements(stage)
    }

    /// Start a new encounter at registration.
    pub fn open(
        &self,
        session: &Session,
        arrived_at: DateTime<Utc>,
    ) -> WorkflowResult<EncounterRecord> {
        session.validate_at(Utc::now())?;

        let record = EncounterRecord::new(session.operator.clone(), arrived_at);
        info!(
            encounter_id = %record.encounter_id,
            operator = %session.operator,
            "Encounter opened"
        );
        Ok(record)
    }

    /// Classify `vitals` and store them with the computed level.
    pub fn classify(
        &self,
        session: &Session,
        record: &EncounterRecord,
        vitals: &VitalSigns,
    ) -> WorkflowResult<Classified> {
        session.validate_at(Utc::now())?;
        if record.is_closed() {
            return Err(WorkflowError::EncounterClosed(record.encounter_id.clone()));
        }
        if record.stage() != Stage::Triage {
            return Err(WorkflowError::NotAtTriage(record.stage()));
        }

        let classification = self.classifier.explain(vitals);
        let mut record = record.clone();
        record.vitals = Some(vitals.clone());
        record.acuity = Some(classification.level);
        record.acuity_stale = false;
        record.touch();

        debug!(
            encounter_id = %record.encounter_id,
            level = %classification.level,
            triggered = classification.triggered.len(),
            "Acuity calculated"
        );
        Ok(Classified {
            record,
            classification,
        })
    }

    /// Merge `submission` into the current stage and move forward.
    pub fn advance(
        &self,
        session: &Session,
        record: &EncounterRecord,
        submission: &StageSubmission,
    ) -> WorkflowResult<Advance> {
        session.validate_at(Utc::now())?;

        if let Some(replay) = self.detect_replay(record, submission)? {
            return Ok(replay);
        }

        let from = record.stage();
        let Some(to) = from.next() else {
            return Err(WorkflowError::EncounterClosed(record.encounter_id.clone()));
        };

        if let Some(submitted) = submission.stage() {
            if submitted != from {
                warn!(
                    encounter_id = %record.encounter_id,
                    stage = %from,
                    submitted = %submitted,
                    "Submission for another stage rejected"
                );
                return Err(WorkflowError::StageMismatch {
                    current: from,
                    submitted,
                });
            }
        }

        let mut candidate = record.clone();
        self.merge(&mut candidate, submission);

        if let Err(err) = validation::check_gate(&candidate) {
            warn!(
                encounter_id = %record.encounter_id,
                stage = %err.stage,
                missing = ?err.missing,
                "Advance rejected"
            );
            return Err(err.into());
        }

        let lab_findings = if from == Stage::LabResults {
            self.findings(&candidate.lab_results)
        } else {
            Vec::new()
        };

        let now = Utc::now();
        candidate.commits.push(StageCommit {
            stage: from,
            digest: digest::submission_digest(&record.encounter_id, from, submission)?,
            committed_at: now,
        });
        candidate.stage = to;
        if to == Stage::Closed {
            candidate.closed_at = Some(now);
        }
        candidate.touch();

        info!(
            encounter_id = %candidate.encounter_id,
            from = %from,
            to = %to,
            "Stage advanced"
        );
        Ok(Advance {
            record: candidate,
            from,
            to,
            replayed: false,
            lab_findings,
        })
    }

    /// Return to the previous stage, keeping every entered field.
    pub fn go_back(
        &self,
        session: &Session,
        record: &EncounterRecord,
    ) -> WorkflowResult<EncounterRecord> {
        session.validate_at(Utc::now())?;
        if record.is_closed() {
            return Err(WorkflowError::EncounterClosed(record.encounter_id.clone()));
        }
        let from = record.stage();
        let to = from.previous().ok_or(WorkflowError::NoPreviousStage(from))?;

        let mut record = record.clone();
        record.stage = to;
        record.touch();

        info!(
            encounter_id = %record.encounter_id,
            from = %from,
            to = %to,
            "Stage reopened"
        );
        Ok(record)
    }

    /// Abnormality flag for each lab row.
    pub fn findings(&self, rows: &[LabResult]) -> Vec<LabFinding> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| LabFinding {
                index,
                test_name: row.test_name.clone(),
                abnormal: row.is_abnormal_with(&self.evaluator),
            })
            .collect()
    }

    /// A retried submission for the stage just committed.
    fn detect_replay(
        &self,
        record: &EncounterRecord,
        submission: &StageSubmission,
    ) -> WorkflowResult<Option<Advance>> {
        let (Some(submitted), Some(last)) = (submission.stage(), record.commits().last()) else {
            return Ok(None);
        };
        if submitted == record.stage()
            || last.stage != submitted
            || last.stage.next() != Some(record.stage())
        {
            return Ok(None);
        }

        let digest = digest::submission_digest(&record.encounter_id, submitted, submission)?;
        if digest != last.digest {
            return Ok(None);
        }

        debug!(
            encounter_id = %record.encounter_id,
            stage = %submitted,
            "Replayed submission ignored"
        );
        let lab_findings = match submission {
            StageSubmission::LabResults(_) => self.findings(&record.lab_results),
            _ => Vec::new(),
        };
        Ok(Some(Advance {
            record: record.clone(),
            from: submitted,
            to: record.stage(),
            replayed: true,
            lab_findings,
        }))
    }

    /// Additive merge of a stage's fields.
    fn merge(&self, record: &mut EncounterRecord, submission: &StageSubmission) {
        match submission {
            StageSubmission::Registration(form) => {
                record.demographics = form.demographics.clone();
                record.chief_complaint = form.chief_complaint.clone();
            }
            StageSubmission::Triage(vitals) => self.merge_vitals(record, vitals),
            StageSubmission::SymptomEntry(assessment) => {
                record.symptoms = assessment.clone();
            }
            StageSubmission::LabResults(panel) => {
                record.labs_included = panel.include;
                record.lab_results = panel.merged_rows();
            }
            StageSubmission::Diagnosis(form) => {
                let mut diagnoses: Vec<String> = Vec::with_capacity(form.selected.len());
                for diagnosis in &form.selected {
                    let diagnosis = diagnosis.trim();
                    if !diagnosis.is_empty() && !diagnoses.iter().any(|d| d == diagnosis) {
                        diagnoses.push(diagnosis.to_string());
                    }
                }
                record.diagnoses = diagnoses;
                record.observations = form.observations.clone();
                record.treatment = form.treatment.clone();
            }
            StageSubmission::Unchanged => {}
        }
    }

    fn merge_vitals(&self, record: &mut EncounterRecord, vitals: &VitalSigns) {
        let changed = record.vitals.as_ref() != Some(vitals);
        record.vitals = Some(vitals.clone());

        if record.acuity.is_none() {
            return;
        }
        match self.config.acuity_policy {
            AcuityPolicy::Sticky => {
                if changed {
                    record.acuity_stale = true;
                }
            }
            AcuityPolicy::Recompute => {
                record.acuity = Some(self.classifier.classify(vitals));
                record.acuity_stale = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcuityLevel, Demographics, Gender, LabPanel};
    use chrono::NaiveDate;

    fn session() -> Session {
        Session::new("nurse.garcia", "tok-1")
    }

    fn registration() -> StageSubmission {
        StageSubmission::Registration(RegistrationForm::new(
            Demographics::new(
                "Ana",
                "López",
                NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
                Gender::Female,
            ),
            "Dolor torácico",
        ))
    }

    fn at_triage(workflow: &EncounterWorkflow) -> EncounterRecord {
        let record = workflow.open(&session(), Utc::now()).unwrap();
        workflow
            .advance(&session(), &record, &registration())
            .unwrap()
            .record
    }

    #[test]
    fn test_registration_requires_chief_complaint() {
        let workflow = EncounterWorkflow::default();
        let record = workflow.open(&session(), Utc::now()).unwrap();

        let StageSubmission::Registration(mut form) = registration() else {
            unreachable!()
        };
        form.chief_complaint = "  ".into();

        let err = workflow
            .advance(&session(), &record, &StageSubmission::Registration(form))
            .unwrap_err();
        match err {
            WorkflowError::Validation(err) => {
                assert_eq!(err.stage, Stage::Registration);
                assert_eq!(err.missing, vec![RequiredField::ChiefComplaint]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(record.stage(), Stage::Registration);
        assert!(record.commits().is_empty());
    }

    #[test]
    fn test_registration_lists_every_missing_field() {
        let workflow = EncounterWorkflow::default();
        let record = workflow.open(&session(), Utc::now()).unwrap();

        let err = workflow
            .advance(
                &session(),
                &record,
                &StageSubmission::Registration(RegistrationForm::default()),
            )
            .unwrap_err();
        let WorkflowError::Validation(err) = err else {
            panic!("expected validation error");
        };
        assert_eq!(err.missing, requirements(Stage::Registration).to_vec());
    }

    #[test]
    fn test_triage_requires_classification() {
        let workflow = EncounterWorkflow::default();
        let record = at_triage(&workflow);
        let vitals = VitalSigns::measured(80.0, 16.0, 98.0, 36.5, 1.0);

        let err = workflow
            .advance(&session(), &record, &StageSubmission::Triage(vitals.clone()))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));

        let classified = workflow.classify(&session(), &record, &vitals).unwrap();
        assert_eq!(classified.classification.level, AcuityLevel::NonUrgent);

        let advanced = workflow
            .advance(&session(), &classified.record, &StageSubmission::Triage(vitals))
            .unwrap();
        assert_eq!(advanced.to, Stage::SymptomEntry);
        assert_eq!(advanced.record.acuity(), Some(AcuityLevel::NonUrgent));
        assert!(!advanced.record.acuity_stale());
    }

    #[test]
    fn test_classify_only_at_triage() {
        let workflow = EncounterWorkflow::default();
        let record = workflow.open(&session(), Utc::now()).unwrap();
        let err = workflow
            .classify(&session(), &record, &VitalSigns::new())
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotAtTriage(Stage::Registration)));
    }

    #[test]
    fn test_sticky_policy_marks_stale() {
        let workflow = EncounterWorkflow::default();
        let record = at_triage(&workflow);
        let calm = VitalSigns::measured(80.0, 16.0, 98.0, 36.5, 1.0);
        let record = workflow.classify(&session(), &record, &calm).unwrap().record;

        let worse = calm.clone().with_heart_rate("150");
        let advanced = workflow
            .advance(&session(), &record, &StageSubmission::Triage(worse))
            .unwrap();
        assert_eq!(advanced.record.acuity(), Some(AcuityLevel::NonUrgent));
        assert!(advanced.record.acuity_stale());
    }

    #[test]
    fn test_recompute_policy_reclassifies() {
        let workflow = EncounterWorkflow::new(WorkflowConfig {
            acuity_policy: AcuityPolicy::Recompute,
            ..WorkflowConfig::default()
        });
        let record = at_triage(&workflow);
        let calm = VitalSigns::measured(80.0, 16.0, 98.0, 36.5, 1.0);
        let record = workflow.classify(&session(), &record, &calm).unwrap().record;

        let worse = calm.with_heart_rate("150");
        let advanced = workflow
            .advance(&session(), &record, &StageSubmission::Triage(worse))
            .unwrap();
        assert_eq!(advanced.record.acuity(), Some(AcuityLevel::Emergency));
        assert!(!advanced.record.acuity_stale());
    }

    #[test]
    fn test_stage_mismatch() {
        let workflow = EncounterWorkflow::default();
        let record = workflow.open(&session(), Utc::now()).unwrap();
        let err = workflow
            .advance(
                &session(),
                &record,
                &StageSubmission::LabResults(LabPanel::excluded()),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::StageMismatch {
                current: Stage::Registration,
                submitted: Stage::LabResults
            }
        ));
    }

    #[test]
    fn test_go_back_keeps_data() {
        let workflow = EncounterWorkflow::default();
        let record = at_triage(&workflow);

        let back = workflow.go_back(&session(), &record).unwrap();
        assert_eq!(back.stage(), Stage::Registration);
        assert_eq!(back.chief_complaint, "Dolor torácico");

        let err = workflow.go_back(&session(), &back).unwrap_err();
        assert!(matches!(err, WorkflowError::NoPreviousStage(Stage::Registration)));

        let again = workflow
            .advance(&session(), &back, &StageSubmission::Unchanged)
            .unwrap();
        assert_eq!(again.to, Stage::Triage);
    }

    #[test]
    fn test_replayed_registration_is_ignored() {
        let workflow = EncounterWorkflow::default();
        let record = workflow.open(&session(), Utc::now()).unwrap();
        let first = workflow
            .advance(&session(), &record, &registration())
            .unwrap();

        let retry = workflow
            .advance(&session(), &first.record, &registration())
            .unwrap();
        assert!(retry.replayed);
        assert_eq!(retry.record, first.record);
        assert_eq!(retry.record.commits().len(), 1);
    }

    #[test]
    fn test_expired_session_rejected() {
        let workflow = EncounterWorkflow::default();
        let expired = session().expiring_at(Utc::now() - chrono::Duration::minutes(1));
        let err = workflow.open(&expired, Utc::now()).unwrap_err();
        assert!(matches!(err, WorkflowError::Session(SessionError::Expired(_))));
    }
}
