//! Triage Core Library
//!
//! Emergency department encounter wizard: rule-based acuity classification,
//! lab reference-range flagging and the staged workflow that assembles an
//! encounter record.
//!
//! # Architecture
//!
//! ```text
//!  Registration ──► Triage ──► SymptomEntry ──► LabResults ──► Diagnosis ──► Closed
//!                     │                             │
//!                     ▼                             ▼
//!             AcuityClassifier           ReferenceRangeEvaluator
//!           (vitals → acuity level)      (value + range → abnormal)
//!                     │                             │
//!                     └──────────────┬──────────────┘
//!                                    ▼
//!                            EncounterRecord
//!                                    │
//!                 ┌──────────────────┼──────────────────┐
//!                 ▼                  ▼                  ▼
//!           Presentation       PatientHistory       Worklist
//!           (external)
//! ```
//!
//! # Core Principle
//!
//! **The core is pure.** No I/O, no ambient state: the record and the
//! operator [`Session`] are passed into every workflow operation and a new
//! record is returned.
//!
//! # Modules
//!
//! - [`models`]: Domain types (EncounterRecord, VitalSigns, LabResult, etc.)
//! - [`classifier`]: Acuity classifier over vital signs
//! - [`reference_range`]: Lab reference-range parsing and flagging
//! - [`workflow`]: Stage state machine with gates and idempotent advance
//! - [`catalog`]: Read-only clinical vocabularies
//! - [`history`]: Patient history and worklist views
//! - [`session`]: Operator session
//! - [`config`]: Workflow configuration resolved from a key lookup

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod history;
pub mod models;
mod numeric;
pub mod reference_range;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogKind, LabTestTemplate, StaticCatalog, Suggestion};
pub use classifier::{AcuityClassifier, Classification, Criterion};
pub use config::{AcuityPolicy, ConfigError, WorkflowConfig};
pub use history::{PatientHistory, VisitSummary, Worklist};
pub use models::{
    AcuityLevel, Demographics, EncounterRecord, Gender, LabFinding, LabPanel, LabResult, Screen,
    SeverityPalette, Stage, SymptomAssessment, VitalSigns,
};
pub use reference_range::{is_abnormal, RangeGrammar, ReferenceRange, ReferenceRangeEvaluator};
pub use session::{Session, SessionError};
pub use workflow::{
    Advance, Classified, DiagnosisForm, EncounterWorkflow, RegistrationForm, RequiredField,
    StageSubmission, ValidationError, WorkflowError,
};
