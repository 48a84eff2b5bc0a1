//! Patient history and the encounter worklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AcuityLevel, EncounterRecord, LabResult, VitalSigns};

/// One closed visit as shown on the history screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitSummary {
    pub encounter_id: String,
    pub arrived_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub acuity: Option<AcuityLevel>,
    pub chief_complaint: String,
    /// Selected diagnoses joined for display
    pub diagnosis: String,
    /// Operator who recorded the visit
    pub recorded_by: String,
    pub vitals: Option<VitalSigns>,
    pub symptoms: Vec<String>,
    pub lab_results: Vec<LabResult>,
    pub treatment: String,
}

impl VisitSummary {
    pub fn from_record(record: &EncounterRecord) -> Self {
        Self {
            encounter_id: record.encounter_id.clone(),
            arrived_at: record.arrived_at,
            closed_at: record.closed_at(),
            acuity: record.acuity(),
            chief_complaint: record.chief_complaint.clone(),
            diagnosis: record.diagnoses.join(", "),
            recorded_by: record.recorded_by.clone(),
            vitals: record.vitals.clone(),
            symptoms: record.symptoms.described().map(str::to_string).collect(),
            lab_results: record.lab_results.clone(),
            treatment: record.treatment.clone(),
        }
    }
}

/// Closed visits of one patient, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientHistory {
    pub patient_id: String,
    pub visits: Vec<VisitSummary>,
}

impl PatientHistory {
    pub fn from_records<'a, I>(patient_id: &str, records: I) -> Self
    where
        I: IntoIterator<Item = &'a EncounterRecord>,
    {
        let mut visits: Vec<VisitSummary> = records
            .into_iter()
            .filter(|record| record.patient_id == patient_id && record.is_closed())
            .map(VisitSummary::from_record)
            .collect();
        visits.sort_by(|a, b| b.arrived_at.cmp(&a.arrived_at));

        Self {
            patient_id: patient_id.to_string(),
            visits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn latest(&self) -> Option<&VisitSummary> {
        self.visits.first()
    }
}

/// Dashboard view over open and closed encounters.
#[derive(Debug, Clone, Default)]
pub struct Worklist {
    records: Vec<EncounterRecord>,
}

impl Worklist {
    pub fn new(records: Vec<EncounterRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EncounterRecord] {
        &self.records
    }

    /// Encounters whose patient name or symptoms contain `query`
    /// (case-insensitive). A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&EncounterRecord> {
        let query = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| query.is_empty() || Self::matches(record, &query))
            .collect()
    }

    /// Most severe first, unclassified last, then by arrival.
    pub fn by_priority(&self) -> Vec<&EncounterRecord> {
        let mut ordered: Vec<&EncounterRecord> = self.records.iter().collect();
        ordered.sort_by_key(|record| {
            (
                record.acuity().map_or(u8::MAX, AcuityLevel::priority),
                record.arrived_at,
            )
        });
        ordered
    }

    fn matches(record: &EncounterRecord, query: &str) -> bool {
        record
            .demographics
            .full_name()
            .to_lowercase()
            .contains(query)
            || record.chief_complaint.to_lowercase().contains(query)
            || record
                .symptoms
                .described()
                .any(|symptom| symptom.to_lowercase().contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Demographics, Gender, Stage, SymptomAssessment};
    use chrono::{Duration, NaiveDate};

    fn record(
        name: &str,
        symptom: &str,
        acuity: Option<AcuityLevel>,
        minutes_ago: i64,
    ) -> EncounterRecord {
        let arrived = Utc::now() - Duration::minutes(minutes_ago);
        let mut record = EncounterRecord::new("nurse".into(), arrived);
        record.demographics = Demographics::new(
            name,
            "Pérez",
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            Gender::Male,
        );
        record.symptoms = SymptomAssessment::new().with_primary(symptom);
        record.acuity = acuity;
        record
    }

    #[test]
    fn test_search_by_name_or_symptom() {
        let worklist = Worklist::new(vec![
            record("Juan", "Fiebre", None, 10),
            record("María", "Dolor torácico", None, 5),
        ]);

        assert_eq!(worklist.search("juan").len(), 1);
        assert_eq!(worklist.search("TORÁCICO")[0].demographics.name, "María");
        assert_eq!(worklist.search("pérez").len(), 2);
        assert_eq!(worklist.search("").len(), 2);
        assert!(worklist.search("tos").is_empty());
    }

    #[test]
    fn test_by_priority() {
        let worklist = Worklist::new(vec![
            record("Unclassified", "Tos", None, 30),
            record("Standard", "Tos", Some(AcuityLevel::Standard), 20),
            record("EmergencyLate", "Tos", Some(AcuityLevel::Emergency), 1),
            record("EmergencyEarly", "Tos", Some(AcuityLevel::Emergency), 15),
        ]);

        let names: Vec<&str> = worklist
            .by_priority()
            .iter()
            .map(|r| r.demographics.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["EmergencyEarly", "EmergencyLate", "Standard", "Unclassified"]
        );
    }

    #[test]
    fn test_history_only_closed_visits_newest_first() {
        let mut older = record("Juan", "Fiebre", Some(AcuityLevel::Urgent), 600);
        let mut newer = record("Juan", "Tos", Some(AcuityLevel::NonUrgent), 60);
        let mut open = record("Juan", "Mareo", None, 5);
        newer.patient_id = older.patient_id.clone();
        open.patient_id = older.patient_id.clone();

        for r in [&mut older, &mut newer] {
            r.stage = Stage::Closed;
            r.diagnoses = vec!["Neumonía".into(), "Ansiedad".into()];
        }

        let history = PatientHistory::from_records(&older.patient_id, [&older, &newer, &open]);
        assert_eq!(history.visits.len(), 2);
        assert_eq!(history.latest().unwrap().symptoms, vec!["Tos"]);
        assert_eq!(history.visits[1].diagnosis, "Neumonía, Ansiedad");
        assert_eq!(history.visits[1].acuity, Some(AcuityLevel::Urgent));
    }
}
