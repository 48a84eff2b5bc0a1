//! Lab results entered at the lab stage.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::reference_range::ReferenceRangeEvaluator;

/// A single lab result row. Abnormality is derived, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabResult {
    /// Test name (e.g., "Glucosa")
    pub test_name: String,
    /// Measured value as entered
    pub value: String,
    /// Unit (e.g., "mg/dL")
    pub unit: String,
    /// Reference range notation (e.g., "70-100", "< 0.04")
    pub reference_range: String,
}

impl LabResult {
    pub fn new(
        test_name: impl Into<String>,
        value: impl Into<String>,
        unit: impl Into<String>,
        reference_range: impl Into<String>,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            value: value.into(),
            unit: unit.into(),
            reference_range: reference_range.into(),
        }
    }

    /// An empty row.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Abnormal under the default range grammar.
    pub fn is_abnormal(&self) -> bool {
        self.is_abnormal_with(&ReferenceRangeEvaluator::default())
    }

    pub fn is_abnormal_with(&self, evaluator: &ReferenceRangeEvaluator) -> bool {
        evaluator.is_abnormal(&self.value, &self.reference_range)
    }
}

/// Lab stage submission: the include toggle plus the editable rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabPanel {
    /// Whether lab results are part of this encounter
    pub include: bool,
    pub rows: Vec<LabResult>,
}

impl Default for LabPanel {
    fn default() -> Self {
        Self::excluded()
    }
}

impl LabPanel {
    /// Labs toggled off, with one blank row ready.
    pub fn excluded() -> Self {
        Self {
            include: false,
            rows: vec![LabResult::blank()],
        }
    }

    pub fn included(rows: Vec<LabResult>) -> Self {
        let rows = if rows.is_empty() {
            vec![LabResult::blank()]
        } else {
            rows
        };
        Self {
            include: true,
            rows,
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(LabResult::blank());
    }

    /// Remove a row. The last remaining row is never removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Set a row's test name and copy unit and range from the catalog.
    ///
    /// A name the catalog does not know clears unit and range.
    pub fn select_test(&mut self, index: usize, name: &str, catalog: &dyn Catalog) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        row.test_name = name.to_string();
        match catalog.lab_test(name) {
            Some(template) => {
                row.unit = template.unit;
                row.reference_range = template.reference_range;
            }
            None => {
                row.unit.clear();
                row.reference_range.clear();
            }
        }
        true
    }

    /// Rows that end up in the record: none when the toggle is off.
    pub fn merged_rows(&self) -> Vec<LabResult> {
        if self.include {
            self.rows.clone()
        } else {
            Vec::new()
        }
    }
}

/// Abnormality flag for one submitted row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabFinding {
    /// Row position in the submission
    pub index: usize,
    pub test_name: String,
    pub abnormal: bool,
}
