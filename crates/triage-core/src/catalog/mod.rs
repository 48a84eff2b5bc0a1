//! Read-only clinical vocabularies for free-text suggestions.
//!
//! The core queries a [`Catalog`] but never owns or mutates one. Hosts may
//! plug in their own vocabulary service; [`StaticCatalog`] is an in-memory
//! implementation seeded with the default clinical lists.

mod defaults;

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

/// Minimum fuzzy similarity for a non-substring suggestion.
const MIN_SIMILARITY: f64 = 0.55;

/// Which vocabulary to search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Symptom,
    Diagnosis,
    LabTest,
}

/// A lab test with its default unit and reference range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabTestTemplate {
    pub name: String,
    pub unit: String,
    pub reference_range: String,
}

impl LabTestTemplate {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        reference_range: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            reference_range: reference_range.into(),
        }
    }
}

/// A ranked suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub text: String,
    /// Match quality (0.0 - 1.0); substring matches score 1.0
    pub score: f64,
}

/// Read-only vocabulary collaborator.
pub trait Catalog {
    /// Entries of `kind` matching `query`, best first, at most `limit`.
    fn suggest(&self, kind: CatalogKind, query: &str, limit: usize) -> Vec<Suggestion>;

    /// Exact (case-insensitive) lab test lookup.
    fn lab_test(&self, name: &str) -> Option<LabTestTemplate>;
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    symptoms: Vec<String>,
    diagnoses: Vec<String>,
    lab_tests: Vec<LabTestTemplate>,
}

impl StaticCatalog {
    pub fn new(
        symptoms: Vec<String>,
        diagnoses: Vec<String>,
        lab_tests: Vec<LabTestTemplate>,
    ) -> Self {
        Self {
            symptoms,
            diagnoses,
            lab_tests,
        }
    }

    /// Catalog seeded with the default emergency-department vocabularies.
    pub fn clinical_defaults() -> Self {
        Self {
            symptoms: defaults::SYMPTOMS.iter().map(|s| s.to_string()).collect(),
            diagnoses: defaults::DIAGNOSES.iter().map(|s| s.to_string()).collect(),
            lab_tests: defaults::LAB_TESTS
                .iter()
                .map(|(name, unit, range)| LabTestTemplate::new(*name, *unit, *range))
                .collect(),
        }
    }

    /// Number of entries of a kind.
    pub fn len(&self, kind: CatalogKind) -> usize {
        match kind {
            CatalogKind::Symptom => self.symptoms.len(),
            CatalogKind::Diagnosis => self.diagnoses.len(),
            CatalogKind::LabTest => self.lab_tests.len(),
        }
    }

    fn entries(&self, kind: CatalogKind) -> Vec<&str> {
        match kind {
            CatalogKind::Symptom => self.symptoms.iter().map(String::as_str).collect(),
            CatalogKind::Diagnosis => self.diagnoses.iter().map(String::as_str).collect(),
            CatalogKind::LabTest => self.lab_tests.iter().map(|t| t.name.as_str()).collect(),
        }
    }
}

impl Catalog for StaticCatalog {
    fn suggest(&self, kind: CatalogKind, query: &str, limit: usize) -> Vec<Suggestion> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<Suggestion> = self
            .entries(kind)
            .into_iter()
            .map(|entry| Suggestion {
                text: entry.to_string(),
                score: score_entry(&query, entry),
            })
            .filter(|s| s.score >= MIN_SIMILARITY)
            .collect();

        // Stable sort keeps catalog order among equal scores
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        scored
    }

    fn lab_test(&self, name: &str) -> Option<LabTestTemplate> {
        let wanted = name.trim().to_lowercase();
        self.lab_tests
            .iter()
            .find(|t| t.name.to_lowercase() == wanted)
            .cloned()
    }
}

/// Substring matches win outright; otherwise blend fuzzy similarities.
fn score_entry(query: &str, entry: &str) -> f64 {
    let entry = entry.to_lowercase();
    if entry.contains(query) {
        return 1.0;
    }

    let whole = fuzzy_match(query, &entry);
    let best_word = entry
        .split_whitespace()
        .map(|word| fuzzy_match(query, word))
        .fold(0.0, f64::max);
    whole.max(best_word)
}

fn fuzzy_match(a: &str, b: &str) -> f64 {
    // Jaro-Winkler favours shared prefixes, Levenshtein overall similarity
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_sizes() {
        let catalog = StaticCatalog::clinical_defaults();
        assert_eq!(catalog.len(CatalogKind::Symptom), 30);
        assert_eq!(catalog.len(CatalogKind::Diagnosis), 19);
        assert_eq!(catalog.len(CatalogKind::LabTest), 15);
    }

    #[test]
    fn test_substring_suggestions_first() {
        let catalog = StaticCatalog::clinical_defaults();
        let suggestions = catalog.suggest(CatalogKind::Symptom, "dolor", 10);

        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().all(|s| s.score >= MIN_SIMILARITY));
        assert_eq!(suggestions[0].text, "Dolor de cabeza");
        assert!(suggestions
            .iter()
            .take_while(|s| s.score == 1.0)
            .all(|s| s.text.to_lowercase().contains("dolor")));
    }

    #[test]
    fn test_fuzzy_suggestion_tolerates_typos() {
        let catalog = StaticCatalog::clinical_defaults();
        let suggestions = catalog.suggest(CatalogKind::Diagnosis, "neumonia", 3);
        assert_eq!(suggestions[0].text, "Neumonía");
    }

    #[test]
    fn test_limit_and_empty_query() {
        let catalog = StaticCatalog::clinical_defaults();
        assert_eq!(catalog.suggest(CatalogKind::Symptom, "dolor", 2).len(), 2);
        assert!(catalog.suggest(CatalogKind::Symptom, "   ", 5).is_empty());
        assert!(catalog.suggest(CatalogKind::Symptom, "dolor", 0).is_empty());
    }

    #[test]
    fn test_lab_test_lookup() {
        let catalog = StaticCatalog::clinical_defaults();

        let troponin = catalog.lab_test("troponina i").unwrap();
        assert_eq!(troponin.unit, "ng/mL");
        assert_eq!(troponin.reference_range, "< 0.04");

        assert!(catalog.lab_test("CK-MB").is_none());
    }
}
