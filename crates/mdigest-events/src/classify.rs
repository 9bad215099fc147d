//! Keyword-rule classification of feed titles.
//!
//! Decision logic only; the keywords come from a [`KeywordTable`].

use std::collections::BTreeSet;

use mdigest_core::{KeywordTable, Severity, Species, TemplateId};

/// Deterministic title classifier. Matching is case-insensitive substring search.
#[derive(Debug, Clone)]
pub struct Classifier {
    species: Vec<(Species, Vec<String>)>,
    severity_high: Vec<String>,
    severity_mid: Vec<String>,
    disease: Vec<String>,
}

fn normalize(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .filter(|w| !w.trim().is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

impl Classifier {
    #[must_use]
    pub fn new(table: &KeywordTable) -> Self {
        Self {
            species: table
                .species
                .iter()
                .map(|(species, words)| (*species, normalize(words)))
                .collect(),
            severity_high: normalize(&table.severity_high),
            severity_mid: normalize(&table.severity_mid),
            disease: normalize(&table.disease),
        }
    }

    /// Every species whose keyword list matches the title. Empty when none do.
    #[must_use]
    pub fn species(&self, title: &str) -> BTreeSet<Species> {
        let t = title.to_lowercase();
        self.species
            .iter()
            .filter(|(_, words)| contains_any(&t, words))
            .map(|(species, _)| *species)
            .collect()
    }

    /// `HIGH` keywords are checked before `MID` ones, so a title matching
    /// both is `HIGH`. Otherwise returns `default`.
    #[must_use]
    pub fn severity(&self, title: &str, default: Severity) -> Severity {
        let t = title.to_lowercase();
        if contains_any(&t, &self.severity_high) {
            Severity::High
        } else if contains_any(&t, &self.severity_mid) {
            Severity::Mid
        } else {
            default
        }
    }

    #[must_use]
    pub fn template_id(&self, title: &str) -> TemplateId {
        let t = title.to_lowercase();
        if contains_any(&t, &self.disease) {
            TemplateId::OfficialDiseaseUpdate
        } else {
            TemplateId::OfficialNotice
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&KeywordTable::default())
    }
}
