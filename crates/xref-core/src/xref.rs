//! Secondary cross-reference index: JRN numbers to internal labels.
//!
//! The cross-reference table maps a third-party (JRN) code to an internal
//! code and label. Only the label matters for resolution: a query that hits
//! a JRN key expands to its labels, and the query engine re-resolves each
//! label against the primary index. Fan-out matters here but order does not,
//! so labels are kept as a set.
//!
//! A missing cross-reference table is not fatal; the caller falls back to an
//! empty index and every query goes straight to the primary index.

use crate::error::Result;
use crate::normalize::{clean_text, normalize};
use crate::table;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Cross-reference index keyed by normalized foreign code.
#[derive(Debug, Default)]
pub struct JrnIndex {
    by_code: HashMap<String, BTreeSet<String>>,
}

impl JrnIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cross-reference table from a semicolon-separated file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let index = Self::from_rows(table::read_xref_rows(path)?);
        info!(
            "Loaded {}: {} JRN keys",
            path.display(),
            index.by_code.len()
        );
        Ok(index)
    }

    /// Build from (foreign code, internal code, internal label) rows. The
    /// internal code column is carried by the table format but plays no part
    /// in resolution.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String, String)>,
    {
        let mut index = Self::new();
        for (foreign, _internal_code, label) in rows {
            index.insert(&foreign, &label);
        }
        index
    }

    /// Insert one foreign-code -> label mapping. Rows where either side
    /// cleans or normalizes to nothing are dropped silently.
    pub fn insert(&mut self, foreign: &str, label: &str) {
        let label = clean_text(label);
        let key = normalize(foreign);
        if key.is_empty() || label.is_empty() {
            debug!("Dropping cross-reference row with empty column: {foreign:?} / {label:?}");
            return;
        }
        self.by_code.entry(key).or_default().insert(label);
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Labels mapped by the exactly-matching normalized foreign key.
    pub fn exact(&self, normalized: &str) -> Vec<String> {
        self.by_code
            .get(normalized)
            .map(|labels| labels.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Labels mapped by every foreign key containing the needle. Linear scan
    /// over the normalized keys, same as the primary index.
    pub fn partial(&self, needle: &str) -> Vec<String> {
        let labels: BTreeSet<&String> = self
            .by_code
            .iter()
            .filter(|(key, _)| key.contains(needle))
            .flat_map(|(_, labels)| labels)
            .collect();
        labels.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> JrnIndex {
        JrnIndex::from_rows([
            (
                "JRN-1001".to_string(),
                "100-200".to_string(),
                "17201-52010".to_string(),
            ),
            (
                "JRN-1001".to_string(),
                "100-201".to_string(),
                "17201-97010".to_string(),
            ),
            (
                "JRN-2002".to_string(),
                "100-300".to_string(),
                "CT-12B".to_string(),
            ),
        ])
    }

    #[test]
    fn test_labels_are_a_set() {
        let mut index = sample_index();
        // Repeating a row must not duplicate the label.
        index.insert("JRN-2002", "CT-12B");
        assert_eq!(index.exact("jrn2002"), vec!["CT-12B"]);
    }

    #[test]
    fn test_exact_is_normalized() {
        let index = sample_index();
        assert_eq!(
            index.exact("jrn1001"),
            vec!["17201-52010", "17201-97010"]
        );
        assert!(index.exact("jrn9999").is_empty());
    }

    #[test]
    fn test_partial_unions_matching_keys() {
        let index = sample_index();
        let labels = index.partial("jrn");
        assert_eq!(labels, vec!["17201-52010", "17201-97010", "CT-12B"]);
    }

    #[test]
    fn test_empty_rows_are_dropped() {
        let index = JrnIndex::from_rows([
            ("  ".to_string(), "x".to_string(), "label".to_string()),
            ("JRN-1".to_string(), "x".to_string(), " \r\n".to_string()),
        ]);
        assert!(index.is_empty());
    }
}
