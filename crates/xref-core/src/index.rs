//! Bidirectional primary index over (Turbo P/N, E&E P/N) pairs.
//!
//! Two layers per side: an original-form map carrying counterpart values in
//! source order, and a normalized-key map resolving case/hyphen-insensitive
//! lookups back to the original keys. Distinct originals may collide under
//! one normalized key; lookups union the counterparts of every colliding
//! key.
//!
//! The index is built once at startup and read-only afterwards, so any
//! number of concurrent readers can share it without locking.

use crate::error::Result;
use crate::normalize::{clean_text, normalize};
use crate::table;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Which side of the primary table a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Turbocharger part numbers (e.g. "17201-52010").
    Turbo,
    /// E&E part numbers (e.g. "CT-VNT11B").
    Ee,
}

/// Key counts reported after a table load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub turbo_keys: usize,
    pub ee_keys: usize,
    pub pairs: usize,
}

/// Bidirectional part-number index.
#[derive(Debug, Default)]
pub struct PartIndex {
    /// Original-form Turbo P/N -> E&E counterparts, source order preserved.
    by_turbo: HashMap<String, Vec<String>>,
    /// Original-form E&E P/N -> Turbo counterparts.
    by_ee: HashMap<String, Vec<String>>,
    /// Normalized key -> original-form Turbo keys seen under it.
    norm_turbo: HashMap<String, BTreeSet<String>>,
    /// Normalized key -> original-form E&E keys seen under it.
    norm_ee: HashMap<String, BTreeSet<String>>,
    pairs: usize,
}

impl PartIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the primary table from a semicolon-separated file.
    ///
    /// Unreadable files are fatal ([`crate::XrefError::DataSource`]);
    /// malformed rows are dropped silently.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let index = Self::from_rows(table::read_pair_rows(path)?);
        let stats = index.stats();
        info!(
            "Loaded {}: {} Turbo keys, {} E&E keys",
            path.display(),
            stats.turbo_keys,
            stats.ee_keys
        );
        Ok(index)
    }

    /// Build from in-memory rows. Used directly by tests and by callers that
    /// source rows from somewhere other than a file.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut index = Self::new();
        for (turbo, ee) in rows {
            index.insert_pair(&turbo, &ee);
        }
        index
    }

    /// Insert one (Turbo, E&E) pair, mirrored into both directions.
    ///
    /// Pairs where either column cleans or normalizes to the empty string
    /// are dropped. Repeated pairs are legal and simply appended.
    pub fn insert_pair(&mut self, turbo: &str, ee: &str) {
        let turbo = clean_text(turbo);
        let ee = clean_text(ee);
        if turbo.is_empty() || ee.is_empty() {
            debug!("Dropping pair with empty column: {turbo:?} / {ee:?}");
            return;
        }
        let norm_turbo = normalize(&turbo);
        let norm_ee = normalize(&ee);
        if norm_turbo.is_empty() || norm_ee.is_empty() {
            debug!("Dropping pair that normalizes to nothing: {turbo:?} / {ee:?}");
            return;
        }

        self.by_turbo
            .entry(turbo.clone())
            .or_default()
            .push(ee.clone());
        self.by_ee.entry(ee.clone()).or_default().push(turbo.clone());
        self.norm_turbo.entry(norm_turbo).or_default().insert(turbo);
        self.norm_ee.entry(norm_ee).or_default().insert(ee);
        self.pairs += 1;
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            turbo_keys: self.by_turbo.len(),
            ee_keys: self.by_ee.len(),
            pairs: self.pairs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    fn maps(&self, side: Side) -> (&HashMap<String, Vec<String>>, &HashMap<String, BTreeSet<String>>) {
        match side {
            Side::Turbo => (&self.by_turbo, &self.norm_turbo),
            Side::Ee => (&self.by_ee, &self.norm_ee),
        }
    }

    /// Counterparts reachable through every original-form key that shares
    /// the given normalized key. Duplicates are preserved; the caller
    /// deduplicates and sorts at aggregation time.
    pub fn exact(&self, side: Side, normalized: &str) -> Vec<String> {
        let (by_key, by_norm) = self.maps(side);
        by_norm
            .get(normalized)
            .into_iter()
            .flatten()
            .filter_map(|original| by_key.get(original))
            .flatten()
            .cloned()
            .collect()
    }

    /// Substring match over normalized keys: every key containing the
    /// needle contributes all of its counterparts.
    ///
    /// Linear scan over all keys. The corpus is small and static, so this is
    /// deliberate; the method isolates the strategy so it could be swapped
    /// for a trie or n-gram index without touching the resolver.
    pub fn partial(&self, side: Side, needle: &str) -> Vec<String> {
        let (by_key, by_norm) = self.maps(side);
        by_norm
            .iter()
            .filter(|(key, _)| key.contains(needle))
            .flat_map(|(_, originals)| originals)
            .filter_map(|original| by_key.get(original))
            .flatten()
            .cloned()
            .collect()
    }

    /// Counterparts for a label taken verbatim from the cross-reference
    /// table, checked against both sides. Empty when the label is not a
    /// primary key. Used by the JRN resolution chain.
    pub fn counterparts_for_label(&self, label: &str) -> Vec<String> {
        let normalized = normalize(label);
        if normalized.is_empty() {
            return Vec::new();
        }
        let mut counterparts = self.exact(Side::Turbo, &normalized);
        counterparts.extend(self.exact(Side::Ee, &normalized));
        counterparts
    }
}
