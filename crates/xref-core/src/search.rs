//! Tiered query engine.
//!
//! One canonical resolution algorithm:
//!
//! 1. Normalize the query; empty means an empty-query outcome.
//! 2. Length gate: short queries get exact normalized-key lookup only
//!    (partial matching on short strings fans out over most of the corpus);
//!    queries at or above the threshold get a substring scan across the JRN
//!    index and both primary sides.
//! 3. If the partial tier finds nothing and the query is an all-digit code,
//!    the variant-segment fallback rewrites it once and retries.
//! 4. Every result group is deduplicated and sorted before it leaves the
//!    engine, for determinism.
//!
//! An empty result set is a normal outcome, not an error. The resolver is
//! constructed from already-built indices, so there is no uninitialized
//! state to guard against; it is stateless per call and safe to share
//! across threads behind a reference.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::{PartIndex, Side};
use crate::normalize::normalize;
use crate::xref::JrnIndex;
use tracing::debug;

/// Outcome of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The query normalized to the empty string.
    EmptyQuery,
    /// No exact hit, and the query is below the partial-tier threshold.
    /// Guidance outcome: the caller should lengthen the query.
    TooShort { min_len: usize },
    /// Both tiers (and the fallback, when applicable) found nothing.
    NoMatch,
    Found(ResultSet),
}

/// Matches grouped by the index side that produced them. The engine exposes
/// the groups; collapsing or labelling them is the formatter's business.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// E&E counterparts reached through Turbo-side keys.
    pub via_turbo: Vec<String>,
    /// Turbo counterparts reached through E&E-side keys.
    pub via_ee: Vec<String>,
    /// Primary counterparts reached through the JRN chain
    /// (foreign code -> internal label -> primary counterpart).
    pub via_jrn: Vec<String>,
    /// JRN labels with no entry in the primary data, reported as-is.
    pub jrn_unlisted: Vec<String>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.via_turbo.is_empty()
            && self.via_ee.is_empty()
            && self.via_jrn.is_empty()
            && self.jrn_unlisted.is_empty()
    }

    /// Deduplicate and sort each group lexicographically.
    fn finish(mut self) -> Self {
        for group in [
            &mut self.via_turbo,
            &mut self.via_ee,
            &mut self.via_jrn,
            &mut self.jrn_unlisted,
        ] {
            group.sort();
            group.dedup();
        }
        self
    }

    /// Flat deduplicated, sorted union of every group.
    pub fn all(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .via_turbo
            .iter()
            .chain(&self.via_ee)
            .chain(&self.via_jrn)
            .chain(&self.jrn_unlisted)
            .cloned()
            .collect();
        all.sort();
        all.dedup();
        all
    }
}

/// Tiered search engine over the built indices.
#[derive(Debug)]
pub struct Resolver {
    index: PartIndex,
    jrn: JrnIndex,
    config: SearchConfig,
}

impl Resolver {
    /// Create a resolver with the default search configuration.
    pub fn new(index: PartIndex, jrn: JrnIndex) -> Self {
        Self {
            index,
            jrn,
            config: SearchConfig::default(),
        }
    }

    /// Create a resolver with a custom configuration, validating it first.
    pub fn with_config(index: PartIndex, jrn: JrnIndex, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { index, jrn, config })
    }

    pub fn index(&self) -> &PartIndex {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Resolve a raw user query against the indices.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let query = normalize(raw);
        if query.is_empty() {
            return Resolution::EmptyQuery;
        }

        if query.chars().count() < self.config.min_partial_len {
            let results = self.exact_tier(&query);
            return if results.is_empty() {
                Resolution::TooShort {
                    min_len: self.config.min_partial_len,
                }
            } else {
                Resolution::Found(results.finish())
            };
        }

        let results = self.partial_tier(&query);
        if !results.is_empty() {
            return Resolution::Found(results.finish());
        }

        if let Some(substituted) = self.config.fallback.substitute(&query) {
            debug!("Retrying partial search with variant substitution: {substituted}");
            let results = self.partial_tier(&substituted);
            if !results.is_empty() {
                return Resolution::Found(results.finish());
            }
        }

        Resolution::NoMatch
    }

    /// Exact tier: the normalized query must equal a normalized key.
    ///
    /// The JRN index and the primary index are consulted in configured
    /// precedence order; a hit in the first pre-empts the second.
    fn exact_tier(&self, query: &str) -> ResultSet {
        let mut results = ResultSet::default();
        if self.config.check_jrn_first {
            self.chain_jrn_labels(self.jrn.exact(query), &mut results);
            if !results.is_empty() {
                return results;
            }
        }

        results.via_turbo = self.index.exact(Side::Turbo, query);
        results.via_ee = self.index.exact(Side::Ee, query);

        if results.is_empty() && !self.config.check_jrn_first {
            self.chain_jrn_labels(self.jrn.exact(query), &mut results);
        }
        results
    }

    /// Partial tier: substring match against every normalized key in the
    /// JRN index and both primary sides; every matching key contributes all
    /// of its values to the aggregate.
    fn partial_tier(&self, query: &str) -> ResultSet {
        let mut results = ResultSet::default();
        self.chain_jrn_labels(self.jrn.partial(query), &mut results);
        results.via_turbo = self.index.partial(Side::Turbo, query);
        results.via_ee = self.index.partial(Side::Ee, query);
        results
    }

    /// Second link of the JRN chain: re-resolve each matched internal label
    /// against the primary index; labels absent from the primary data are
    /// reported verbatim.
    fn chain_jrn_labels(&self, labels: Vec<String>, results: &mut ResultSet) {
        for label in labels {
            let counterparts = self.index.counterparts_for_label(&label);
            if counterparts.is_empty() {
                results.jrn_unlisted.push(label);
            } else {
                results.via_jrn.extend(counterparts);
            }
        }
    }
}
