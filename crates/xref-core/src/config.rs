//! Centralized configuration for the cross-reference resolver.
//!
//! Search behavior (tier threshold, variant fallback, lookup precedence) and
//! display limits are runtime values with domain defaults; network timeouts
//! for the external VIN service are constants.

use crate::error::{Result, XrefError};
use std::time::Duration;

/// Search engine tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Minimum normalized query length for the partial (substring) tier.
    /// Shorter queries must match a normalized key exactly; partial matching
    /// below this length would fan out over most of the corpus.
    pub min_partial_len: usize,
    /// Whether the JRN cross-reference index is consulted before the primary
    /// index on the exact tier. A hit in whichever index is checked first
    /// pre-empts the other.
    pub check_jrn_first: bool,
    /// Recovery substitution for all-digit codes, tried once when the
    /// partial tier comes up empty.
    pub fallback: VariantFallback,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_partial_len: 4,
            check_jrn_first: true,
            fallback: VariantFallback::default(),
        }
    }
}

impl SearchConfig {
    /// Validate field combinations that would make the engine misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.min_partial_len == 0 {
            return Err(XrefError::Config {
                message: "min_partial_len must be at least 1".to_string(),
            });
        }
        self.fallback.validate()
    }
}

/// Variant-segment substitution for all-digit part codes.
///
/// The 10-digit code family encodes a revision/variant segment in the middle
/// of the code; "970" is by far the most common variant. When a partial
/// search finds nothing, the segment is rewritten once and the search is
/// retried. This is a pragmatic recovery heuristic, not fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFallback {
    /// Exact length the normalized query must have, in ASCII digits.
    pub code_len: usize,
    /// Offset of the variant segment within the code.
    pub segment_start: usize,
    /// Replacement digits written over the variant segment.
    pub variant: String,
}

impl Default for VariantFallback {
    fn default() -> Self {
        // "17201-52010" normalizes to "1720152010": five digits of part
        // family, three of variant, two of suffix.
        Self {
            code_len: 10,
            segment_start: 5,
            variant: "970".to_string(),
        }
    }
}

impl VariantFallback {
    /// Produce the substituted code, or `None` when the heuristic does not
    /// apply: wrong length, non-digit input, or the segment already holds
    /// the target variant.
    pub fn substitute(&self, normalized: &str) -> Option<String> {
        if normalized.len() != self.code_len || !normalized.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let end = self.segment_start + self.variant.len();
        if end > normalized.len() {
            return None;
        }
        if &normalized[self.segment_start..end] == self.variant {
            return None;
        }
        let mut substituted = String::with_capacity(normalized.len());
        substituted.push_str(&normalized[..self.segment_start]);
        substituted.push_str(&self.variant);
        substituted.push_str(&normalized[end..]);
        Some(substituted)
    }

    fn validate(&self) -> Result<()> {
        if self.variant.is_empty() || !self.variant.bytes().all(|b| b.is_ascii_digit()) {
            return Err(XrefError::Config {
                message: format!("fallback variant must be ASCII digits, got {:?}", self.variant),
            });
        }
        if self.segment_start + self.variant.len() > self.code_len {
            return Err(XrefError::Config {
                message: format!(
                    "fallback segment {}..{} does not fit a {}-digit code",
                    self.segment_start,
                    self.segment_start + self.variant.len(),
                    self.code_len
                ),
            });
        }
        Ok(())
    }
}

/// Result presentation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Result sets larger than this are truncated for display.
    pub max_results: usize,
    /// Number of entries shown when a result set is truncated.
    pub preview_len: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_results: 30,
            preview_len: 10,
        }
    }
}

/// Network-related configuration for the VIN collaborator.
pub struct NetworkConfig;

impl NetworkConfig {
    /// Total timeout for a VIN resolution request.
    pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(15);
    /// Timeout for the liveness probe.
    pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
    pub const USER_AGENT: &'static str = "xref-core/0.3";
}
