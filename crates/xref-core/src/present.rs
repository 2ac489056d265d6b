//! Result presentation: deduplication, ordering, and truncation.
//!
//! Presentation policy, not search policy. The transport layer renders
//! these types; the cap, preview size, and code-point ordering are part of
//! the output contract and must not drift.

use crate::config::DisplayConfig;
use crate::search::{Resolution, ResultSet};
use serde::Serialize;

/// Which group a match came from. Transport layers use this to caption
/// results ("found via Turbo-side" vs "found via counterpart-side"); they
/// are free to collapse the groups instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupHint {
    /// Counterpart found through a Turbo-side key.
    TurboSide,
    /// Counterpart found through an E&E-side key.
    EeSide,
    /// Counterpart reached through the JRN chain.
    JrnResolved,
    /// JRN label not present in the primary data.
    JrnUnlisted,
}

/// One displayable match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEntry {
    pub label: String,
    pub hint: GroupHint,
}

/// Why a query produced nothing displayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// Both tiers found nothing.
    NoMatch,
    /// No exact hit and the query is too short for a partial search.
    QueryTooShort { min_len: usize },
}

/// Boundary-facing result consumed by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresentableResult {
    EmptyQuery,
    NotFound {
        reason: NotFoundReason,
    },
    Matches {
        entries: Vec<MatchEntry>,
        /// Entries omitted by truncation; zero when the full set is shown.
        omitted: usize,
    },
}

/// Shape a [`Resolution`] for display.
///
/// Matches are deduplicated by value across groups (the first group in
/// turbo/ee/jrn/unlisted order keeps the entry) and sorted ascending by code
/// point. Sets larger than `max_results` are cut down to `preview_len`
/// entries plus a count of what was omitted.
pub fn present(resolution: &Resolution, display: &DisplayConfig) -> PresentableResult {
    match resolution {
        Resolution::EmptyQuery => PresentableResult::EmptyQuery,
        Resolution::TooShort { min_len } => PresentableResult::NotFound {
            reason: NotFoundReason::QueryTooShort { min_len: *min_len },
        },
        Resolution::NoMatch => PresentableResult::NotFound {
            reason: NotFoundReason::NoMatch,
        },
        Resolution::Found(results) => {
            let mut entries = collect_entries(results);
            entries.sort_by(|a, b| a.label.cmp(&b.label));

            let omitted = if entries.len() > display.max_results {
                let omitted = entries.len() - display.preview_len;
                entries.truncate(display.preview_len);
                omitted
            } else {
                0
            };

            PresentableResult::Matches { entries, omitted }
        }
    }
}

fn collect_entries(results: &ResultSet) -> Vec<MatchEntry> {
    let groups = [
        (&results.via_turbo, GroupHint::TurboSide),
        (&results.via_ee, GroupHint::EeSide),
        (&results.via_jrn, GroupHint::JrnResolved),
        (&results.jrn_unlisted, GroupHint::JrnUnlisted),
    ];

    let mut seen = std::collections::HashSet::new();
    let mut entries = Vec::new();
    for (values, hint) in groups {
        for value in values {
            if seen.insert(value.as_str()) {
                entries.push(MatchEntry {
                    label: value.clone(),
                    hint,
                });
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(via_turbo: &[&str], via_ee: &[&str]) -> Resolution {
        Resolution::Found(ResultSet {
            via_turbo: via_turbo.iter().map(|s| s.to_string()).collect(),
            via_ee: via_ee.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_passthrough_outcomes() {
        let display = DisplayConfig::default();
        assert_eq!(
            present(&Resolution::EmptyQuery, &display),
            PresentableResult::EmptyQuery
        );
        assert_eq!(
            present(&Resolution::NoMatch, &display),
            PresentableResult::NotFound {
                reason: NotFoundReason::NoMatch
            }
        );
        assert_eq!(
            present(&Resolution::TooShort { min_len: 4 }, &display),
            PresentableResult::NotFound {
                reason: NotFoundReason::QueryTooShort { min_len: 4 }
            }
        );
    }

    #[test]
    fn test_entries_are_sorted_by_code_point() {
        let display = DisplayConfig::default();
        match present(&found(&["B2", "A1"], &["C3"]), &display) {
            PresentableResult::Matches { entries, omitted } => {
                let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
                assert_eq!(labels, vec!["A1", "B2", "C3"]);
                assert_eq!(omitted, 0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_cross_group_dedup_keeps_first_hint() {
        let display = DisplayConfig::default();
        match present(&found(&["X"], &["X", "Y"]), &display) {
            PresentableResult::Matches { entries, .. } => {
                assert_eq!(entries.len(), 2);
                let x = entries.iter().find(|e| e.label == "X").unwrap();
                assert_eq!(x.hint, GroupHint::TurboSide);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_truncation_over_cap() {
        let display = DisplayConfig::default();
        let values: Vec<String> = (1..=31).map(|i| format!("PART-{i:03}")).collect();
        let resolution = Resolution::Found(ResultSet {
            via_turbo: values,
            ..Default::default()
        });
        match present(&resolution, &display) {
            PresentableResult::Matches { entries, omitted } => {
                assert_eq!(entries.len(), 10);
                assert_eq!(omitted, 21);
                assert_eq!(entries[0].label, "PART-001");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_no_truncation_at_cap() {
        let display = DisplayConfig::default();
        let values: Vec<String> = (1..=30).map(|i| format!("PART-{i:03}")).collect();
        let resolution = Resolution::Found(ResultSet {
            via_turbo: values,
            ..Default::default()
        });
        match present(&resolution, &display) {
            PresentableResult::Matches { entries, omitted } => {
                assert_eq!(entries.len(), 30);
                assert_eq!(omitted, 0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_serializes_for_transport() {
        let display = DisplayConfig::default();
        let json = serde_json::to_value(present(&found(&["A1"], &[]), &display)).unwrap();
        assert_eq!(json["kind"], "matches");
        assert_eq!(json["entries"][0]["label"], "A1");
        assert_eq!(json["entries"][0]["hint"], "turbo_side");
    }
}
