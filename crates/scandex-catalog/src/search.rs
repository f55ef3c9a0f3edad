//! # Search Module
//!
//! Two-tier identifier ↔ reference-number resolution over a catalog index.
//!
//! ## Resolution Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  resolve("04006381333931", want Reference)                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. Direct path: identifier_index exact hit                         │
//! │     └─► extract reference from that record ── non-empty? ── return  │
//! │       │ miss, or extraction empty                                   │
//! │       ▼                                                             │
//! │  2. Fallback path: term_index exact hit                             │
//! │       │ miss                                                        │
//! │       ▼                                                             │
//! │  3. Substring scan: FIRST indexed token containing the term,        │
//! │     then STOP (no further tokens are examined)                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  4. Dedup candidates, extract target field in order,                │
//! │     first non-empty wins — else None                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The single-token substring cut-off trades recall for speed. Callers
//! depend on that exact degenerate behavior, so the scan must not be
//! "fixed" into an exhaustive search.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::index::CatalogIndex;

/// Which field a resolution should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    /// Resolve to the product identifier (input is a reference number).
    Identifier,
    /// Resolve to the reference number (input is an identifier).
    Reference,
}

/// One term-search hit: the indexed token that matched and the position of
/// a root element filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// The indexed token the search matched (exactly or by substring).
    pub token: String,
    /// Root-element position in the index.
    pub position: usize,
}

/// Resolves cross-references against one [`CatalogIndex`].
///
/// Owns the index; build a new searcher when a new catalog is loaded.
///
/// ## Usage
/// ```rust
/// use scandex_catalog::{CatalogIndex, CatalogSearcher};
/// use serde_json::json;
///
/// let document = json!([{
///     "udi": { "UDI (01)": true, "ARI_Artikelkennzeichen": "04006381333931" },
///     "ref": { "(REF) Nr.": true, "ARI_Artikelkennzeichen": "81.29.31" },
/// }]);
/// let searcher = CatalogSearcher::new(CatalogIndex::build(document));
///
/// assert_eq!(searcher.resolve_reference("04006381333931").as_deref(), Some("81.29.31"));
/// assert_eq!(searcher.resolve_reference("unknown"), None);
/// ```
#[derive(Debug)]
pub struct CatalogSearcher {
    index: CatalogIndex,
}

impl CatalogSearcher {
    /// Creates a searcher owning the given index.
    pub fn new(index: CatalogIndex) -> Self {
        CatalogSearcher { index }
    }

    /// The underlying index.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Resolves a product identifier to its reference number.
    pub fn resolve_reference(&self, identifier: &str) -> Option<String> {
        info!(identifier = %identifier, "searching reference number for identifier");
        self.resolve(identifier, TargetField::Reference)
    }

    /// Resolves a reference number to its product identifier.
    pub fn resolve_identifier(&self, reference: &str) -> Option<String> {
        info!(reference = %reference, "searching identifier for reference number");
        self.resolve(reference, TargetField::Identifier)
    }

    /// Two-tier resolution: exact index probe with direct extraction,
    /// then term-search fallback.
    pub fn resolve(&self, term: &str, want: TargetField) -> Option<String> {
        let normalized = term.to_lowercase();

        // Direct path: probe the index matching the INPUT kind, extract
        // the opposite field from the hit.
        let direct_hit = match want {
            TargetField::Reference => self.index.lookup_identifier(&normalized),
            TargetField::Identifier => self.index.lookup_reference(&normalized),
        };

        if let Some(position) = direct_hit {
            if let Some(found) = self.extract_target(position, want) {
                info!(found = %found, "resolved via direct index");
                return Some(found);
            }
        }

        // Fallback: term search over everything the index has seen.
        self.resolve_via_term_search(&normalized, want)
    }

    /// Raw two-tier term search: exact token match first, then a substring
    /// scan that keeps the FIRST matching token only and stops.
    pub fn search(&self, term: &str) -> Vec<SearchHit> {
        let normalized = term.to_lowercase();

        if let Some(positions) = self.index.term_positions(&normalized) {
            debug!(term = %normalized, hits = positions.len(), "exact term match");
            return positions
                .iter()
                .map(|&position| SearchHit {
                    token: normalized.clone(),
                    position,
                })
                .collect();
        }

        // Substring fallback: first matching token in map iteration order,
        // then stop.
        for (token, positions) in self.index.terms() {
            if token.contains(&normalized) {
                debug!(term = %normalized, token = %token, hits = positions.len(), "substring term match");
                return positions
                    .iter()
                    .map(|&position| SearchHit {
                        token: token.clone(),
                        position,
                    })
                    .collect();
            }
        }

        debug!(term = %normalized, "no term match");
        Vec::new()
    }

    fn resolve_via_term_search(&self, normalized: &str, want: TargetField) -> Option<String> {
        let hits = self.search(normalized);
        if hits.is_empty() {
            warn!(term = %normalized, "no catalog entries for term");
            return None;
        }

        debug!(term = %normalized, candidates = hits.len(), "term search candidates");

        // Dedup candidates by position, preserving hit order.
        let mut seen = BTreeSet::new();
        for hit in &hits {
            if !seen.insert(hit.position) {
                continue;
            }
            if let Some(found) = self.extract_target(hit.position, want) {
                info!(found = %found, "resolved via term search");
                return Some(found);
            }
        }

        warn!(term = %normalized, "candidates carried no target field");
        None
    }

    fn extract_target(&self, position: usize, want: TargetField) -> Option<String> {
        let root = self.index.root(position)?;
        match want {
            TargetField::Identifier => self.index.extract_identifier(root),
            TargetField::Reference => self.index.extract_reference(root),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn searcher() -> CatalogSearcher {
        CatalogSearcher::new(CatalogIndex::build(json!([
            {
                "kennzeichen_udi": {
                    "UDI (01)": true,
                    "ARI_Artikelkennzeichen": "04006381333931"
                },
                "kennzeichen_ref": {
                    "(REF) Bestellnummer": true,
                    "ARI_Artikelkennzeichen": "81.29.31"
                },
                "bezeichnung": "Titanium Hip Stem Size 2"
            },
            {
                "kennzeichen_udi": {
                    "UDI-DI": true,
                    "ARI_Artikelkennzeichen": "4012345678901"
                },
                "bezeichnung": "Ceramic Liner 36mm"
            }
        ])))
    }

    #[test]
    fn test_roundtrip_via_direct_path() {
        let searcher = searcher();
        assert_eq!(
            searcher.resolve_reference("04006381333931").as_deref(),
            Some("81.29.31")
        );
        assert_eq!(
            searcher.resolve_identifier("81.29.31").as_deref(),
            Some("04006381333931")
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let searcher = CatalogSearcher::new(CatalogIndex::build(json!([{
            "udi": { "UDI": true, "ARI_Artikelkennzeichen": "ABC-123" },
            "ref": { "(REF)": true, "ARI_Artikelkennzeichen": "R-9" }
        }])));
        assert_eq!(searcher.resolve_identifier("r-9").as_deref(), Some("ABC-123"));
        assert_eq!(searcher.resolve_reference("abc-123").as_deref(), Some("R-9"));
    }

    #[test]
    fn test_record_without_reference_resolves_to_none() {
        // Direct identifier hit, but the record carries no reference
        // designator; the fallback finds the same record and still nothing.
        let searcher = searcher();
        assert_eq!(searcher.resolve_reference("4012345678901"), None);
    }

    #[test]
    fn test_unknown_term_resolves_to_none() {
        let searcher = searcher();
        assert_eq!(searcher.resolve_reference("0000000000000"), None);
        assert_eq!(searcher.resolve_identifier("no-such-ref"), None);
    }

    #[test]
    fn test_search_exact_token() {
        let searcher = searcher();
        let hits = searcher.search("Titanium Hip Stem Size 2");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[0].token, "titanium hip stem size 2");
    }

    #[test]
    fn test_search_substring_takes_first_token_only() {
        let searcher = searcher();
        // No exact token "hip stem"; the scan stops at the first token
        // containing it.
        let hits = searcher.search("hip stem");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 0);
        assert!(hits[0].token.contains("hip stem"));
    }

    #[test]
    fn test_resolve_via_substring_fallback() {
        // "titanium hip" is no record's identifier, but a substring of an
        // indexed leaf of record 0; the fallback extracts the reference.
        let searcher = searcher();
        assert_eq!(
            searcher.resolve("titanium hip", TargetField::Reference).as_deref(),
            Some("81.29.31")
        );
        assert_eq!(
            searcher.resolve("titanium hip", TargetField::Identifier).as_deref(),
            Some("04006381333931")
        );
    }

    #[test]
    fn test_search_on_empty_index() {
        let searcher = CatalogSearcher::new(CatalogIndex::empty());
        assert!(searcher.search("anything").is_empty());
        assert_eq!(searcher.resolve_reference("04006381333931"), None);
        assert_eq!(searcher.resolve_identifier("81.29.31"), None);
    }
}
