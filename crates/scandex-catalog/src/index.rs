//! # Index Module
//!
//! Lookup structures built once over a loaded catalog document.
//!
//! ## Index Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        CatalogIndex                                 │
//! │                                                                     │
//! │  roots:             [ record 0, record 1, ... ]  (owned Values)     │
//! │                                                                     │
//! │  identifier_index:  "04006381333931" → 0      (direct extraction)   │
//! │  reference_index:   "81.29.31"       → 0      (direct extraction)   │
//! │                                                                     │
//! │  term_index:        "04006381333931" → {0}                          │
//! │                     "81.29.31"       → {0}                          │
//! │                     every key / leaf scalar (len > 2, depth ≤ 3)    │
//! │                     lower-cased       → positions                   │
//! │                                                                     │
//! │  Invariant: whatever the direct indexes know, the term index        │
//! │  knows under the same token.                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog field that carries the identifier/reference is NOT a fixed,
//! well-known key — it varies per record. Direct extraction therefore
//! recognizes it structurally: a nested object with a marker token in one
//! of its key names, next to the sibling value field. Records where that
//! assumption fails still reach the term index, which is what the search
//! fallback leans on.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::info;

use crate::document;

// =============================================================================
// Index Configuration
// =============================================================================

/// Marker tokens and traversal limits for index construction.
///
/// The defaults match the catalog exports this system is built for; tests
/// and alternate catalogs can override individual fields.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Key-name substring marking the nested object that carries the
    /// product identifier.
    pub identifier_marker: String,

    /// Key-name substring marking the nested object that carries the
    /// reference number.
    pub reference_marker: String,

    /// Name of the sibling field holding the actual value.
    pub value_field: String,

    /// Maximum recursion depth for term indexing.
    pub max_depth: usize,

    /// Minimum token length (in characters) worth indexing.
    pub min_token_len: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            identifier_marker: "UDI".to_string(),
            reference_marker: "(REF)".to_string(),
            value_field: "ARI_Artikelkennzeichen".to_string(),
            max_depth: 3,
            min_token_len: 3,
        }
    }
}

// =============================================================================
// Catalog Index
// =============================================================================

/// Derived, cached lookup data for one loaded catalog document.
///
/// Built once per document and immutable afterwards: every accessor takes
/// `&self`, rebuilding means constructing a new value. Owned by exactly
/// one [`crate::CatalogSearcher`] in the intended usage pattern and safe
/// to share read-only across threads.
#[derive(Debug)]
pub struct CatalogIndex {
    roots: Vec<Value>,
    identifier_index: HashMap<String, usize>,
    reference_index: HashMap<String, usize>,
    term_index: HashMap<String, BTreeSet<usize>>,
    config: IndexConfig,
}

impl CatalogIndex {
    /// Builds the index over a document with the default configuration.
    pub fn build(document: Value) -> Self {
        Self::build_with_config(document, IndexConfig::default())
    }

    /// Builds the index over a document.
    ///
    /// Total: no well-formed JSON tree makes this fail. Records that match
    /// no structural assumption simply contribute no direct entries.
    pub fn build_with_config(document: Value, config: IndexConfig) -> Self {
        info!("building catalog indexes");

        let roots = document::root_elements(document);
        let mut identifier_index = HashMap::new();
        let mut reference_index = HashMap::new();
        let mut term_index: HashMap<String, BTreeSet<usize>> = HashMap::new();

        for (position, root) in roots.iter().enumerate() {
            if let Some(identifier) =
                extract_marked_value(root, &config.identifier_marker, &config.value_field)
            {
                let token = identifier.to_lowercase();
                identifier_index.insert(token.clone(), position);
                term_index.entry(token).or_default().insert(position);
            }

            if let Some(reference) =
                extract_marked_value(root, &config.reference_marker, &config.value_field)
            {
                let token = reference.to_lowercase();
                reference_index.insert(token.clone(), position);
                term_index.entry(token).or_default().insert(position);
            }

            index_tokens(root, position, 0, &config, &mut term_index);
        }

        info!(
            identifiers = identifier_index.len(),
            references = reference_index.len(),
            terms = term_index.len(),
            records = roots.len(),
            "catalog indexes built"
        );

        CatalogIndex {
            roots,
            identifier_index,
            reference_index,
            term_index,
            config,
        }
    }

    /// The index of a catalog that failed to load: no records, no entries.
    /// Every lookup against it returns nothing.
    pub fn empty() -> Self {
        CatalogIndex {
            roots: Vec::new(),
            identifier_index: HashMap::new(),
            reference_index: HashMap::new(),
            term_index: HashMap::new(),
            config: IndexConfig::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Number of root elements (catalog records).
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the index holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// The root element at `position`.
    pub fn root(&self, position: usize) -> Option<&Value> {
        self.roots.get(position)
    }

    /// Exact identifier lookup (expects a lower-cased token).
    pub fn lookup_identifier(&self, token: &str) -> Option<usize> {
        self.identifier_index.get(token).copied()
    }

    /// Exact reference-number lookup (expects a lower-cased token).
    pub fn lookup_reference(&self, token: &str) -> Option<usize> {
        self.reference_index.get(token).copied()
    }

    /// Exact term-index lookup (expects a lower-cased token).
    pub fn term_positions(&self, token: &str) -> Option<&BTreeSet<usize>> {
        self.term_index.get(token)
    }

    /// All indexed terms with their positions, in the map's own iteration
    /// order. The substring fallback deliberately takes the FIRST matching
    /// token from this iteration and stops; that order is not stabilized.
    pub fn terms(&self) -> impl Iterator<Item = (&String, &BTreeSet<usize>)> {
        self.term_index.iter()
    }

    // -------------------------------------------------------------------------
    // Direct Extraction
    // -------------------------------------------------------------------------

    /// Direct extraction of the product identifier from one root element.
    pub fn extract_identifier(&self, element: &Value) -> Option<String> {
        extract_marked_value(element, &self.config.identifier_marker, &self.config.value_field)
    }

    /// Direct extraction of the reference number from one root element.
    pub fn extract_reference(&self, element: &Value) -> Option<String> {
        extract_marked_value(element, &self.config.reference_marker, &self.config.value_field)
    }
}

// =============================================================================
// Extraction & Traversal
// =============================================================================

/// Looks for a nested object carrying `marker` in one of its key names
/// alongside the sibling `value_field`, and returns that field's scalar
/// value. Empty values count as absent.
fn extract_marked_value(element: &Value, marker: &str, value_field: &str) -> Option<String> {
    let object = element.as_object()?;

    for value in object.values() {
        if let Value::Object(nested) = value {
            if nested.keys().any(|key| key.contains(marker)) {
                if let Some(found) = nested.get(value_field).and_then(scalar_to_string) {
                    if !found.is_empty() {
                        return Some(found);
                    }
                }
            }
        }
    }

    None
}

/// Recursively indexes every key and leaf scalar under `node`, bounded by
/// the configured depth. Keys are indexed at the depth of their object;
/// their values descend one level deeper.
fn index_tokens(
    node: &Value,
    position: usize,
    depth: usize,
    config: &IndexConfig,
    term_index: &mut HashMap<String, BTreeSet<usize>>,
) {
    if depth > config.max_depth {
        return;
    }

    match node {
        Value::Object(map) => {
            for (key, value) in map {
                insert_token(key, position, config, term_index);
                index_tokens(value, position, depth + 1, config, term_index);
            }
        }
        Value::Array(items) => {
            for item in items {
                index_tokens(item, position, depth + 1, config, term_index);
            }
        }
        leaf => {
            if let Some(text) = scalar_to_string(leaf) {
                insert_token(&text, position, config, term_index);
            }
        }
    }
}

fn insert_token(
    text: &str,
    position: usize,
    config: &IndexConfig,
    term_index: &mut HashMap<String, BTreeSet<usize>>,
) {
    let token = text.to_lowercase();
    if token.chars().count() >= config.min_token_len {
        term_index.entry(token).or_default().insert(position);
    }
}

/// Stringifies a scalar value. Containers and null are not scalars and
/// yield `None`.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_catalog() -> Value {
        json!([
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
                    "UDI-DI": "gs1",
                    "ARI_Artikelkennzeichen": 4012345678901u64
                },
                "bezeichnung": "Ceramic Liner 36mm"
            }
        ])
    }

    #[test]
    fn test_direct_indexes_built() {
        let index = CatalogIndex::build(sample_catalog());

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup_identifier("04006381333931"), Some(0));
        assert_eq!(index.lookup_reference("81.29.31"), Some(0));
        // numeric value field is stringified
        assert_eq!(index.lookup_identifier("4012345678901"), Some(1));
        // record 1 has no reference designator
        assert_eq!(index.lookup_reference("4012345678901"), None);
    }

    #[test]
    fn test_direct_entries_reach_term_index() {
        // Invariant: whatever the direct indexes know, the term index knows
        // under the same token.
        let index = CatalogIndex::build(sample_catalog());

        for token in ["04006381333931", "81.29.31", "4012345678901"] {
            assert!(
                index.term_positions(token).is_some(),
                "direct token {token} missing from term index"
            );
        }
    }

    #[test]
    fn test_keys_and_leaves_indexed_lowercased() {
        let index = CatalogIndex::build(sample_catalog());

        // key at depth 0
        assert!(index.term_positions("kennzeichen_udi").is_some());
        // key at depth 1
        assert!(index.term_positions("udi (01)").is_some());
        // leaf value, lower-cased
        assert_eq!(
            index.term_positions("titanium hip stem size 2"),
            Some(&BTreeSet::from([0]))
        );
        // short tokens are not indexed ("gs1" is exactly the minimum)
        assert!(index.term_positions("gs1").is_some());
    }

    #[test]
    fn test_depth_limit_bounds_traversal() {
        let index = CatalogIndex::build(json!([
            { "aaa": { "bbb": { "ccc": { "ddd": { "eee": "deepvalue" } } } } }
        ]));

        // keys at depth 0..=3 are reachable
        for token in ["aaa", "bbb", "ccc", "ddd"] {
            assert!(index.term_positions(token).is_some(), "{token} not indexed");
        }
        // the object at depth 4 is beyond the cutoff
        assert!(index.term_positions("eee").is_none());
        assert!(index.term_positions("deepvalue").is_none());
    }

    #[test]
    fn test_short_tokens_skipped() {
        let index = CatalogIndex::build(json!([{ "ab": "xy", "abc": "wxyz" }]));
        assert!(index.term_positions("ab").is_none());
        assert!(index.term_positions("xy").is_none());
        assert!(index.term_positions("abc").is_some());
        assert!(index.term_positions("wxyz").is_some());
    }

    #[test]
    fn test_build_is_total_on_odd_shapes() {
        // None of these have extractable records; build must not fail.
        for document in [
            json!(null),
            json!(42),
            json!("scalar"),
            json!([]),
            json!([null, 17, "loose ends"]),
            json!({ "nested": { "but": { "no": "records" } } }),
        ] {
            let index = CatalogIndex::build(document);
            assert_eq!(index.lookup_identifier("anything"), None);
        }
    }

    #[test]
    fn test_marker_without_value_field_yields_nothing() {
        let index = CatalogIndex::build(json!([
            { "entry": { "UDI (01)": "present but no value field" } }
        ]));
        assert!(!index.is_empty());
        assert_eq!(index.lookup_identifier("present but no value field"), None);
    }

    #[test]
    fn test_empty_value_field_counts_as_absent() {
        let index = CatalogIndex::build(json!([
            { "entry": { "UDI (01)": true, "ARI_Artikelkennzeichen": "" } }
        ]));
        assert_eq!(index.identifier_index.len(), 0);
    }

    #[test]
    fn test_empty_index() {
        let index = CatalogIndex::empty();
        assert!(index.is_empty());
        assert_eq!(index.lookup_identifier("04006381333931"), None);
        assert_eq!(index.term_positions("anything"), None);
        assert_eq!(index.root(0), None);
    }

    #[test]
    fn test_custom_config_markers() {
        let config = IndexConfig {
            identifier_marker: "GTIN".to_string(),
            reference_marker: "ORDER".to_string(),
            value_field: "code".to_string(),
            ..IndexConfig::default()
        };
        let index = CatalogIndex::build_with_config(
            json!([
                { "ids": { "GTIN/14": true, "code": "123456789" },
                  "ref": { "ORDER-NO": true, "code": "A-77" } }
            ]),
            config,
        );

        assert_eq!(index.lookup_identifier("123456789"), Some(0));
        assert_eq!(index.lookup_reference("a-77"), Some(0));
    }
}
