//! # Document Module
//!
//! Catalog file loading and root-element discovery.
//!
//! ## Root-Element Discovery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  What counts as "one catalog record"?                               │
//! │                                                                     │
//! │  [ {..}, {..}, {..} ]        → each array entry is a root element   │
//! │                                                                     │
//! │  { "rows": [ {..}, {..} ] }  → first property (document order)      │
//! │                                whose value is a non-empty array     │
//! │                                of objects                           │
//! │                                                                     │
//! │  { "single": "record" }      → the whole document, as one element   │
//! │  "scalar"                    → likewise                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};

/// Loads one catalog JSON document fully into memory.
///
/// This is the only file read in the system and the only point where a
/// catalog failure surfaces; see [`crate::error::CatalogError`].
///
/// ## Example
/// ```rust,ignore
/// let document = load_catalog("table-articles.json")?;
/// let index = CatalogIndex::build(document);
/// ```
pub fn load_catalog(path: impl AsRef<Path>) -> CatalogResult<Value> {
    let path = path.as_ref();

    if !path.exists() {
        warn!(path = %path.display(), "catalog file not found");
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    info!(path = %path.display(), "reading catalog file");
    let raw = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), bytes = raw.len(), "catalog file parsed");

    Ok(document)
}

/// Splits a loaded document into its root elements, consuming it.
///
/// Never fails: a document of unsupported shape becomes a single root
/// element.
pub fn root_elements(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(map) => {
            let key = map
                .iter()
                .find(|(_, value)| is_record_array(value))
                .map(|(key, _)| key.clone());

            let mut map = map;
            if let Some(key) = key {
                if let Some(Value::Array(items)) = map.remove(&key) {
                    debug!(property = %key, records = items.len(), "using array property as root elements");
                    return items;
                }
            }
            vec![Value::Object(map)]
        }
        other => vec![other],
    }
}

/// A non-empty array whose first entry is an object.
fn is_record_array(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty() && items[0].is_object(),
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_document() {
        let roots = root_elements(json!([{"a": 1}, {"b": 2}]));
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], json!({"a": 1}));
    }

    #[test]
    fn test_object_with_record_array_property() {
        let roots = root_elements(json!({
            "meta": "export 2024",
            "rows": [{"a": 1}, {"b": 2}, {"c": 3}],
        }));
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn test_first_record_array_property_wins() {
        // Document order decides which array is the record table.
        let roots = root_elements(json!({
            "scalars": [1, 2, 3],
            "first": [{"a": 1}],
            "second": [{"b": 2}, {"c": 3}],
        }));
        assert_eq!(roots, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_single_object_document() {
        let roots = root_elements(json!({"name": "only record", "count": [1, 2]}));
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0]["name"], "only record");
    }

    #[test]
    fn test_scalar_document() {
        let roots = root_elements(json!("just a string"));
        assert_eq!(roots, vec![json!("just a string")]);
    }

    #[test]
    fn test_empty_array_property_is_skipped() {
        let roots = root_elements(json!({"rows": [], "name": "fallback"}));
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0]["name"], "fallback");
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog("/definitely/not/there.json").unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound(_)));
    }

    #[test]
    fn test_load_catalog_invalid_json() {
        let path = std::env::temp_dir().join("scandex_invalid_catalog_test.json");
        fs::write(&path, "{broken").unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidJson(_)));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_catalog_roundtrip() {
        let path = std::env::temp_dir().join("scandex_valid_catalog_test.json");
        fs::write(&path, r#"[{"a": 1}]"#).unwrap();

        let document = load_catalog(&path).unwrap();
        assert_eq!(document, json!([{"a": 1}]));

        fs::remove_file(&path).ok();
    }
}
