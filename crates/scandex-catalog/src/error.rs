//! # Catalog Error Types
//!
//! Error types for catalog loading.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  File missing / unreadable / invalid JSON                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  CatalogError (this module) ← surfaced ONCE, at load time           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller decides: abort, or continue on CatalogIndex::empty()        │
//! │                                                                     │
//! │  Lookups never see load errors: a failed load means the empty       │
//! │  index, and every lookup against it is simply None                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Catalog load errors.
///
/// These occur only while reading and parsing the catalog file. Index
/// build and lookups are total and never produce them.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("catalog file not found: {0}")]
    FileNotFound(String),

    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON.
    #[error("invalid JSON in catalog file: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::FileNotFound("catalog.json".to_string());
        assert_eq!(err.to_string(), "catalog file not found: catalog.json");
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CatalogError = parse_err.into();
        assert!(matches!(err, CatalogError::InvalidJson(_)));
    }
}
