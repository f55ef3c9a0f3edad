//! # scandex-catalog: Catalog Layer for ScanDex
//!
//! This crate cross-references product identifiers against a bulk catalog —
//! a large nested JSON document — and resolves the human-facing reference
//! number for an identifier, and vice versa.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       ScanDex Catalog Flow                          │
//! │                                                                     │
//! │  catalog.json (one file, loaded fully into memory)                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                 scandex-catalog (THIS CRATE)                │    │
//! │  │                                                             │    │
//! │  │   ┌────────────┐    ┌──────────────┐    ┌──────────────┐    │    │
//! │  │   │  document  │    │    index     │    │    search    │    │    │
//! │  │   │ load, root │───►│ identifier / │───►│ direct path, │    │    │
//! │  │   │ discovery  │    │ reference /  │    │ substring    │    │    │
//! │  │   │            │    │ term indexes │    │ fallback     │    │    │
//! │  │   └────────────┘    └──────────────┘    └──────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  reference number ↔ identifier, or None                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`] - Catalog file loading and root-element discovery
//! - [`index`] - Lookup structures built once per loaded catalog
//! - [`search`] - Two-tier resolution (index-first, substring fallback)
//! - [`error`] - Catalog load error types
//!
//! ## Design Principles
//!
//! 1. **One index per document**: the index is built once after load and
//!    owned by exactly one searcher; rebuilding means a new value, never an
//!    in-place update
//! 2. **Immutable after build**: all lookups take `&self`; the index can be
//!    shared read-only across threads
//! 3. **Total build**: no well-formed JSON tree makes the build fail —
//!    unsupported shapes simply contribute no entries
//! 4. **Load failures stay at load time**: lookups against a catalog that
//!    failed to load (the empty index) return `None`, never the old error
//!
//! ## Example Usage
//!
//! ```rust
//! use scandex_catalog::{CatalogIndex, CatalogSearcher};
//! use serde_json::json;
//!
//! let document = json!([{
//!     "kennzeichen_udi": { "UDI (01)": true, "ARI_Artikelkennzeichen": "04006381333931" },
//!     "kennzeichen_ref": { "(REF) Bestellnummer": true, "ARI_Artikelkennzeichen": "81.29.31" },
//! }]);
//!
//! let searcher = CatalogSearcher::new(CatalogIndex::build(document));
//!
//! assert_eq!(
//!     searcher.resolve_reference("04006381333931").as_deref(),
//!     Some("81.29.31")
//! );
//! assert_eq!(
//!     searcher.resolve_identifier("81.29.31").as_deref(),
//!     Some("04006381333931")
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod index;
pub mod search;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::load_catalog;
pub use error::{CatalogError, CatalogResult};
pub use index::{CatalogIndex, IndexConfig};
pub use search::{CatalogSearcher, SearchHit, TargetField};
