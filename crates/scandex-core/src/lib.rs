//! # scandex-core: Pure Barcode Decode Logic for ScanDex
//!
//! This crate is the **heart** of ScanDex. It turns one scanned barcode
//! string into its constituent fields as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       ScanDex Architecture                          │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                    Front-End (CLI)                          │    │
//! │  │    barcode in ──► decoded fields out ──► reference number   │    │
//! │  └───────────────────────────┬─────────────────────────────────┘    │
//! │                              │                                      │
//! │  ┌───────────────────────────▼─────────────────────────────────┐    │
//! │  │               ★ scandex-core (THIS CRATE) ★                 │    │
//! │  │                                                             │    │
//! │  │   ┌────────────┐   ┌────────────┐   ┌────────────────────┐  │    │
//! │  │   │  checksum  │   │   expiry   │   │      decoder       │  │    │
//! │  │   │ digit-sum  │   │  YYMMDD →  │   │ layout families,   │  │    │
//! │  │   │ GTIN-13    │   │ YYYY-MM-DD │   │ corrective re-parse│  │    │
//! │  │   └────────────┘   └────────────┘   └────────────────────┘  │    │
//! │  │                                                             │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │    │
//! │  └───────────────────────────┬─────────────────────────────────┘    │
//! │                              │                                      │
//! │  ┌───────────────────────────▼─────────────────────────────────┐    │
//! │  │              scandex-catalog (Catalog Layer)                │    │
//! │  │        identifier ↔ reference number cross-reference        │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checksum`] - Check-digit validation (digit-sum and GTIN-13 weighted)
//! - [`expiry`] - 6-digit expiry fragment validation and reformatting
//! - [`decoder`] - Positional field extraction with one corrective re-parse
//! - [`error`] - Decode contract error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system, network, database access is FORBIDDEN here
//! 3. **Degrade, Don't Abort**: Past the input contract, extraction problems
//!    become empty fields and a lowered-confidence flag, never errors
//! 4. **Character Positions**: All offsets count `char`s, so a multi-byte
//!    scan artifact can never cause a slicing panic
//!
//! ## Example Usage
//!
//! ```rust
//! use scandex_core::decode;
//!
//! let decoded = decode("0140063813339318" /* 16-char minimal scan */).unwrap();
//!
//! assert_eq!(decoded.identifier, "40063813339318");
//! assert!(decoded.identifier_valid);
//! assert!(decoded.expiry.is_none()); // too short to carry an expiry field
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checksum;
pub mod decoder;
pub mod error;
pub mod expiry;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use scandex_core::decode` instead of
// `use scandex_core::decoder::decode`

pub use decoder::{decode, DecodedBarcode};
pub use error::{DecodeError, DecodeResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum barcode length (in characters) accepted by the decoder.
///
/// Anything shorter cannot carry the 14-character identifier that starts at
/// position 2, so the decoder rejects it outright instead of degrading.
pub const BARCODE_MIN_LENGTH: usize = 16;
