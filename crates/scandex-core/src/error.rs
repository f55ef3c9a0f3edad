//! # Decode Error Types
//!
//! Error types for the barcode decode contract.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  Input contract violation (empty / too short)                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DecodeError (this module) ← the ONLY hard failure in the crate     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller decides how to present it                                   │
//! │                                                                     │
//! │  Everything past the contract check degrades in place:              │
//! │  bad slices → empty fields, bad check digit → validity flag         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Barcode input contract errors.
///
/// These are the only conditions the decoder surfaces to the caller.
/// Checksum mismatches and out-of-range field slices are NOT errors; they
/// degrade to empty fields plus a lowered-confidence flag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The supplied barcode string was empty.
    #[error("empty barcode")]
    EmptyBarcode,

    /// The supplied barcode is shorter than the decodable minimum.
    ///
    /// ## When This Occurs
    /// - Scanner delivered a truncated read
    /// - Caller passed a fragment instead of the full symbol
    #[error("barcode too short (length: {length}, minimum: {min} characters)")]
    TooShort { length: usize, min: usize },
}

/// Convenience type alias for Results with DecodeError.
pub type DecodeResult<T> = Result<T, DecodeError>;

// =============================================================================
// Unit Tests
// =============================================================================
