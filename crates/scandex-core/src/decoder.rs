//! # Decoder Module
//!
//! Single-pass positional decoding of one scanned barcode.
//!
//! ## Decode Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  raw barcode string (≥ 16 chars, else hard failure)                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  identifier = chars [2,16) ──► checksum::validate                   │
//! │       │ invalid                                                     │
//! │       ▼                                                             │
//! │  corrective re-parse: delete char at index 1, retry ONCE            │
//! │  (validates → replaces the working barcode; fails → keep original,  │
//! │   carry the invalid identifier forward with a lowered flag)         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  layout family: chars [4,7) == "888" ?                              │
//! │       │                                                             │
//! │       ├── standard: expiry [18,24), serial [26..]                   │
//! │       │                                                             │
//! │       └── marker:   len > 34 → expiry [29,35), serial [18,27)       │
//! │                     else     → expiry [28,34), serial [18,26)       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  expiry fragment ──► expiry::normalize ──► ISO date or None         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DecodedBarcode { identifier, expiry, serial, identifier_valid }    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All positions count `char`s. Out-of-range slices clamp to the string the
//! way Python slices do: partial slices are kept, fully-out-of-range slices
//! come back empty, and empty fields become `None` — extraction problems
//! never abort a decode that passed the input contract.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::checksum;
use crate::error::{DecodeError, DecodeResult};
use crate::expiry;
use crate::BARCODE_MIN_LENGTH;

// =============================================================================
// Positional Layout Constants
// =============================================================================

/// Identifier field, both layouts.
const IDENTIFIER_START: usize = 2;
const IDENTIFIER_END: usize = 16;

/// Manufacturer marker that selects the alternate layout family.
const MARKER_START: usize = 4;
const MARKER_END: usize = 7;
const MANUFACTURER_MARKER: &str = "888";

/// Standard layout.
const STANDARD_EXPIRY_START: usize = 18;
const STANDARD_EXPIRY_END: usize = 24;
const STANDARD_SERIAL_START: usize = 26;

/// Marker layout; the long variant applies past 34 characters.
const MARKER_EXPIRY_START_LONG: usize = 29;
const MARKER_EXPIRY_END_LONG: usize = 35;
const MARKER_EXPIRY_START_SHORT: usize = 28;
const MARKER_EXPIRY_END_SHORT: usize = 34;
const MARKER_SERIAL_START: usize = 18;
const MARKER_SERIAL_END_LONG: usize = 27;
const MARKER_SERIAL_END_SHORT: usize = 26;

// =============================================================================
// Decode Result Type
// =============================================================================

/// The fields decoded out of one barcode.
///
/// Created once per decode call and never mutated; the caller owns it.
/// `None` fields mean the barcode did not carry (or could not deliver)
/// that field — `identifier_valid` is the confidence flag for the
/// identifier itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBarcode {
    /// Product identifier (GTIN-like), chars [2,16) of the working barcode.
    pub identifier: String,

    /// Expiry date as ISO `YYYY-MM-DD`, if present and valid.
    pub expiry: Option<String>,

    /// Serial/lot number, if present.
    pub serial: Option<String>,

    /// Whether the identifier passed check-digit validation
    /// (possibly after the corrective re-parse).
    pub identifier_valid: bool,
}

// =============================================================================
// Decode Entry Point
// =============================================================================

/// Decodes a raw barcode string into its constituent fields.
///
/// ## Failure Semantics
/// Only the input contract is a hard failure: an empty barcode or one
/// shorter than [`BARCODE_MIN_LENGTH`] characters. Everything downstream
/// degrades — a failed checksum becomes `identifier_valid = false` (after
/// one corrective re-parse), out-of-range fields become `None`.
///
/// ## Example
/// ```rust
/// use scandex_core::decode;
///
/// let barcode = format!("01{}17{}21{}", "40063813339318", "250331", "SER123");
/// let decoded = decode(&barcode).unwrap();
///
/// assert_eq!(decoded.identifier, "40063813339318");
/// assert_eq!(decoded.expiry.as_deref(), Some("2025-03-31"));
/// assert_eq!(decoded.serial.as_deref(), Some("SER123"));
/// assert!(decoded.identifier_valid);
///
/// assert!(decode("too short").is_err());
/// ```
pub fn decode(raw: &str) -> DecodeResult<DecodedBarcode> {
    info!(barcode = %raw, "decoding barcode");

    if raw.is_empty() {
        warn!("empty barcode supplied");
        return Err(DecodeError::EmptyBarcode);
    }

    let length = raw.chars().count();
    if length < BARCODE_MIN_LENGTH {
        warn!(length, min = BARCODE_MIN_LENGTH, "barcode below decodable minimum");
        return Err(DecodeError::TooShort {
            length,
            min: BARCODE_MIN_LENGTH,
        });
    }

    let mut identifier = char_range(raw, IDENTIFIER_START, IDENTIFIER_END).to_string();
    let mut identifier_valid = checksum::validate(&identifier);
    debug!(identifier = %identifier, identifier_valid, "identifier extracted");

    // Corrective re-parse: scanners occasionally inject one stray character
    // right after the leading symbol character. Deleting index 1 and
    // revalidating is tried exactly once.
    let mut corrected: Option<String> = None;
    if !identifier_valid {
        let candidate = drop_char(raw, 1);
        let candidate_identifier =
            char_range(&candidate, IDENTIFIER_START, IDENTIFIER_END).to_string();
        if checksum::validate(&candidate_identifier) {
            info!(identifier = %candidate_identifier, "corrective re-parse validated alternative barcode");
            identifier = candidate_identifier;
            identifier_valid = true;
            corrected = Some(candidate);
        } else {
            debug!("corrective re-parse did not validate, keeping original barcode");
        }
    }

    let barcode = corrected.as_deref().unwrap_or(raw);
    let length = barcode.chars().count();

    let marker = char_range(barcode, MARKER_START, MARKER_END) == MANUFACTURER_MARKER;
    debug!(marker, length, "layout family selected");

    let (fragment, serial) = if marker {
        marker_fields(barcode, length)
    } else {
        standard_fields(barcode, length)
    };

    let expiry = fragment.as_deref().and_then(expiry::normalize);

    info!(
        identifier = %identifier,
        expiry = ?expiry,
        serial = ?serial,
        identifier_valid,
        "barcode decoded"
    );

    Ok(DecodedBarcode {
        identifier,
        expiry,
        serial,
        identifier_valid,
    })
}

// =============================================================================
// Layout Field Extraction
// =============================================================================

/// Standard layout: expiry [18,24) and serial [26..], each gated on the
/// barcode actually reaching past the field.
fn standard_fields(barcode: &str, length: usize) -> (Option<String>, Option<String>) {
    let fragment = if length > STANDARD_EXPIRY_END {
        non_empty(char_range(barcode, STANDARD_EXPIRY_START, STANDARD_EXPIRY_END))
    } else {
        None
    };
    let serial = if length > STANDARD_SERIAL_START {
        non_empty(char_tail(barcode, STANDARD_SERIAL_START))
    } else {
        None
    };
    debug!(fragment = ?fragment, serial = ?serial, "standard layout fields");
    (fragment, serial)
}

/// Marker layout: two fixed variants selected by total length; slices clamp
/// rather than fail, so a short marker barcode degrades to partial or empty
/// fields.
fn marker_fields(barcode: &str, length: usize) -> (Option<String>, Option<String>) {
    let (fragment, serial) = if length > MARKER_EXPIRY_END_SHORT {
        (
            char_range(barcode, MARKER_EXPIRY_START_LONG, MARKER_EXPIRY_END_LONG),
            char_range(barcode, MARKER_SERIAL_START, MARKER_SERIAL_END_LONG),
        )
    } else {
        (
            char_range(barcode, MARKER_EXPIRY_START_SHORT, MARKER_EXPIRY_END_SHORT),
            char_range(barcode, MARKER_SERIAL_START, MARKER_SERIAL_END_SHORT),
        )
    };
    debug!(fragment = %fragment, serial = %serial, "marker layout fields");
    (non_empty(fragment), non_empty(serial))
}

// =============================================================================
// Character-Positional Helpers
// =============================================================================

/// Slice by character positions with clamping: positions past the end of
/// the string clamp to it, so the result may be partial or empty but the
/// call never panics — including on multi-byte input.
fn char_range(s: &str, start: usize, end: usize) -> &str {
    let byte_start = s.char_indices().nth(start).map(|(i, _)| i).unwrap_or(s.len());
    let byte_end = s.char_indices().nth(end).map(|(i, _)| i).unwrap_or(s.len());
    if byte_start >= byte_end {
        ""
    } else {
        &s[byte_start..byte_end]
    }
}

/// Everything from character position `start` to the end of the string.
fn char_tail(s: &str, start: usize) -> &str {
    let byte_start = s.char_indices().nth(start).map(|(i, _)| i).unwrap_or(s.len());
    &s[byte_start..]
}

/// An empty string becomes `None`; any non-empty string is carried forward
/// as an owned `Some`.
fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// The string with the character at `index` removed.
fn drop_char(s: &str, index: usize) -> String {
    s.chars()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, c)| c)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
