//! # Checksum Module
//!
//! Check-digit validation for product identifiers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Ordered Validation Strategies                       │
//! │                                                                     │
//! │  identifier (14 chars sliced out of the barcode)                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. DigitSum   ── repeated digit-sum of chars [0,13) must           │
//! │       │           converge to the check char at [13,14)             │
//! │       │ invalid                                                     │
//! │       ▼                                                             │
//! │  2. Weighted   ── GTIN-13 modulo-10 check on a 13-char slice        │
//! │       │           (leading char dropped when the input is 14 long)  │
//! │       │ invalid                                                     │
//! │       ▼                                                             │
//! │  false — never an error, never a panic                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both algorithms are total: any malformed identifier (non-digits, wrong
//! length, empty) is simply invalid.
//!
//! ## Usage
//! ```rust
//! use scandex_core::checksum;
//!
//! // Digit-sum identifier: digits of "4006381333931" sum to 44, then 8
//! assert!(checksum::validate("40063813339318"));
//!
//! // Plain EAN/GTIN-13 with its weighted check digit
//! assert!(checksum::validate("4006381333931"));
//!
//! assert!(!checksum::validate("40063813339312"));
//! ```

use tracing::debug;

/// The check-digit algorithms understood by the validator, in the order
/// [`validate`] tries them.
///
/// Modeled as tagged variants rather than two near-identical free-standing
/// validation paths; [`VALIDATION_ORDER`] is the single place the fallback
/// order lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    /// Repeated digit-sum convergence against a trailing check character.
    DigitSum,
    /// GTIN-13 weighted modulo-10 check digit.
    Weighted,
}

/// The fixed order in which [`validate`] tries the algorithms.
pub const VALIDATION_ORDER: [ChecksumAlgorithm; 2] =
    [ChecksumAlgorithm::DigitSum, ChecksumAlgorithm::Weighted];

impl ChecksumAlgorithm {
    /// Checks `identifier` under this algorithm, narrowing the input to the
    /// slice the algorithm is defined over.
    ///
    /// - `DigitSum` reads chars [0,13) as the number and [13,14) as the
    ///   check character.
    /// - `Weighted` needs at least 13 characters; a 14-character input has
    ///   its leading character dropped, anything else is cut to the first
    ///   13 characters.
    pub fn is_valid(&self, identifier: &str) -> bool {
        match self {
            ChecksumAlgorithm::DigitSum => digit_sum_valid(identifier),
            ChecksumAlgorithm::Weighted => {
                let length = identifier.chars().count();
                if length < 13 {
                    return false;
                }
                let candidate: String = if length == 14 {
                    identifier.chars().skip(1).collect()
                } else {
                    identifier.chars().take(13).collect()
                };
                weighted_valid(&candidate)
            }
        }
    }
}

// =============================================================================
// Combined Validation
// =============================================================================

/// Validates a product identifier against each algorithm in
/// [`VALIDATION_ORDER`], accepting the first match.
///
/// Returns `false` for any non-conforming identifier; never panics and
/// never returns an error.
pub fn validate(identifier: &str) -> bool {
    VALIDATION_ORDER
        .iter()
        .any(|algorithm| algorithm.is_valid(identifier))
}

// =============================================================================
// Digit-Sum Algorithm
// =============================================================================

/// Digit-sum check: chars [0,13) are repeatedly replaced by the decimal
/// string of their digit sum until a single character remains, which must
/// equal the check character at [13,14).
///
/// ## Rules
/// - An empty number is always invalid (never silently valid)
/// - A missing check character (input shorter than 14) is invalid
/// - Any non-digit character makes the identifier invalid
fn digit_sum_valid(identifier: &str) -> bool {
    let mut number: String = identifier.chars().take(13).collect();
    let check = identifier.chars().nth(13);
    debug!(number = %number, check = ?check, "digit-sum check");

    if number.is_empty() {
        return false;
    }

    while number.chars().count() > 1 {
        let mut sum: u32 = 0;
        for c in number.chars() {
            match c.to_digit(10) {
                Some(digit) => sum += digit,
                None => return false,
            }
        }
        number = sum.to_string();
    }

    // number is now exactly one character
    check == number.chars().next()
}

// =============================================================================
// Weighted (GTIN-13) Algorithm
// =============================================================================

/// Validates a GTIN-13 code by recomputing its weighted check digit.
///
/// Spaces and hyphens are stripped first; the remainder must be exactly
/// 13 decimal digits.
///
/// ## Example
/// ```rust
/// use scandex_core::checksum::weighted_valid;
///
/// assert!(weighted_valid("4006381333931"));
/// assert!(weighted_valid("4006-381333931")); // separators are stripped
/// assert!(!weighted_valid("4006381333930"));
/// ```
pub fn weighted_valid(code: &str) -> bool {
    let cleaned: String = code.chars().filter(|c| *c != ' ' && *c != '-').collect();
    if cleaned.chars().count() != 13 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let expected = match weighted_check_digit(&cleaned[..12]) {
        Some(digit) => digit,
        None => return false,
    };
    let actual = cleaned.as_bytes()[12] - b'0';
    debug!(expected, actual, "weighted check digit");
    actual == expected
}

/// Computes the GTIN-13 check digit for a 12-digit prefix.
///
/// Digits at even 0-based positions weigh 1, odd positions weigh 3; the
/// check digit is `(10 - (total % 10)) % 10` and therefore always in [0,9].
///
/// Returns `None` unless the input is exactly 12 decimal digits.
///
/// ## Example
/// ```rust
/// use scandex_core::checksum::weighted_check_digit;
///
/// assert_eq!(weighted_check_digit("400638133393"), Some(1));
/// assert_eq!(weighted_check_digit("40063813339"), None); // 11 digits
/// ```
pub fn weighted_check_digit(prefix: &str) -> Option<u8> {
    if prefix.chars().count() != 12 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let total: u32 = prefix
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let digit = c.to_digit(10).unwrap_or(0);
            if i % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum();

    Some(((10 - (total % 10)) % 10) as u8)
}

// =============================================================================
// Unit Tests
// =============================================================================
