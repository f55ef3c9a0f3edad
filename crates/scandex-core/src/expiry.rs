//! # Expiry Module
//!
//! Validation and reformatting of the 6-digit expiry fragment.
//!
//! ## Normalization Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  "230228" (YYMMDD fragment sliced out of the barcode)               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  shape check: exactly 6 ASCII digits                                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  table check: month in [1,12], day within days-per-month            │
//! │  (February carries 29 days unconditionally in the table)            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  format: "20" + yy, "2023-02-28"                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  calendar re-parse (chrono) — rejects Feb 29 of non-leap years      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Some("2023-02-28")   (any failure on the way → None)               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::{debug, warn};

/// Days per month used for the table-level day check.
///
/// February is listed with 29 days unconditionally; the trailing calendar
/// re-parse is what rejects Feb 29 of a non-leap year.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Normalizes a 6-digit `YYMMDD` fragment to an ISO `YYYY-MM-DD` date.
///
/// The two-digit year maps to `20yy`; there is no century disambiguation
/// beyond the fixed prefix.
///
/// ## Rules
/// - Exactly 6 characters, all ASCII decimal digits
/// - Month in [1,12], day within the month's table entry
/// - The formatted result must survive a calendar re-parse
///
/// Returns `None` for any rejected fragment; never panics.
///
/// ## Example
/// ```rust
/// use scandex_core::expiry::normalize;
///
/// assert_eq!(normalize("230228"), Some("2023-02-28".to_string()));
/// assert_eq!(normalize("991301"), None); // month 13
/// assert_eq!(normalize("230229"), None); // 2023 is not a leap year
/// ```
pub fn normalize(fragment: &str) -> Option<String> {
    debug!(fragment = %fragment, "normalizing expiry fragment");

    if fragment.chars().count() != 6 || !fragment.chars().all(|c| c.is_ascii_digit()) {
        warn!(fragment = %fragment, "expiry fragment is not 6 ASCII digits");
        return None;
    }

    // All ASCII from here on, byte splitting is safe.
    let (yy, rest) = fragment.split_at(2);
    let (mm, dd) = rest.split_at(2);

    let month: u32 = mm.parse().ok()?;
    let day: u32 = dd.parse().ok()?;

    if !(1..=12).contains(&month) {
        warn!(month, "expiry month out of range");
        return None;
    }
    if day < 1 || day > DAYS_IN_MONTH[(month - 1) as usize] {
        warn!(day, month, "expiry day invalid for month");
        return None;
    }

    let formatted = format!("20{yy}-{mm}-{dd}");

    // Calendar-level sanity check on the formatted result.
    match NaiveDate::parse_from_str(&formatted, "%Y-%m-%d") {
        Ok(_) => {
            debug!(date = %formatted, "expiry fragment normalized");
            Some(formatted)
        }
        Err(_) => {
            warn!(date = %formatted, "formatted expiry failed calendar re-parse");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
