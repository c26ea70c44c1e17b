//! Suite number parsing and normalization.
//!
//! Suite folders carry their numeric identifier in whatever width the author
//! typed (`7`, `07`, `138`). Everything downstream compares the normalized
//! form: single digits are padded to two characters, wider values pass
//! through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Maximum number of digits accepted in a suite identifier.
pub const MAX_SUITE_DIGITS: usize = 3;

/// Pads a 1-character suite number with a leading `0`.
///
/// Inputs of width 2 or more are returned unchanged, so the function is
/// idempotent. Callers validate the input is 1-3 ASCII digits first.
///
/// ```
/// use fixture_model::normalize_suite_number;
///
/// assert_eq!(normalize_suite_number("1"), "01");
/// assert_eq!(normalize_suite_number("10"), "10");
/// assert_eq!(normalize_suite_number("100"), "100");
/// ```
pub fn normalize_suite_number(raw: &str) -> String {
    if raw.len() == 1 {
        format!("0{raw}")
    } else {
        raw.to_string()
    }
}

/// Returns true if `raw` is 1-3 ASCII digits.
pub fn is_valid_suite_number(raw: &str) -> bool {
    !raw.is_empty() && raw.len() <= MAX_SUITE_DIGITS && raw.bytes().all(|b| b.is_ascii_digit())
}

/// A validated suite number that remembers how it was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuiteNumber {
    normalized: String,
    raw: String,
}

impl SuiteNumber {
    /// Validates and normalizes a raw suite identifier.
    pub fn parse(raw: &str) -> Result<Self> {
        if !is_valid_suite_number(raw) {
            return Err(ModelError::InvalidSuiteNumber {
                value: raw.to_string(),
            });
        }
        Ok(Self {
            normalized: normalize_suite_number(raw),
            raw: raw.to_string(),
        })
    }

    /// Normalized form (`"07"`, `"10"`, `"138"`).
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// The identifier exactly as it appeared in the source.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True if `query` refers to this suite in any of its written forms.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        is_valid_suite_number(query) && normalize_suite_number(query) == self.normalized
    }
}

impl fmt::Display for SuiteNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}
