//! Test-case outcome classification.
//!
//! Source files end in a free-form suffix token (`deny`, `bypass`, ...).
//! Renamed files carry a two-letter outcome code instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Input suffix classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixKind {
    Deny,
    Bypass,
    /// Every token that is not `deny` or `bypass`.
    Exclusion,
}

impl SuffixKind {
    /// Classifies a suffix token. Unknown tokens fall through to [`SuffixKind::Exclusion`].
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("deny") {
            Self::Deny
        } else if token.eq_ignore_ascii_case("bypass") {
            Self::Bypass
        } else {
            Self::Exclusion
        }
    }

    /// Output code written into renamed files.
    pub const fn code(&self) -> OutcomeCode {
        match self {
            Self::Deny => OutcomeCode::LR,
            Self::Bypass => OutcomeCode::NR,
            Self::Exclusion => OutcomeCode::EX,
        }
    }

    /// True when the token is one of the three documented suffixes.
    pub fn is_known_token(token: &str) -> bool {
        ["deny", "bypass", "exclusion"]
            .iter()
            .any(|known| token.trim().eq_ignore_ascii_case(known))
    }
}

/// Outcome code carried by renamed test-case files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutcomeCode {
    LR,
    NR,
    EX,
}

impl OutcomeCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LR => "LR",
            Self::NR => "NR",
            Self::EX => "EX",
        }
    }

    /// Recognizes an already-mapped code (exact, upper case).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "LR" => Some(Self::LR),
            "NR" => Some(Self::NR),
            "EX" => Some(Self::EX),
            _ => None,
        }
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
