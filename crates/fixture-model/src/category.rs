//! Model family enumeration.
//!
//! Each healthcare model family has its own folder naming convention and
//! output layout. All per-family differences live here so the discovery,
//! rename and emit stages stay a single pipeline parameterized by
//! [`Category`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the four model families the toolkit understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// WGS CSBD models.
    WgsCsbd,
    /// GBDF models, MCR variant.
    GbdfMcr,
    /// GBDF models, GRS variant.
    GbdfGrs,
    /// WGS Kernal (NYK) models.
    WgsKernal,
}

/// Payload family, which selects the header shape and field mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFamily {
    /// WGS payloads are wrapped in a request envelope.
    Wgs,
    /// GBDF payloads carry a claim identifier.
    Gbdf,
}

impl Category {
    /// All categories in discovery order.
    pub const ALL: [Category; 4] = [
        Category::WgsCsbd,
        Category::GbdfMcr,
        Category::GbdfGrs,
        Category::WgsKernal,
    ];

    /// Canonical snake_case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WgsCsbd => "wgs_csbd",
            Self::GbdfMcr => "gbdf_mcr",
            Self::GbdfGrs => "gbdf_grs",
            Self::WgsKernal => "wgs_kernal",
        }
    }

    /// Line-of-business label used in reports.
    pub const fn lob(&self) -> &'static str {
        match self {
            Self::WgsCsbd => "WGS_CSBD",
            Self::GbdfMcr => "GBDF_MCR",
            Self::GbdfGrs => "GBDF_GRS",
            Self::WgsKernal => "WGS_NYK",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WgsCsbd => "WGS CSBD",
            Self::GbdfMcr => "GBDF MCR",
            Self::GbdfGrs => "GBDF GRS",
            Self::WgsKernal => "WGS Kernal",
        }
    }

    /// Category-specific prefix that precedes the suite number in folder names.
    pub const fn suite_prefix(&self) -> &'static str {
        match self {
            Self::WgsCsbd => "CSBDTS",
            Self::GbdfMcr | Self::GbdfGrs => "GBDTS",
            Self::WgsKernal => "NYKTS",
        }
    }

    /// Token that marks the family inside a folder name (matched case-insensitively).
    pub const fn folder_token(&self) -> &'static str {
        match self {
            Self::WgsCsbd => "WGS_CSBD",
            Self::GbdfMcr => "gbdf_mcr",
            Self::GbdfGrs => "gbdf_grs",
            Self::WgsKernal => "WGS_NYK",
        }
    }

    /// Directory under the source root holding this family's suites.
    pub const fn source_subdir(&self) -> &'static str {
        match self {
            Self::WgsCsbd => "WGS_CSBD",
            Self::GbdfMcr | Self::GbdfGrs => "GBDF",
            Self::WgsKernal => "WGS_Kernal",
        }
    }

    /// Directory under the destination root receiving renamed files.
    pub const fn dest_subdir(&self) -> &'static str {
        self.suite_prefix()
    }

    /// Directory under the collections root receiving emitted collections.
    pub const fn collection_subdir(&self) -> &'static str {
        match self {
            Self::WgsCsbd => "WGS_CSBD",
            Self::GbdfMcr | Self::GbdfGrs => "GBDF",
            Self::WgsKernal => "WGS_NYK",
        }
    }

    /// Payload family for header and mutation selection.
    pub const fn payload_family(&self) -> PayloadFamily {
        match self {
            Self::WgsCsbd | Self::WgsKernal => PayloadFamily::Wgs,
            Self::GbdfMcr | Self::GbdfGrs => PayloadFamily::Gbdf,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    /// Accepts `wgs_csbd`, `wgs-csbd`, `WGS_CSBD` and the `wgs_nyk` alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "wgs_csbd" | "csbd" => Ok(Self::WgsCsbd),
            "gbdf_mcr" | "mcr" => Ok(Self::GbdfMcr),
            "gbdf_grs" | "grs" => Ok(Self::GbdfGrs),
            "wgs_kernal" | "wgs_nyk" | "nyk" => Ok(Self::WgsKernal),
            _ => Err(ModelError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("wgs-csbd".parse::<Category>().unwrap(), Category::WgsCsbd);
        assert_eq!("WGS_CSBD".parse::<Category>().unwrap(), Category::WgsCsbd);
        assert_eq!("gbdf_grs".parse::<Category>().unwrap(), Category::GbdfGrs);
        assert_eq!("wgs_nyk".parse::<Category>().unwrap(), Category::WgsKernal);
        assert!("gbdf".parse::<Category>().is_err());
    }

    #[test]
    fn test_round_trips_through_as_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_gbdf_variants_share_layout() {
        assert_eq!(
            Category::GbdfMcr.source_subdir(),
            Category::GbdfGrs.source_subdir()
        );
        assert_eq!(Category::GbdfMcr.payload_family(), PayloadFamily::Gbdf);
        assert_eq!(Category::WgsKernal.payload_family(), PayloadFamily::Wgs);
    }
}
