//! Test-case file names.
//!
//! Source files arrive in three shapes, all `#`-separated:
//!
//! | parts | layout                              |
//! |-------|-------------------------------------|
//! | 3     | `TC#<id>#<suffix>.json`             |
//! | 4     | `TC#<id>#<edit>#<suffix>.json`      |
//! | 5     | `TC#<id>#<edit>#<eob>#<suffix>.json` |
//!
//! Renamed files always have five parts with an [`OutcomeCode`] suffix.

use fixture_model::{OutcomeCode, SuffixKind};
use serde::Serialize;

/// Number of `#`-separated parts in a test-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NameShape {
    ThreePart,
    FourPart,
    FivePart,
}

/// A parsed test-case file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseName {
    pub prefix: String,
    pub tc_id: String,
    pub edit: Option<String>,
    pub eob: Option<String>,
    pub suffix: String,
    pub shape: NameShape,
}

impl TestCaseName {
    /// Parses `file_name`. Returns `None` for non-JSON files and for
    /// part counts other than 3, 4 or 5.
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = json_stem(file_name)?;
        let parts: Vec<&str> = stem.split('#').collect();
        let owned = |s: &str| s.to_string();
        match parts.as_slice() {
            &[prefix, tc_id, suffix] => Some(Self {
                prefix: owned(prefix),
                tc_id: owned(tc_id),
                edit: None,
                eob: None,
                suffix: owned(suffix),
                shape: NameShape::ThreePart,
            }),
            &[prefix, tc_id, edit, suffix] => Some(Self {
                prefix: owned(prefix),
                tc_id: owned(tc_id),
                edit: Some(owned(edit)),
                eob: None,
                suffix: owned(suffix),
                shape: NameShape::FourPart,
            }),
            &[prefix, tc_id, edit, eob, suffix] => Some(Self {
                prefix: owned(prefix),
                tc_id: owned(tc_id),
                edit: Some(owned(edit)),
                eob: Some(owned(eob)),
                suffix: owned(suffix),
                shape: NameShape::FivePart,
            }),
            _ => None,
        }
    }

    /// Outcome code the renamed file carries.
    ///
    /// Five-part names may already hold a mapped code, which is kept.
    pub fn outcome_code(&self) -> OutcomeCode {
        if self.shape == NameShape::FivePart
            && let Some(code) = OutcomeCode::from_code(&self.suffix)
        {
            return code;
        }
        SuffixKind::from_token(&self.suffix).code()
    }

    /// True when the suffix is neither a documented token nor a mapped code.
    pub fn has_unknown_suffix(&self) -> bool {
        OutcomeCode::from_code(&self.suffix).is_none() && !SuffixKind::is_known_token(&self.suffix)
    }

    /// True when a five-part name was made for a different model.
    pub fn belongs_to_other_model(&self, edit: &str, eob: &str) -> bool {
        match (&self.edit, &self.eob, self.shape) {
            (Some(own_edit), Some(own_eob), NameShape::FivePart) => {
                own_edit != edit || own_eob != eob
            }
            _ => false,
        }
    }

    /// `TC#<id>#<edit>#<eob>#<code>.json`
    pub fn target_name(&self, edit: &str, eob: &str) -> String {
        format!(
            "{}#{}#{}#{}#{}.json",
            self.prefix,
            self.tc_id,
            edit,
            eob,
            self.outcome_code()
        )
    }
}

/// A renamed five-part test case with a mapped outcome code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedCase {
    pub tc_id: String,
    pub edit: String,
    pub eob: String,
    pub code: OutcomeCode,
}

impl RenamedCase {
    /// Parses a renamed file name. The suffix must already be `LR`, `NR` or `EX`.
    pub fn parse(file_name: &str) -> Option<Self> {
        let name = TestCaseName::parse(file_name)?;
        if name.shape != NameShape::FivePart {
            return None;
        }
        let code = OutcomeCode::from_code(&name.suffix)?;
        Some(Self {
            tc_id: name.tc_id,
            edit: name.edit?,
            eob: name.eob?,
            code,
        })
    }
}

fn json_stem(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    ext.eq_ignore_ascii_case("json").then_some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_part() {
        let name = TestCaseName::parse("TC#01_12345#deny.json").unwrap();
        assert_eq!(name.shape, NameShape::ThreePart);
        assert_eq!(name.tc_id, "01_12345");
        assert_eq!(
            name.target_name("rvn001", "00W5"),
            "TC#01_12345#rvn001#00W5#LR.json"
        );
    }

    #[test]
    fn test_four_part_replaces_edit() {
        let name = TestCaseName::parse("TC#02_9#old#bypass.json").unwrap();
        assert_eq!(name.shape, NameShape::FourPart);
        assert_eq!(
            name.target_name("rvn002", "00W6"),
            "TC#02_9#rvn002#00W6#NR.json"
        );
    }

    #[test]
    fn test_five_part_keeps_mapped_code() {
        let name = TestCaseName::parse("TC#03#rvn001#00W5#EX.json").unwrap();
        assert_eq!(name.outcome_code(), OutcomeCode::EX);
        assert!(!name.belongs_to_other_model("rvn001", "00W5"));
        assert!(name.belongs_to_other_model("rvn002", "00W5"));
    }

    #[test]
    fn test_unknown_suffix_maps_to_exclusion() {
        let name = TestCaseName::parse("TC#04#positive.json").unwrap();
        assert!(name.has_unknown_suffix());
        assert_eq!(name.outcome_code(), OutcomeCode::EX);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(TestCaseName::parse("TC#01.json").is_none());
        assert!(TestCaseName::parse("a#b#c#d#e#f.json").is_none());
        assert!(TestCaseName::parse("TC#01#deny.txt").is_none());
        assert!(TestCaseName::parse("noextension").is_none());
    }

    #[test]
    fn test_renamed_case() {
        let case = RenamedCase::parse("TC#01_1#rvn001#00W5#NR.json").unwrap();
        assert_eq!(case.tc_id, "01_1");
        assert_eq!(case.code, OutcomeCode::NR);
        assert!(RenamedCase::parse("TC#01_1#rvn001#00W5#deny.json").is_none());
    }
}
