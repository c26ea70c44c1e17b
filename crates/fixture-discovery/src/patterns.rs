//! Folder naming patterns.
//!
//! Every category accepts a prefixed form (`CSBDTS_07_...`) and a bare form
//! (`TS_07_...`). WGS CSBD additionally accepts the legacy revenue layout,
//! including folders created with the `_ayloads_sur` misspelling.
//!
//! The id group accepts any text without `_`; discovery validates it and
//! reports folders whose id is not a suite number.

use std::sync::LazyLock;

use fixture_model::Category;
use regex::Regex;

/// Which naming form matched a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `<PREFIX>_<id>_<display>_<LOB>_<edit>_<eob>_sur`
    Prefixed,
    /// `TS_<id>_<display>_<LOB>_<edit>_<eob>_sur`
    Bare,
    /// `TS_<id>_REVENUE_WGS_CSBD_<edit>_<eob>_payloads_sur`
    LegacyRevenue,
}

/// Fields captured from a matching folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMatch<'a> {
    pub kind: PatternKind,
    pub raw_id: &'a str,
    pub display: &'a str,
    pub edit: &'a str,
    pub eob: &'a str,
}

struct NamePattern {
    category: Category,
    kind: PatternKind,
    regex: Regex,
}

fn structured_pattern(prefix: &str, category: Category) -> String {
    format!(
        r"^{prefix}_(?P<id>[^_]*)_(?P<display>.+?)_(?i:{lob})_(?P<edit>[A-Za-z0-9]+)_(?P<eob>[A-Za-z0-9]+)_sur$",
        prefix = regex::escape(prefix),
        lob = regex::escape(category.folder_token()),
    )
}

static PATTERNS: LazyLock<Vec<NamePattern>> = LazyLock::new(|| {
    let mut patterns = Vec::new();
    for category in Category::ALL {
        patterns.push(NamePattern {
            category,
            kind: PatternKind::Prefixed,
            regex: Regex::new(&structured_pattern(category.suite_prefix(), category))
                .expect("Invalid prefixed folder regex"),
        });
        patterns.push(NamePattern {
            category,
            kind: PatternKind::Bare,
            regex: Regex::new(&structured_pattern("TS", category))
                .expect("Invalid bare folder regex"),
        });
    }
    patterns.push(NamePattern {
        category: Category::WgsCsbd,
        kind: PatternKind::LegacyRevenue,
        regex: Regex::new(
            r"^TS_(?P<id>[^_]*)_(?P<display>REVENUE)_(?i:WGS_CSBD)_(?P<edit>[A-Za-z0-9]+)_(?P<eob>[A-Za-z0-9]+)_p?ayloads_sur$",
        )
        .expect("Invalid legacy revenue folder regex"),
    });
    patterns
});

/// Matches a folder name against the patterns of one category, in order.
pub fn match_folder(category: Category, name: &str) -> Option<FolderMatch<'_>> {
    PATTERNS
        .iter()
        .filter(|pattern| pattern.category == category)
        .find_map(|pattern| {
            let caps = pattern.regex.captures(name)?;
            Some(FolderMatch {
                kind: pattern.kind,
                raw_id: caps.name("id")?.as_str(),
                display: caps.name("display")?.as_str(),
                edit: caps.name("edit")?.as_str(),
                eob: caps.name("eob")?.as_str(),
            })
        })
}

/// Display label for a captured fragment: `_` and `-` become spaces.
pub fn display_name(fragment: &str) -> String {
    fragment.replace(['_', '-'], " ")
}

/// Destination folder name for a matched source folder.
pub fn dest_folder_name(name: &str, kind: PatternKind) -> String {
    match kind {
        PatternKind::LegacyRevenue => {
            let stem = name
                .strip_suffix("_payloads_sur")
                .or_else(|| name.strip_suffix("_ayloads_sur"))
                .unwrap_or(name);
            format!("{stem}_payloads_dis")
        }
        PatternKind::Prefixed | PatternKind::Bare => {
            let stem = name.strip_suffix("_sur").unwrap_or(name);
            format!("{stem}_dis")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_form() {
        let m = match_folder(
            Category::WgsCsbd,
            "CSBDTS_7_Revenue_Code_WGS_CSBD_RULEX00001_00W28_sur",
        )
        .unwrap();
        assert_eq!(m.kind, PatternKind::Prefixed);
        assert_eq!(m.raw_id, "7");
        assert_eq!(m.display, "Revenue_Code");
        assert_eq!(m.edit, "RULEX00001");
        assert_eq!(m.eob, "00W28");
    }

    #[test]
    fn test_bare_form_and_case_insensitive_token() {
        let m = match_folder(Category::GbdfGrs, "TS_12_Covid-Test_GBDF_GRS_RULEG001_v04_sur")
            .unwrap();
        assert_eq!(m.kind, PatternKind::Bare);
        assert_eq!(m.raw_id, "12");
        assert_eq!(m.eob, "v04");
        assert_eq!(display_name(m.display), "Covid Test");
    }

    #[test]
    fn test_legacy_revenue_with_typo() {
        let m = match_folder(
            Category::WgsCsbd,
            "TS_03_REVENUE_WGS_CSBD_rvn003_00W7_ayloads_sur",
        )
        .unwrap();
        assert_eq!(m.kind, PatternKind::LegacyRevenue);
        assert_eq!(m.raw_id, "03");
        assert_eq!(m.edit, "rvn003");
        assert_eq!(m.eob, "00W7");
    }

    #[test]
    fn test_wrong_category_does_not_match() {
        assert!(
            match_folder(
                Category::GbdfMcr,
                "CSBDTS_7_Revenue_WGS_CSBD_RULEX00001_00W28_sur"
            )
            .is_none()
        );
        assert!(match_folder(Category::WgsCsbd, "random_folder").is_none());
    }

    #[test]
    fn test_loose_id_is_captured() {
        let m = match_folder(Category::WgsKernal, "NYKTS_ab_Name_WGS_NYK_RULEN1_00W1_sur")
            .unwrap();
        assert_eq!(m.raw_id, "ab");
    }

    #[test]
    fn test_dest_folder_name() {
        assert_eq!(
            dest_folder_name("TS_03_REVENUE_WGS_CSBD_rvn003_00W7_ayloads_sur", PatternKind::LegacyRevenue),
            "TS_03_REVENUE_WGS_CSBD_rvn003_00W7_payloads_dis"
        );
        assert_eq!(
            dest_folder_name("CSBDTS_07_X_WGS_CSBD_R1_00W1_sur", PatternKind::Prefixed),
            "CSBDTS_07_X_WGS_CSBD_R1_00W1_dis"
        );
    }
}
