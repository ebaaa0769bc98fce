//! External-code rules.
//!
//! Each rule pairs a code prefix pattern with the STIX types allowed to carry
//! it. Patterns are anchored at the start only, so sub-technique codes such as
//! `T1003.001` still match the technique rule.

use crate::classify::category::Category;
use regex::Regex;
use std::sync::LazyLock;

/// A code pattern plus the object types it applies to.
#[derive(Debug)]
pub struct CodeRule {
    pub category: Category,
    pattern: Regex,
    object_types: &'static [&'static str],
}

impl CodeRule {
    fn new(category: Category, pattern: &str, object_types: &'static [&'static str]) -> Self {
        Self {
            category,
            pattern: Regex::new(pattern).expect("code rule pattern must compile"),
            object_types,
        }
    }

    /// True when both the code pattern and the object type match.
    pub fn matches(&self, code: &str, object_type: &str) -> bool {
        self.object_types.contains(&object_type) && self.pattern.is_match(code)
    }
}

// Priority order: the first matching rule wins for a given reference.
static CODE_RULES: LazyLock<Vec<CodeRule>> = LazyLock::new(|| {
    vec![
        CodeRule::new(Category::Technique, r"^T[0-9]+", &["attack-pattern"]),
        CodeRule::new(Category::Tactics, r"^TA[0-9]{4}", &["x-mitre-tactic"]),
        CodeRule::new(Category::Software, r"^S[0-9]{4}", &["tool", "malware"]),
        CodeRule::new(Category::Groups, r"^G[0-9]{4}", &["intrusion-set"]),
        CodeRule::new(Category::Datasource, r"^DS[0-9]{4}", &["x-mitre-data-source"]),
        CodeRule::new(Category::Campaign, r"^C[0-9]{4}", &["campaign"]),
    ]
});

/// Rules in priority order.
pub fn code_rules() -> &'static [CodeRule] {
    &CODE_RULES
}

/// First rule matching `code` for an object of `object_type`.
pub fn match_code(code: &str, object_type: &str) -> Option<&'static CodeRule> {
    code_rules()
        .iter()
        .find(|rule| rule.matches(code, object_type))
}
