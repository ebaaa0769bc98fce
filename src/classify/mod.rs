//! Object classification.
//!
//! Decides where each bundle object is exported by looking at its external
//! reference codes first and its STIX type second. Classification is pure: it
//! returns the placements for one object and leaves file I/O and index updates
//! to the caller.

pub mod category;
pub mod rules;

pub use category::Category;
pub use rules::{CodeRule, code_rules, match_code};

use crate::bundle::AttackObject;
use anyhow::Result;

const DATA_COMPONENT: &str = "x-mitre-data-component";
const RELATIONSHIP: &str = "relationship";
const INTRUSION_SET: &str = "intrusion-set";

/// One output location for an object: `<category>/<key>`.
///
/// `rule` names the rule that produced the placement. It equals `category`
/// except for the `intrusion-set` copy written by the group rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Placement {
    pub category: Category,
    pub key: String,
    pub rule: Category,
}

impl Placement {
    pub fn new(category: Category, key: impl Into<String>) -> Self {
        Self {
            category,
            key: key.into(),
            rule: category,
        }
    }

    /// A secondary placement emitted by `rule` under another category.
    pub fn derived(rule: Category, category: Category, key: impl Into<String>) -> Self {
        Self {
            category,
            key: key.into(),
            rule,
        }
    }
}

/// Compute every placement for `object`, in export order.
///
/// Every external reference is tested against the code rules and each match
/// contributes placements, so an object whose references satisfy two rules is
/// exported twice. Groups additionally land under `intrusion-set` keyed by
/// name. Only when no reference matched does the type-based fallback apply.
/// Objects without a string `type` produce nothing.
pub fn classify(object: &AttackObject) -> Result<Vec<Placement>> {
    let Some(object_type) = object.object_type() else {
        return Ok(Vec::new());
    };

    let mut placements = Vec::new();
    for code in object.external_ids()? {
        let Some(rule) = match_code(code, object_type) else {
            continue;
        };
        placements.push(Placement::new(rule.category, code));
        if rule.category == Category::Groups {
            placements.push(Placement::derived(
                Category::Groups,
                Category::IntrusionSet,
                object.name()?,
            ));
        }
    }
    if !placements.is_empty() {
        return Ok(placements);
    }

    let fallback = match object_type {
        DATA_COMPONENT => Placement::new(Category::DataComponent, object.name()?.replace(' ', "_")),
        RELATIONSHIP => Placement::new(Category::Relationships, object.id()?),
        // Reached by intrusion sets that carry no G code.
        INTRUSION_SET => Placement::new(Category::IntrusionSet, object.name()?),
        _ => return Ok(placements),
    };
    Ok(vec![fallback])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn object(value: Value) -> AttackObject {
        serde_json::from_value(value).unwrap()
    }

    fn keys(placements: &[Placement]) -> Vec<(Category, &str)> {
        placements
            .iter()
            .map(|p| (p.category, p.key.as_str()))
            .collect()
    }

    #[test]
    fn technique_is_keyed_by_code() {
        let obj = object(json!({
            "type": "attack-pattern",
            "id": "attack-pattern--0a3ead4e",
            "name": "OS Credential Dumping",
            "external_references": [
                {"source_name": "mitre-attack", "external_id": "T1003"},
                {"source_name": "capec", "external_id": "CAPEC-567"}
            ]
        }));
        let placements = classify(&obj).unwrap();
        assert_eq!(keys(&placements), vec![(Category::Technique, "T1003")]);
    }

    #[test]
    fn group_lands_in_groups_and_intrusion_set() {
        let obj = object(json!({
            "type": "intrusion-set",
            "id": "intrusion-set--bef4c620",
            "name": "APT28",
            "external_references": [{"source_name": "mitre-attack", "external_id": "G0007"}]
        }));
        let placements = classify(&obj).unwrap();
        assert_eq!(
            keys(&placements),
            vec![(Category::Groups, "G0007"), (Category::IntrusionSet, "APT28")]
        );
        assert!(placements.iter().all(|p| p.rule == Category::Groups));
    }

    #[test]
    fn group_without_name_is_an_error() {
        let obj = object(json!({
            "type": "intrusion-set",
            "id": "intrusion-set--1",
            "external_references": [{"external_id": "G0001"}]
        }));
        let err = classify(&obj).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn every_matching_reference_is_exported() {
        // Multiple matching references are kept rather than collapsed.
        let obj = object(json!({
            "type": "attack-pattern",
            "id": "attack-pattern--dup",
            "external_references": [
                {"external_id": "T1547"},
                {"external_id": "T1547.001"}
            ]
        }));
        let placements = classify(&obj).unwrap();
        assert_eq!(
            keys(&placements),
            vec![
                (Category::Technique, "T1547"),
                (Category::Technique, "T1547.001")
            ]
        );
    }

    #[test]
    fn fallback_uses_type_when_no_code_matches() {
        let component = object(json!({
            "type": "x-mitre-data-component",
            "id": "x-mitre-data-component--1",
            "name": "Process Creation"
        }));
        assert_eq!(
            keys(&classify(&component).unwrap()),
            vec![(Category::DataComponent, "Process_Creation")]
        );

        let relationship = object(json!({
            "type": "relationship",
            "id": "relationship--abc",
            "relationship_type": "uses"
        }));
        assert_eq!(
            keys(&classify(&relationship).unwrap()),
            vec![(Category::Relationships, "relationship--abc")]
        );
    }

    #[test]
    fn intrusion_set_without_group_code_falls_back_to_name() {
        let obj = object(json!({
            "type": "intrusion-set",
            "id": "intrusion-set--2",
            "name": "Unnamed Cluster",
            "external_references": [{"source_name": "vendor", "external_id": "UNC1234"}]
        }));
        let placements = classify(&obj).unwrap();
        assert_eq!(
            keys(&placements),
            vec![(Category::IntrusionSet, "Unnamed Cluster")]
        );
        assert_eq!(placements[0].rule, Category::IntrusionSet);
    }

    #[test]
    fn unmatched_objects_produce_nothing() {
        let identity = object(json!({"type": "identity", "id": "identity--1", "name": "MITRE"}));
        assert!(classify(&identity).unwrap().is_empty());

        let marking = object(json!({
            "type": "marking-definition",
            "id": "marking-definition--1",
            "external_references": [{"external_id": "T1003"}]
        }));
        assert!(classify(&marking).unwrap().is_empty());

        let untyped = object(json!({"id": "x--1", "external_references": [{"external_id": "T1"}]}));
        assert!(classify(&untyped).unwrap().is_empty());
    }

    #[test]
    fn relationship_without_id_is_an_error() {
        let obj = object(json!({"type": "relationship"}));
        assert!(classify(&obj).is_err());
    }
}
