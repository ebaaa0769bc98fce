//! Deserializable representation of a STIX bundle.
//!
//! Only the `objects` array is modeled; each entry is kept as its original JSON
//! map (field order preserved) and exposes typed accessors for the handful of
//! fields classification reads.

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TYPE: &str = "type";
const ID: &str = "id";
const NAME: &str = "name";
const EXTERNAL_REFERENCES: &str = "external_references";
const EXTERNAL_ID: &str = "external_id";

/// Aggregated ATT&CK document: an ordered sequence of typed objects.
#[derive(Clone, Debug, Deserialize)]
pub struct Bundle {
    pub objects: Vec<AttackObject>,
}

/// One typed entry within a bundle, exactly as it appeared in the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttackObject(pub Map<String, Value>);

impl AttackObject {
    /// The STIX `type` tag.
    ///
    /// Returns `None` when the field is absent or not a string; such objects
    /// can never match a category.
    pub fn object_type(&self) -> Option<&str> {
        self.0.get(TYPE).and_then(Value::as_str)
    }

    /// The object identifier; required wherever a rule keys or indexes by it.
    pub fn id(&self) -> Result<&str> {
        self.required_str(ID)
    }

    /// The display name; required for name-keyed categories.
    pub fn name(&self) -> Result<&str> {
        self.required_str(NAME)
    }

    /// External codes carried by `external_references`, in reference order.
    ///
    /// References without an `external_id` are skipped. A malformed reference
    /// list is an error rather than an empty result so bad input halts the run
    /// instead of silently dropping objects.
    pub fn external_ids(&self) -> Result<Vec<&str>> {
        let Some(references) = self.0.get(EXTERNAL_REFERENCES) else {
            return Ok(Vec::new());
        };
        let Value::Array(references) = references else {
            bail!("{EXTERNAL_REFERENCES} must be an array");
        };

        let mut codes = Vec::new();
        for (idx, reference) in references.iter().enumerate() {
            let Value::Object(reference) = reference else {
                bail!("{EXTERNAL_REFERENCES}[{idx}] must be an object");
            };
            match reference.get(EXTERNAL_ID) {
                None => {}
                Some(Value::String(code)) => codes.push(code.as_str()),
                Some(_) => bail!("{EXTERNAL_REFERENCES}[{idx}].{EXTERNAL_ID} must be a string"),
            }
        }
        Ok(codes)
    }

    /// Short label for error messages: the id when present.
    pub fn describe(&self) -> &str {
        self.0.get(ID).and_then(Value::as_str).unwrap_or("<no id>")
    }

    fn required_str(&self, field: &str) -> Result<&str> {
        match self.0.get(field) {
            Some(Value::String(value)) => Ok(value.as_str()),
            Some(_) => Err(anyhow!("field '{field}' must be a string")),
            None => Err(anyhow!("missing field '{field}'")),
        }
    }
}
