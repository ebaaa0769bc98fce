//! Technique code to object id index.
//!
//! Built while objects are exported and written once after the traversal.
//! The first object seen for a code wins; later duplicates are dropped. Entries
//! keep insertion order so the written file follows document order.

use crate::export::to_export_string;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TechniqueIndex {
    by_code: Map<String, Value>,
}

impl TechniqueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `code -> id` unless the code is already present.
    ///
    /// Returns true when the entry was inserted.
    pub fn record(&mut self, code: &str, id: &str) -> bool {
        if self.by_code.contains_key(code) {
            return false;
        }
        self.by_code
            .insert(code.to_string(), Value::String(id.to_string()));
        true
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn to_json_string(&self) -> Result<String> {
        to_export_string(&self.by_code)
    }

    /// Write the index as a flat JSON mapping.
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = self.to_json_string()?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("Wrote {} technique mappings to {}", self.len(), path.display());
        Ok(())
    }
}
