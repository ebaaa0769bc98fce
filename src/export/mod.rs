//! Writes classified objects to the export tree.
//!
//! The exporter assumes the category directories already exist (see
//! `OutputLayout::prepare` and the `attack-layout` binary); a missing
//! directory is reported as an I/O error naming the destination path.

pub mod format;
pub mod layout;

pub use format::{AsciiPrettyFormatter, to_export_string};
pub use layout::OutputLayout;

use crate::bundle::AttackObject;
use crate::classify::Placement;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Writes one file per placement under an [`OutputLayout`].
pub struct Exporter {
    layout: OutputLayout,
}

impl Exporter {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Serialize `object` to `<root>/<category>/<key>.json`, overwriting any
    /// previous file at that path.
    pub fn write_object(&self, object: &AttackObject, placement: &Placement) -> Result<PathBuf> {
        let path = self.layout.object_path(placement.category, &placement.key);
        let text = to_export_string(object)?;
        tracing::debug!("Writing: {}", path.display());
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}
