//! One-shot bundle conversion.
//!
//! `convert` loads the bundle, classifies and exports every object in document
//! order, then writes the technique index. Progress notices go to the supplied
//! writer once per rule and category; per-file detail is emitted as `tracing` debug
//! events.

use crate::bundle::{AttackObject, Bundle, load_bundle};
use crate::classify::{Category, Placement, classify};
use crate::export::{Exporter, OutputLayout};
use crate::index::TechniqueIndex;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;

pub const DEFAULT_BUNDLE_PATH: &str = "enterprise-attack.json";
pub const DEFAULT_OUTPUT_ROOT: &str = "enterprise";
pub const DEFAULT_INDEX_PATH: &str = "mappings-tech2uuid.json";

/// Input and output locations for a conversion run.
///
/// Defaults are relative to the working directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConvertOptions {
    pub bundle_path: PathBuf,
    pub output_root: PathBuf,
    pub index_path: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from(DEFAULT_BUNDLE_PATH),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
        }
    }
}

/// Counts gathered over one run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConvertSummary {
    pub objects_seen: usize,
    pub objects_exported: usize,
    pub objects_skipped: usize,
    pub files_written: BTreeMap<Category, usize>,
    pub techniques_indexed: usize,
}

impl ConvertSummary {
    pub fn total_files(&self) -> usize {
        self.files_written.values().sum()
    }
}

/// Tracks which notices have already been printed.
///
/// Notices are keyed by the producing rule and the category written, so a
/// group prints both its `Group:` and `APT:` lines the first time the group
/// rule fires, independently of intrusion sets exported by the type fallback.
#[derive(Debug, Default)]
pub struct ProgressLog {
    seen: BTreeSet<(Category, Category)>,
}

impl ProgressLog {
    /// The notice line for `placement`, or `None` if it was already printed.
    pub fn notice(&mut self, placement: &Placement) -> Option<String> {
        if !self.seen.insert((placement.rule, placement.category)) {
            return None;
        }
        Some(format!(
            "{}: {}",
            placement.category.notice_label(),
            placement.key
        ))
    }
}

/// Load the bundle named by `options` and export it.
pub fn convert(options: &ConvertOptions, progress: &mut dyn Write) -> Result<ConvertSummary> {
    let bundle = load_bundle(&options.bundle_path)?;
    let exporter = Exporter::new(OutputLayout::new(&options.output_root));
    let (index, summary) = export_bundle(&bundle, &exporter, progress)?;
    index.write(&options.index_path)?;
    tracing::info!(
        "Exported {} of {} objects ({} files, {} techniques indexed)",
        summary.objects_exported,
        summary.objects_seen,
        summary.total_files(),
        summary.techniques_indexed
    );
    Ok(summary)
}

/// Export every object of `bundle` and return the accumulated index.
///
/// The index is returned rather than written so callers decide where it goes;
/// the first I/O or classification failure stops the traversal, leaving any
/// files already written in place.
pub fn export_bundle(
    bundle: &Bundle,
    exporter: &Exporter,
    progress: &mut dyn Write,
) -> Result<(TechniqueIndex, ConvertSummary)> {
    let mut index = TechniqueIndex::new();
    let mut log = ProgressLog::default();
    let mut summary = ConvertSummary::default();
    tracing::debug!(
        "Exporting {} objects into {}",
        bundle.objects.len(),
        exporter.layout().root().display()
    );

    for (position, object) in bundle.objects.iter().enumerate() {
        summary.objects_seen += 1;
        if object.object_type().is_none() {
            tracing::warn!("object {position} ({}) has no type; skipping", object.describe());
        }
        export_object(object, exporter, &mut index, &mut log, &mut summary, progress)
            .with_context(|| format!("object {position} ({})", object.describe()))?;
    }

    summary.techniques_indexed = index.len();
    Ok((index, summary))
}

fn export_object(
    object: &AttackObject,
    exporter: &Exporter,
    index: &mut TechniqueIndex,
    log: &mut ProgressLog,
    summary: &mut ConvertSummary,
    progress: &mut dyn Write,
) -> Result<()> {
    let placements = classify(object)?;
    if placements.is_empty() {
        summary.objects_skipped += 1;
        return Ok(());
    }

    for placement in &placements {
        if let Some(line) = log.notice(placement) {
            writeln!(progress, "{line}").context("writing progress notice")?;
        }
        exporter.write_object(object, placement)?;
        if placement.category == Category::Technique {
            index.record(&placement.key, object.id()?);
        }
        *summary.files_written.entry(placement.category).or_default() += 1;
    }
    summary.objects_exported += 1;
    Ok(())
}
