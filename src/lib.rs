//! Shared library for the ATT&CK bundle exporter.
//!
//! The crate splits a MITRE ATT&CK STIX bundle into one JSON file per object,
//! grouped by category, and derives a technique-code to object-id index.
//! Public functions here form the contract the `attack-export` and
//! `attack-layout` binaries depend on: bundle loading, classification, the
//! export tree layout, and the conversion run itself.

pub mod bundle;
pub mod classify;
pub mod convert;
pub mod export;
pub mod index;

pub use bundle::{AttackObject, Bundle, BundleNotFound, load_bundle};
pub use classify::{Category, Placement, classify};
pub use convert::{
    ConvertOptions, ConvertSummary, DEFAULT_BUNDLE_PATH, DEFAULT_INDEX_PATH, DEFAULT_OUTPUT_ROOT,
    ProgressLog, convert, export_bundle,
};
pub use export::{Exporter, OutputLayout, to_export_string};
pub use index::TechniqueIndex;

/// Install the stderr `tracing` subscriber used by the binaries.
///
/// `verbose` lowers the level to debug, which logs every written path.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
