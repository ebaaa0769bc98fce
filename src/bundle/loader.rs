//! Reads a bundle from disk.
//!
//! A missing file is the one failure callers are expected to recognize, so it
//! surfaces as the typed [`BundleNotFound`]; every other read or parse failure
//! is reported through `anyhow` with the path attached.

use crate::bundle::model::Bundle;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The bundle path does not exist.
#[derive(Debug, Error)]
#[error("bundle not found: {}", path.display())]
pub struct BundleNotFound {
    pub path: PathBuf,
}

/// Read and parse a bundle without schema validation.
pub fn load_bundle(path: &Path) -> Result<Bundle> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(BundleNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(err) => return Err(err).with_context(|| format!("reading {}", path.display())),
    };
    let bundle: Bundle =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(
        "Loaded {} objects from {}",
        bundle.objects.len(),
        path.display()
    );
    Ok(bundle)
}
