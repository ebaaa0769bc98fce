//! Output directory layout: `<root>/<category>/<key>.json`.

use crate::classify::Category;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Paths for an export tree rooted at `root`.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.as_str())
    }

    /// Destination file for one placement.
    pub fn object_path(&self, category: Category, key: &str) -> PathBuf {
        self.category_dir(category)
            .join(format!("{key}.{EXTENSION}"))
    }

    /// Category directories that do not exist yet.
    pub fn missing_dirs(&self) -> Vec<PathBuf> {
        Category::ALL
            .iter()
            .map(|category| self.category_dir(*category))
            .filter(|dir| !dir.is_dir())
            .collect()
    }

    /// Create the root and every category directory.
    ///
    /// Used by the setup binary only; the exporter never creates directories.
    /// Returns the directories that were newly created.
    pub fn prepare(&self) -> Result<Vec<PathBuf>> {
        let created = self.missing_dirs();
        for dir in &created {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        Ok(created)
    }
}
