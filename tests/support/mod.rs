use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn export_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_attack-export"))
}

pub fn layout_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_attack-layout"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Scratch working directory holding a bundle and, optionally, the export tree.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn with_bundle(objects: Value) -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate workspace")?;
        let bundle = serde_json::json!({
            "type": "bundle",
            "id": "bundle--fixture",
            "objects": objects,
        });
        fs::write(
            dir.path().join("enterprise-attack.json"),
            serde_json::to_vec_pretty(&bundle)?,
        )?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn prepare_layout(&self) -> Result<Output> {
        let mut cmd = Command::new(layout_binary());
        cmd.current_dir(self.path());
        run_command(cmd)
    }

    pub fn export_command(&self) -> Command {
        let mut cmd = Command::new(export_binary());
        cmd.current_dir(self.path());
        cmd
    }

    pub fn run_export(&self) -> Result<Output> {
        run_command(self.export_command())
    }

    pub fn exported(&self, category: &str, key: &str) -> PathBuf {
        self.path()
            .join("enterprise")
            .join(category)
            .join(format!("{key}.json"))
    }

    pub fn read_json(&self, path: &Path) -> Result<Value> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn index(&self) -> Result<Value> {
        self.read_json(&self.path().join("mappings-tech2uuid.json"))
    }

    /// Every file under the export tree, relative to `enterprise/`, sorted.
    pub fn exported_files(&self) -> Result<Vec<String>> {
        let root = self.path().join("enterprise");
        let mut files = Vec::new();
        for category in fs::read_dir(&root)? {
            let category = category?;
            if !category.path().is_dir() {
                continue;
            }
            for entry in fs::read_dir(category.path())? {
                let entry = entry?;
                files.push(format!(
                    "{}/{}",
                    category.file_name().to_string_lossy(),
                    entry.file_name().to_string_lossy()
                ));
            }
        }
        files.sort();
        Ok(files)
    }
}
