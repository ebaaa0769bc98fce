//! Creates the export tree that `attack-export` writes into.
//!
//! Makes the output root (default `enterprise`) and one subdirectory per
//! category. Existing directories are left alone, so the command is safe to
//! re-run.

use anyhow::{Result, bail};
use attack_export::{DEFAULT_OUTPUT_ROOT, OutputLayout, init_logging};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let root = parse_root()?;
    init_logging(false);
    let layout = OutputLayout::new(root);
    let created = layout.prepare()?;
    for dir in &created {
        println!("Created: {}", dir.display());
    }
    tracing::info!(
        "{} ready ({} directories created)",
        layout.root().display(),
        created.len()
    );
    Ok(())
}

fn parse_root() -> Result<PathBuf> {
    let mut args = env::args_os().skip(1);
    let mut root = PathBuf::from(DEFAULT_OUTPUT_ROOT);
    while let Some(arg_os) = args.next() {
        let arg = arg_os
            .into_string()
            .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
        match arg.as_str() {
            "--output-root" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --output-root"))?;
                root = PathBuf::from(value);
            }
            "--help" | "-h" => {
                print!("Usage: attack-layout [--output-root DIR]\nCreates DIR (default: enterprise) and its category subdirectories.\n");
                std::process::exit(0);
            }
            other => bail!("unknown flag: {other}"),
        }
    }
    Ok(root)
}
