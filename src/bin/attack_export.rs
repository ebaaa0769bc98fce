//! Splits `enterprise-attack.json` into per-object files.
//!
//! With no arguments the bundle is read from the working directory, objects are
//! written under `enterprise/<category>/`, and the technique index goes to
//! `mappings-tech2uuid.json`. Category directories must already exist (run
//! `attack-layout` first). A missing bundle exits with status -1; any other
//! failure exits 1.

use anyhow::{Result, bail};
use attack_export::{BundleNotFound, ConvertOptions, convert, init_logging};
use std::env;
use std::io;
use std::path::PathBuf;

const MISSING_BUNDLE_EXIT: i32 = -1;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        let code = if err.downcast_ref::<BundleNotFound>().is_some() {
            MISSING_BUNDLE_EXIT
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse()?;
    init_logging(cli.verbose);
    let mut stdout = io::stdout().lock();
    convert(&cli.options, &mut stdout)?;
    Ok(())
}

struct CliArgs {
    options: ConvertOptions,
    verbose: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut options = ConvertOptions::default();
        let mut verbose = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--input" => options.bundle_path = PathBuf::from(next_value(&mut args, "--input")?),
                "--output-root" => {
                    options.output_root = PathBuf::from(next_value(&mut args, "--output-root")?)
                }
                "--index" => options.index_path = PathBuf::from(next_value(&mut args, "--index")?),
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        Ok(CliArgs { options, verbose })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: attack-export [--input PATH] [--output-root DIR] [--index PATH] [--verbose]\n\
Reads an ATT&CK STIX bundle (default: enterprise-attack.json), writes each object to DIR/<category>/<key>.json (default DIR: enterprise), and writes the technique-code index (default: mappings-tech2uuid.json).\n"
}
