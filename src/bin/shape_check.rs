//! Check a JSON value against one of the form field shapes.
//!
//! Prints `ok` when the value conforms, otherwise the violation, and exits
//! non-zero on mismatch so shell callers can branch on the status.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use zaakcatalogus::logging::init_tracing;
use zaakcatalogus::{Shape, shape_by_name};

fn main() {
    if let Err(err) = init_tracing() {
        eprintln!("{err:#}");
    }
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(2);
        }
    }
}

fn run() -> Result<bool> {
    let args = CliArgs::parse()?;
    let value = args.source.read()?;
    match args.shape.check(&value) {
        Ok(()) => {
            println!("ok");
            Ok(true)
        }
        Err(violation) => {
            println!("{violation}");
            Ok(false)
        }
    }
}

struct CliArgs {
    shape: &'static Shape,
    source: InputSource,
}

enum InputSource {
    Inline(Value),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn read(self) -> Result<Value> {
        let raw = match self {
            InputSource::Inline(value) => return Ok(value),
            InputSource::File(path) => {
                if !path.is_file() {
                    bail!("input file not found: {}", path.display());
                }
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?
            }
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                buf
            }
        };
        serde_json::from_str(&raw).context("failed to parse JSON input")
    }
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut shape: Option<&'static Shape> = None;
        let mut source: Option<InputSource> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--shape" => {
                    let raw = next_value(&mut args, "--shape")?;
                    shape = Some(shape_by_name(&raw).ok_or_else(|| {
                        anyhow::anyhow!("unknown shape '{raw}' (expected choice|err|pk)")
                    })?);
                }
                "--value" | "--file" | "--stdin" if source.is_some() => {
                    bail!("--value/--file/--stdin may only be provided once");
                }
                "--value" => {
                    let raw = next_value(&mut args, "--value")?;
                    let parsed: Value = serde_json::from_str(&raw)
                        .with_context(|| format!("invalid JSON for --value: {raw}"))?;
                    source = Some(InputSource::Inline(parsed));
                }
                "--file" => {
                    let path = next_value(&mut args, "--file")?;
                    source = Some(InputSource::File(PathBuf::from(path)));
                }
                "--stdin" => source = Some(InputSource::Stdin),
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        let Some(shape) = shape else {
            bail!("--shape is required\n{}", usage());
        };
        Ok(CliArgs {
            shape,
            source: source.unwrap_or(InputSource::Stdin),
        })
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
    "Usage: shape-check --shape choice|err|pk [--value JSON|--file PATH|--stdin]\n\
Checks a JSON value against a form field shape; prints 'ok' or the violation and exits 1 on mismatch.\n"
}
