//! Summarize a catalog payload.
//!
//! Reads one catalog, a JSON array of catalogs, or NDJSON from a file or
//! stdin, validates every catalog against the catalog schema (unless
//! `--no-schema`), builds the models, and prints one compact JSON summary per
//! catalog: uuid, display string, domain, and the number of case,
//! information-object and decision types.

use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use zaakcatalogus::logging::init_tracing;
use zaakcatalogus::{CatalogIndex, CatalogSchema, Catalogus, split_json_stream};

fn main() {
    if let Err(err) = init_tracing() {
        eprintln!("{err:#}");
    }
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let input = args.source.read()?;

    let raw = split_json_stream(&input)?;
    if let Some(schema) = args.schema()? {
        for (idx, value) in raw.iter().enumerate() {
            schema
                .validate(value)
                .with_context(|| format!("catalog {idx}"))?;
        }
    }

    let catalogi = raw
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            Catalogus::from_value(value).with_context(|| format!("Unable to build catalog {idx}"))
        })
        .collect::<Result<Vec<_>>>()?;
    // Index only to surface duplicate uuids; output keeps input order.
    // Catalogs without a uuid can only get here with --no-schema.
    CatalogIndex::from_catalogi(
        catalogi
            .iter()
            .filter(|catalogus| catalogus.uuid.is_some())
            .cloned()
            .collect(),
    )?;

    for catalogus in &catalogi {
        println!("{}", serde_json::to_string(&catalogus.summary())?);
    }
    Ok(())
}

struct CliArgs {
    source: InputSource,
    schema: SchemaChoice,
}

enum SchemaChoice {
    Settings,
    File(PathBuf),
    Skip,
}

impl CliArgs {
    fn schema(&self) -> Result<Option<CatalogSchema>> {
        match &self.schema {
            SchemaChoice::Settings => CatalogSchema::from_settings().map(Some),
            SchemaChoice::File(path) => CatalogSchema::load(path).map(Some),
            SchemaChoice::Skip => Ok(None),
        }
    }
}

enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => {
                if !path.is_file() {
                    bail!("input file not found: {}", path.display());
                }
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
            }
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                Ok(buf)
            }
        }
    }
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut source: Option<InputSource> = None;
        let mut schema = SchemaChoice::Settings;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--file" => {
                    let path = next_value(&mut args, "--file")?;
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::File(PathBuf::from(path)));
                }
                "--stdin" => {
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::Stdin);
                }
                "--schema" => {
                    let path = next_value(&mut args, "--schema")?;
                    schema = SchemaChoice::File(PathBuf::from(path));
                }
                "--no-schema" => schema = SchemaChoice::Skip,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        Ok(CliArgs {
            source: source.unwrap_or(InputSource::Stdin),
            schema,
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
    "Usage: catalog-inspect [--file PATH|--stdin] [--schema PATH|--no-schema]\n\
Reads catalog payloads (object, array, or NDJSON), validates them against the catalog schema, and prints one JSON summary per catalog.\n"
}
