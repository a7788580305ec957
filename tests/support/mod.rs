use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn helper_binary(name: &str) -> PathBuf {
    match name {
        "catalog-inspect" => PathBuf::from(env!("CARGO_BIN_EXE_catalog-inspect")),
        "shape-check" => PathBuf::from(env!("CARGO_BIN_EXE_shape-check")),
        other => panic!("unknown helper binary {other}"),
    }
}

/// Run a command and return its output regardless of exit status.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}

/// Raw catalog payload with `zaaktypen` case types and no other children.
pub fn catalog_payload(uuid: &str, naam: &str, zaaktypen: usize) -> Value {
    let zaaktypen: Vec<Value> = (0..zaaktypen)
        .map(|idx| {
            json!({
                "id": idx + 1,
                "omschrijving": format!("Zaaktype {}", idx + 1),
            })
        })
        .collect();
    json!({
        "id": 1,
        "naam": naam,
        "uuid": uuid,
        "domein": "D1",
        "zaaktypen": zaaktypen,
        "informatieobjecttypen": [],
        "besluittypen": []
    })
}

pub fn write_json_file(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate fixture file")?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn write_text_file(text: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate fixture file")?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(file)
}
