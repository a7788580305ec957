//! Shared JSON Schema loader.
//!
//! Reads a schema from disk (or takes an embedded copy), checks its
//! `schema_version` against an allowed set, and compiles a validator. Compile
//! and validation errors borrow the schema or instance, so they are rendered
//! to strings before leaving this module.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Compiled schema plus the version it declares.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

impl SchemaLoadResult {
    /// Validate `instance`, returning every failure message on mismatch.
    pub fn validate(&self, instance: &Value) -> std::result::Result<(), Vec<String>> {
        self.compiled
            .validate(instance)
            .map_err(|errors| errors.map(|err| err.to_string()).collect())
    }
}

#[derive(Default)]
pub(crate) struct SchemaLoadOptions<'a> {
    /// Allowed `schema_version` values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;
    compile_schema(schema, options).with_context(|| format!("loading schema {}", path.display()))
}

pub(crate) fn compile_embedded(
    source: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema: Value = serde_json::from_str(source).context("parsing embedded schema")?;
    compile_schema(schema, options).context("loading embedded schema")
}

fn compile_schema(schema: Value, options: SchemaLoadOptions<'_>) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(&schema)
        .ok_or_else(|| anyhow!("schema missing a valid schema_version"))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled =
        JSONSchema::compile(&schema).map_err(|err| anyhow!("compiling schema: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema.get("schema_version").and_then(Value::as_str)?;
    if !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn schema_file(schema: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, schema).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_and_validates() {
        let file = schema_file(&json!({
            "schema_version": "demo_v1",
            "type": "object",
            "required": ["naam"]
        }));
        let loaded = load_json_schema(file.path(), SchemaLoadOptions::default()).unwrap();
        assert_eq!(loaded.schema_version, "demo_v1");
        assert!(loaded.validate(&json!({"naam": "x"})).is_ok());
        let errors = loaded.validate(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("naam"), "{errors:?}");
    }

    #[test]
    fn rejects_unknown_versions() {
        let allowed = BTreeSet::from(["catalogus_v1".to_string()]);
        let Err(err) = compile_embedded(
            r#"{"schema_version": "catalogus_v2"}"#,
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
            },
        ) else {
            panic!("catalogus_v2 should not be in the allowed set");
        };
        assert!(format!("{err:#}").contains("not in allowed set"));
    }

    #[test]
    fn rejects_missing_or_malformed_version() {
        assert!(compile_embedded("{}", SchemaLoadOptions::default()).is_err());
        assert!(
            compile_embedded(r#"{"schema_version": "bad version"}"#, SchemaLoadOptions::default())
                .is_err()
        );
    }
}
