//! Catalog view models and form field shapes for the authorisation admin.
//!
//! The crate exposes two independent pieces: the `catalog` models built from
//! the catalog payload the admin screens receive, and the `forms` shape
//! descriptors used to check values handed to form components. Public
//! functions here are the payload parsing entry points shared by the helper
//! binaries and the test suite.

use anyhow::{Context, Result, bail};
use serde_json::Value;

pub mod catalog;
pub mod config;
pub mod forms;
pub mod logging;
mod schema_loader;

pub use catalog::{
    BesluitType, CatalogIndex, CatalogRepository, CatalogSchema, CatalogSummary, CatalogType,
    CatalogUuid, Catalogus, InformatieObjectType, Pk, ZaakType, load_catalogi_from_path,
};
pub use forms::{
    CHOICE, Choice, ERR, FieldError, FormData, PK, Shape, ShapeViolation, check_prop,
    check_prop_with, shape_by_name, validate_choices,
};

/// Split a catalog payload into raw JSON values.
///
/// Accepts a single catalog object, a JSON array of catalogs, or NDJSON with
/// one catalog per line. Blank input and top-level scalars are errors. An
/// empty array is a valid payload with no catalogs and yields an empty vec.
pub fn split_json_stream(input: &str) -> Result<Vec<Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No catalog payload provided");
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => Ok(items),
            Value::Object(_) => Ok(vec![value]),
            _ => bail!("Unsupported JSON input; expected object or array"),
        };
    }

    let mut records = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Unable to parse catalog from line {}", idx + 1))?;
        records.push(value);
    }
    Ok(records)
}

/// Parse a catalog payload into models; see [`split_json_stream`] for the
/// accepted layouts. The first catalog that fails to build aborts the parse.
pub fn parse_catalog_stream(input: &str) -> Result<Vec<Catalogus>> {
    split_json_stream(input)?
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            Catalogus::from_value(value).with_context(|| format!("Unable to build catalog {idx}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(uuid: &str) -> Value {
        json!({
            "id": uuid,
            "naam": "Catalogus",
            "uuid": uuid,
            "domein": "D1",
            "zaaktypen": [],
            "informatieobjecttypen": [],
            "besluittypen": []
        })
    }

    #[test]
    fn parses_object_array_and_ndjson() {
        let single = parse_catalog_stream(&raw("u1").to_string()).unwrap();
        assert_eq!(single.len(), 1);

        let array = parse_catalog_stream(&json!([raw("u1"), raw("u2")]).to_string()).unwrap();
        assert_eq!(array[1].uuid, Some(CatalogUuid("u2".into())));

        let ndjson = format!("{}\n\n{}\n", raw("u1"), raw("u2"));
        let lines = parse_catalog_stream(&ndjson).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn rejects_blank_and_scalar_input() {
        let err = parse_catalog_stream("  \n").unwrap_err();
        assert_eq!(err.to_string(), "No catalog payload provided");
        assert!(parse_catalog_stream("42").is_err());
        assert!(parse_catalog_stream("\"catalogus\"").is_err());
    }

    #[test]
    fn empty_array_is_a_payload_without_catalogs() {
        assert!(split_json_stream("[]").unwrap().is_empty());
        assert!(parse_catalog_stream(" [ ]\n").unwrap().is_empty());
    }

    #[test]
    fn reports_failing_catalog_index() {
        let mut broken = raw("u2");
        broken["zaaktypen"] = json!(null);
        let err = parse_catalog_stream(&json!([raw("u1"), broken]).to_string()).unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.starts_with("Unable to build catalog 1"), "{rendered}");
        assert!(rendered.contains("catalogus.zaaktypen must be an array, got null"));
    }
}
