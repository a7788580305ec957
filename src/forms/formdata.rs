//! Serialized form state handed to the form components.
//!
//! Each bound form is shipped as `{"errors": {field: [err, ...]}, "values":
//! {field: value}}`; unbound forms carry no errors. Scope pickers receive
//! their options as a list of choices.

use crate::forms::shapes::{CHOICE, ERR};
use crate::forms::type_label;
use crate::forms::types::FieldError;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Errors and current values of one form.
pub struct FormData {
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<FieldError>>,
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl FormData {
    /// Parse a raw form payload, checking every error entry against [`ERR`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            bail!("form data must be a JSON object, got {}", type_label(value));
        };

        if let Some(errors) = object.get("errors") {
            let Some(errors) = errors.as_object() else {
                bail!("form data errors must be an object, got {}", type_label(errors));
            };
            for (field, entries) in errors {
                let Some(entries) = entries.as_array() else {
                    bail!(
                        "errors for field '{field}' must be an array, got {}",
                        type_label(entries)
                    );
                };
                for (idx, entry) in entries.iter().enumerate() {
                    ERR.check(entry)
                        .with_context(|| format!("errors.{field}[{idx}]"))?;
                }
            }
        }

        if let Some(values) = object.get("values") {
            if !values.is_object() {
                bail!("form data values must be an object, got {}", type_label(values));
            }
        }

        serde_json::from_value(value.clone()).context("unable to parse form data")
    }

    /// Errors reported for `field`; empty when there are none.
    pub fn field_errors(&self, field: &str) -> &[FieldError] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|entries| !entries.is_empty())
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }
}

/// Check a list of choices, collecting every problem instead of stopping at
/// the first so a caller can report them together.
pub fn validate_choices(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return vec![format!(
            "choices must be an array, got {}",
            type_label(value)
        )];
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            CHOICE
                .check(item)
                .err()
                .map(|violation| format!("choices[{idx}]: {violation}"))
        })
        .collect()
}
