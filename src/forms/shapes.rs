//! Declarative shape descriptors for form component props.
//!
//! A [`Shape`] describes the structure a JSON value must have. The three
//! descriptors used by the form components are process-wide constants
//! ([`CHOICE`], [`ERR`], [`PK`]); they never change after compilation and can
//! be shared across threads freely. Checking a value is pure. The diagnostic
//! entry point, [`check_prop`], logs a warning on mismatch and never fails.

use crate::config;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Structural description of an accepted JSON value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    String,
    Number,
    /// Array whose every element matches the inner shape.
    ArrayOf(&'static Shape),
    /// Value matching at least one of the listed shapes.
    OneOfType(&'static [Shape]),
    /// Object with named fields; keys not listed are ignored.
    Record(&'static [Field]),
}

/// One named field of a [`Shape::Record`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
    pub required: bool,
}

/// List of strings, e.g. a `[value, label]` choice pair.
pub const CHOICE: Shape = Shape::ArrayOf(&Shape::String);

/// Form error: required string `msg`, optional string `code`.
pub const ERR: Shape = Shape::Record(&[
    Field {
        name: "msg",
        shape: Shape::String,
        required: true,
    },
    Field {
        name: "code",
        shape: Shape::String,
        required: false,
    },
]);

/// Primary key: string or number.
pub const PK: Shape = Shape::OneOfType(&[Shape::String, Shape::Number]);

/// Why a value did not match a shape.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    #[error("{path}: expected {expected}, got {found}")]
    Mismatch {
        path: String,
        expected: String,
        found: &'static str,
    },
    #[error("{path}: required field is missing")]
    MissingField { path: String },
}

impl ShapeViolation {
    /// JSON path of the offending value, rooted at `$`.
    pub fn path(&self) -> &str {
        match self {
            ShapeViolation::Mismatch { path, .. } | ShapeViolation::MissingField { path } => path,
        }
    }

    fn mismatch(path: &str, expected: &Shape, found: &Value) -> Self {
        ShapeViolation::Mismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            found: type_label(found),
        }
    }
}

impl Shape {
    /// Check `value` against this shape, reporting the first mismatch.
    pub fn check(&self, value: &Value) -> Result<(), ShapeViolation> {
        self.check_at(value, "$")
    }

    pub fn conforms(&self, value: &Value) -> bool {
        self.check(value).is_ok()
    }

    fn check_at(&self, value: &Value, path: &str) -> Result<(), ShapeViolation> {
        match self {
            Shape::String if value.is_string() => Ok(()),
            Shape::Number if value.is_number() => Ok(()),
            Shape::String | Shape::Number => Err(ShapeViolation::mismatch(path, self, value)),
            Shape::ArrayOf(inner) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| ShapeViolation::mismatch(path, self, value))?;
                for (idx, item) in items.iter().enumerate() {
                    inner.check_at(item, &format!("{path}[{idx}]"))?;
                }
                Ok(())
            }
            Shape::OneOfType(options) => {
                if options.iter().any(|option| option.check_at(value, path).is_ok()) {
                    Ok(())
                } else {
                    Err(ShapeViolation::mismatch(path, self, value))
                }
            }
            Shape::Record(fields) => {
                let object = value
                    .as_object()
                    .ok_or_else(|| ShapeViolation::mismatch(path, self, value))?;
                for field in fields.iter() {
                    let field_path = format!("{path}.{}", field.name);
                    // null counts as absent, matching how optional props are treated
                    match object.get(field.name) {
                        None | Some(Value::Null) if field.required => {
                            return Err(ShapeViolation::MissingField { path: field_path });
                        }
                        None | Some(Value::Null) => {}
                        Some(found) => field.shape.check_at(found, &field_path)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::String => f.write_str("string"),
            Shape::Number => f.write_str("number"),
            Shape::ArrayOf(inner) => write!(f, "array of {inner}"),
            Shape::OneOfType(options) => {
                for (idx, option) in options.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{option}")?;
                }
                Ok(())
            }
            Shape::Record(fields) => {
                f.write_str("object {")?;
                for (idx, field) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    let marker = if field.required { "" } else { "?" };
                    write!(f, "{}{marker}: {}", field.name, field.shape)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Look up one of the named descriptors (`choice`, `err`, `pk`).
pub fn shape_by_name(name: &str) -> Option<&'static Shape> {
    match name.trim().to_ascii_lowercase().as_str() {
        "choice" => Some(&CHOICE),
        "err" => Some(&ERR),
        "pk" => Some(&PK),
        _ => None,
    }
}

/// Validate one component prop the way the form components do at render time.
///
/// Returns whether the value conforms. A mismatch is logged as a warning when
/// shape diagnostics are enabled (see [`config::shape_diagnostics_enabled`])
/// and is otherwise silent.
pub fn check_prop(shape: &Shape, value: &Value, prop: &str, component: &str) -> bool {
    check_prop_with(
        shape,
        value,
        prop,
        component,
        config::shape_diagnostics_enabled(),
    )
}

/// [`check_prop`] with diagnostics switched explicitly instead of read from
/// the process settings.
pub fn check_prop_with(
    shape: &Shape,
    value: &Value,
    prop: &str,
    component: &str,
    diagnostics: bool,
) -> bool {
    match shape.check(value) {
        Ok(()) => true,
        Err(violation) => {
            if diagnostics {
                warn!(
                    component,
                    prop,
                    %violation,
                    "invalid prop `{prop}` supplied to `{component}`"
                );
            }
            false
        }
    }
}

/// Short JSON type name used in diagnostics.
pub fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
