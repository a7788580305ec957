//! Static counterparts of the shape descriptors.
//!
//! Values built in Rust use these types and need no runtime check; the
//! `from_value` constructors are for the one dynamic boundary, raw JSON.

use crate::forms::shapes::{CHOICE, ERR, PK, ShapeViolation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::catalog::Pk;

/// One selectable option, typically `[value, label]`.
pub type Choice = Vec<String>;

/// Error attached to a form field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl FieldError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Check `value` against [`ERR`] and build the typed error from it.
    pub fn from_value(value: &Value) -> Result<Self, ShapeViolation> {
        ERR.check(value)?;
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(Self {
            msg: text("msg").unwrap_or_default(),
            code: text("code"),
        })
    }
}

/// Check `value` against [`CHOICE`] and collect its strings.
pub fn choice_from_value(value: &Value) -> Result<Choice, ShapeViolation> {
    CHOICE.check(value)?;
    Ok(value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

/// Check `value` against [`PK`] and convert it.
pub fn pk_from_value(value: &Value) -> Result<Pk, ShapeViolation> {
    PK.check(value)?;
    Pk::from_value(value).ok_or_else(|| ShapeViolation::Mismatch {
        path: "$".to_string(),
        expected: PK.to_string(),
        found: crate::forms::type_label(value),
    })
}
