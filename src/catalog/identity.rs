use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// Stable external identifier of a catalog (its `uuid` field).
///
/// Used as the lookup key in `CatalogIndex` and `CatalogRepository`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogUuid(pub String);

/// Primary key as handed to the admin screens: either a string or a number.
///
/// Numbers keep their `serde_json::Number` representation so integer keys are
/// written back exactly as they were read.
#[derive(Clone, Debug, PartialEq)]
pub enum Pk {
    Text(String),
    Number(Number),
}

impl Pk {
    /// Promote a raw JSON value into a key; anything but a string or number is
    /// rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Pk::Text(text.clone())),
            Value::Number(number) => Some(Pk::Number(number.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Pk::Text(text) => Value::String(text.clone()),
            Pk::Number(number) => Value::Number(number.clone()),
        }
    }
}

impl fmt::Display for Pk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pk::Text(text) => f.write_str(text),
            Pk::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for Pk {
    fn from(value: &str) -> Self {
        Pk::Text(value.to_string())
    }
}

impl From<String> for Pk {
    fn from(value: String) -> Self {
        Pk::Text(value)
    }
}

impl From<i64> for Pk {
    fn from(value: i64) -> Self {
        Pk::Number(Number::from(value))
    }
}

impl From<u64> for Pk {
    fn from(value: u64) -> Self {
        Pk::Number(Number::from(value))
    }
}

impl Serialize for Pk {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Pk::Text(text) => serializer.serialize_str(text),
            Pk::Number(number) => number.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Pk {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Pk::from_value(&value).ok_or_else(|| {
            <D::Error as serde::de::Error>::custom(format!(
                "expected a string or number primary key, got {}",
                crate::forms::type_label(&value)
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pk_accepts_strings_and_numbers() {
        let text: Pk = serde_json::from_value(json!("abc-123")).unwrap();
        assert_eq!(text, Pk::from("abc-123"));
        let number: Pk = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(number, Pk::from(42i64));
        assert_eq!(number.to_string(), "42");
    }

    #[test]
    fn pk_rejects_other_json_types() {
        for raw in [json!(null), json!({}), json!([1]), json!(true)] {
            let err = serde_json::from_value::<Pk>(raw).unwrap_err();
            assert!(err.to_string().contains("string or number"), "{err}");
        }
    }

    #[test]
    fn pk_serializes_back_to_original_json() {
        assert_eq!(serde_json::to_value(Pk::from("u1")).unwrap(), json!("u1"));
        assert_eq!(serde_json::to_value(Pk::from(7u64)).unwrap(), json!(7));
        assert_eq!(Pk::from(7u64).to_value(), json!(7));
    }

    #[test]
    fn catalog_uuid_is_transparent() {
        let uuid = CatalogUuid("0b1b2c3d".to_string());
        let serialized = serde_json::to_string(&uuid).unwrap();
        assert_eq!(serialized, "\"0b1b2c3d\"");
        let parsed: CatalogUuid = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, uuid);
    }
}
