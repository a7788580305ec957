//! Case, information-object and decision types nested in a catalog payload.
//!
//! The admin payload does not pin down the fields of these records, so the
//! models only require what every record carries: a JSON object with a
//! string or numeric `id`. All other keys are kept as-is and can be read back
//! by name; no key other than `id` is interpreted, and records display as
//! their id. The three kinds share one implementation and are told apart by a
//! marker type, which keeps a `ZaakType` from being passed where a
//! `BesluitType` is expected.

use crate::catalog::identity::Pk;
use crate::forms::type_label;
use anyhow::{Result, anyhow, bail};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// Names one kind of catalog type record.
pub trait TypeKind {
    /// Singular name used in diagnostics (`zaaktype`).
    const NAME: &'static str;
    /// Field of the catalog payload holding the records (`zaaktypen`).
    const COLLECTION: &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zaak {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InformatieObject {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Besluit {}

impl TypeKind for Zaak {
    const NAME: &'static str = "zaaktype";
    const COLLECTION: &'static str = "zaaktypen";
}

impl TypeKind for InformatieObject {
    const NAME: &'static str = "informatieobjecttype";
    const COLLECTION: &'static str = "informatieobjecttypen";
}

impl TypeKind for Besluit {
    const NAME: &'static str = "besluittype";
    const COLLECTION: &'static str = "besluittypen";
}

pub type ZaakType = CatalogType<Zaak>;
pub type InformatieObjectType = CatalogType<InformatieObject>;
pub type BesluitType = CatalogType<Besluit>;

/// One typed record from a catalog's `zaaktypen`, `informatieobjecttypen` or
/// `besluittypen` list.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogType<K> {
    pub id: Pk,
    attributes: Map<String, Value>,
    kind: PhantomData<K>,
}

impl<K: TypeKind> CatalogType<K> {
    /// Promote a raw mapping into a typed record.
    ///
    /// Fails when the value is not an object, has no `id`, or carries an `id`
    /// that is neither a string nor a number.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            other => bail!(
                "{} must be a JSON object, got {}",
                K::NAME,
                type_label(&other)
            ),
        };
        let raw_id = map
            .remove("id")
            .ok_or_else(|| anyhow!("{} is missing required field 'id'", K::NAME))?;
        let id = Pk::from_value(&raw_id).ok_or_else(|| {
            anyhow!(
                "{}.id must be a string or number, got {}",
                K::NAME,
                type_label(&raw_id)
            )
        })?;
        Ok(Self {
            id,
            attributes: map,
            kind: PhantomData,
        })
    }

    /// Build a record from an id and its remaining fields.
    pub fn new(id: impl Into<Pk>, attributes: Map<String, Value>) -> Self {
        let mut attributes = attributes;
        attributes.remove("id");
        Self {
            id: id.into(),
            attributes,
            kind: PhantomData,
        }
    }

    /// Raw value of a field other than `id`.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn kind_name(&self) -> &'static str {
        K::NAME
    }
}

impl<K> fmt::Display for CatalogType<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<K> Serialize for CatalogType<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.attributes.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, K: TypeKind> Deserialize<'de> for CatalogType<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value)
            .map_err(|err| <D::Error as serde::de::Error>::custom(format!("{err:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_id_and_remaining_fields() {
        let zaaktype = ZaakType::from_value(json!({
            "id": 12,
            "omschrijving": "Melding openbare ruimte",
            "versiedatum": "2020-01-01"
        }))
        .unwrap();
        assert_eq!(zaaktype.id, Pk::from(12i64));
        assert_eq!(
            zaaktype.attribute("versiedatum"),
            Some(&json!("2020-01-01"))
        );
        assert!(zaaktype.attribute("id").is_none());
        assert_eq!(
            zaaktype.attribute("omschrijving"),
            Some(&json!("Melding openbare ruimte"))
        );
    }

    #[test]
    fn displays_as_id_whatever_the_other_fields() {
        let iot = InformatieObjectType::from_value(json!({
            "id": "iot-1",
            "omschrijving": "Brief",
            "identificatie": "BRIEF"
        }))
        .unwrap();
        assert_eq!(iot.to_string(), "iot-1");

        let besluittype = BesluitType::from_value(json!({"id": 3})).unwrap();
        assert_eq!(besluittype.to_string(), "3");
    }

    #[test]
    fn rejects_non_objects_and_missing_ids() {
        let err = ZaakType::from_value(json!("zt-1")).unwrap_err();
        assert!(err.to_string().contains("zaaktype must be a JSON object"));

        let err = BesluitType::from_value(json!({"omschrijving": "x"})).unwrap_err();
        assert!(err.to_string().contains("besluittype is missing required field 'id'"));

        let err = InformatieObjectType::from_value(json!({"id": null})).unwrap_err();
        assert!(err.to_string().contains("must be a string or number, got null"));
    }

    #[test]
    fn serializes_id_with_attributes() {
        let mut attributes = Map::new();
        attributes.insert("omschrijving".into(), json!("Besluit"));
        attributes.insert("id".into(), json!("ignored"));
        let besluittype = BesluitType::new(5i64, attributes);
        assert_eq!(
            serde_json::to_value(&besluittype).unwrap(),
            json!({"id": 5, "omschrijving": "Besluit"})
        );
        assert_eq!(besluittype.kind_name(), "besluittype");
    }

    #[test]
    fn deserialize_reports_constructor_errors() {
        let err = serde_json::from_value::<ZaakType>(json!([])).unwrap_err();
        assert!(err.to_string().contains("zaaktype must be a JSON object, got array"));
    }
}
