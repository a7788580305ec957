//! Typed view of one catalog as shipped to the authorisation admin screens.
//!
//! `Catalogus` holds the catalog's own fields plus its case, information
//! object and decision types, each promoted from raw JSON into its sub-model
//! at construction. There are no setters: the model is built once from a
//! payload and then only read.
//!
//! The catalog's own scalar fields are copied as-is and may be absent. Only
//! the three child collections are required.

use crate::catalog::identity::{CatalogUuid, Pk};
use crate::catalog::types::{
    BesluitType, CatalogType, InformatieObjectType, TypeKind, ZaakType,
};
use crate::forms::type_label;
use anyhow::{Context, Result, anyhow, bail};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
/// A catalog with its nested type records.
pub struct Catalogus {
    pub id: Option<Pk>,
    pub naam: Option<String>,
    pub uuid: Option<CatalogUuid>,
    pub domein: Option<String>,
    pub zaaktypen: Vec<ZaakType>,
    pub informatieobjecttypen: Vec<InformatieObjectType>,
    pub besluittypen: Vec<BesluitType>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Per-catalog counts printed by `catalog-inspect`.
pub struct CatalogSummary {
    pub uuid: Option<CatalogUuid>,
    pub str: Option<String>,
    pub domein: Option<String>,
    pub zaaktypen: usize,
    pub informatieobjecttypen: usize,
    pub besluittypen: usize,
}

impl Catalogus {
    /// Build a catalog from its raw payload.
    ///
    /// `id`, `naam`, `uuid` and `domein` are optional. A missing or null
    /// field becomes `None`, and so does a field of the wrong JSON type
    /// (logged at debug level).
    ///
    /// Every element of `zaaktypen`, `informatieobjecttypen` and
    /// `besluittypen` is converted in order; the first element that its
    /// sub-model rejects aborts the whole construction with the field and
    /// index attached to the error.
    pub fn from_value(raw: Value) -> Result<Self> {
        let mut map = match raw {
            Value::Object(map) => map,
            other => bail!("catalogus must be a JSON object, got {}", type_label(&other)),
        };

        let id = take_scalar(&mut map, "id", Pk::from_value);
        let naam = take_scalar(&mut map, "naam", string_value);
        let uuid = take_scalar(&mut map, "uuid", string_value).map(CatalogUuid);
        let domein = take_scalar(&mut map, "domein", string_value);

        let zaaktypen: Vec<ZaakType> = take_types(&mut map)?;
        let informatieobjecttypen: Vec<InformatieObjectType> = take_types(&mut map)?;
        let besluittypen: Vec<BesluitType> = take_types(&mut map)?;

        debug!(
            uuid = uuid.as_ref().map(|uuid| uuid.0.as_str()),
            zaaktypen = zaaktypen.len(),
            informatieobjecttypen = informatieobjecttypen.len(),
            besluittypen = besluittypen.len(),
            "built catalogus"
        );

        Ok(Self {
            id,
            naam,
            uuid,
            domein,
            zaaktypen,
            informatieobjecttypen,
            besluittypen,
        })
    }

    /// Display string of the catalog; always its `naam`.
    pub fn str(&self) -> Option<&str> {
        self.naam.as_deref()
    }

    /// Find a case type by id.
    pub fn zaaktype(&self, id: &Pk) -> Option<&ZaakType> {
        self.zaaktypen.iter().find(|zt| &zt.id == id)
    }

    pub fn informatieobjecttype(&self, id: &Pk) -> Option<&InformatieObjectType> {
        self.informatieobjecttypen.iter().find(|iot| &iot.id == id)
    }

    pub fn besluittype(&self, id: &Pk) -> Option<&BesluitType> {
        self.besluittypen.iter().find(|bt| &bt.id == id)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            uuid: self.uuid.clone(),
            str: self.str().map(str::to_string),
            domein: self.domein.clone(),
            zaaktypen: self.zaaktypen.len(),
            informatieobjecttypen: self.informatieobjecttypen.len(),
            besluittypen: self.besluittypen.len(),
        }
    }
}

fn take_field(map: &mut Map<String, Value>, name: &str) -> Result<Value> {
    map.remove(name)
        .ok_or_else(|| anyhow!("catalogus is missing required field '{name}'"))
}

fn take_scalar<T>(
    map: &mut Map<String, Value>,
    name: &str,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = map.remove(name).filter(|value| !value.is_null())?;
    let converted = convert(&value);
    if converted.is_none() {
        debug!(
            field = name,
            found = type_label(&value),
            "ignoring catalogus field of unexpected type"
        );
    }
    converted
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn take_types<K: TypeKind>(map: &mut Map<String, Value>) -> Result<Vec<CatalogType<K>>> {
    let items = match take_field(map, K::COLLECTION)? {
        Value::Array(items) => items,
        other => bail!(
            "catalogus.{} must be an array, got {}",
            K::COLLECTION,
            type_label(&other)
        ),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            CatalogType::from_value(item)
                .with_context(|| format!("catalogus.{}[{idx}]", K::COLLECTION))
        })
        .collect()
}

impl Serialize for Catalogus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Catalogus", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("naam", &self.naam)?;
        state.serialize_field("uuid", &self.uuid)?;
        state.serialize_field("domein", &self.domein)?;
        state.serialize_field("zaaktypen", &self.zaaktypen)?;
        state.serialize_field("informatieobjecttypen", &self.informatieobjecttypen)?;
        state.serialize_field("besluittypen", &self.besluittypen)?;
        state.serialize_field("str", &self.str())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Catalogus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value)
            .map_err(|err| <D::Error as serde::de::Error>::custom(format!("{err:#}")))
    }
}

/// Read a file holding one catalog, an array of catalogs or NDJSON, without
/// schema validation.
pub fn load_catalogi_from_path(path: &Path) -> Result<Vec<Catalogus>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    crate::parse_catalog_stream(&data).with_context(|| format!("parsing {}", path.display()))
}
