//! Indexed view of a catalog payload file.
//!
//! The index validates raw payloads against `schema/catalogus.schema.json`
//! before building models, then keys catalogs by uuid. It refuses duplicate,
//! missing or empty uuids so lookups by uuid are never ambiguous.

use crate::catalog::identity::{CatalogUuid, Pk};
use crate::catalog::model::Catalogus;
use crate::catalog::types::ZaakType;
use crate::config;
use crate::schema_loader::{
    SchemaLoadOptions, SchemaLoadResult, compile_embedded, load_json_schema,
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Schema bundled with the crate; used unless `ZAAKCATALOGUS_SCHEMA` points
/// elsewhere.
const EMBEDDED_CATALOG_SCHEMA: &str = include_str!("../../schema/catalogus.schema.json");

const CATALOG_SCHEMA_VERSION: &str = "catalogus_v1";

/// Compiled JSON Schema for raw catalog payloads.
pub struct CatalogSchema {
    inner: SchemaLoadResult,
}

impl CatalogSchema {
    /// The schema bundled with the crate.
    pub fn embedded() -> Result<Self> {
        let allowed = allowed_schema_versions();
        let inner = compile_embedded(
            EMBEDDED_CATALOG_SCHEMA,
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
            },
        )?;
        Ok(Self { inner })
    }

    /// Load a schema file; its `schema_version` must be one this crate reads.
    pub fn load(path: &Path) -> Result<Self> {
        let allowed = allowed_schema_versions();
        let inner = load_json_schema(
            path,
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
            },
        )?;
        Ok(Self { inner })
    }

    /// The schema named by `ZAAKCATALOGUS_SCHEMA`, else the embedded one.
    pub fn from_settings() -> Result<Self> {
        match &config::settings().schema_path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    pub fn version(&self) -> &str {
        &self.inner.schema_version
    }

    /// Validate one raw catalog payload.
    pub fn validate(&self, raw: &Value) -> Result<()> {
        if let Err(errors) = self.inner.validate(raw) {
            bail!("catalogus failed schema validation:\n{}", errors.join("\n"));
        }
        Ok(())
    }
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([CATALOG_SCHEMA_VERSION.to_string()])
}

#[derive(Debug)]
/// Catalogs keyed by uuid.
pub struct CatalogIndex {
    by_uuid: BTreeMap<CatalogUuid, Catalogus>,
}

impl CatalogIndex {
    /// Load a payload file (single object, array, or NDJSON), validate each
    /// catalog against `schema`, and index the result.
    pub fn load(path: &Path, schema: &CatalogSchema) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let raw = crate::split_json_stream(&data)
            .with_context(|| format!("parsing {}", path.display()))?;
        for (idx, value) in raw.iter().enumerate() {
            schema
                .validate(value)
                .with_context(|| format!("{} catalog {idx}", path.display()))?;
        }
        let catalogi = raw
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                Catalogus::from_value(value)
                    .with_context(|| format!("{} catalog {idx}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?;
        let index = Self::from_catalogi(catalogi)?;
        info!(
            path = %path.display(),
            catalogi = index.len(),
            schema_version = schema.version(),
            "loaded catalog index"
        );
        Ok(index)
    }

    /// Index already-built catalogs.
    pub fn from_catalogi(catalogi: Vec<Catalogus>) -> Result<Self> {
        let mut by_uuid = BTreeMap::new();
        for (idx, catalogus) in catalogi.into_iter().enumerate() {
            let uuid = match &catalogus.uuid {
                Some(uuid) if !uuid.0.trim().is_empty() => uuid.clone(),
                _ => bail!(
                    "catalogus {idx} ('{}') has no uuid",
                    catalogus.str().unwrap_or_default()
                ),
            };
            if by_uuid.contains_key(&uuid) {
                bail!("duplicate catalogus uuid {}", uuid.0);
            }
            debug!(uuid = %uuid.0, naam = catalogus.str(), "indexed catalogus");
            by_uuid.insert(uuid, catalogus);
        }
        Ok(Self { by_uuid })
    }

    pub fn catalogus(&self, uuid: &CatalogUuid) -> Option<&Catalogus> {
        self.by_uuid.get(uuid)
    }

    /// Iterates catalog uuids in stable order.
    pub fn uuids(&self) -> impl Iterator<Item = &CatalogUuid> {
        self.by_uuid.keys()
    }

    pub fn catalogi(&self) -> impl Iterator<Item = &Catalogus> {
        self.by_uuid.values()
    }

    pub fn len(&self) -> usize {
        self.by_uuid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uuid.is_empty()
    }

    /// Resolve a case type id to the catalog that owns it and the type itself.
    pub fn find_zaaktype(&self, id: &Pk) -> Option<(&Catalogus, &ZaakType)> {
        self.catalogi()
            .find_map(|catalogus| catalogus.zaaktype(id).map(|zt| (catalogus, zt)))
    }
}
