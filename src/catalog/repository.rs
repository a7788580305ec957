//! Holds catalogs for lookup by uuid.
//!
//! Unlike `CatalogIndex`, the repository is filled incrementally: the admin
//! screens register catalogs as payloads arrive and resolve type records
//! across all of them.

use crate::catalog::identity::{CatalogUuid, Pk};
use crate::catalog::model::Catalogus;
use crate::catalog::types::{BesluitType, InformatieObjectType, ZaakType};
use anyhow::{Result, bail};
use std::collections::BTreeMap;

#[derive(Default)]
/// In-memory store for catalogs keyed by `CatalogUuid`.
pub struct CatalogRepository {
    catalogs: BTreeMap<CatalogUuid, Catalogus>,
}

impl CatalogRepository {
    /// Register a catalog, returning the one it replaced if the uuid was
    /// already known. Catalogs without a uuid cannot be looked up and are
    /// refused.
    pub fn register(&mut self, catalogus: Catalogus) -> Result<Option<Catalogus>> {
        let Some(uuid) = catalogus.uuid.clone() else {
            bail!(
                "cannot register catalogus '{}' without a uuid",
                catalogus.str().unwrap_or_default()
            );
        };
        Ok(self.catalogs.insert(uuid, catalogus))
    }

    /// Fetch a catalog by uuid, if present.
    pub fn get(&self, uuid: &CatalogUuid) -> Option<&Catalogus> {
        self.catalogs.get(uuid)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Resolve a case type inside a registered catalog.
    pub fn find_zaaktype(&self, uuid: &CatalogUuid, id: &Pk) -> Option<&ZaakType> {
        self.get(uuid)?.zaaktype(id)
    }

    pub fn find_informatieobjecttype(
        &self,
        uuid: &CatalogUuid,
        id: &Pk,
    ) -> Option<&InformatieObjectType> {
        self.get(uuid)?.informatieobjecttype(id)
    }

    pub fn find_besluittype(&self, uuid: &CatalogUuid, id: &Pk) -> Option<&BesluitType> {
        self.get(uuid)?.besluittype(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalogus(uuid: &str, naam: &str) -> Catalogus {
        Catalogus::from_value(json!({
            "id": 1,
            "naam": naam,
            "uuid": uuid,
            "domein": "D1",
            "zaaktypen": [{"id": 10}],
            "informatieobjecttypen": [{"id": "iot-1"}],
            "besluittypen": [{"id": 20}]
        }))
        .unwrap()
    }

    #[test]
    fn registers_and_resolves_types() {
        let mut repo = CatalogRepository::default();
        assert!(repo.is_empty());
        assert!(repo.register(catalogus("u1", "Eerste")).unwrap().is_none());
        let uuid = CatalogUuid("u1".into());

        assert!(repo.find_zaaktype(&uuid, &Pk::from(10i64)).is_some());
        assert!(repo.find_informatieobjecttype(&uuid, &Pk::from("iot-1")).is_some());
        assert!(repo.find_besluittype(&uuid, &Pk::from(20i64)).is_some());
        assert!(repo.find_besluittype(&uuid, &Pk::from(10i64)).is_none());
        assert!(
            repo.find_zaaktype(&CatalogUuid("missing".into()), &Pk::from(10i64))
                .is_none()
        );
    }

    #[test]
    fn re_registering_replaces_previous_catalog() {
        let mut repo = CatalogRepository::default();
        repo.register(catalogus("u1", "Eerste")).unwrap();
        let replaced = repo.register(catalogus("u1", "Tweede")).unwrap().unwrap();
        assert_eq!(replaced.str(), Some("Eerste"));
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.get(&CatalogUuid("u1".into())).unwrap().str(),
            Some("Tweede")
        );
    }

    #[test]
    fn refuses_catalogs_without_uuid() {
        let mut repo = CatalogRepository::default();
        let mut anonymous = catalogus("u1", "Zonder uuid");
        anonymous.uuid = None;
        let err = repo.register(anonymous).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot register catalogus 'Zonder uuid' without a uuid"
        );
        assert!(repo.is_empty());
    }
}
