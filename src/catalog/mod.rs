//! Catalog view models.
//!
//! `Catalogus` wraps one raw catalog payload and promotes its nested case,
//! information-object and decision types into typed records. `CatalogIndex`
//! validates and indexes a whole payload file; `CatalogRepository` collects
//! catalogs as they arrive.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;
pub mod types;

pub use identity::{CatalogUuid, Pk};
pub use index::{CatalogIndex, CatalogSchema};
pub use model::{CatalogSummary, Catalogus, load_catalogi_from_path};
pub use repository::CatalogRepository;
pub use types::{
    Besluit, BesluitType, CatalogType, InformatieObject, InformatieObjectType, TypeKind, Zaak,
    ZaakType,
};
