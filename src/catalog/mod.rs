//! # Boulder Catalog Store
//!
//! Persists boulders, problems, sectors, areas and photos.
//!
//! # Design Principles
//!
//! - Rows are immutable once inserted; there is no update or delete
//! - The store assigns primary keys unless one is given explicitly
//! - File catalogs are append-only and checksum-verified at open
//! - Latest write is visible only after fsync

pub mod errors;
pub mod file;
pub mod memory;
pub mod model;
pub mod record;
pub mod store;
pub mod tables;

pub use errors::{StoreError, StoreResult};
pub use file::FileCatalog;
pub use memory::MemoryCatalog;
pub use model::{
    Area, Association, Boulder, NewArea, NewBoulder, NewPhoto, NewProblem, NewSector, Photo,
    Problem, Sector, Table, NO_SECTOR,
};
pub use store::{CatalogStore, TableBackend};
pub use tables::Tables;
