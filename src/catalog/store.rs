//! Catalog store interface
//!
//! Handlers only see [`CatalogStore`]; the concrete backend is injected into
//! the router state at startup.

use super::errors::StoreResult;
use super::model::{
    Boulder, NewArea, NewBoulder, NewPhoto, NewProblem, NewSector, Problem,
};
use super::tables::{NewRow, Tables};

/// Query/insert interface over the catalog tables
pub trait CatalogStore: Send + Sync {
    /// All boulders in id order
    fn boulders(&self) -> StoreResult<Vec<Boulder>>;

    /// Look up one boulder
    fn boulder(&self, id: i64) -> StoreResult<Option<Boulder>>;

    /// Problems on a boulder in id order
    fn problems_for(&self, boulder: i64) -> StoreResult<Vec<Problem>>;

    /// Insert a boulder, returning its id
    fn insert_boulder(&self, row: NewBoulder) -> StoreResult<i64>;

    /// Insert a problem, returning its id.
    ///
    /// The owning boulder is not checked.
    fn insert_problem(&self, row: NewProblem) -> StoreResult<i64>;

    fn insert_sector(&self, row: NewSector) -> StoreResult<i64>;

    fn insert_area(&self, row: NewArea) -> StoreResult<i64>;

    fn insert_photo(&self, row: NewPhoto) -> StoreResult<i64>;
}

/// A backend that keeps the catalog in a [`Tables`] set
pub trait TableBackend: Send + Sync {
    /// Run a read-only query against the tables
    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StoreResult<T>;

    /// Assign a key to a new row and store it
    fn insert<N: NewRow>(&self, new: N) -> StoreResult<i64>;
}

impl<B: TableBackend> CatalogStore for B {
    fn boulders(&self) -> StoreResult<Vec<Boulder>> {
        self.read(|tables| tables.all::<Boulder>().cloned().collect())
    }

    fn boulder(&self, id: i64) -> StoreResult<Option<Boulder>> {
        self.read(|tables| tables.get::<Boulder>(id).cloned())
    }

    fn problems_for(&self, boulder: i64) -> StoreResult<Vec<Problem>> {
        self.read(|tables| tables.problems_for(boulder).cloned().collect())
    }

    fn insert_boulder(&self, row: NewBoulder) -> StoreResult<i64> {
        self.insert(row)
    }

    fn insert_problem(&self, row: NewProblem) -> StoreResult<i64> {
        self.insert(row)
    }

    fn insert_sector(&self, row: NewSector) -> StoreResult<i64> {
        self.insert(row)
    }

    fn insert_area(&self, row: NewArea) -> StoreResult<i64> {
        self.insert(row)
    }

    fn insert_photo(&self, row: NewPhoto) -> StoreResult<i64> {
        self.insert(row)
    }
}
