//! In-memory catalog
//!
//! Nothing is persisted; used by tests and throwaway servers.

use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::store::TableBackend;
use super::tables::{NewRow, Row, Tables};

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableBackend for MemoryCatalog {
    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StoreResult<T> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&tables))
    }

    fn insert<N: NewRow>(&self, new: N) -> StoreResult<i64> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        let row = tables.prepare(new)?;
        let id = row.id();
        tables.put(row);
        Ok(id)
    }
}
