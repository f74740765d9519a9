//! In-memory table set shared by every catalog backend
//!
//! Rows are kept in id order. Key assignment follows rowid semantics:
//! an explicit id is taken as is (and must be free), otherwise the next id
//! is one past the largest in the table, starting at 1.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::{StoreError, StoreResult};
use super::model::{
    Area, Boulder, NewArea, NewBoulder, NewPhoto, NewProblem, NewSector, Photo, Problem, Sector,
    Table,
};

/// A persisted row of one catalog table
pub trait Row: Serialize + DeserializeOwned + Clone {
    const TABLE: Table;

    fn id(&self) -> i64;
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self>;
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self>;
}

/// A row waiting for its primary key and timestamp
pub trait NewRow {
    type Row: Row;

    fn explicit_id(&self) -> Option<i64>;
    fn into_row(self, id: i64, timestamp: i64) -> Self::Row;
}

/// All catalog tables
#[derive(Debug, Clone, Default)]
pub struct Tables {
    boulders: BTreeMap<i64, Boulder>,
    problems: BTreeMap<i64, Problem>,
    sectors: BTreeMap<i64, Sector>,
    areas: BTreeMap<i64, Area>,
    photos: BTreeMap<i64, Photo>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an id and timestamp without storing the row.
    ///
    /// Backends persist the prepared row first and [`put`](Self::put) it
    /// afterwards, so a failed write leaves the tables untouched.
    pub fn prepare<N: NewRow>(&self, new: N) -> StoreResult<N::Row> {
        let rows = N::Row::rows(self);
        let id = match new.explicit_id() {
            Some(id) => id,
            None => rows.keys().next_back().map_or(1, |max| max.saturating_add(1)),
        };

        if rows.contains_key(&id) {
            return Err(StoreError::DuplicateKey {
                table: N::Row::TABLE,
                id,
            });
        }

        Ok(new.into_row(id, Utc::now().timestamp()))
    }

    /// Store a row. Returns `false` if its id was already taken.
    pub fn put<R: Row>(&mut self, row: R) -> bool {
        let rows = R::rows_mut(self);
        if rows.contains_key(&row.id()) {
            return false;
        }
        rows.insert(row.id(), row);
        true
    }

    pub fn get<R: Row>(&self, id: i64) -> Option<&R> {
        R::rows(self).get(&id)
    }

    pub fn all<'a, R: Row + 'a>(&'a self) -> impl Iterator<Item = &'a R> + 'a {
        R::rows(self).values()
    }

    pub fn problems_for(&self, boulder: i64) -> impl Iterator<Item = &Problem> {
        self.problems.values().filter(move |p| p.boulder == boulder)
    }

    pub fn count(&self, table: Table) -> usize {
        match table {
            Table::Boulder => self.boulders.len(),
            Table::Problem => self.problems.len(),
            Table::Sector => self.sectors.len(),
            Table::Area => self.areas.len(),
            Table::Photo => self.photos.len(),
        }
    }
}

impl Row for Boulder {
    const TABLE: Table = Table::Boulder;

    fn id(&self) -> i64 {
        self.id
    }
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.boulders
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.boulders
    }
}

impl Row for Problem {
    const TABLE: Table = Table::Problem;

    fn id(&self) -> i64 {
        self.id
    }
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.problems
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.problems
    }
}

impl Row for Sector {
    const TABLE: Table = Table::Sector;

    fn id(&self) -> i64 {
        self.id
    }
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.sectors
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.sectors
    }
}

impl Row for Area {
    const TABLE: Table = Table::Area;

    fn id(&self) -> i64 {
        self.id
    }
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.areas
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.areas
    }
}

impl Row for Photo {
    const TABLE: Table = Table::Photo;

    fn id(&self) -> i64 {
        self.id
    }
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.photos
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.photos
    }
}

impl NewRow for NewBoulder {
    type Row = Boulder;

    fn explicit_id(&self) -> Option<i64> {
        self.id
    }
    fn into_row(self, id: i64, timestamp: i64) -> Boulder {
        NewBoulder::into_row(self, id, timestamp)
    }
}

impl NewRow for NewProblem {
    type Row = Problem;

    fn explicit_id(&self) -> Option<i64> {
        self.id
    }
    fn into_row(self, id: i64, timestamp: i64) -> Problem {
        NewProblem::into_row(self, id, timestamp)
    }
}

impl NewRow for NewSector {
    type Row = Sector;

    fn explicit_id(&self) -> Option<i64> {
        self.id
    }
    fn into_row(self, id: i64, timestamp: i64) -> Sector {
        NewSector::into_row(self, id, timestamp)
    }
}

impl NewRow for NewArea {
    type Row = Area;

    fn explicit_id(&self) -> Option<i64> {
        self.id
    }
    fn into_row(self, id: i64, timestamp: i64) -> Area {
        NewArea::into_row(self, id, timestamp)
    }
}

impl NewRow for NewPhoto {
    type Row = Photo;

    fn explicit_id(&self) -> Option<i64> {
        self.id
    }
    fn into_row(self, id: i64, timestamp: i64) -> Photo {
        NewPhoto::into_row(self, id, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::NO_SECTOR;

    fn insert<N: NewRow>(tables: &mut Tables, new: N) -> StoreResult<i64> {
        let row = tables.prepare(new)?;
        let id = row.id();
        assert!(tables.put(row));
        Ok(id)
    }

    #[test]
    fn test_ids_start_at_one() {
        let mut tables = Tables::new();
        let first = insert(&mut tables, NewBoulder::new(1.0, 1.0, 10, NO_SECTOR)).unwrap();
        let second = insert(&mut tables, NewBoulder::new(2.0, 2.0, 10, NO_SECTOR)).unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[test]
    fn test_next_id_follows_largest() {
        let mut tables = Tables::new();
        insert(&mut tables, NewBoulder::new(1.0, 1.0, 10, NO_SECTOR).with_id(0)).unwrap();
        insert(&mut tables, NewBoulder::new(1.0, 1.0, 10, NO_SECTOR).with_id(7)).unwrap();
        let next = insert(&mut tables, NewBoulder::new(1.0, 1.0, 10, NO_SECTOR)).unwrap();
        assert_eq!(next, 8);
    }

    #[test]
    fn test_duplicate_explicit_id() {
        let mut tables = Tables::new();
        insert(&mut tables, NewProblem::new(0, "a", "", "6a").with_id(0)).unwrap();
        let err = insert(&mut tables, NewProblem::new(0, "b", "", "6b").with_id(0)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateKey {
                table: Table::Problem,
                id: 0
            }
        ));
    }

    #[test]
    fn test_tables_are_independent() {
        let mut tables = Tables::new();
        insert(&mut tables, NewArea::new("area", 15.0, 15.0)).unwrap();
        let sector = insert(&mut tables, NewSector::new("sector", 15.0, 15.0, 1)).unwrap();
        assert_eq!(sector, 1);
        assert_eq!(tables.count(Table::Area), 1);
        assert_eq!(tables.count(Table::Sector), 1);
        assert_eq!(tables.count(Table::Boulder), 0);
    }

    #[test]
    fn test_problems_for_boulder() {
        let mut tables = Tables::new();
        insert(&mut tables, NewProblem::new(1, "p1", "", "7a")).unwrap();
        insert(&mut tables, NewProblem::new(2, "p2", "", "6c")).unwrap();
        insert(&mut tables, NewProblem::new(1, "p3", "", "5")).unwrap();

        let names: Vec<_> = tables.problems_for(1).map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p3"]);
    }

    #[test]
    fn test_prepare_does_not_store() {
        let tables = Tables::new();
        let row = tables.prepare(NewBoulder::new(1.0, 1.0, 10, NO_SECTOR)).unwrap();
        assert_eq!(row.id, 1);
        assert!(row.timestamp > 0);
        assert_eq!(tables.count(Table::Boulder), 0);
    }
}
