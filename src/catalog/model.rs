//! Catalog data model
//!
//! Tables:
//! - boulder(id, lattitude, longitude, elevation, name, sector, timestamp)
//! - problem(id, name, description, grade, boulder, timestamp)
//! - sector(id, name, lattitude, longitude, area, timestamp)
//! - area(id, name, lattitude, longitude, timestamp)
//! - photo(id, title, description, filename, association, reference, timestamp)
//!
//! Column names keep the persisted spelling `lattitude`; the Rust fields are
//! spelled `latitude`. Timestamps are Unix seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selector::Located;

/// Sector value of a boulder that belongs to no sector
pub const NO_SECTOR: i64 = 0;

/// Catalog tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Boulder,
    Problem,
    Sector,
    Area,
    Photo,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Boulder,
        Table::Problem,
        Table::Sector,
        Table::Area,
        Table::Photo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Boulder => "boulder",
            Table::Problem => "problem",
            Table::Sector => "sector",
            Table::Area => "area",
            Table::Photo => "photo",
        }
    }

    /// On-disk tag byte
    pub fn tag(&self) -> u8 {
        match self {
            Table::Boulder => 1,
            Table::Problem => 2,
            Table::Sector => 3,
            Table::Area => 4,
            Table::Photo => 5,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Table::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boulder: one climbable rock at a point location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boulder {
    pub id: i64,
    #[serde(rename = "lattitude")]
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level
    pub elevation: i64,
    pub name: Option<String>,
    /// Owning sector, [`NO_SECTOR`] when unassigned
    pub sector: i64,
    pub timestamp: i64,
}

impl Located for Boulder {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn sector(&self) -> i64 {
        self.sector
    }
}

/// A named route on a boulder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Free-form difficulty label, e.g. `7a`
    pub grade: String,
    pub boulder: i64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: i64,
    pub name: String,
    #[serde(rename = "lattitude")]
    pub latitude: f64,
    pub longitude: f64,
    pub area: i64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,
    pub name: String,
    #[serde(rename = "lattitude")]
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
}

/// What a photo is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Association {
    Boulder,
    Problem,
    Sector,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Name of the file on disk, not the title
    pub filename: String,
    pub association: Association,
    /// Id of the row in the associated table
    pub reference: i64,
    pub timestamp: i64,
}

/// A boulder to be inserted. `id` is assigned by the store unless given.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBoulder {
    pub id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: i64,
    pub name: Option<String>,
    pub sector: i64,
}

impl NewBoulder {
    pub fn new(latitude: f64, longitude: f64, elevation: i64, sector: i64) -> Self {
        Self {
            id: None,
            latitude,
            longitude,
            elevation,
            name: None,
            sector,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn into_row(self, id: i64, timestamp: i64) -> Boulder {
        Boulder {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            name: self.name,
            sector: self.sector,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProblem {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub grade: String,
    pub boulder: i64,
}

impl NewProblem {
    pub fn new(
        boulder: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            grade: grade.into(),
            boulder,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn into_row(self, id: i64, timestamp: i64) -> Problem {
        Problem {
            id,
            name: self.name,
            description: self.description,
            grade: self.grade,
            boulder: self.boulder,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSector {
    pub id: Option<i64>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub area: i64,
}

impl NewSector {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, area: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            latitude,
            longitude,
            area,
        }
    }

    pub(crate) fn into_row(self, id: i64, timestamp: i64) -> Sector {
        Sector {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            area: self.area,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewArea {
    pub id: Option<i64>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewArea {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub(crate) fn into_row(self, id: i64, timestamp: i64) -> Area {
        Area {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub filename: String,
    pub association: Association,
    pub reference: i64,
}

impl NewPhoto {
    pub fn new(
        title: impl Into<String>,
        filename: impl Into<String>,
        association: Association,
        reference: i64,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            filename: filename.into(),
            association,
            reference,
        }
    }

    pub(crate) fn into_row(self, id: i64, timestamp: i64) -> Photo {
        Photo {
            id,
            title: self.title,
            description: self.description,
            filename: self.filename,
            association: self.association,
            reference: self.reference,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_tags_roundtrip() {
        for table in Table::ALL {
            assert_eq!(Table::from_tag(table.tag()), Some(table));
        }
        assert_eq!(Table::from_tag(0), None);
    }

    #[test]
    fn test_boulder_keeps_column_spelling() {
        let boulder = NewBoulder::new(15.1, 15.0, 100, NO_SECTOR)
            .with_name("boulder1")
            .into_row(1, 0);

        let json = serde_json::to_value(&boulder).unwrap();
        assert_eq!(json["lattitude"], 15.1);
        assert!(json.get("latitude").is_none());
        assert_eq!(json["name"], "boulder1");
    }

    #[test]
    fn test_association_serialization() {
        let json = serde_json::to_value(Association::Boulder).unwrap();
        assert_eq!(json, "boulder");
    }
}
