//! File-backed catalog
//!
//! The catalog file is append-only: every insert writes one checksummed
//! record and fsyncs before the row becomes visible. At open the file is
//! replayed into memory; any corruption aborts the open.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::model::{Area, Boulder, Photo, Problem, Sector, Table};
use super::record::{RowRecord, MAGIC, MIN_RECORD_SIZE};
use super::store::TableBackend;
use super::tables::{NewRow, Row, Tables};
use crate::observability::Logger;

/// Catalog persisted in a single append-only file
pub struct FileCatalog {
    path: PathBuf,
    state: RwLock<FileState>,
}

struct FileState {
    file: File,
    tables: Tables,
}

impl FileCatalog {
    /// Create an empty catalog file, or open the existing one.
    ///
    /// Creates parent directories if needed.
    pub fn create(path: &Path) -> StoreResult<Self> {
        if path.exists() {
            return Self::open(path);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(format!("failed to create {}", parent.display()), e)
            })?;
        }

        let mut file = OpenOptions::new()
            .create_new(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::io(format!("failed to create {}", path.display()), e))?;

        file.write_all(MAGIC)
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::io("failed to write catalog header", e))?;

        Ok(Self {
            path: path.to_path_buf(),
            state: RwLock::new(FileState {
                file,
                tables: Tables::new(),
            }),
        })
    }

    /// Open an existing catalog file and replay it into memory
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    StoreError::Missing(path.to_path_buf())
                } else {
                    StoreError::io(format!("failed to open {}", path.display()), e)
                }
            })?;

        let tables = replay(&file)?;

        Ok(Self {
            path: path.to_path_buf(),
            state: RwLock::new(FileState { file, tables }),
        })
    }

    /// Path of the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of rows in a table
    pub fn count(&self, table: Table) -> StoreResult<usize> {
        self.read(|tables| tables.count(table))
    }
}

impl TableBackend for FileCatalog {
    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StoreResult<T> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&state.tables))
    }

    fn insert<N: NewRow>(&self, new: N) -> StoreResult<i64> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        let row = state.tables.prepare(new)?;
        let id = row.id();
        let bytes = RowRecord::encode(&row)?.serialize();

        append(&mut state.file, &bytes).map_err(|e| {
            StoreError::io(format!("failed to append {} row {}", N::Row::TABLE, id), e)
        })?;

        state.tables.put(row);
        Ok(id)
    }
}

/// An append-only target that can be cut back to a previous length
trait Segment: Write {
    fn len(&self) -> io::Result<u64>;
    fn truncate(&mut self, len: u64) -> io::Result<()>;
    fn sync(&mut self) -> io::Result<()>;
}

impl Segment for File {
    fn len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Append one record and fsync.
///
/// On failure the segment is cut back to its prior length, so a torn record
/// never sits in front of later appends.
fn append<S: Segment>(segment: &mut S, bytes: &[u8]) -> io::Result<()> {
    let original_len = segment.len()?;

    if let Err(e) = segment.write_all(bytes).and_then(|_| segment.sync()) {
        if let Err(rollback) = segment.truncate(original_len).and_then(|_| segment.sync()) {
            Logger::error(
                "STORE_FAILURE",
                &[
                    ("error", &rollback.to_string()),
                    ("length", &original_len.to_string()),
                    ("operation", "rollback"),
                ],
            );
        }
        return Err(e);
    }

    Ok(())
}

/// Read every record of the file into a fresh table set
fn replay(file: &File) -> StoreResult<Tables> {
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| StoreError::io("failed to read catalog", e))?;

    if data.len() < MAGIC.len() || &data[..MAGIC.len()] != MAGIC {
        return Err(StoreError::corruption(0, "missing catalog header"));
    }

    let mut tables = Tables::new();
    let mut pos = MAGIC.len();

    while pos < data.len() {
        let offset = pos as u64;
        if data.len() - pos < MIN_RECORD_SIZE {
            return Err(StoreError::corruption(
                offset,
                format!("truncated catalog: {} trailing bytes", data.len() - pos),
            ));
        }

        let (record, consumed) = RowRecord::deserialize(&data[pos..], offset)?;
        let fresh = match record.table {
            Table::Boulder => restore::<Boulder>(&mut tables, &record, offset)?,
            Table::Problem => restore::<Problem>(&mut tables, &record, offset)?,
            Table::Sector => restore::<Sector>(&mut tables, &record, offset)?,
            Table::Area => restore::<Area>(&mut tables, &record, offset)?,
            Table::Photo => restore::<Photo>(&mut tables, &record, offset)?,
        };
        if !fresh {
            return Err(StoreError::corruption(
                offset,
                format!("duplicate {} row", record.table),
            ));
        }

        pos += consumed;
    }

    Ok(tables)
}

fn restore<R: Row>(tables: &mut Tables, record: &RowRecord, offset: u64) -> StoreResult<bool> {
    let row: R = record
        .decode()
        .map_err(|message| StoreError::corruption(offset, message))?;
    Ok(tables.put(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{NewBoulder, NewProblem, NO_SECTOR};
    use crate::catalog::store::CatalogStore;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ocd.db");

        let catalog = FileCatalog::create(&path).unwrap();
        assert_eq!(catalog.path(), path.as_path());
        assert_eq!(std::fs::read(&path).unwrap(), MAGIC.to_vec());
        assert_eq!(catalog.count(Table::Boulder).unwrap(), 0);
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ocd.db");

        {
            let catalog = FileCatalog::create(&path).unwrap();
            let id = catalog
                .insert_boulder(NewBoulder::new(16.0, 16.0, 100, NO_SECTOR).with_name("name"))
                .unwrap();
            catalog
                .insert_problem(NewProblem::new(id, "problem1", "foo bar", "7a"))
                .unwrap();
        }

        let catalog = FileCatalog::open(&path).unwrap();
        let boulder = catalog.boulder(1).unwrap().unwrap();
        assert_eq!(boulder.name.as_deref(), Some("name"));
        assert_eq!(catalog.problems_for(1).unwrap().len(), 1);

        // ids continue after the replayed rows
        let next = catalog
            .insert_boulder(NewBoulder::new(1.0, 1.0, 1, NO_SECTOR))
            .unwrap();
        assert_eq!(next, 2);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = FileCatalog::open(&dir.path().join("absent.db"));
        assert!(matches!(result, Err(StoreError::Missing(_))));
    }

    #[test]
    fn test_open_rejects_foreign_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ocd.db");
        std::fs::write(&path, b"SQLite format 3\0").unwrap();

        let result = FileCatalog::open(&path);
        assert!(matches!(result, Err(StoreError::Corruption { offset: 0, .. })));
    }

    /// Accepts `budget` bytes, then fails every write
    struct TornSegment {
        data: Vec<u8>,
        budget: usize,
    }

    impl Write for TornSegment {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(ErrorKind::Other, "disk full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Segment for TornSegment {
        fn len(&self) -> io::Result<u64> {
            Ok(self.data.len() as u64)
        }

        fn truncate(&mut self, len: u64) -> io::Result<()> {
            self.data.truncate(len as usize);
            Ok(())
        }

        fn sync(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_append_rolls_back() {
        let mut segment = TornSegment {
            data: MAGIC.to_vec(),
            budget: 5,
        };

        let row = NewBoulder::new(1.0, 1.0, 1, NO_SECTOR).into_row(1, 0);
        let bytes = RowRecord::encode(&row).unwrap().serialize();

        assert!(append(&mut segment, &bytes).is_err());
        assert_eq!(segment.data, MAGIC.to_vec());

        segment.budget = usize::MAX;
        append(&mut segment, &bytes).unwrap();
        assert_eq!(segment.data.len(), MAGIC.len() + bytes.len());
    }

    #[test]
    fn test_torn_record_before_later_rows_is_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ocd.db");
        FileCatalog::create(&path).unwrap();

        // half a record, then a complete one behind it
        let row = NewBoulder::new(1.0, 1.0, 1, NO_SECTOR).into_row(1, 0);
        let bytes = RowRecord::encode(&row).unwrap().serialize();
        let mut contents = std::fs::read(&path).unwrap();
        contents.extend_from_slice(&bytes[..bytes.len() / 2]);
        contents.extend_from_slice(&bytes);
        std::fs::write(&path, contents).unwrap();

        let err = FileCatalog::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Corruption { .. }), "got {}", err);
    }

    #[test]
    fn test_truncated_tail_is_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ocd.db");
        {
            let catalog = FileCatalog::create(&path).unwrap();
            catalog
                .insert_boulder(NewBoulder::new(1.0, 1.0, 1, NO_SECTOR))
                .unwrap();
        }

        let mut bytes = std::fs::read(&path).unwrap();
        bytes.truncate(bytes.len() - 2);
        std::fs::write(&path, bytes).unwrap();

        let err = FileCatalog::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Corruption { .. }), "got {}", err);
    }
}
