//! Catalog file record format
//!
//! The catalog file starts with the 8-byte magic `OCDCAT01`, followed by
//! records:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record)
//! +------------------+
//! | Table Tag        | (u8)
//! +------------------+
//! | Row Body         | (JSON)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use crc32fast::Hasher;

use super::errors::{StoreError, StoreResult};
use super::model::Table;
use super::tables::Row;

/// Magic header of every catalog file
pub const MAGIC: &[u8; 8] = b"OCDCAT01";

/// length + tag + checksum
pub const MIN_RECORD_SIZE: usize = 4 + 1 + 4;

/// Computes a CRC32 (IEEE) checksum
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// One row as stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    pub table: Table,
    pub body: Vec<u8>,
}

impl RowRecord {
    /// Encode a row of any table
    pub fn encode<R: Row>(row: &R) -> StoreResult<Self> {
        Ok(Self {
            table: R::TABLE,
            body: serde_json::to_vec(row)?,
        })
    }

    /// Decode the body as a row of type `R`
    pub fn decode<R: Row>(&self) -> Result<R, String> {
        if self.table != R::TABLE {
            return Err(format!(
                "expected {} row, found {} row",
                R::TABLE,
                self.table
            ));
        }
        serde_json::from_slice(&self.body).map_err(|e| format!("invalid {} row: {}", self.table, e))
    }

    /// Serialize the complete record to bytes
    pub fn serialize(&self) -> Vec<u8> {
        let record_length = (MIN_RECORD_SIZE + self.body.len()) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.push(self.table.tag());
        record.extend_from_slice(&self.body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from bytes, verifying checksum.
    ///
    /// Returns the record and the number of bytes consumed. Errors carry the
    /// given file `offset`.
    pub fn deserialize(data: &[u8], offset: u64) -> StoreResult<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(StoreError::corruption(offset, "record too short"));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(StoreError::corruption(
                offset,
                format!("invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed = compute_checksum(&data[..checksum_offset]);

        if computed != stored {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "checksum mismatch: computed {:08x}, stored {:08x}",
                    computed, stored
                ),
            ));
        }

        let table = Table::from_tag(data[4])
            .ok_or_else(|| StoreError::corruption(offset, format!("unknown table tag {}", data[4])))?;

        Ok((
            Self {
                table,
                body: data[5..checksum_offset].to_vec(),
            },
            record_length,
        ))
    }
}
