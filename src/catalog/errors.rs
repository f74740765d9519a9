//! # Catalog Store Errors
//!
//! Error types for catalog persistence. None of these are domain errors:
//! a failing store aborts the request rather than producing a failure
//! envelope with status 200.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::model::Table;

/// Result type for catalog operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Catalog file does not exist
    #[error("catalog not found at {}; run 'ocd createdb' first", .0.display())]
    Missing(PathBuf),

    /// Checksum, framing or decoding failure at a byte offset
    #[error("catalog corruption at offset {offset}: {message}")]
    Corruption { offset: u64, message: String },

    /// Explicit primary key already taken
    #[error("duplicate id {id} in table {table}")]
    DuplicateKey { table: Table, id: i64 },

    /// Row could not be encoded
    #[error("failed to encode row: {0}")]
    Encode(#[from] serde_json::Error),

    /// A writer panicked while holding the table lock
    #[error("catalog lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, message: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StoreError::DuplicateKey {
            table: Table::Boulder,
            id: 3,
        };
        assert_eq!(err.to_string(), "duplicate id 3 in table boulder");

        let err = StoreError::corruption(40, "record truncated");
        assert_eq!(err.to_string(), "catalog corruption at offset 40: record truncated");
    }
}
