// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for the ledger store.

use thiserror::Error;

/// Failures reported by [`crate::db::LedgerStore`] operations.
///
/// A lookup that finds nothing is not an error; those operations return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert or update broke a table constraint, e.g. a record pointing
    /// at a book that does not exist.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The database could not be opened, read, or written.
    #[error("storage failure")]
    Storage(#[source] rusqlite::Error),

    /// The data directory could not be prepared.
    #[error("could not prepare the data directory")]
    Io(#[from] std::io::Error),

    /// A persisted value could not be decoded.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A sum left the range a decimal can hold.
    #[error("amount overflow: {0}")]
    Overflow(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::ConstraintViolation(msg.unwrap_or_else(|| e.to_string()))
            }
            rusqlite::Error::FromSqlConversionFailure(idx, _, e) => {
                StoreError::InvalidData(format!("column {}: {}", idx, e))
            }
            other => StoreError::Storage(other),
        }
    }
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
