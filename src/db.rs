// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Connection lifecycle and schema for the ledger store.
//!
//! A [`LedgerStore`] is built once at startup and shared by reference. It holds
//! at most one SQLite connection, opened on first use and cached until
//! [`LedgerStore::close`]. The open path runs under the same mutex that guards
//! the cached handle, so callers racing on the first operation all end up on a
//! single connection.

use crate::error::{Result, StoreError};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "ControlMoney", "controlmoney"));

pub const DB_FILE: &str = "transactions.sqlite";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine platform-specific data dir",
        ))
    })?;
    Ok(proj.data_dir().join(DB_FILE))
}

/// Where the backing database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Private to the connection: closing the store discards the data.
    Memory,
}

impl StoreLocation {
    pub fn file(path: impl AsRef<Path>) -> Self {
        StoreLocation::File(path.as_ref().to_path_buf())
    }
}

impl std::fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreLocation::File(p) => write!(f, "{}", p.display()),
            StoreLocation::Memory => f.write_str(":memory:"),
        }
    }
}

pub struct LedgerStore {
    location: StoreLocation,
    conn: Mutex<Option<Connection>>,
}

impl LedgerStore {
    /// Create a store for `location`. Nothing is opened until the first operation.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            conn: Mutex::new(None),
        }
    }

    /// Store backed by the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(StoreLocation::File(db_path()?)))
    }

    pub fn in_memory() -> Self {
        Self::new(StoreLocation::Memory)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Whether a connection is currently cached.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Create the tables and index if they are missing. Safe to call any number of times.
    pub fn initialize(&self) -> Result<()> {
        self.with_conn(|conn| init_schema(conn))
    }

    /// Release the cached connection. The next operation opens a fresh one.
    pub fn close(&self) -> Result<()> {
        let mut slot = self.lock();
        if let Some(conn) = slot.take() {
            if let Err((conn, err)) = conn.close() {
                *slot = Some(conn);
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Run `f` against the cached connection, opening it first if needed.
    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut slot = self.lock();
        let conn = match slot.take() {
            Some(conn) => conn,
            None => open_connection(&self.location)?,
        };
        f(slot.insert(conn))
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        // A panic inside an operation leaves the connection itself usable.
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn open_connection(location: &StoreLocation) -> Result<Connection> {
    let conn = match location {
        StoreLocation::File(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            Connection::open(path)?
        }
        StoreLocation::Memory => Connection::open_in_memory()?,
    };
    // Per-connection setting; cascade deletes rely on it.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        currency TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS records(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        description TEXT,
        amount TEXT NOT NULL, -- decimal text, in the owning account's currency
        bookId INTEGER NOT NULL,
        FOREIGN KEY(bookId) REFERENCES accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_records_bookId ON records(bookId);
    "#,
    )?;
    Ok(())
}
