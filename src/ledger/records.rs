// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, params};

use super::{RECORD_COLUMNS, record_from_row};
use crate::db::LedgerStore;
use crate::error::Result;
use crate::models::{NewRecord, Record};

impl LedgerStore {
    /// Insert a record and return its id.
    ///
    /// Fails with [`crate::error::StoreError::ConstraintViolation`] when
    /// `book_id` does not name an existing book.
    pub fn create_record(&self, input: &NewRecord) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO records(date, description, amount, bookId) VALUES (?1, ?2, ?3, ?4)",
                params![
                    input.date,
                    input.description,
                    input.amount.to_string(),
                    input.book_id
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_record(&self, id: i64) -> Result<Option<Record>> {
        self.with_conn(|conn| {
            let record = conn
                .query_row(
                    &format!("SELECT {} FROM records WHERE id=?1", RECORD_COLUMNS),
                    params![id],
                    record_from_row,
                )
                .optional()?;
            Ok(record)
        })
    }

    /// Records of one book, newest date first; same-day records newest insert first.
    pub fn list_records(&self, book_id: i64) -> Result<Vec<Record>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM records WHERE bookId=?1 ORDER BY date DESC, id DESC",
                RECORD_COLUMNS
            ))?;
            let rows = stmt.query_map(params![book_id], record_from_row)?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            Ok(data)
        })
    }

    /// Rewrite date, description, and amount. `record.book_id` is ignored: a
    /// record stays in the book it was created in.
    pub fn update_record(&self, record: &Record) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE records SET date=?1, description=?2, amount=?3 WHERE id=?4",
                params![
                    record.date,
                    record.description,
                    record.amount.to_string(),
                    record.id
                ],
            )?;
            Ok(changed)
        })
    }

    pub fn delete_record(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM records WHERE id=?1", params![id])?;
            Ok(())
        })
    }
}
