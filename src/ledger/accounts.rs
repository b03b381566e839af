// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, params};

use super::account_from_row;
use crate::db::LedgerStore;
use crate::error::Result;
use crate::models::{Account, NewAccount};

impl LedgerStore {
    /// Insert a book and return its id. Ids are never reused.
    pub fn create_account(&self, input: &NewAccount) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO accounts(name, currency) VALUES (?1, ?2)",
                params![input.name, input.currency],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_account(&self, id: i64) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            let account = conn
                .query_row(
                    "SELECT id, name, currency FROM accounts WHERE id=?1",
                    params![id],
                    account_from_row,
                )
                .optional()?;
            Ok(account)
        })
    }

    /// All books, by name ignoring case.
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, currency FROM accounts ORDER BY name COLLATE NOCASE, id",
            )?;
            let rows = stmt.query_map([], account_from_row)?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            Ok(data)
        })
    }

    /// Rewrite name and currency. Returns the number of rows changed (0 when `id` is unknown).
    pub fn update_account(&self, account: &Account) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE accounts SET name=?1, currency=?2 WHERE id=?3",
                params![account.name, account.currency, account.id],
            )?;
            Ok(changed)
        })
    }

    /// Remove a book together with all of its records, in one transaction.
    ///
    /// Deleting an unknown id succeeds without touching anything.
    pub fn delete_account(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM records WHERE bookId=?1", params![id])?;
            tx.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
            tx.commit()?;
            Ok(())
        })
    }
}
