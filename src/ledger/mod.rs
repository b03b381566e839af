// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Book, record, and reporting operations on [`crate::db::LedgerStore`].
//!
//! The store is a plain persistence layer: it does not check names, currencies,
//! dates, or amounts. Callers validate input before handing it over.

pub mod accounts;
pub mod records;
pub mod reports;

use rusqlite::Row;
use rusqlite::types::Type;
use rust_decimal::Decimal;

use crate::models::{Account, Record};

pub(crate) const RECORD_COLUMNS: &str = "id, date, description, amount, bookId";

pub(crate) fn account_from_row(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        currency: r.get(2)?,
    })
}

/// Map the five [`RECORD_COLUMNS`] starting at column 0.
pub(crate) fn record_from_row(r: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: r.get(0)?,
        date: r.get(1)?,
        description: r.get(2)?,
        amount: decimal_column(r, 3)?,
        book_id: r.get(4)?,
    })
}

pub(crate) fn decimal_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = r.get(idx)?;
    raw.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
