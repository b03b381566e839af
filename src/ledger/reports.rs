// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregates over records.

use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use super::{decimal_column, record_from_row};
use crate::db::LedgerStore;
use crate::error::{Result, StoreError};
use crate::models::{Account, AccountSummary, IntegrityIssue, RecentRecord};

impl LedgerStore {
    /// Number of records, across all books or within `book_id`.
    pub fn record_count(&self, book_id: Option<i64>) -> Result<i64> {
        self.with_conn(|conn| {
            let count: i64 = match book_id {
                Some(id) => conn.query_row(
                    "SELECT COUNT(*) FROM records WHERE bookId=?1",
                    params![id],
                    |r| r.get(0),
                )?,
                None => conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?,
            };
            Ok(count)
        })
    }

    /// Sum of amounts, across all books or within `book_id`. Zero when nothing matches.
    ///
    /// Amounts are added as decimals, so the result is exact.
    pub fn record_sum(&self, book_id: Option<i64>) -> Result<Decimal> {
        self.with_conn(|conn| {
            let mut stmt = match book_id {
                Some(_) => conn.prepare("SELECT amount FROM records WHERE bookId=?1")?,
                None => conn.prepare("SELECT amount FROM records")?,
            };
            let mut cur = match book_id {
                Some(id) => stmt.query(params![id])?,
                None => stmt.query([])?,
            };
            let mut total = Decimal::ZERO;
            while let Some(r) = cur.next()? {
                total = add_amount(total, decimal_column(r, 0)?)?;
            }
            Ok(total)
        })
    }

    /// The `limit` newest records over every book, with the owning book's name and currency.
    pub fn recent_records(&self, limit: usize) -> Result<Vec<RecentRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT r.id, r.date, r.description, r.amount, r.bookId, a.name, a.currency
                 FROM records r
                 INNER JOIN accounts a ON a.id=r.bookId
                 ORDER BY r.date DESC, r.id DESC
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |r| {
                Ok(RecentRecord {
                    record: record_from_row(r)?,
                    account_name: r.get(5)?,
                    currency: r.get(6)?,
                })
            })?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            Ok(data)
        })
    }

    /// Every book with its record count and balance, in book list order.
    ///
    /// Read under a single lock so counts and balances agree with each other.
    pub fn account_summaries(&self) -> Result<Vec<AccountSummary>> {
        self.with_conn(|conn| summaries(conn))
    }

    /// Engine integrity check plus records whose book is missing. Empty when healthy.
    pub fn integrity_issues(&self) -> Result<Vec<IntegrityIssue>> {
        self.with_conn(|conn| {
            let mut issues = Vec::new();

            let mut stmt = conn.prepare("PRAGMA integrity_check")?;
            let mut cur = stmt.query([])?;
            while let Some(r) = cur.next()? {
                let msg: String = r.get(0)?;
                if msg != "ok" {
                    issues.push(IntegrityIssue {
                        kind: "integrity".into(),
                        detail: msg,
                    });
                }
            }

            let mut stmt = conn.prepare(
                "SELECT r.id, r.bookId FROM records r
                 LEFT JOIN accounts a ON a.id=r.bookId
                 WHERE a.id IS NULL
                 ORDER BY r.id",
            )?;
            let mut cur = stmt.query([])?;
            while let Some(r) = cur.next()? {
                let id: i64 = r.get(0)?;
                let book_id: i64 = r.get(1)?;
                issues.push(IntegrityIssue {
                    kind: "orphan_record".into(),
                    detail: format!("record {} references missing book {}", id, book_id),
                });
            }
            Ok(issues)
        })
    }
}

fn summaries(conn: &Connection) -> Result<Vec<AccountSummary>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.currency, r.amount
         FROM accounts a
         LEFT JOIN records r ON r.bookId=a.id
         ORDER BY a.name COLLATE NOCASE, a.id",
    )?;
    let mut cur = stmt.query([])?;
    let mut data: Vec<AccountSummary> = Vec::new();
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        if data.last().map(|s| s.account.id) != Some(id) {
            data.push(AccountSummary {
                account: Account {
                    id,
                    name: r.get(1)?,
                    currency: r.get(2)?,
                },
                record_count: 0,
                balance: Decimal::ZERO,
            });
        }
        let amount: Option<String> = r.get(3)?;
        if amount.is_some() {
            let value = decimal_column(r, 3)?;
            if let Some(summary) = data.last_mut() {
                summary.record_count += 1;
                summary.balance = add_amount(summary.balance, value)?;
            }
        }
    }
    Ok(data)
}

fn add_amount(total: Decimal, amount: Decimal) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| StoreError::Overflow(format!("{} + {}", total, amount)))
}
