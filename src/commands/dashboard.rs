// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::LedgerStore;
use crate::models::{AccountSummary, RecentRecord};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub books: Vec<AccountSummary>,
    pub total_records: i64,
    pub recent: Vec<RecentRecord>,
}

pub fn build(store: &LedgerStore, recent: usize) -> Result<Dashboard> {
    Ok(Dashboard {
        books: store.account_summaries()?,
        total_records: store.record_count(None)?,
        recent: store.recent_records(recent)?,
    })
}

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let recent = *m.get_one::<usize>("recent").unwrap_or(&5);
    let dash = build(store, recent)?;
    if maybe_print_json(m.get_flag("json"), false, &dash)? {
        return Ok(());
    }

    if dash.books.is_empty() {
        println!("No books yet. Create one with `controlmoney book add <name> <currency>`.");
        return Ok(());
    }
    let rows = dash
        .books
        .iter()
        .map(|s| {
            vec![
                s.account.name.clone(),
                s.record_count.to_string(),
                fmt_money(&s.balance, &s.account.currency),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Book", "Records", "Balance"], rows));
    println!("Total records: {}", dash.total_records);

    if !dash.recent.is_empty() {
        let rows = dash
            .recent
            .iter()
            .map(|r| {
                vec![
                    r.record.date.to_string(),
                    r.account_name.clone(),
                    r.record.description.clone().unwrap_or_default(),
                    fmt_money(&r.record.amount, &r.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Book", "Description", "Amount"], rows)
        );
    }
    Ok(())
}
