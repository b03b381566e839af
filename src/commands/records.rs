// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::LedgerStore;
use crate::models::{NewRecord, Record};
use crate::utils::{
    clean_description, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table,
    require_account, require_record,
};
use anyhow::{Context, Result, bail};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Build a [`NewRecord`] from `record add` arguments. Input checks happen here, not in the store.
pub fn new_record_from_args(sub: &clap::ArgMatches) -> Result<NewRecord> {
    Ok(NewRecord {
        date: parse_date(sub.get_one::<String>("date").unwrap().trim())?,
        description: clean_description(sub.get_one::<String>("description")),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?,
        book_id: *sub.get_one::<i64>("book").unwrap(),
    })
}

/// Apply the `record edit` overrides from `sub` to `current`.
pub fn edited_record(current: Record, sub: &clap::ArgMatches) -> Result<Record> {
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => current.date,
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => current.amount,
    };
    let description = if sub.get_flag("clear-description") {
        None
    } else if let Some(raw) = sub.get_one::<String>("description") {
        clean_description(Some(raw))
    } else {
        current.description
    };
    Ok(Record {
        date,
        amount,
        description,
        ..current
    })
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let input = new_record_from_args(sub)?;
    let account = require_account(store, input.book_id)?;
    let id = store
        .create_record(&input)
        .with_context(|| format!("Could not save the record to book '{}'", account.name))?;
    tracing::debug!(id, book_id = input.book_id, "created record");
    println!(
        "Recorded {} on {} in '{}' (id {})",
        fmt_money(&input.amount, &account.currency),
        input.date,
        account.name,
        id
    );
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let book_id = *sub.get_one::<i64>("book").unwrap();
    let account = require_account(store, book_id)?;
    let records = store.list_records(book_id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &records)? {
        let rows = records
            .iter()
            .map(|r| record_row(r, &account.currency))
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Description", "Amount"], rows)
        );
        println!(
            "{} record(s), balance {}",
            records.len(),
            fmt_money(&store.record_sum(Some(book_id))?, &account.currency)
        );
    }
    Ok(())
}

fn show(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let record = require_record(store, id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &record)? {
        let account = require_account(store, record.book_id)?;
        let mut row = record_row(&record, &account.currency);
        row.push(account.name);
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Description", "Amount", "Book"], vec![row])
        );
    }
    Ok(())
}

fn edit(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let updated = edited_record(require_record(store, id)?, sub)?;
    let changed = store.update_record(&updated)?;
    tracing::debug!(id, changed, "updated record");
    println!("Updated record {}", id);
    Ok(())
}

fn remove(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let record = require_record(store, id)?;
    if !sub.get_flag("yes") {
        bail!(
            "Deleting record {} ({} on {}) cannot be undone; re-run with --yes",
            id,
            record.amount,
            record.date
        );
    }
    if let Err(err) = store.delete_record(id) {
        tracing::warn!(id, error = ?err, "failed to delete record");
        return Err(err).context("Could not delete the record");
    }
    println!("Deleted record {} ({} on {})", id, record.amount, record.date);
    Ok(())
}

fn record_row(r: &Record, currency: &str) -> Vec<String> {
    vec![
        r.id.to_string(),
        r.date.to_string(),
        r.description.clone().unwrap_or_default(),
        fmt_money(&r.amount, currency),
    ]
}
