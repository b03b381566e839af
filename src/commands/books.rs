// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::LedgerStore;
use crate::models::{Account, NewAccount};
use crate::utils::{maybe_print_json, pretty_table, require_account};
use anyhow::{Context, Result, bail};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let currency = sub.get_one::<String>("currency").unwrap().trim().to_uppercase();
    if name.is_empty() {
        bail!("Book name must not be empty");
    }
    let id = store.create_account(&NewAccount {
        name: name.clone(),
        currency: currency.clone(),
    })?;
    tracing::debug!(id, %name, %currency, "created book");
    println!("Added book '{}' ({}) with id {}", name, currency, id);
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = store.list_accounts()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        let rows = accounts
            .into_iter()
            .map(|a| vec![a.id.to_string(), a.name, a.currency])
            .collect();
        println!("{}", pretty_table(&["Id", "Name", "Currency"], rows));
    }
    Ok(())
}

/// Apply the `--name` / `--currency` overrides from `sub` to `current`.
pub fn edited_account(current: Account, sub: &clap::ArgMatches) -> Account {
    Account {
        name: sub
            .get_one::<String>("name")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.name),
        currency: sub
            .get_one::<String>("currency")
            .map(|s| s.trim().to_uppercase())
            .unwrap_or(current.currency),
        id: current.id,
    }
}

fn edit(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let updated = edited_account(require_account(store, id)?, sub);
    if updated.name.is_empty() {
        bail!("Book name must not be empty");
    }
    let changed = store.update_account(&updated)?;
    tracing::debug!(id, changed, "updated book");
    println!(
        "Updated book {}: '{}' ({})",
        id, updated.name, updated.currency
    );
    Ok(())
}

fn remove(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let account = require_account(store, id)?;
    let records = store.record_count(Some(id))?;
    if !sub.get_flag("yes") {
        bail!(
            "Deleting book '{}' also deletes its {} record(s) and cannot be undone; re-run with --yes",
            account.name,
            records
        );
    }
    if let Err(err) = store.delete_account(id) {
        tracing::warn!(id, error = ?err, "failed to delete book");
        return Err(err).with_context(|| format!("Could not delete the book '{}'", account.name));
    }
    println!("Deleted book '{}' and {} record(s)", account.name, records);
    Ok(())
}
