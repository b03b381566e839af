// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use tracing::Level;

use controlmoney::{LedgerStore, StoreLocation, cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let store = if matches.get_flag("memory") {
        LedgerStore::in_memory()
    } else if let Some(path) = matches.get_one::<std::path::PathBuf>("db") {
        LedgerStore::new(StoreLocation::file(path))
    } else {
        LedgerStore::open_default()?
    };
    store
        .initialize()
        .with_context(|| format!("Open DB at {}", store.location()))?;
    tracing::debug!(location = %store.location(), "database ready");

    let outcome = match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", store.location());
            Ok(())
        }
        Some(("book", sub)) => commands::books::handle(&store, sub),
        Some(("record", sub)) => commands::records::handle(&store, sub),
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, sub),
        Some(("doctor", _)) => commands::doctor::handle(&store),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    store.close().context("Close DB")?;
    outcome
}
