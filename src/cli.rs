// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .allow_hyphen_values(true)
        .help("Signed amount in the book's currency; negative for money out")
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Confirm the deletion; it cannot be undone")
}

pub fn build_cli() -> Command {
    Command::new("controlmoney")
        .version(clap::crate_version!())
        .about("Personal bookkeeping: books, dated records, and balances")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("CONTROLMONEY_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("memory")
                .long("memory")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Use a throwaway in-memory database (overrides --db)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug diagnostics to stderr"),
        )
        .subcommand(Command::new("init").about("Create the database schema"))
        .subcommand(
            Command::new("book")
                .about("Manage books")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Create a book")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("currency").required(true)),
                )
                .subcommand(json_args(Command::new("list").about("List books")))
                .subcommand(
                    Command::new("edit")
                        .about("Rename a book or change its currency")
                        .arg(id_arg("id", "Book id"))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("currency").long("currency"))
                        .group(
                            ArgGroup::new("changes")
                                .args(["name", "currency"])
                                .multiple(true)
                                .required(true),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a book and all of its records")
                        .arg(id_arg("id", "Book id"))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("record")
                .about("Manage records")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("book")
                                .long("book")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(amount_arg().required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List a book's records, newest first")
                        .arg(id_arg("book", "Book id")),
                ))
                .subcommand(json_args(
                    Command::new("show")
                        .about("Show one record")
                        .arg(id_arg("id", "Record id")),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Change a record's date, amount, or description")
                        .arg(id_arg("id", "Record id"))
                        .arg(Arg::new("date").long("date"))
                        .arg(amount_arg())
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("clear-description")
                                .long("clear-description")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("description"),
                        )
                        .group(
                            ArgGroup::new("changes")
                                .args(["date", "amount", "description", "clear-description"])
                                .multiple(true)
                                .required(true),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a record")
                        .arg(id_arg("id", "Record id"))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Balances per book and the most recent records")
                .arg(
                    Arg::new("recent")
                        .long("recent")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as pretty JSON"),
                ),
        )
        .subcommand(Command::new("doctor").about("Check database integrity"))
}
