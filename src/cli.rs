// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .help("Month as YYYY-MM (defaults to the current month)")
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .required(required),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .short('a')
            .required(required)
            .allow_hyphen_values(true)
            .help("Positive amount; the sign comes from --type"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .short('t')
            .required(required)
            .value_parser(["income", "expense"]),
    )
    .arg(
        Arg::new("frequency")
            .long("frequency")
            .short('f')
            .value_parser(["recurring", "variable"])
            .help("recurring repeats every month; variable is a one-off (default: variable)"),
    )
    .arg(Arg::new("category").long("category").short('c'))
    .arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM (defaults to now)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("safespend")
        .version(clap::crate_version!())
        .about("Track income and expenses, see what is safe to spend today, and save toward goals")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging (RUST_LOG takes precedence)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record, edit and list transactions")
                .subcommand(tx_fields(Command::new("add").about("Record a transaction"), true))
                .subcommand(tx_fields(
                    Command::new("edit")
                        .about("Replace fields of an existing transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List a month's transactions, newest first")
                        .arg(month_arg())
                        .arg(
                            Arg::new("view")
                                .long("view")
                                .default_value("all")
                                .value_parser(["all", "income", "expenses", "fixed", "variable"]),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Monthly totals and today's safe-to-spend")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("settings")
                .about("Savings goal and profile")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("savings-goal")
                                .long("savings-goal")
                                .allow_hyphen_values(true)
                                .help("Amount to set aside every month"),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("age").long("age"))
                        .arg(Arg::new("profession").long("profession")),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("current").long("current"))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("deposit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(
                    Command::new("delete").arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Category breakdowns")
                .subcommand(json_flags(
                    Command::new("breakdown")
                        .about("Expenses by category")
                        .arg(month_arg())
                        .arg(
                            Arg::new("variable")
                                .long("variable")
                                .action(ArgAction::SetTrue)
                                .help("Only variable expenses"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("compare")
                        .about("Income against expenses")
                        .arg(month_arg()),
                )),
        )
        .subcommand(
            Command::new("advice")
                .about("Ask the AI coach for tips on this month")
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("categories")
                .about("Suggested categories")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                ),
        )
}
