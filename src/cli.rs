// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendline")
        .version(clap::crate_version!())
        .about("Track income and expenses; summarize by month and category")
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .global(true)
                .value_name("PATH")
                .help("Data file (defaults to $SPENDLINE_FILE, then the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(
            Command::new("add")
                .about("Record an income or expense dated today")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(["income", "expense"])
                        .ignore_case(true),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .required(true),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .short('a')
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(json_args(
            Command::new("summary").about("Total income, total expense and balance"),
        ))
        .subcommand(json_args(
            Command::new("analyze")
                .about("Monthly and per-category expense totals with charts")
                .arg(
                    Arg::new("no-chart")
                        .long("no-chart")
                        .action(ArgAction::SetTrue)
                        .help("Skip the terminal charts"),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_parser(value_parser!(usize))
                        .default_value("40")
                        .help("Chart width in columns"),
                ),
        ))
        .subcommand(json_args(
            Command::new("list")
                .about("List recorded transactions, newest first")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"])
                        .ignore_case(true),
                )
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Write all transactions to a CSV or JSON file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("import")
                .about("Append transactions from a Date,Category,Type,Amount CSV file")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(Command::new("menu").about("Interactive menu (default)"))
}
