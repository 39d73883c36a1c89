// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .version(crate_version!())
        .about("Personal-finance ledger summaries, charts, and sample data")
        .subcommand(
            Command::new("summarize")
                .about("Summarize a CSV ledger into totals, periods, and categories")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .required(true)
                        .help("Path to the transactions CSV"),
                )
                .arg(
                    Arg::new("freq")
                        .long("freq")
                        .default_value("MS")
                        .help("Period frequency: D, W, MS, QS, YS, or 'none'"),
                )
                .arg(Arg::new("start-date").long("start-date"))
                .arg(Arg::new("end-date").long("end-date"))
                .arg(
                    Arg::new("decimals")
                        .long("decimals")
                        .value_parser(value_parser!(u32))
                        .default_value("2")
                        .help("Decimal places for the final rounding pass"),
                )
                .arg(
                    Arg::new("no-round")
                        .long("no-round")
                        .action(ArgAction::SetTrue)
                        .help("Skip the final rounding pass"),
                )
                .arg(
                    Arg::new("date-format")
                        .long("date-format")
                        .help("Explicit chrono date format, e.g. %d/%m/%Y"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("generate")
                .about("Write a random sample ledger as CSV")
                .arg(Arg::new("start").long("start").required(true))
                .arg(Arg::new("end").long("end").required(true))
                .arg(Arg::new("out").long("out").short('o').required(true))
                .arg(
                    Arg::new("per-day")
                        .long("per-day")
                        .value_parser(value_parser!(u32))
                        .default_value("2"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Fixed RNG seed for reproducible output"),
                )
                .arg(
                    Arg::new("income-categories")
                        .long("income-categories")
                        .help("Comma-separated category pool for income rows"),
                )
                .arg(
                    Arg::new("expense-categories")
                        .long("expense-categories")
                        .help("Comma-separated category pool for expense rows"),
                ),
        )
        .subcommand(
            Command::new("chart")
                .about("Emit a chart-spec JSON for a summarized ledger")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .required(true)
                        .help("Path to the transactions CSV"),
                )
                .arg(Arg::new("freq").long("freq").default_value("MS"))
                .arg(Arg::new("start-date").long("start-date"))
                .arg(Arg::new("end-date").long("end-date"))
                .arg(Arg::new("date-format").long("date-format"))
                .arg(Arg::new("currency").long("currency").help("Currency label, e.g. NZD"))
                .arg(Arg::new("width").long("width").value_parser(value_parser!(u32)))
                .arg(Arg::new("height").long("height").value_parser(value_parser!(u32)))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Write the spec here instead of stdout"),
                ),
        )
}
