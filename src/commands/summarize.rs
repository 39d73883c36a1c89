// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::{date_arg, freq_arg};
use crate::models::Summary;
use crate::schema;
use crate::summary::{SummarizeOptions, summarize};
use crate::utils::{fmt_ratio, maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("input").unwrap().trim();
    let date_format = m.get_one::<String>("date-format").map(String::as_str);
    let transactions = schema::read_transactions(path, date_format)?;

    let opts = SummarizeOptions {
        freq: freq_arg(m)?,
        start_date: date_arg(m, "start-date")?,
        end_date: date_arg(m, "end-date")?,
        decimals: if m.get_flag("no-round") {
            None
        } else {
            m.get_one::<u32>("decimals").copied()
        },
    };
    let summary = summarize(&transactions, &opts)?;

    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &summary)? {
        print_tables(&summary);
    }
    Ok(())
}

fn print_tables(s: &Summary) {
    let n = &s.by_none;
    println!("Totals");
    println!(
        "{}",
        pretty_table(
            &["Start", "End", "Income", "Expense", "Balance", "Savings %"],
            vec![vec![
                n.start_date.to_string(),
                n.end_date.to_string(),
                n.income.to_string(),
                n.expense.to_string(),
                n.balance.to_string(),
                fmt_ratio(n.savings_pc),
            ]],
        )
    );

    println!("By period");
    println!(
        "{}",
        pretty_table(
            &[
                "Period",
                "Income",
                "Expense",
                "Balance",
                "Savings %",
                "Cum. income",
                "Cum. balance",
                "Cum. savings %",
            ],
            s.by_period
                .iter()
                .map(|p| vec![
                    p.date.to_string(),
                    p.income.to_string(),
                    p.expense.to_string(),
                    p.balance.to_string(),
                    fmt_ratio(p.savings_pc),
                    p.cumulative_income.to_string(),
                    p.cumulative_balance.to_string(),
                    fmt_ratio(p.cumulative_savings_pc),
                ])
                .collect(),
        )
    );

    if s.by_category.is_empty() {
        return;
    }

    println!("By category");
    println!(
        "{}",
        pretty_table(
            &[
                "Category",
                "Income",
                "Expense",
                "Balance",
                "Inc/total inc %",
                "Exp/total inc %",
                "Exp/total exp %",
                "Daily avg",
                "Weekly avg",
                "Monthly avg",
                "Yearly avg",
            ],
            s.by_category
                .iter()
                .map(|c| vec![
                    c.category.clone(),
                    c.income.to_string(),
                    c.expense.to_string(),
                    c.balance.to_string(),
                    fmt_ratio(c.income_to_total_income_pc),
                    fmt_ratio(c.expense_to_total_income_pc),
                    fmt_ratio(c.expense_to_total_expense_pc),
                    fmt_ratio(c.daily_avg_balance),
                    fmt_ratio(c.weekly_avg_balance),
                    fmt_ratio(c.monthly_avg_balance),
                    fmt_ratio(c.yearly_avg_balance),
                ])
                .collect(),
        )
    );

    println!("By period and category");
    println!(
        "{}",
        pretty_table(
            &[
                "Period",
                "Category",
                "Income",
                "Expense",
                "Balance",
                "Inc/period inc %",
                "Exp/period inc %",
                "Exp/period exp %",
            ],
            s.by_period_and_category
                .iter()
                .map(|r| vec![
                    r.date.to_string(),
                    r.category.clone(),
                    r.income.to_string(),
                    r.expense.to_string(),
                    r.balance.to_string(),
                    fmt_ratio(r.income_to_period_income_pc),
                    fmt_ratio(r.expense_to_period_income_pc),
                    fmt_ratio(r.expense_to_period_expense_pc),
                ])
                .collect(),
        )
    );
}
