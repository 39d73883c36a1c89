// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::sample::{GenerateOptions, generate};
use crate::schema::write_transactions;
use crate::utils::parse_date;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(m.get_one::<String>("start").unwrap())?;
    let end = parse_date(m.get_one::<String>("end").unwrap())?;
    let out = m.get_one::<String>("out").unwrap().trim();

    let mut opts = GenerateOptions {
        per_day: *m.get_one::<u32>("per-day").unwrap_or(&2),
        seed: m.get_one::<u64>("seed").copied(),
        ..GenerateOptions::default()
    };
    if let Some(list) = m.get_one::<String>("income-categories") {
        opts.income_categories = split_categories(list);
    }
    if let Some(list) = m.get_one::<String>("expense-categories") {
        opts.expense_categories = split_categories(list);
    }

    let transactions = generate(start, end, &opts);
    write_transactions(out, &transactions)?;
    println!("Wrote {} sample transactions to {}", transactions.len(), out);
    Ok(())
}

fn split_categories(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
