// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Random sample-ledger generation, handy for demos and tests.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::models::Transaction;

pub const DEFAULT_INCOME_CATEGORIES: &[&str] =
    &["programming", "programming", "investing", "reiki"];

pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "food",
    "shelter",
    "shelter",
    "transport",
    "healthcare",
    "soil testing",
];

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Transactions per calendar day.
    pub per_day: u32,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            per_day: 2,
            seed: None,
            income_categories: DEFAULT_INCOME_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            expense_categories: DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Generate a sample ledger between two dates, inclusive. Amounts are
/// whole numbers uniform in [-70, 100); positive ones get a category from
/// the income list, the rest from the expense list. Descriptions and
/// comments are random hex strings.
pub fn generate(start: NaiveDate, end: NaiveDate, opts: &GenerateOptions) -> Vec<Transaction> {
    let mut rng: StdRng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = Vec::new();
    let mut date = start;
    while date <= end {
        for _ in 0..opts.per_day {
            let amount: i64 = rng.gen_range(-70..100);
            let pool = if amount > 0 {
                &opts.income_categories
            } else {
                &opts.expense_categories
            };
            let category = if pool.is_empty() {
                None
            } else {
                Some(pool[rng.gen_range(0..pool.len())].clone())
            };
            out.push(Transaction {
                date,
                amount: Decimal::from(amount),
                description: Some(format!("{:05x}", rng.r#gen::<u32>() & 0xf_ffff)),
                category,
                comment: Some(format!("{:010x}", rng.r#gen::<u64>() & 0xff_ffff_ffff)),
            });
        }
        date = date + Days::new(1);
    }
    out
}
