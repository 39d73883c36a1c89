// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::Frequency;

/// A single ledger entry. `amount > 0` is income, `amount < 0` is expense;
/// zero counts as neither. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub comment: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            date,
            amount,
            description: None,
            category: None,
            comment: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Sort a ledger the way every consumer expects it: by date, then amount.
pub fn sort_ledger(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| (a.date, a.amount).cmp(&(b.date, b.amount)));
}

/// Add a repeating transaction to a ledger, one occurrence per period
/// boundary within `[start, end]` inclusive (defaults to the ledger's own
/// date range). Exact duplicate rows are dropped; the result is a new,
/// sorted ledger and the input is left untouched.
#[allow(clippy::too_many_arguments)]
pub fn insert_repeating(
    transactions: &[Transaction],
    amount: Decimal,
    freq: Frequency,
    description: Option<&str>,
    category: Option<&str>,
    comment: Option<&str>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions.to_vec();

    let start = start_date.or_else(|| transactions.iter().map(|t| t.date).min());
    let end = end_date.or_else(|| transactions.iter().map(|t| t.date).max());
    let (Some(start), Some(end)) = (start, end) else {
        return out;
    };

    // First boundary on or after the start date.
    let mut date = freq.period_start(start);
    if date < start {
        date = freq.advance(date);
    }
    while date <= end {
        out.push(Transaction {
            date,
            amount,
            description: description.map(str::to_string),
            category: category.map(str::to_string),
            comment: comment.map(str::to_string),
        });
        date = freq.advance(date);
    }

    sort_ledger(&mut out);
    out.dedup();
    out
}

/// Whole-range totals: the `by_none` view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalRow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub savings_pc: f64,
}

/// One row per period, in chronological order, with running totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRow {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub savings_pc: f64,
    pub cumulative_income: Decimal,
    pub cumulative_balance: Decimal,
    pub cumulative_savings_pc: f64,
}

/// One row per active category, with shares of the whole-range totals and
/// average balances normalized by the elapsed span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub income_to_total_income_pc: f64,
    pub expense_to_total_income_pc: f64,
    pub expense_to_total_expense_pc: f64,
    pub daily_avg_balance: f64,
    pub weekly_avg_balance: f64,
    pub monthly_avg_balance: f64,
    pub yearly_avg_balance: f64,
}

/// One row per period x active-category pair, with shares of that period's
/// own income and expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodCategoryRow {
    pub date: NaiveDate,
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub income_to_period_income_pc: f64,
    pub expense_to_period_income_pc: f64,
    pub expense_to_period_expense_pc: f64,
}

/// The four summary views produced by [`crate::summary::summarize`].
///
/// `by_category` and `by_period_and_category` are empty when the ledger
/// carries no category labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub by_none: TotalRow,
    pub by_period: Vec<PeriodRow>,
    pub by_category: Vec<CategoryRow>,
    pub by_period_and_category: Vec<PeriodCategoryRow>,
}
