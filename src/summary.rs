// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::aggregate::{GroupBy, aggregate};
use crate::calendar::{DateSpan, Frequency};
use crate::models::{CategoryRow, PeriodCategoryRow, PeriodRow, Summary, TotalRow, Transaction};
use crate::utils::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizeOptions {
    pub freq: Option<Frequency>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Final uniform rounding; `None` leaves values untouched.
    pub decimals: Option<u32>,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            freq: Some(Frequency::MonthStart),
            start_date: None,
            end_date: None,
            decimals: Some(2),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("no transactions in the requested date range")]
    Empty,
}

/// Summarize a ledger into the four views.
///
/// Transactions are filtered to `[start_date, end_date]` inclusive
/// (defaulting to the ledger's own range) before anything else, so only
/// categories active inside the window produce rows. Ratio fields divide by
/// totals that can be zero; those come out as NaN rather than an error.
/// Rounding, when requested, is the very last step and never feeds back
/// into intermediate values.
pub fn summarize(
    transactions: &[Transaction],
    opts: &SummarizeOptions,
) -> Result<Summary, SummaryError> {
    let input_min = transactions.iter().map(|t| t.date).min();
    let input_max = transactions.iter().map(|t| t.date).max();
    let (Some(input_min), Some(input_max)) = (input_min, input_max) else {
        return Err(SummaryError::Empty);
    };

    let start_date = opts.start_date.unwrap_or(input_min);
    let end_date = opts.end_date.unwrap_or(input_max);

    let filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date >= start_date && t.date <= end_date)
        .cloned()
        .collect();
    if filtered.is_empty() {
        return Err(SummaryError::Empty);
    }

    let has_category = filtered.iter().any(|t| t.category.is_some());
    let span = DateSpan::new(start_date, end_date);

    // By none
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for t in &filtered {
        total_income += t.amount.max(Decimal::ZERO);
        total_expense += (-t.amount).max(Decimal::ZERO);
    }
    let total_balance = total_income - total_expense;
    let by_none = TotalRow {
        start_date,
        end_date,
        income: total_income,
        expense: total_expense,
        balance: total_balance,
        savings_pc: pct(total_balance, total_income),
    };

    // By period, chronological, with running totals. Periods partition the
    // range with no gaps: bins between the first and last period that saw no
    // transactions still get a zero row.
    let mut period_sums: Vec<(NaiveDate, Decimal, Decimal)> =
        aggregate(&filtered, GroupBy::Period, opts.freq)
            .unwrap_or_default()
            .into_iter()
            .map(|g| (g.period.unwrap_or(start_date), g.income, g.expense))
            .collect();
    if let Some(freq) = opts.freq {
        period_sums = fill_period_gaps(period_sums, freq);
    }
    let mut by_period = Vec::new();
    let mut cumulative_income = Decimal::ZERO;
    let mut cumulative_balance = Decimal::ZERO;
    for (date, income, expense) in period_sums {
        let balance = income - expense;
        cumulative_income += income;
        cumulative_balance += balance;
        by_period.push(PeriodRow {
            date,
            income,
            expense,
            balance,
            savings_pc: pct(balance, income),
            cumulative_income,
            cumulative_balance,
            cumulative_savings_pc: pct(cumulative_balance, cumulative_income),
        });
    }

    // By category, denominated by the whole-range totals
    let mut by_category = Vec::new();
    if has_category {
        for g in aggregate(&filtered, GroupBy::Category, opts.freq).unwrap_or_default() {
            let balance_f = to_f64(g.balance);
            by_category.push(CategoryRow {
                category: g.category.unwrap_or_default(),
                income: g.income,
                expense: g.expense,
                balance: g.balance,
                income_to_total_income_pc: pct(g.income, total_income),
                expense_to_total_income_pc: pct(g.expense, total_income),
                expense_to_total_expense_pc: pct(g.expense, total_expense),
                daily_avg_balance: balance_f / span.num_days() as f64,
                weekly_avg_balance: balance_f / span.num_weeks(),
                monthly_avg_balance: balance_f / span.num_months(),
                yearly_avg_balance: balance_f / span.num_years(),
            });
        }
    }

    // By period and category, denominated by that period's own totals
    let mut by_period_and_category = Vec::new();
    if has_category {
        let period_totals: BTreeMap<NaiveDate, (Decimal, Decimal)> = by_period
            .iter()
            .map(|p| (p.date, (p.income, p.expense)))
            .collect();
        for g in aggregate(&filtered, GroupBy::PeriodAndCategory, opts.freq).unwrap_or_default() {
            let date = g.period.unwrap_or(start_date);
            let (period_income, period_expense) = period_totals
                .get(&date)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            by_period_and_category.push(PeriodCategoryRow {
                date,
                category: g.category.unwrap_or_default(),
                income: g.income,
                expense: g.expense,
                balance: g.balance,
                income_to_period_income_pc: pct(g.income, period_income),
                expense_to_period_income_pc: pct(g.expense, period_income),
                expense_to_period_expense_pc: pct(g.expense, period_expense),
            });
        }
    }

    let mut summary = Summary {
        by_none,
        by_period,
        by_category,
        by_period_and_category,
    };
    if let Some(decimals) = opts.decimals {
        round_summary(&mut summary, decimals);
    }
    Ok(summary)
}

/// Insert zero sums for period bins with no transactions. Input comes in
/// ascending period-start order; each bin's successor is `freq.advance` of
/// its start.
fn fill_period_gaps(
    sums: Vec<(NaiveDate, Decimal, Decimal)>,
    freq: Frequency,
) -> Vec<(NaiveDate, Decimal, Decimal)> {
    let mut out = Vec::with_capacity(sums.len());
    let mut expected: Option<NaiveDate> = None;
    for (date, income, expense) in sums {
        if let Some(mut next) = expected {
            while next < date {
                out.push((next, Decimal::ZERO, Decimal::ZERO));
                next = freq.advance(next);
            }
        }
        expected = Some(freq.advance(date));
        out.push((date, income, expense));
    }
    out
}

/// `100 * num / den`, with NaN standing in for an undefined ratio.
fn pct(num: Decimal, den: Decimal) -> f64 {
    if den.is_zero() {
        f64::NAN
    } else {
        100.0 * to_f64(num) / to_f64(den)
    }
}

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(f64::NAN)
}

fn round_summary(summary: &mut Summary, decimals: u32) {
    let n = &mut summary.by_none;
    n.income = n.income.round_dp(decimals);
    n.expense = n.expense.round_dp(decimals);
    n.balance = n.balance.round_dp(decimals);
    n.savings_pc = round_to(n.savings_pc, decimals);

    for p in &mut summary.by_period {
        p.income = p.income.round_dp(decimals);
        p.expense = p.expense.round_dp(decimals);
        p.balance = p.balance.round_dp(decimals);
        p.savings_pc = round_to(p.savings_pc, decimals);
        p.cumulative_income = p.cumulative_income.round_dp(decimals);
        p.cumulative_balance = p.cumulative_balance.round_dp(decimals);
        p.cumulative_savings_pc = round_to(p.cumulative_savings_pc, decimals);
    }

    for c in &mut summary.by_category {
        c.income = c.income.round_dp(decimals);
        c.expense = c.expense.round_dp(decimals);
        c.balance = c.balance.round_dp(decimals);
        c.income_to_total_income_pc = round_to(c.income_to_total_income_pc, decimals);
        c.expense_to_total_income_pc = round_to(c.expense_to_total_income_pc, decimals);
        c.expense_to_total_expense_pc = round_to(c.expense_to_total_expense_pc, decimals);
        c.daily_avg_balance = round_to(c.daily_avg_balance, decimals);
        c.weekly_avg_balance = round_to(c.weekly_avg_balance, decimals);
        c.monthly_avg_balance = round_to(c.monthly_avg_balance, decimals);
        c.yearly_avg_balance = round_to(c.yearly_avg_balance, decimals);
    }

    for pc in &mut summary.by_period_and_category {
        pc.income = pc.income.round_dp(decimals);
        pc.expense = pc.expense.round_dp(decimals);
        pc.balance = pc.balance.round_dp(decimals);
        pc.income_to_period_income_pc = round_to(pc.income_to_period_income_pc, decimals);
        pc.expense_to_period_income_pc = round_to(pc.expense_to_period_income_pc, decimals);
        pc.expense_to_period_expense_pc = round_to(pc.expense_to_period_expense_pc, decimals);
    }
}
