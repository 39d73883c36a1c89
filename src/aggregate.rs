// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calendar::Frequency;
use crate::models::Transaction;

/// Which keys to group on. The sums for the ungrouped whole-range view are
/// a plain fold and do not go through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Period,
    Category,
    PeriodAndCategory,
}

impl GroupBy {
    fn uses_category(self) -> bool {
        matches!(self, GroupBy::Category | GroupBy::PeriodAndCategory)
    }

    fn uses_period(self) -> bool {
        matches!(self, GroupBy::Period | GroupBy::PeriodAndCategory)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("category grouping requested but no transaction carries a category")]
    MissingCategory,
}

/// A grouped sum. `period` is set for period groupings, `category` for
/// category groupings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedRow {
    pub period: Option<NaiveDate>,
    pub category: Option<String>,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Group transactions and sum income/expense per group.
///
/// Income is `max(amount, 0)`, expense is `max(-amount, 0)`, so a zero
/// amount lands in neither bucket. With no frequency the whole input is a
/// single period labeled by its earliest date. Only categories present in
/// the input produce rows, and rows come out ordered by period start then
/// category label.
pub fn aggregate(
    transactions: &[Transaction],
    group_by: GroupBy,
    freq: Option<Frequency>,
) -> Result<Vec<GroupedRow>, AggregateError> {
    if group_by.uses_category() && !transactions.iter().any(|t| t.category.is_some()) {
        return Err(AggregateError::MissingCategory);
    }

    let range_start = transactions.iter().map(|t| t.date).min();

    let mut groups: BTreeMap<(Option<NaiveDate>, Option<String>), (Decimal, Decimal)> =
        BTreeMap::new();
    for t in transactions {
        let category = if group_by.uses_category() {
            match &t.category {
                Some(c) => Some(c.clone()),
                // uncategorized rows drop out of category groupings
                None => continue,
            }
        } else {
            None
        };
        let period = if group_by.uses_period() {
            Some(match freq {
                Some(f) => f.period_start(t.date),
                None => range_start.unwrap_or(t.date),
            })
        } else {
            None
        };

        let income = t.amount.max(Decimal::ZERO);
        let expense = (-t.amount).max(Decimal::ZERO);
        let entry = groups
            .entry((period, category))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += income;
        entry.1 += expense;
    }

    Ok(groups
        .into_iter()
        .map(|((period, category), (income, expense))| GroupedRow {
            period,
            category,
            income,
            expense,
            balance: income - expense,
        })
        .collect())
}
