// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tallybook::calendar::Frequency;
use tallybook::models::Transaction;
use tallybook::sample::{GenerateOptions, generate};
use tallybook::summary::{SummarizeOptions, SummaryError, summarize};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(date: &str, amount: i64, category: Option<&str>) -> Transaction {
    Transaction {
        date: d(date),
        amount: Decimal::from(amount),
        description: None,
        category: category.map(str::to_string),
        comment: None,
    }
}

fn no_freq() -> SummarizeOptions {
    SummarizeOptions {
        freq: None,
        ..SummarizeOptions::default()
    }
}

#[test]
fn whole_range_totals_without_frequency() {
    let ledger = vec![
        tx("2017-01-01", 100, Some("income")),
        tx("2017-01-15", -40, Some("food")),
    ];
    let s = summarize(&ledger, &no_freq()).unwrap();

    assert_eq!(s.by_none.income, Decimal::from(100));
    assert_eq!(s.by_none.expense, Decimal::from(40));
    assert_eq!(s.by_none.balance, Decimal::from(60));
    assert_eq!(s.by_none.savings_pc, 60.0);
    assert_eq!(s.by_none.start_date, d("2017-01-01"));
    assert_eq!(s.by_none.end_date, d("2017-01-15"));
}

#[test]
fn month_start_grouping_yields_one_period() {
    let ledger = vec![
        tx("2017-01-01", 100, Some("income")),
        tx("2017-01-15", -40, Some("food")),
    ];
    let opts = SummarizeOptions {
        freq: Some(Frequency::MonthStart),
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();

    assert_eq!(s.by_period.len(), 1);
    let p = &s.by_period[0];
    assert_eq!(p.date, d("2017-01-01"));
    assert_eq!(p.income, Decimal::from(100));
    assert_eq!(p.expense, Decimal::from(40));
    assert_eq!(p.balance, Decimal::from(60));
    assert_eq!(p.cumulative_balance, Decimal::from(60));
}

#[test]
fn uncategorized_ledger_gets_empty_category_views() {
    let ledger = vec![tx("2017-01-01", 100, None), tx("2017-02-15", -40, None)];
    let s = summarize(&ledger, &SummarizeOptions::default()).unwrap();

    assert!(s.by_category.is_empty());
    assert!(s.by_period_and_category.is_empty());
    assert_eq!(s.by_none.income, Decimal::from(100));
    assert_eq!(s.by_period.len(), 2);
}

#[test]
fn zero_amount_counts_as_neither_income_nor_expense() {
    let ledger = vec![tx("2017-01-01", 0, Some("misc")), tx("2017-01-02", 10, Some("pay"))];
    let s = summarize(&ledger, &no_freq()).unwrap();

    assert_eq!(s.by_none.income, Decimal::from(10));
    assert_eq!(s.by_none.expense, Decimal::ZERO);
    let misc = s.by_category.iter().find(|c| c.category == "misc").unwrap();
    assert_eq!(misc.income, Decimal::ZERO);
    assert_eq!(misc.expense, Decimal::ZERO);
}

#[test]
fn date_filtering_drops_unused_categories() {
    let ledger = vec![
        tx("2017-01-05", -10, Some("food")),
        tx("2017-06-05", -10, Some("travel")),
    ];
    let opts = SummarizeOptions {
        freq: None,
        start_date: Some(d("2017-01-01")),
        end_date: Some(d("2017-01-31")),
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();

    let categories: Vec<&str> = s.by_category.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(categories, ["food"]);
    assert!(
        s.by_period_and_category
            .iter()
            .all(|r| r.category != "travel")
    );
}

#[test]
fn category_views_reconcile_with_totals() {
    let ledger = generate(
        d("2017-01-01"),
        d("2017-12-31"),
        &GenerateOptions {
            seed: Some(42),
            ..GenerateOptions::default()
        },
    );
    let opts = SummarizeOptions {
        freq: Some(Frequency::QuarterStart),
        decimals: None,
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();

    let cat_income: Decimal = s.by_category.iter().map(|c| c.income).sum();
    let cat_expense: Decimal = s.by_category.iter().map(|c| c.expense).sum();
    assert_eq!(cat_income, s.by_none.income);
    assert_eq!(cat_expense, s.by_none.expense);

    for p in &s.by_period {
        let period_income: Decimal = s
            .by_period_and_category
            .iter()
            .filter(|r| r.date == p.date)
            .map(|r| r.income)
            .sum();
        assert_eq!(period_income, p.income);
    }
}

#[test]
fn percentage_columns_sum_to_hundred() {
    let ledger = generate(
        d("2017-01-01"),
        d("2017-12-31"),
        &GenerateOptions {
            seed: Some(7),
            ..GenerateOptions::default()
        },
    );
    let opts = SummarizeOptions {
        freq: Some(Frequency::QuarterStart),
        decimals: None,
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();

    let income_pc: f64 = s.by_category.iter().map(|c| c.income_to_total_income_pc).sum();
    let expense_pc: f64 = s
        .by_category
        .iter()
        .map(|c| c.expense_to_total_expense_pc)
        .sum();
    assert!((income_pc - 100.0).abs() < 1e-6, "income pc sum {}", income_pc);
    assert!((expense_pc - 100.0).abs() < 1e-6, "expense pc sum {}", expense_pc);

    for p in &s.by_period {
        if p.income > Decimal::ZERO {
            let period_pc: f64 = s
                .by_period_and_category
                .iter()
                .filter(|r| r.date == p.date)
                .map(|r| r.income_to_period_income_pc)
                .sum();
            assert!((period_pc - 100.0).abs() < 1e-6, "period pc sum {}", period_pc);
        }
    }
}

#[test]
fn quiet_periods_still_get_a_zero_row() {
    let ledger = vec![
        tx("2017-01-01", 100, Some("income")),
        tx("2017-03-01", -40, Some("food")),
    ];
    let opts = SummarizeOptions {
        freq: Some(Frequency::MonthStart),
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();

    // February saw no transactions but still partitions the range
    let dates: Vec<NaiveDate> = s.by_period.iter().map(|p| p.date).collect();
    assert_eq!(dates, [d("2017-01-01"), d("2017-02-01"), d("2017-03-01")]);

    let feb = &s.by_period[1];
    assert_eq!(feb.income, Decimal::ZERO);
    assert_eq!(feb.expense, Decimal::ZERO);
    assert_eq!(feb.balance, Decimal::ZERO);
    assert!(feb.savings_pc.is_nan());
    // running totals carry through unchanged
    assert_eq!(feb.cumulative_income, s.by_period[0].cumulative_income);
    assert_eq!(feb.cumulative_balance, s.by_period[0].cumulative_balance);
    assert_eq!(s.by_period[2].cumulative_balance, Decimal::from(60));

    // category pairs are unaffected: only occurring combinations
    assert!(s.by_period_and_category.iter().all(|r| r.date != d("2017-02-01")));
}

#[test]
fn cumulative_balance_is_a_prefix_sum() {
    let ledger = generate(
        d("2017-01-01"),
        d("2017-06-30"),
        &GenerateOptions {
            seed: Some(3),
            ..GenerateOptions::default()
        },
    );
    let opts = SummarizeOptions {
        decimals: None,
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();

    let mut running = Decimal::ZERO;
    for p in &s.by_period {
        running += p.balance;
        assert_eq!(p.cumulative_balance, running);
    }

    // Periods come out in chronological order
    for pair in s.by_period.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[test]
fn removing_a_category_from_the_input_removes_its_row() {
    let ledger = vec![
        tx("2017-01-01", 50, Some("pay")),
        tx("2017-01-10", -20, Some("food")),
        tx("2017-02-10", -30, Some("rent")),
    ];
    let without_rent: Vec<Transaction> = ledger
        .iter()
        .filter(|t| t.category.as_deref() != Some("rent"))
        .cloned()
        .collect();

    let s = summarize(&without_rent, &SummarizeOptions::default()).unwrap();
    assert!(s.by_category.iter().all(|c| c.category != "rent"));
    assert_eq!(s.by_category.len(), 2);
}

#[test]
fn zero_income_makes_savings_pc_undefined() {
    let ledger = vec![tx("2017-01-01", -40, Some("food"))];
    let s = summarize(&ledger, &no_freq()).unwrap();

    assert!(s.by_none.savings_pc.is_nan());
    assert!(s.by_period[0].savings_pc.is_nan());
    assert!(s.by_period[0].cumulative_savings_pc.is_nan());
}

#[test]
fn rounding_applies_to_every_view_last() {
    let ledger = vec![
        Transaction::new(d("2017-01-01"), "10.005".parse().unwrap()).with_category("pay"),
        Transaction::new(d("2017-01-02"), "-3.333".parse().unwrap()).with_category("food"),
    ];
    let opts = SummarizeOptions {
        freq: None,
        decimals: Some(2),
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();

    assert_eq!(s.by_none.expense, "3.33".parse::<Decimal>().unwrap());
    // savings_pc is derived from unrounded sums, then rounded once
    let expected: f64 = 100.0 * (10.005 - 3.333) / 10.005;
    assert_eq!(
        s.by_none.savings_pc,
        (expected * 100.0).round() / 100.0
    );
    for c in &s.by_category {
        assert_eq!(c.income, c.income.round_dp(2));
        assert_eq!(c.expense, c.expense.round_dp(2));
    }
}

#[test]
fn empty_range_is_an_error() {
    assert!(matches!(
        summarize(&[], &SummarizeOptions::default()),
        Err(SummaryError::Empty)
    ));

    let ledger = vec![tx("2017-03-01", 10, None)];
    let opts = SummarizeOptions {
        start_date: Some(d("2018-01-01")),
        end_date: Some(d("2018-12-31")),
        ..SummarizeOptions::default()
    };
    assert!(matches!(summarize(&ledger, &opts), Err(SummaryError::Empty)));
}

#[test]
fn summarize_leaves_the_input_untouched() {
    let ledger = vec![
        tx("2017-01-01", 100, Some("income")),
        tx("2017-01-15", -40, Some("food")),
    ];
    let before = ledger.clone();
    let _ = summarize(&ledger, &SummarizeOptions::default()).unwrap();
    assert_eq!(ledger, before);
}

#[test]
fn category_averages_use_fixed_span_ratios() {
    // 31-day January window
    let ledger = vec![
        tx("2017-01-01", 62, Some("pay")),
        tx("2017-01-31", 0, Some("pay")),
    ];
    let opts = SummarizeOptions {
        freq: None,
        decimals: None,
        ..SummarizeOptions::default()
    };
    let s = summarize(&ledger, &opts).unwrap();
    let pay = &s.by_category[0];

    let balance = pay.balance.to_f64().unwrap();
    assert_eq!(pay.daily_avg_balance, balance / 31.0);
    assert_eq!(pay.weekly_avg_balance, balance / (31.0 / 7.0));
    assert_eq!(pay.monthly_avg_balance, balance / (31.0 / (365.0 / 12.0)));
    assert_eq!(pay.yearly_avg_balance, balance / (31.0 / 365.0));
}
