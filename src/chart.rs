// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart-spec construction. The core emits a plain JSON description; the
//! rendering frontend is somebody else's problem.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Value, json};

use crate::models::Summary;

#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    /// Currency label folded into the y-axis title, e.g. "NZD".
    pub currency: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Income,
    Expense,
    Balance,
}

// ColorBrewer sequential scales, 3 through 6 classes.
const GNBU: [&[&str]; 4] = [
    &["#e0f3db", "#a8ddb5", "#43a2ca"],
    &["#f0f9e8", "#bae4bc", "#7bccc4", "#2b8cbe"],
    &["#f0f9e8", "#bae4bc", "#7bccc4", "#43a2ca", "#0868ac"],
    &["#f0f9e8", "#ccebc5", "#a8ddb5", "#7bccc4", "#43a2ca", "#0868ac"],
];

const ORRD: [&[&str]; 4] = [
    &["#fee8c8", "#fdbb84", "#e34a33"],
    &["#fef0d9", "#fdcc8a", "#fc8d59", "#d7301f"],
    &["#fef0d9", "#fdcc8a", "#fc8d59", "#e34a33", "#b30000"],
    &["#fef0d9", "#fdd49e", "#fdbb84", "#fc8d59", "#e34a33", "#b30000"],
];

/// `n` color strings for a series of the given kind: green-blues for
/// income, orange-reds for expense (darkest first), neutral grey otherwise.
/// At most 6 distinct colors; beyond that they repeat.
pub fn series_colors(kind: SeriesKind, n: usize) -> Vec<String> {
    let k = n.clamp(3, 6);
    let scale: Vec<String> = match kind {
        SeriesKind::Income => GNBU[k - 3].iter().rev().map(|s| s.to_string()).collect(),
        SeriesKind::Expense => ORRD[k - 3].iter().rev().map(|s| s.to_string()).collect(),
        SeriesKind::Balance => std::iter::repeat("#555".to_string()).take(k).collect(),
    };

    if n == 0 {
        Vec::new()
    } else if n < k {
        scale[..n].to_vec()
    } else {
        // repeat the scale to cover n
        scale.iter().cycle().take(n).cloned().collect()
    }
}

/// Build a chart description from a summary. Pure: same summary and
/// options in, same JSON out.
///
/// With categories, income and expense become two per-category stacked
/// column groups plus a balance line; without, three plain series.
pub fn chart_spec(summary: &Summary, opts: &ChartOptions) -> Value {
    let dates: Vec<String> = summary
        .by_period
        .iter()
        .map(|p| p.date.format("%Y-%m-%d").to_string())
        .collect();

    let y_title = match &opts.currency {
        Some(ccy) => format!("Money ({})", ccy),
        None => "Money".to_string(),
    };

    let mut chart = json!({"zoomType": "xy"});
    if let Some(w) = opts.width {
        chart["width"] = json!(w);
    }
    if let Some(h) = opts.height {
        chart["height"] = json!(h);
    }

    let stacked = !summary.by_period_and_category.is_empty();
    let series = if stacked {
        stacked_series(summary)
    } else {
        plain_series(summary)
    };

    let mut plot_options = json!({
        "column": {"pointPadding": 0, "borderWidth": 1, "borderColor": "#333333"}
    });
    if stacked {
        plot_options["series"] = json!({"stacking": "normal"});
    }

    json!({
        "lang": {"thousandsSep": ","},
        "chart": chart,
        "title": {"text": "Account Summary"},
        "xAxis": {"type": "category", "categories": dates},
        "yAxis": {"title": {"text": y_title}, "reversedStacks": false},
        "plotOptions": plot_options,
        "credits": {"enabled": false},
        "series": series,
    })
}

fn plain_series(summary: &Summary) -> Vec<Value> {
    let column = |name: &str, color: SeriesKind, data: Vec<Value>| {
        json!({
            "name": name,
            "type": if color == SeriesKind::Balance { "line" } else { "column" },
            "color": series_colors(color, 1)[0],
            "borderColor": "white",
            "data": data,
        })
    };
    vec![
        column(
            "Income",
            SeriesKind::Income,
            summary.by_period.iter().map(|p| dec(p.income)).collect(),
        ),
        column(
            "Expense",
            SeriesKind::Expense,
            summary.by_period.iter().map(|p| dec(p.expense)).collect(),
        ),
        column(
            "Balance",
            SeriesKind::Balance,
            summary.by_period.iter().map(|p| dec(p.balance)).collect(),
        ),
    ]
}

fn stacked_series(summary: &Summary) -> Vec<Value> {
    fn income_of(r: &crate::models::PeriodCategoryRow) -> Decimal {
        r.income
    }
    fn expense_of(r: &crate::models::PeriodCategoryRow) -> Decimal {
        r.expense
    }

    let mut series = Vec::new();
    let stacks: [(SeriesKind, &str, fn(&crate::models::PeriodCategoryRow) -> Decimal); 2] = [
        (SeriesKind::Income, "income", income_of),
        (SeriesKind::Expense, "expense", expense_of),
    ];

    for (kind, stack, value_of) in stacks {
        // Categories with anything in this stack, biggest first
        let mut totals: Vec<(String, Decimal)> = summary
            .by_category
            .iter()
            .map(|c| {
                let v = if kind == SeriesKind::Income { c.income } else { c.expense };
                (c.category.clone(), v)
            })
            .filter(|(_, v)| *v > Decimal::ZERO)
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let colors = series_colors(kind, totals.len());
        for ((category, _), color) in totals.into_iter().zip(colors) {
            let data: Vec<Value> = summary
                .by_period
                .iter()
                .map(|p| {
                    summary
                        .by_period_and_category
                        .iter()
                        .find(|r| r.date == p.date && r.category == category)
                        .map(|r| dec(value_of(r)))
                        .unwrap_or(Value::Null)
                })
                .collect();
            series.push(json!({
                "name": format!("{} {}", capitalize(stack), category),
                "type": "column",
                "stack": stack,
                "color": color,
                "borderColor": "white",
                "data": data,
            }));
        }
    }

    series.push(json!({
        "name": "Balance",
        "type": "line",
        "color": series_colors(SeriesKind::Balance, 1)[0],
        "borderColor": "white",
        "data": summary.by_period.iter().map(|p| dec(p.balance)).collect::<Vec<_>>(),
    }));

    series
}

fn dec(d: Decimal) -> Value {
    json!(d.to_f64().unwrap_or(0.0))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
