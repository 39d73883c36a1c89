// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Writer};

use crate::models::{Transaction, sort_ledger};
use crate::utils::{parse_date, parse_date_with_format, parse_decimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    Amount,
    Text,
}

/// One column of the transaction schema.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// The transaction table schema. Header matching is case-insensitive and
/// whitespace-tolerant; columns not listed here are ignored.
pub const SCHEMA: [Field; 5] = [
    Field { name: "date", required: true, kind: FieldKind::Date },
    Field { name: "amount", required: true, kind: FieldKind::Amount },
    Field { name: "description", required: false, kind: FieldKind::Text },
    Field { name: "category", required: false, kind: FieldKind::Text },
    Field { name: "comment", required: false, kind: FieldKind::Text },
];

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
    #[error("row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },
}

/// Column indices resolved from a CSV header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: usize,
    pub description: Option<usize>,
    pub category: Option<usize>,
    pub comment: Option<usize>,
}

/// Resolve the schema against a header row. All missing required columns
/// are reported together.
pub fn map_columns(headers: &StringRecord) -> Result<ColumnMap, SchemaError> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let mut missing = Vec::new();
    for field in SCHEMA.iter().filter(|f| f.required) {
        if position(field.name).is_none() {
            missing.push(field.name);
        }
    }
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing));
    }

    Ok(ColumnMap {
        date: position("date").unwrap_or_default(),
        amount: position("amount").unwrap_or_default(),
        description: position("description"),
        category: position("category"),
        comment: position("comment"),
    })
}

/// Read and validate a CSV ledger. Dates parse with `date_format` when
/// given, otherwise a few common formats are tried. Categories are
/// lowercased; the result is sorted by date then amount.
pub fn read_transactions(
    path: impl AsRef<Path>,
    date_format: Option<&str>,
) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    let cols = map_columns(&headers)?;

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        // header is line 1
        let row = i + 2;
        out.push(parse_record(&rec, &cols, row, date_format)?);
    }
    sort_ledger(&mut out);
    Ok(out)
}

fn parse_record(
    rec: &StringRecord,
    cols: &ColumnMap,
    row: usize,
    date_format: Option<&str>,
) -> Result<Transaction, SchemaError> {
    let date_raw = rec.get(cols.date).unwrap_or("").trim();
    let date = match date_format {
        Some(fmt) => parse_date_with_format(date_raw, fmt),
        None => parse_date(date_raw),
    }
    .map_err(|_| SchemaError::InvalidDate { row, value: date_raw.to_string() })?;

    let amount_raw = rec.get(cols.amount).unwrap_or("").trim();
    let amount = parse_decimal(amount_raw)
        .map_err(|_| SchemaError::InvalidAmount { row, value: amount_raw.to_string() })?;

    let text_at = |idx: Option<usize>| {
        idx.and_then(|i| rec.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(Transaction {
        date,
        amount,
        description: text_at(cols.description),
        category: text_at(cols.category).map(|c| c.to_lowercase()),
        comment: text_at(cols.comment),
    })
}

/// Write a ledger back out as CSV with the full schema header.
pub fn write_transactions(path: impl AsRef<Path>, transactions: &[Transaction]) -> Result<()> {
    let path = path.as_ref();
    let mut wtr =
        Writer::from_path(path).with_context(|| format!("Create CSV {}", path.display()))?;
    wtr.write_record(SCHEMA.map(|f| f.name))?;
    for t in transactions {
        wtr.write_record([
            t.date.to_string(),
            t.amount.to_string(),
            t.description.clone().unwrap_or_default(),
            t.category.clone().unwrap_or_default(),
            t.comment.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse an in-memory CSV string; same validation as [`read_transactions`].
pub fn parse_transactions(csv_text: &str, date_format: Option<&str>) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = rdr.headers()?.clone();
    let cols = map_columns(&headers)?;

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        out.push(parse_record(&rec, &cols, i + 2, date_format)?);
    }
    sort_ledger(&mut out);
    Ok(out)
}
