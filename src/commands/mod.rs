// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod chart;
pub mod generate;
pub mod summarize;

use anyhow::Result;
use chrono::NaiveDate;

use crate::calendar::Frequency;
use crate::utils::parse_date;

/// Shared `--freq` parsing: the codes from [`Frequency`], or "none" for a
/// single whole-range period.
pub(crate) fn freq_arg(m: &clap::ArgMatches) -> Result<Option<Frequency>> {
    let raw = m.get_one::<String>("freq").map(String::as_str).unwrap_or("MS");
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Ok(Some(raw.parse()?))
}

pub(crate) fn date_arg(m: &clap::ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(name).map(|s| parse_date(s)).transpose()
}
