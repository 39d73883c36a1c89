// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::chart::{ChartOptions, chart_spec};
use crate::commands::{date_arg, freq_arg};
use crate::schema;
use crate::summary::{SummarizeOptions, summarize};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("input").unwrap().trim();
    let date_format = m.get_one::<String>("date-format").map(String::as_str);
    let transactions = schema::read_transactions(path, date_format)?;

    let opts = SummarizeOptions {
        freq: freq_arg(m)?,
        start_date: date_arg(m, "start-date")?,
        end_date: date_arg(m, "end-date")?,
        ..SummarizeOptions::default()
    };
    let summary = summarize(&transactions, &opts)?;

    let chart_opts = ChartOptions {
        currency: m.get_one::<String>("currency").cloned(),
        width: m.get_one::<u32>("width").copied(),
        height: m.get_one::<u32>("height").copied(),
    };
    let spec = serde_json::to_string_pretty(&chart_spec(&summary, &chart_opts))?;

    match m.get_one::<String>("out") {
        Some(out) => {
            let out = out.trim();
            std::fs::write(out, spec).with_context(|| format!("Write chart spec {}", out))?;
            println!("Wrote chart spec to {}", out);
        }
        None => println!("{}", spec),
    }
    Ok(())
}
