// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advice;
pub mod categories;
pub mod goals;
pub mod reports;
pub mod settings;
pub mod summary;
pub mod transactions;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::summary::YearMonth;
use crate::utils::parse_month;

/// `--month` if given, otherwise the month containing `now`.
pub fn selected_month(sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<YearMonth> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(YearMonth::of(now.date())),
    }
}

/// Wall-clock time in the local zone. Only command handlers read the clock.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
