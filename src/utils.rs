// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::FinanceError;
use crate::summary::YearMonth;

const UA: &str = concat!(
    "safespend/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/safespend)"
);

pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, with `T` or a space, or a bare `YYYY-MM-DD`
/// which is paired with `time_of_day`.
pub fn parse_datetime(s: &str, time_of_day: NaiveTime) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD[THH:MM]", s))?;
    Ok(d.and_time(time_of_day))
}

pub fn parse_month(s: &str) -> Result<YearMonth> {
    Ok(s.parse::<YearMonth>()?)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    // a decimal comma is accepted as typed on many keyboards
    let norm = s.trim().replace(',', ".");
    norm.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Largest magnitude accepted for any amount typed in. Month totals stay far
/// from the `Decimal` range at this size.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Parses a signed amount no larger than [`MAX_AMOUNT`] in magnitude.
pub fn parse_money(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.abs() > MAX_AMOUNT {
        return Err(FinanceError::InvalidAmount(s.trim().to_string()).into());
    }
    Ok(d)
}

/// Parses a strictly positive amount.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_money(s)?;
    if d <= Decimal::ZERO {
        return Err(FinanceError::InvalidAmount(s.trim().to_string()).into());
    }
    Ok(d)
}

/// Two decimal places, half away from zero, with thousands separators.
pub fn fmt_money(d: &Decimal) -> String {
    let r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", r.abs());
    let (int, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if r.is_sign_negative() && !r.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac)
}

/// Renders a `[0, 1]` fraction as a percentage with one decimal.
pub fn fmt_percent(share: &Decimal) -> String {
    let pct = (*share * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", pct)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
