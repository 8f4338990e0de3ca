// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use tracing::info;
use uuid::Uuid;

use crate::commands::{local_now, selected_month};
use crate::history::{filter_view, View};
use crate::models::{Frequency, Transaction, TransactionType};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_datetime, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let now = local_now();
    match m.subcommand() {
        Some(("add", sub)) => {
            let t = add(conn, sub, now)?;
            println!(
                "Recorded {} {} '{}' on {} (id {})",
                t.r#type,
                fmt_money(&t.amount),
                t.description,
                t.date.format("%Y-%m-%d %H:%M"),
                short_id(&t.id)
            );
        }
        Some(("edit", sub)) => {
            let t = edit(conn, sub)?;
            println!("Updated '{}' (id {})", t.description, short_id(&t.id));
        }
        Some(("delete", sub)) => {
            let t = delete(conn, sub)?;
            println!("Deleted '{}' (id {})", t.description, short_id(&t.id));
        }
        Some(("list", sub)) => list(conn, sub, now)?,
        _ => {}
    }
    Ok(())
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn kind_arg(sub: &clap::ArgMatches) -> Result<Option<TransactionType>> {
    Ok(sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?)
}

fn frequency_arg(sub: &clap::ArgMatches) -> Result<Option<Frequency>> {
    Ok(sub
        .get_one::<String>("frequency")
        .map(|s| s.parse::<Frequency>())
        .transpose()?)
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<Transaction> {
    let description = sub
        .get_one::<String>("description")
        .context("--description is required")?
        .trim()
        .to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let r#type = kind_arg(sub)?.context("--type is required")?;
    let frequency = frequency_arg(sub)?.unwrap_or(Frequency::Variable);
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "Other".to_string());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s, now.time())?,
        None => now,
    };

    let t = Transaction {
        id: Uuid::new_v4().to_string(),
        description,
        amount,
        r#type,
        frequency,
        category,
        date,
    };

    let mut snap = store::load(conn)?;
    snap.upsert_transaction(t.clone());
    store::save(conn, &snap)?;
    info!(id = %t.id, kind = %t.r#type, "transaction recorded");
    Ok(t)
}

/// Re-saves the transaction under the same id with any given fields replaced.
pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let mut snap = store::load(conn)?;
    let mut t = snap.transaction(id.trim())?.clone();

    if let Some(d) = sub.get_one::<String>("description") {
        t.description = d.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        t.amount = parse_amount(a)?;
    }
    if let Some(k) = kind_arg(sub)? {
        t.r#type = k;
    }
    if let Some(f) = frequency_arg(sub)? {
        t.frequency = f;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        t.category = c.trim().to_string();
    }
    if let Some(d) = sub.get_one::<String>("date") {
        t.date = parse_datetime(d, t.date.time())?;
    }

    snap.upsert_transaction(t.clone());
    store::save(conn, &snap)?;
    info!(id = %t.id, "transaction updated");
    Ok(t)
}

pub fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let mut snap = store::load(conn)?;
    let removed = snap.remove_transaction(id.trim())?;
    store::save(conn, &snap)?;
    info!(id = %removed.id, "transaction deleted");
    Ok(removed)
}

fn list(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub, now)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let signed = r.signed_amount();
                let sign = if signed.is_sign_positive() { "+" } else { "" };
                vec![
                    short_id(&r.id).to_string(),
                    r.date.format("%Y-%m-%d %H:%M").to_string(),
                    r.description.clone(),
                    r.category.clone(),
                    r.frequency.to_string(),
                    format!("{}{}", sign, fmt_money(&signed)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Frequency", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<Transaction>> {
    let month = selected_month(sub, now)?;
    let view = match sub.get_one::<String>("view") {
        Some(v) => v.parse::<View>()?,
        None => View::All,
    };
    let snap = store::load(conn)?;
    let mut data: Vec<Transaction> = filter_view(&snap.transactions, month, view)
        .into_iter()
        .cloned()
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
