// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::breakdown::{
    expenses_by_category, income_vs_expense, variable_by_category, CategoryShare, IncomeVsExpense,
};
use crate::commands::{local_now, selected_month};
use crate::history::{filter_view, View};
use crate::store;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let now = local_now();
    match m.subcommand() {
        Some(("breakdown", sub)) => {
            let data = breakdown(conn, sub, now)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                if data.is_empty() {
                    println!("No expenses recorded for this month.");
                    return Ok(());
                }
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.category.clone(),
                            fmt_money(&c.amount),
                            fmt_percent(&c.share),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
            }
        }
        Some(("compare", sub)) => {
            let c = compare(conn, sub, now)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &c)? {
                let rows = vec![
                    vec![
                        "Income".to_string(),
                        fmt_money(&c.income),
                        fmt_percent(&c.income_ratio),
                    ],
                    vec![
                        "Expenses".to_string(),
                        fmt_money(&c.expense),
                        fmt_percent(&c.expense_ratio),
                    ],
                ];
                println!("{}", pretty_table(&["", "Amount", "Relative"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn breakdown(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<CategoryShare>> {
    let month = selected_month(sub, now)?;
    let snap = store::load(conn)?;
    let in_month = filter_view(&snap.transactions, month, View::All);
    Ok(if sub.get_flag("variable") {
        variable_by_category(in_month)
    } else {
        expenses_by_category(in_month)
    })
}

pub fn compare(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<IncomeVsExpense> {
    let month = selected_month(sub, now)?;
    let snap = store::load(conn)?;
    Ok(income_vs_expense(filter_view(
        &snap.transactions,
        month,
        View::All,
    )))
}
