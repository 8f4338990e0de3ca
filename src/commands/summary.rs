// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::{local_now, selected_month};
use crate::models::FinancialSummary;
use crate::store;
use crate::summary::{compute_summary, BudgetHealth};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub month: String,
    #[serde(flatten)]
    pub summary: FinancialSummary,
    pub health: BudgetHealth,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = build(conn, sub, local_now())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let s = &report.summary;
    let rows = vec![
        vec!["Income".to_string(), fmt_money(&s.total_income)],
        vec!["Fixed expenses".to_string(), fmt_money(&s.total_fixed_expenses)],
        vec![
            "Variable expenses".to_string(),
            fmt_money(&s.total_variable_expenses),
        ],
        vec!["Balance".to_string(), fmt_money(&s.balance)],
        vec!["Savings goal".to_string(), fmt_money(&s.savings_goal)],
        vec![
            "Free this month".to_string(),
            fmt_money(&s.total_safe_to_spend),
        ],
        vec!["Days remaining".to_string(), s.days_remaining.to_string()],
        vec![
            "Safe to spend today".to_string(),
            fmt_money(&s.daily_safe_to_spend),
        ],
    ];
    println!("{}", report.month);
    println!("{}", pretty_table(&["", "Amount"], rows));
    println!("{}", report.health.message());
    Ok(())
}

pub fn build(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<SummaryReport> {
    let month = selected_month(sub, now)?;
    let snap = store::load(conn)?;
    let summary = compute_summary(&snap.transactions, month, &snap.settings, now);
    let health = BudgetHealth::of(&summary);
    Ok(SummaryReport {
        month: month.to_string(),
        summary,
        health,
    })
}
