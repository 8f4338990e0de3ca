// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::commands::transactions::short_id;
use crate::goals::{create_goal, DepositAmount, NewGoal};
use crate::models::SavingsGoal;
use crate::store;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_date, parse_money, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let g = add(conn, sub)?;
            println!(
                "Goal '{}' created: target {} (id {})",
                g.name,
                fmt_money(&g.target_amount),
                short_id(&g.id)
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("deposit", sub)) => {
            let g = deposit(conn, sub)?;
            println!(
                "'{}' now at {} of {} ({})",
                g.name,
                fmt_money(&g.current_amount),
                fmt_money(&g.target_amount),
                fmt_percent(&g.progress())
            );
            if g.is_reached() {
                println!("Goal reached!");
            }
        }
        Some(("delete", sub)) => {
            let g = delete(conn, sub)?;
            println!("Deleted goal '{}'", g.name);
        }
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<SavingsGoal> {
    let new = NewGoal {
        name: sub
            .get_one::<String>("name")
            .context("--name is required")?
            .to_string(),
        target_amount: parse_money(sub.get_one::<String>("target").context("--target is required")?)?,
        current_amount: sub
            .get_one::<String>("current")
            .map(|s| parse_money(s))
            .transpose()?,
        deadline: sub
            .get_one::<String>("deadline")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    let goal = create_goal(new)?;
    let mut snap = store::load(conn)?;
    snap.goals.push(goal.clone());
    store::save(conn, &snap)?;
    info!(id = %goal.id, "goal created");
    Ok(goal)
}

pub fn deposit(conn: &Connection, sub: &clap::ArgMatches) -> Result<SavingsGoal> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let raw = parse_money(sub.get_one::<String>("amount").context("--amount is required")?)?;
    // validated before the goal is even looked up
    let amount = DepositAmount::new(raw)?;

    let mut snap = store::load(conn)?;
    let goal = snap.goal_mut(id.trim())?;
    goal.deposit(amount);
    let updated = goal.clone();
    store::save(conn, &snap)?;
    info!(id = %updated.id, amount = %raw, "deposit recorded");
    Ok(updated)
}

pub fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<SavingsGoal> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let mut snap = store::load(conn)?;
    let removed = snap.remove_goal(id.trim())?;
    store::save(conn, &snap)?;
    info!(id = %removed.id, "goal deleted");
    Ok(removed)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goals = store::load(conn)?.goals;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = goals
        .iter()
        .map(|g| {
            vec![
                short_id(&g.id).to_string(),
                g.name.clone(),
                fmt_money(&g.current_amount),
                fmt_money(&g.target_amount),
                fmt_percent(&g.progress()),
                fmt_money(&g.remaining()),
                g.deadline.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Goal", "Saved", "Target", "Progress", "Remaining", "Deadline"],
            rows,
        )
    );
    Ok(())
}
