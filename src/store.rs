// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-collection persistence.
//!
//! `load` reads every transaction, the settings and every goal; `save` swaps all
//! three in a single SQLite transaction. There are no per-row updates.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::FinanceError;
use crate::models::{SavingsGoal, Transaction, UserSettings};

pub const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub settings: UserSettings,
    pub goals: Vec<SavingsGoal>,
}

/// Exact id match first, then a unique prefix (ids are long UUIDs).
fn find_index<'a, I>(ids: I, key: &str) -> Option<usize>
where
    I: Iterator<Item = &'a str> + Clone,
{
    if let Some(i) = ids.clone().position(|id| id == key) {
        return Some(i);
    }
    if key.is_empty() {
        return None;
    }
    let mut hits = ids.enumerate().filter(|(_, id)| id.starts_with(key));
    match (hits.next(), hits.next()) {
        (Some((i, _)), None) => Some(i),
        _ => None,
    }
}

impl Snapshot {
    fn transaction_index(&self, id: &str) -> Result<usize, FinanceError> {
        find_index(self.transactions.iter().map(|t| t.id.as_str()), id)
            .ok_or_else(|| FinanceError::TransactionNotFound(id.to_string()))
    }

    fn goal_index(&self, id: &str) -> Result<usize, FinanceError> {
        find_index(self.goals.iter().map(|g| g.id.as_str()), id)
            .ok_or_else(|| FinanceError::GoalNotFound(id.to_string()))
    }

    pub fn transaction(&self, id: &str) -> Result<&Transaction, FinanceError> {
        Ok(&self.transactions[self.transaction_index(id)?])
    }

    /// Replaces the transaction with the same id, or appends it.
    pub fn upsert_transaction(&mut self, t: Transaction) {
        match self.transactions.iter_mut().find(|x| x.id == t.id) {
            Some(slot) => *slot = t,
            None => self.transactions.push(t),
        }
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction, FinanceError> {
        let i = self.transaction_index(id)?;
        Ok(self.transactions.remove(i))
    }

    pub fn goal_mut(&mut self, id: &str) -> Result<&mut SavingsGoal, FinanceError> {
        let i = self.goal_index(id)?;
        Ok(&mut self.goals[i])
    }

    pub fn remove_goal(&mut self, id: &str) -> Result<SavingsGoal, FinanceError> {
        let i = self.goal_index(id)?;
        Ok(self.goals.remove(i))
    }
}

fn parse_stored_decimal(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, s))
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn load_settings(conn: &Connection) -> Result<UserSettings> {
    let mut settings = UserSettings::default();
    if let Some(v) = get_setting(conn, "savings_goal")? {
        settings.savings_goal = parse_stored_decimal(&v, "savings goal")?;
    }
    if let Some(v) = get_setting(conn, "user_name")? {
        settings.user_name = v;
    }
    if let Some(v) = get_setting(conn, "age")? {
        settings.age = v;
    }
    if let Some(v) = get_setting(conn, "profession")? {
        settings.profession = v;
    }
    Ok(settings)
}

fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, type, frequency, category, date
         FROM transactions ORDER BY position, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let amount: String = r.get(2)?;
        let kind: String = r.get(3)?;
        let freq: String = r.get(4)?;
        let date: String = r.get(6)?;
        out.push(Transaction {
            amount: parse_stored_decimal(&amount, "amount")?,
            r#type: kind.parse()?,
            frequency: freq.parse()?,
            description: r.get(1)?,
            category: r.get(5)?,
            date: NaiveDateTime::parse_from_str(&date, TS_FORMAT)
                .with_context(|| format!("Invalid date '{}' on transaction {}", date, id))?,
            id,
        });
    }
    Ok(out)
}

fn load_goals(conn: &Connection) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, current_amount, deadline
         FROM goals ORDER BY position, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let target: String = r.get(2)?;
        let current: String = r.get(3)?;
        let deadline: Option<String> = r.get(4)?;
        let deadline = match deadline {
            Some(d) => Some(
                NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .with_context(|| format!("Invalid goal deadline '{}'", d))?,
            ),
            None => None,
        };
        out.push(SavingsGoal {
            id: r.get(0)?,
            name: r.get(1)?,
            target_amount: parse_stored_decimal(&target, "goal target")?,
            current_amount: parse_stored_decimal(&current, "goal amount")?,
            deadline,
        });
    }
    Ok(out)
}

pub fn load(conn: &Connection) -> Result<Snapshot> {
    let snapshot = Snapshot {
        transactions: load_transactions(conn)?,
        settings: load_settings(conn)?,
        goals: load_goals(conn)?,
    };
    debug!(
        transactions = snapshot.transactions.len(),
        goals = snapshot.goals.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

pub fn save(conn: &Connection, snapshot: &Snapshot) -> Result<()> {
    let tx = conn
        .unchecked_transaction()
        .context("Failed to begin save")?;

    tx.execute("DELETE FROM transactions", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(id, description, amount, type, frequency, category, date, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for (pos, t) in snapshot.transactions.iter().enumerate() {
            stmt.execute(params![
                t.id,
                t.description,
                t.amount.to_string(),
                t.r#type.as_str(),
                t.frequency.as_str(),
                t.category,
                t.date.format(TS_FORMAT).to_string(),
                pos as i64,
            ])?;
        }
    }

    let s = &snapshot.settings;
    for (key, value) in [
        ("savings_goal", s.savings_goal.to_string()),
        ("user_name", s.user_name.clone()),
        ("age", s.age.clone()),
        ("profession", s.profession.clone()),
    ] {
        tx.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
    }

    tx.execute("DELETE FROM goals", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO goals(id, name, target_amount, current_amount, deadline, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (pos, g) in snapshot.goals.iter().enumerate() {
            stmt.execute(params![
                g.id,
                g.name,
                g.target_amount.to_string(),
                g.current_amount.to_string(),
                g.deadline.map(|d| d.to_string()),
                pos as i64,
            ])?;
        }
    }

    tx.commit().context("Failed to commit save")?;
    debug!(
        transactions = snapshot.transactions.len(),
        goals = snapshot.goals.len(),
        "snapshot saved"
    );
    Ok(())
}
