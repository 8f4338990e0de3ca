// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use safespend::models::{Frequency, SavingsGoal, Transaction, TransactionType, UserSettings};
use safespend::store::{self, Snapshot};
use safespend::{db, error::FinanceError};
use tempfile::tempdir;

fn sample() -> Snapshot {
    Snapshot {
        transactions: vec![
            Transaction {
                id: "b7c1d7e2-0001".into(),
                description: "Rent".into(),
                amount: "1200.00".parse().unwrap(),
                r#type: TransactionType::Expense,
                frequency: Frequency::Recurring,
                category: "Housing".into(),
                date: NaiveDateTime::parse_from_str("2025-06-01T08:15:00", "%Y-%m-%dT%H:%M:%S")
                    .unwrap(),
            },
            Transaction {
                id: "a0f3e9c4-0002".into(),
                description: "Coffee".into(),
                amount: "3.75".parse().unwrap(),
                r#type: TransactionType::Expense,
                frequency: Frequency::Variable,
                category: "Food".into(),
                date: NaiveDateTime::parse_from_str(
                    "2025-06-02T07:45:12.250",
                    "%Y-%m-%dT%H:%M:%S%.f",
                )
                .unwrap(),
            },
        ],
        settings: UserSettings {
            savings_goal: "450.5".parse().unwrap(),
            user_name: "Ana".into(),
            age: "31".into(),
            profession: "Nurse".into(),
        },
        goals: vec![SavingsGoal {
            id: "goal-1".into(),
            name: "Holiday".into(),
            target_amount: "1800".parse().unwrap(),
            current_amount: "200".parse().unwrap(),
            deadline: NaiveDate::from_ymd_opt(2025, 12, 20),
        }],
    }
}

#[test]
fn fresh_database_loads_defaults() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let snap = store::load(&conn).unwrap();
    assert!(snap.transactions.is_empty());
    assert!(snap.goals.is_empty());
    assert_eq!(snap.settings, UserSettings::default());
    assert_eq!(snap.settings.savings_goal, Decimal::ZERO);
}

#[test]
fn saved_snapshot_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("safespend.sqlite");
    let snap = sample();
    {
        let conn = Connection::open(&path).unwrap();
        db::init_schema(&conn).unwrap();
        store::save(&conn, &snap).unwrap();
    }
    let conn = Connection::open(&path).unwrap();
    db::init_schema(&conn).unwrap();
    let loaded = store::load(&conn).unwrap();
    // insertion order is kept, not id order
    assert_eq!(loaded, snap);
}

#[test]
fn save_replaces_whole_collections() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut snap = sample();
    store::save(&conn, &snap).unwrap();

    snap.remove_transaction("b7c1").unwrap();
    snap.goals.clear();
    snap.settings.user_name = "Ana Maria".into();
    store::save(&conn, &snap).unwrap();

    let loaded = store::load(&conn).unwrap();
    assert_eq!(loaded.transactions.len(), 1);
    assert_eq!(loaded.transactions[0].description, "Coffee");
    assert!(loaded.goals.is_empty());
    assert_eq!(loaded.settings.user_name, "Ana Maria");
}

#[test]
fn upsert_keeps_position_and_replaces_fields() {
    let mut snap = sample();
    let mut edited = snap.transactions[0].clone();
    edited.amount = "1250".parse().unwrap();
    snap.upsert_transaction(edited);
    assert_eq!(snap.transactions.len(), 2);
    assert_eq!(snap.transactions[0].amount, "1250".parse::<Decimal>().unwrap());
}

#[test]
fn lookup_by_prefix_must_be_unique() {
    let mut snap = sample();
    snap.transactions[1].id = "b7c1d7e2-0003".into();
    assert_eq!(
        snap.transaction("b7c1"),
        Err(FinanceError::TransactionNotFound("b7c1".into()))
    );
    assert_eq!(snap.transaction("b7c1d7e2-0003").unwrap().description, "Coffee");
    assert!(snap.goal_mut("goal").is_ok());
    assert!(snap.remove_goal("missing").is_err());
}

#[test]
fn corrupt_amount_is_reported_with_context() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(id, description, amount, type, frequency, category, date, position)
         VALUES ('x', 'bad', 'abc', 'expense', 'variable', 'Food', '2025-06-01T00:00:00', 0)",
        [],
    )
    .unwrap();
    let err = store::load(&conn).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid amount 'abc'"));
}
