// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rusqlite::Connection;
use rust_decimal::Decimal;
use safespend::models::{Frequency, Transaction, TransactionType};
use safespend::summary::BudgetHealth;
use safespend::{cli, commands, db, error::FinanceError, store};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-06-10T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["safespend"];
    argv.extend_from_slice(args);
    cli::build_cli().get_matches_from(argv)
}

fn tx(conn: &Connection, args: &[&str]) -> anyhow::Result<Transaction> {
    let mut argv = vec!["tx"];
    argv.extend_from_slice(args);
    let m = matches(&argv);
    let (_, tx_m) = m.subcommand().unwrap();
    match tx_m.subcommand() {
        Some(("add", sub)) => commands::transactions::add(conn, sub, now()),
        Some(("edit", sub)) => commands::transactions::edit(conn, sub),
        Some(("delete", sub)) => commands::transactions::delete(conn, sub),
        _ => panic!("unexpected tx subcommand"),
    }
}

fn list(conn: &Connection, args: &[&str]) -> Vec<Transaction> {
    let mut argv = vec!["tx", "list"];
    argv.extend_from_slice(args);
    let m = matches(&argv);
    let (_, tx_m) = m.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    commands::transactions::query_rows(conn, list_m, now()).unwrap()
}

fn seed(conn: &Connection) {
    for args in [
        &["add", "-d", "Salary", "-a", "3000", "-t", "income", "-f", "recurring", "-c", "Salary", "--date", "2025-06-05"][..],
        &["add", "-d", "Rent", "-a", "1000", "-t", "expense", "-f", "recurring", "-c", "Housing", "--date", "2025-06-01T08:00"][..],
        &["add", "-d", "Groceries", "-a", "200", "-t", "expense", "-c", "Food", "--date", "2025-06-08 19:30"][..],
        &["add", "-d", "Old bill", "-a", "80", "-t", "expense", "--date", "2025-05-28"][..],
    ] {
        tx(conn, args).unwrap();
    }
}

#[test]
fn add_defaults_to_variable_other_and_now() {
    let conn = setup();
    let t = tx(&conn, &["add", "-d", "Snack", "-a", "4,50", "-t", "expense"]).unwrap();
    assert_eq!(t.frequency, Frequency::Variable);
    assert_eq!(t.category, "Other");
    assert_eq!(t.date, now());
    assert_eq!(t.amount, "4.50".parse::<Decimal>().unwrap());
    assert_eq!(store::load(&conn).unwrap().transactions, vec![t]);
}

#[test]
fn add_rejects_non_positive_amounts() {
    let conn = setup();
    let err = tx(&conn, &["add", "-d", "Refund", "-a", "-10", "-t", "expense"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::InvalidAmount(_))
    ));
    assert!(tx(&conn, &["add", "-d", "Zero", "-a", "0", "-t", "income"]).is_err());
    assert!(store::load(&conn).unwrap().transactions.is_empty());
}

#[test]
fn list_defaults_to_current_month_newest_first() {
    let conn = setup();
    seed(&conn);
    let rows = list(&conn, &[]);
    let names: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, ["Groceries", "Salary", "Rent"]);

    let may = list(&conn, &["--month", "2025-05"]);
    assert_eq!(may.len(), 1);
    assert_eq!(may[0].description, "Old bill");
}

#[test]
fn list_view_and_limit() {
    let conn = setup();
    seed(&conn);
    let fixed = list(&conn, &["--view", "fixed"]);
    assert_eq!(fixed.len(), 1);
    assert_eq!(fixed[0].description, "Rent");

    let limited = list(&conn, &["--limit", "2"]);
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].description, "Groceries");
}

#[test]
fn edit_replaces_fields_and_keeps_id() {
    let conn = setup();
    let t = tx(&conn, &["add", "-d", "Gym", "-a", "45", "-t", "expense", "-c", "Health"]).unwrap();
    let edited = tx(
        &conn,
        &["edit", "--id", &t.id[..8], "-a", "49.90", "-f", "recurring"],
    )
    .unwrap();
    assert_eq!(edited.id, t.id);
    assert_eq!(edited.description, "Gym");
    assert_eq!(edited.frequency, Frequency::Recurring);
    assert_eq!(edited.r#type, TransactionType::Expense);

    let stored = store::load(&conn).unwrap().transactions;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], edited);
}

#[test]
fn delete_is_immediate() {
    let conn = setup();
    let t = tx(&conn, &["add", "-d", "Taxi", "-a", "18", "-t", "expense"]).unwrap();
    let removed = tx(&conn, &["delete", "--id", &t.id]).unwrap();
    assert_eq!(removed, t);
    assert!(store::load(&conn).unwrap().transactions.is_empty());

    let again = tx(&conn, &["delete", "--id", &t.id]).unwrap_err();
    assert!(matches!(
        again.downcast_ref::<FinanceError>(),
        Some(FinanceError::TransactionNotFound(_))
    ));
}

#[test]
fn summary_command_uses_stored_settings() {
    let conn = setup();
    seed(&conn);
    let m = matches(&["settings", "set", "--savings-goal", "300", "--name", "Ana"]);
    let (_, settings_m) = m.subcommand().unwrap();
    let (_, set_m) = settings_m.subcommand().unwrap();
    commands::settings::set(&conn, set_m).unwrap();

    let m = matches(&["summary"]);
    let (_, summary_m) = m.subcommand().unwrap();
    let report = commands::summary::build(&conn, summary_m, now()).unwrap();
    assert_eq!(report.month, "2025-06");
    let s = &report.summary;
    assert_eq!(s.total_income, Decimal::from(3000));
    assert_eq!(s.total_fixed_expenses, Decimal::from(1000));
    assert_eq!(s.total_variable_expenses, Decimal::from(200));
    assert_eq!(s.total_safe_to_spend, Decimal::from(1700));
    assert_eq!(s.days_remaining, 21);
    assert_eq!(report.health, BudgetHealth::Healthy);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["totalSafeToSpend"], "1700");
    assert_eq!(json["daysRemaining"], 21);
    assert_eq!(json["health"], "healthy");
}

#[test]
fn report_commands_follow_selected_month() {
    let conn = setup();
    seed(&conn);
    let m = matches(&["report", "breakdown", "--month", "2025-06"]);
    let (_, report_m) = m.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    let b = commands::reports::breakdown(&conn, sub, now()).unwrap();
    let cats: Vec<&str> = b.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(cats, ["Housing", "Food"]);

    let m = matches(&["report", "compare", "--month", "2025-05"]);
    let (_, report_m) = m.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    let c = commands::reports::compare(&conn, sub, now()).unwrap();
    assert_eq!(c.income, Decimal::ZERO);
    assert_eq!(c.expense, Decimal::from(80));
}

#[test]
fn date_only_entries_keep_the_time_they_were_typed() {
    let conn = setup();
    let add_at = |desc: &str, at: &str| {
        let m = matches(&["tx", "add", "-d", desc, "-a", "5", "-t", "expense", "--date", "2025-06-08"]);
        let (_, tx_m) = m.subcommand().unwrap();
        let (_, sub) = tx_m.subcommand().unwrap();
        let now = NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S").unwrap();
        commands::transactions::add(&conn, sub, now).unwrap()
    };
    let coffee = add_at("Coffee", "2025-06-10T09:00:00");
    let lunch = add_at("Lunch", "2025-06-10T13:30:00");
    assert_eq!(coffee.date.to_string(), "2025-06-08 09:00:00");
    assert_eq!(lunch.date.to_string(), "2025-06-08 13:30:00");

    let names: Vec<String> = list(&conn, &[]).into_iter().map(|t| t.description).collect();
    assert_eq!(names, ["Lunch", "Coffee"]);

    // editing the day alone keeps the recorded time
    let moved = tx(&conn, &["edit", "--id", &coffee.id, "--date", "2025-06-09"]).unwrap();
    assert_eq!(moved.date.to_string(), "2025-06-09 09:00:00");
}

#[test]
fn oversized_amounts_are_rejected() {
    let conn = setup();
    let err = tx(&conn, &["add", "-d", "Lottery", "-a", "1000000000001", "-t", "income"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::InvalidAmount(_))
    ));
    assert!(tx(&conn, &["add", "-d", "Max", "-a", "79228162514264337593543950335", "-t", "income"]).is_err());
    assert!(store::load(&conn).unwrap().transactions.is_empty());

    // the bound itself is still accepted
    let t = tx(&conn, &["add", "-d", "Big", "-a", "1000000000000", "-t", "income"]).unwrap();
    assert_eq!(t.amount, Decimal::from(1_000_000_000_000i64));

    let m = matches(&["settings", "set", "--savings-goal", "-5000000000000"]);
    let (_, settings_m) = m.subcommand().unwrap();
    let (_, set_m) = settings_m.subcommand().unwrap();
    let err = commands::settings::set(&conn, set_m).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinanceError>(),
        Some(FinanceError::InvalidAmount(_))
    ));
    assert_eq!(store::load(&conn).unwrap().settings.savings_goal, Decimal::ZERO);
}
