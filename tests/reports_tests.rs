// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use safespend::breakdown::{expenses_by_category, income_vs_expense, variable_by_category};
use safespend::history::{filter_view, most_recent, View};
use safespend::models::{Frequency, Transaction, TransactionType};
use safespend::summary::YearMonth;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(
    id: &str,
    kind: TransactionType,
    freq: Frequency,
    category: &str,
    amount: &str,
    date: &str,
) -> Transaction {
    Transaction {
        id: id.into(),
        description: id.into(),
        amount: dec(amount),
        r#type: kind,
        frequency: freq,
        category: category.into(),
        date: NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M").unwrap(),
    }
}

fn sample() -> Vec<Transaction> {
    use Frequency::*;
    use TransactionType::*;
    vec![
        tx("salary", Income, Recurring, "Salary", "3000", "2025-06-05T09:00"),
        tx("rent", Expense, Recurring, "Housing", "1200", "2025-06-01T08:00"),
        tx("lunch", Expense, Variable, "Food", "25", "2025-06-05T12:30"),
        tx("groceries", Expense, Variable, "Food", "75", "2025-06-05T18:00"),
        tx("cinema", Expense, Variable, "Leisure", "100", "2025-06-07T21:00"),
        tx("may-bus", Expense, Variable, "Transport", "40", "2025-05-30T07:00"),
    ]
}

fn june() -> YearMonth {
    YearMonth::new(2025, 6).unwrap()
}

#[test]
fn views_filter_and_sort_newest_first() {
    let txs = sample();
    let ids = |v: View| -> Vec<String> {
        filter_view(&txs, june(), v)
            .into_iter()
            .map(|t| t.id.clone())
            .collect()
    };
    assert_eq!(
        ids(View::All),
        ["cinema", "groceries", "lunch", "salary", "rent"]
    );
    assert_eq!(ids(View::Income), ["salary"]);
    assert_eq!(ids(View::Fixed), ["rent"]);
    assert_eq!(ids(View::Variable), ["cinema", "groceries", "lunch"]);
    assert_eq!(ids(View::Expenses).len(), 4);
    assert!("weekly".parse::<View>().is_err());
}

#[test]
fn most_recent_spans_months() {
    let txs = sample();
    let recent: Vec<&str> = most_recent(&txs, 2).into_iter().map(|t| t.id.as_str()).collect();
    assert_eq!(recent, ["cinema", "groceries"]);
    assert_eq!(most_recent(&txs, 50).len(), 6);
}

#[test]
fn expense_breakdown_sorted_with_shares() {
    let txs = sample();
    let june_txs = filter_view(&txs, june(), View::All);
    let b = expenses_by_category(june_txs);
    let cats: Vec<&str> = b.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(cats, ["Housing", "Food", "Leisure"]);
    assert_eq!(b[1].amount, dec("100"));
    // 100 of 1400
    assert_eq!(b[1].share.round_dp(4), dec("0.0714"));
    let total: Decimal = b.iter().map(|c| c.share).sum();
    assert_eq!(total.round_dp(10), Decimal::ONE);
}

#[test]
fn variable_breakdown_ties_break_by_name() {
    let txs = sample();
    let b = variable_by_category(filter_view(&txs, june(), View::All));
    let cats: Vec<&str> = b.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(cats, ["Food", "Leisure"]);
    assert_eq!(b[0].share, dec("0.5"));
    assert_eq!(b[1].share, dec("0.5"));
}

#[test]
fn breakdowns_of_nothing_are_empty() {
    let none: Vec<Transaction> = Vec::new();
    assert!(expenses_by_category(&none).is_empty());
    let c = income_vs_expense(&none);
    assert_eq!(c.income_ratio, Decimal::ZERO);
    assert_eq!(c.expense_ratio, Decimal::ZERO);
}

#[test]
fn income_vs_expense_relative_to_larger() {
    let txs = sample();
    let c = income_vs_expense(filter_view(&txs, june(), View::All));
    assert_eq!(c.income, dec("3000"));
    assert_eq!(c.expense, dec("1400"));
    assert_eq!(c.income_ratio, Decimal::ONE);
    assert_eq!(c.expense_ratio.round_dp(4), dec("0.4667"));
}
