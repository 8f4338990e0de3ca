// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use crate::error::FinanceError;
use crate::models::{Frequency, Transaction};
use crate::summary::YearMonth;

/// Which slice of a month's history to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    All,
    Income,
    Expenses,
    Fixed,
    Variable,
}

impl View {
    fn accepts(&self, t: &Transaction) -> bool {
        match self {
            View::All => true,
            View::Income => t.is_income(),
            View::Expenses => t.is_expense(),
            View::Fixed => t.is_expense() && t.frequency == Frequency::Recurring,
            View::Variable => t.is_expense() && t.frequency == Frequency::Variable,
        }
    }
}

impl FromStr for View {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(View::All),
            "income" => Ok(View::Income),
            "expenses" | "expense" => Ok(View::Expenses),
            "fixed" | "recurring" => Ok(View::Fixed),
            "variable" => Ok(View::Variable),
            _ => Err(FinanceError::UnknownKind {
                kind: "view",
                value: s.to_string(),
            }),
        }
    }
}

/// Transactions of `month` matching `view`, newest first.
pub fn filter_view(transactions: &[Transaction], month: YearMonth, view: View) -> Vec<&Transaction> {
    let mut out: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| month.contains(&t.date) && view.accepts(t))
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// The `n` newest transactions regardless of month.
pub fn most_recent(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut out: Vec<&Transaction> = transactions.iter().collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(n);
    out
}
