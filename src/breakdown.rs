// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Frequency, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Fraction of the group total in `[0, 1]`.
    pub share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeVsExpense {
    pub income: Decimal,
    pub expense: Decimal,
    /// Bar lengths relative to the larger of the two, in `[0, 1]`.
    pub income_ratio: Decimal,
    pub expense_ratio: Decimal,
}

fn shares<'a, I>(items: I) -> Vec<CategoryShare>
where
    I: Iterator<Item = &'a Transaction>,
{
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    let mut total = Decimal::ZERO;
    for t in items {
        *agg.entry(t.category.as_str()).or_insert(Decimal::ZERO) += t.amount;
        total += t.amount;
    }
    let mut out: Vec<CategoryShare> = agg
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_string(),
            amount,
            share: if total > Decimal::ZERO {
                amount / total
            } else {
                Decimal::ZERO
            },
        })
        .collect();
    // ties broken by name so output is stable across runs
    out.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Expenses of any frequency grouped by category, largest first.
pub fn expenses_by_category<'a, I>(transactions: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    shares(transactions.into_iter().filter(|t| t.is_expense()))
}

/// Variable expenses only, grouped by category, largest first.
pub fn variable_by_category<'a, I>(transactions: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    shares(
        transactions
            .into_iter()
            .filter(|t| t.is_expense() && t.frequency == Frequency::Variable),
    )
}

pub fn income_vs_expense<'a, I>(transactions: I) -> IncomeVsExpense
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expense) = transactions.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(inc, exp), t| {
            if t.is_income() {
                (inc + t.amount, exp)
            } else {
                (inc, exp + t.amount)
            }
        },
    );
    let max = income.max(expense);
    let ratio = |v: Decimal| {
        if max > Decimal::ZERO {
            v / max
        } else {
            Decimal::ZERO
        }
    };
    IncomeVsExpense {
        income,
        expense,
        income_ratio: ratio(income),
        expense_ratio: ratio(expense),
    }
}
