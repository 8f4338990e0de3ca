// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly summary derivation.
//!
//! Everything here is pure: the caller supplies `now`, so the same inputs always
//! produce the same `FinancialSummary`. No rounding happens in this module; amounts
//! are rounded to two places only when printed.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::models::{FinancialSummary, Frequency, Transaction, TransactionType, UserSettings};

/// Daily allowance under which a month is flagged as tight.
pub const TIGHT_DAILY_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// A calendar month. Internally the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(YearMonth)
    }

    /// Month containing the given date.
    pub fn of(date: NaiveDate) -> Self {
        YearMonth(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0 + Days::new(u64::from(self.days_in_month() - 1))
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// True when the timestamp's local date falls inside this month.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        ts.year() == self.year() && ts.month() == self.month()
    }

    pub fn prev(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(YearMonth)
    }

    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(YearMonth)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(YearMonth)
            .map_err(|_| FinanceError::InvalidMonth(s.to_string()))
    }
}

/// Days left in `month` counting today, or the whole month when `now` lies elsewhere.
pub fn days_remaining(month: YearMonth, now: NaiveDateTime) -> u32 {
    let days = month.days_in_month();
    let remaining = if month.contains(&now) {
        days.saturating_sub(now.day()) + 1
    } else {
        days
    };
    remaining.max(1)
}

pub fn compute_summary(
    transactions: &[Transaction],
    month: YearMonth,
    settings: &UserSettings,
    now: NaiveDateTime,
) -> FinancialSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_fixed_expenses = Decimal::ZERO;
    let mut total_variable_expenses = Decimal::ZERO;

    // Category is never checked against type; whatever was recorded gets summed.
    for t in transactions.iter().filter(|t| month.contains(&t.date)) {
        match (t.r#type, t.frequency) {
            (TransactionType::Income, _) => total_income += t.amount,
            (TransactionType::Expense, Frequency::Recurring) => total_fixed_expenses += t.amount,
            (TransactionType::Expense, Frequency::Variable) => {
                total_variable_expenses += t.amount
            }
        }
    }

    let balance = total_income - total_fixed_expenses - total_variable_expenses;
    let total_safe_to_spend = total_income - total_fixed_expenses - settings.savings_goal;
    let days_remaining = days_remaining(month, now);
    let daily_safe_to_spend =
        (total_safe_to_spend - total_variable_expenses) / Decimal::from(days_remaining);

    FinancialSummary {
        total_income,
        total_fixed_expenses,
        total_variable_expenses,
        balance,
        savings_goal: settings.savings_goal,
        daily_safe_to_spend,
        total_safe_to_spend,
        days_remaining,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    Healthy,
    Tight,
    Overspent,
}

impl BudgetHealth {
    pub fn of(summary: &FinancialSummary) -> Self {
        if summary.total_safe_to_spend < Decimal::ZERO {
            BudgetHealth::Overspent
        } else if summary.daily_safe_to_spend > Decimal::ZERO
            && summary.daily_safe_to_spend < TIGHT_DAILY_THRESHOLD
        {
            BudgetHealth::Tight
        } else {
            BudgetHealth::Healthy
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BudgetHealth::Healthy => "Your monthly budget is healthy.",
            BudgetHealth::Tight => "This month's budget is tight.",
            BudgetHealth::Overspent => "Heads up! You have gone over your monthly budget.",
        }
    }
}
