// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;

pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investments", "Other"];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Housing",
    "Transport",
    "Leisure",
    "Health",
    "Education",
    "Subscriptions",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Suggested categories offered when entering a transaction of this type.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => INCOME_CATEGORIES,
            TransactionType::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FinanceError::UnknownKind {
                kind: "transaction type",
                value: s.to_string(),
            }),
        }
    }
}

/// Recurring entries repeat every month (rent, salary); variable ones are sporadic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Recurring,
    Variable,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Recurring => "recurring",
            Frequency::Variable => "variable",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recurring" => Ok(Frequency::Recurring),
            "variable" => Ok(Frequency::Variable),
            _ => Err(FinanceError::UnknownKind {
                kind: "frequency",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal, // always positive, sign comes from `type`
    pub r#type: TransactionType,
    pub frequency: Frequency,
    pub category: String,
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> Decimal {
        match self.r#type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub savings_goal: Decimal,
    pub user_name: String,
    pub age: String,
    pub profession: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            savings_goal: Decimal::ZERO,
            user_name: "Friend".into(),
            age: String::new(),
            profession: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
}

/// Derived figures for one calendar month. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_fixed_expenses: Decimal,
    pub total_variable_expenses: Decimal,
    pub balance: Decimal,
    pub savings_goal: Decimal,
    pub daily_safe_to_spend: Decimal,
    pub total_safe_to_spend: Decimal,
    pub days_remaining: u32,
}
