// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation and lookup failures raised by the library layer.
#[derive(Debug, Error, PartialEq)]
pub enum FinanceError {
    #[error("Deposit amount must be positive, got {0}")]
    NonPositiveDeposit(Decimal),

    #[error("Invalid amount '{0}': expected a positive decimal up to 1000000000000")]
    InvalidAmount(String),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Unknown {kind} '{value}'")]
    UnknownKind { kind: &'static str, value: String },

    #[error("Transaction '{0}' not found")]
    TransactionNotFound(String),

    #[error("Savings goal '{0}' not found")]
    GoalNotFound(String),
}
