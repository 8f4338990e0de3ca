// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::FinanceError;
use crate::models::SavingsGoal;

/// A deposit that has already passed validation. Only positive amounts get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAmount(Decimal);

impl DepositAmount {
    pub fn new(amount: Decimal) -> Result<Self, FinanceError> {
        if amount <= Decimal::ZERO {
            return Err(FinanceError::NonPositiveDeposit(amount));
        }
        Ok(DepositAmount(amount))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
}

pub fn create_goal(new: NewGoal) -> Result<SavingsGoal, FinanceError> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(FinanceError::InvalidGoal("name must not be empty".into()));
    }
    if new.target_amount <= Decimal::ZERO {
        return Err(FinanceError::InvalidGoal(format!(
            "target amount must be positive, got {}",
            new.target_amount
        )));
    }
    let current_amount = new.current_amount.unwrap_or(Decimal::ZERO);
    if current_amount < Decimal::ZERO {
        return Err(FinanceError::InvalidGoal(format!(
            "starting amount must not be negative, got {}",
            current_amount
        )));
    }
    Ok(SavingsGoal {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        target_amount: new.target_amount,
        current_amount,
        deadline: new.deadline,
    })
}

impl SavingsGoal {
    /// Adds the deposit to the saved amount. Never decreases it.
    pub fn deposit(&mut self, amount: DepositAmount) {
        self.current_amount += amount.value();
    }

    /// Fraction of the target saved so far, clamped to `[0, 1]`.
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ONE;
        }
        (self.current_amount / self.target_amount).clamp(Decimal::ZERO, Decimal::ONE)
    }

    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}
