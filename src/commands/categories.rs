// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::TransactionType;
use crate::utils::pretty_table;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let kinds = match sub.get_one::<String>("type") {
        Some(t) => vec![t.parse::<TransactionType>()?],
        None => vec![TransactionType::Income, TransactionType::Expense],
    };
    let mut rows = Vec::new();
    for k in kinds {
        for c in k.categories() {
            rows.push(vec![k.to_string(), c.to_string()]);
        }
    }
    println!("{}", pretty_table(&["Type", "Category"], rows));
    println!("Any other category name is accepted too.");
    Ok(())
}
