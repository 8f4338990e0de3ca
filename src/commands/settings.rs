// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::models::UserSettings;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_money, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => {
            let s = set(conn, sub)?;
            println!(
                "Settings saved: savings goal {} for {}",
                fmt_money(&s.savings_goal),
                s.user_name
            );
        }
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = store::load(conn)?.settings;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Savings goal".to_string(), fmt_money(&s.savings_goal)],
            vec!["Name".to_string(), s.user_name.clone()],
            vec!["Age".to_string(), s.age.clone()],
            vec!["Profession".to_string(), s.profession.clone()],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

/// Replaces the stored settings wholesale; fields not given keep their current value.
pub fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<UserSettings> {
    let mut snap = store::load(conn)?;
    let mut s = snap.settings.clone();
    if let Some(v) = sub.get_one::<String>("savings-goal") {
        s.savings_goal = parse_money(v)?;
    }
    if let Some(v) = sub.get_one::<String>("name") {
        s.user_name = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("age") {
        s.age = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("profession") {
        s.profession = v.trim().to_string();
    }
    snap.settings = s.clone();
    store::save(conn, &snap)?;
    info!("settings saved");
    Ok(s)
}
