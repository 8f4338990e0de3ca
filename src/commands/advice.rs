// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::advice::{get_advice, AdviceProvider, GeminiClient, ADVICE_UNAVAILABLE};
use crate::commands::{local_now, selected_month};
use crate::store;
use crate::summary::compute_summary;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let client = GeminiClient::from_env();
    if let Ok(c) = &client {
        info!(model = c.model(), "asking for advice");
    }
    println!("{}", advise_with(conn, sub, client, local_now())?);
    Ok(())
}

/// Like [`advise`], but a provider that could not be set up (no API key, no
/// HTTP client) yields the apology text instead of an error.
pub fn advise_with<P: AdviceProvider>(
    conn: &Connection,
    sub: &clap::ArgMatches,
    provider: Result<P>,
    now: NaiveDateTime,
) -> Result<String> {
    match provider {
        Ok(p) => advise(conn, sub, &p, now),
        Err(e) => {
            warn!("advice provider unavailable: {:#}", e);
            Ok(ADVICE_UNAVAILABLE.to_string())
        }
    }
}

/// Summarises the selected month and asks `provider` for tips on it.
pub fn advise(
    conn: &Connection,
    sub: &clap::ArgMatches,
    provider: &dyn AdviceProvider,
    now: NaiveDateTime,
) -> Result<String> {
    let month = selected_month(sub, now)?;
    let snap = store::load(conn)?;
    let summary = compute_summary(&snap.transactions, month, &snap.settings, now);
    let in_month: Vec<_> = snap
        .transactions
        .iter()
        .filter(|t| month.contains(&t.date))
        .cloned()
        .collect();
    Ok(get_advice(provider, &summary, &in_month, &snap.settings))
}
