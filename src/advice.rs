// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget coaching text from a hosted language model.
//!
//! `get_advice` never fails: any provider error is logged and replaced with a
//! fixed apology so the caller always has something to show.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::history::most_recent;
use crate::models::{FinancialSummary, Transaction, UserSettings};
use crate::utils::{fmt_money, http_client};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "SAFESPEND_GEMINI_MODEL";
pub const URL_ENV: &str = "SAFESPEND_GEMINI_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// How many of the newest transactions go into the prompt.
pub const RECENT_LIMIT: usize = 5;

pub const NO_ADVICE: &str = "Could not generate tips right now.";
pub const ADVICE_UNAVAILABLE: &str =
    "Sorry, I'm having trouble analysing your data right now. Please try again later.";

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Anything that turns a prompt into free-form text.
pub trait AdviceProvider {
    fn complete(&self, prompt: &str) -> Result<String>;
}

pub fn build_prompt(
    summary: &FinancialSummary,
    recent: &[&Transaction],
    settings: &UserSettings,
) -> String {
    let recent_lines = if recent.is_empty() {
        "- (no transactions yet)".to_string()
    } else {
        recent
            .iter()
            .map(|t| {
                format!(
                    "- {}: {} ({}, {})",
                    t.description,
                    fmt_money(&t.amount),
                    t.category,
                    t.r#type
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are a friendly, direct personal finance coach focused on everyday habits.

User profile:
- Name: {name}
- Age: {age}
- Profession: {profession}

Current month:
- Total income: {income}
- Fixed expenses: {fixed}
- Variable expenses (already spent this month): {variable}
- Current balance: {balance}
- Savings goal: {goal}
- Days left in the month: {days}
- Safe amount to spend PER DAY (after fixed bills and the savings goal): {daily}

Latest {limit} transactions:
{recent_lines}

Task:
Consider the user's profession and age when given. Give 3 short, practical and motivating tips.
Use emojis. Talk to the user directly by name.
If the safe daily amount is low or negative, give a gentle but firm warning.
If it is high, congratulate them.

Output format: only the tips, separated by line breaks.",
        name = settings.user_name,
        age = settings.age,
        profession = settings.profession,
        income = fmt_money(&summary.total_income),
        fixed = fmt_money(&summary.total_fixed_expenses),
        variable = fmt_money(&summary.total_variable_expenses),
        balance = fmt_money(&summary.balance),
        goal = fmt_money(&summary.savings_goal),
        days = summary.days_remaining,
        daily = fmt_money(&summary.daily_safe_to_spend),
        limit = RECENT_LIMIT,
        recent_lines = recent_lines,
    )
}

pub fn get_advice(
    provider: &dyn AdviceProvider,
    summary: &FinancialSummary,
    transactions: &[Transaction],
    settings: &UserSettings,
) -> String {
    let recent = most_recent(transactions, RECENT_LIMIT);
    let prompt = build_prompt(summary, &recent, settings);
    match provider.complete(&prompt) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("advice provider returned an empty reply");
            NO_ADVICE.to_string()
        }
        Err(e) => {
            warn!("advice request failed: {:#}", e);
            ADVICE_UNAVAILABLE.to_string()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Text of the first candidate, parts concatenated. Empty when there is none.
fn response_text(resp: GenerateResponse) -> String {
    resp.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Google Gemini `generateContent` over blocking HTTP.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            http: http_client(REQUEST_TIMEOUT_SECS)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .with_context(|| format!("{} is not set; it is required for advice", API_KEY_ENV))?;
        let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base = std::env::var(URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base, &model, &key)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl AdviceProvider for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };
        debug!(model = %self.model, "requesting advice");
        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("Gemini returned HTTP {}", status));
        }
        let parsed: GenerateResponse = resp.json().context("Malformed Gemini response")?;
        Ok(response_text(parsed))
    }
}
