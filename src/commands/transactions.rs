// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::kind_from_arg;
use crate::models::YearMonth;
use crate::store::LedgerStore;
use crate::tracker::Tracker;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn add<S: LedgerStore>(tracker: &mut Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_from_arg(sub.get_one::<String>("kind").context("kind missing")?)?;
    let category = sub
        .get_one::<String>("category")
        .context("category missing")?
        .trim()
        .to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").context("amount missing")?)?;

    tracker.add_today(&category, kind, amount)?;
    tracker
        .save()
        .with_context(|| format!("Save ledger to {}", tracker.store().describe()))?;
    println!("Recorded {} {} under '{}'", kind, fmt_amount(&amount), category);
    Ok(())
}

pub fn list<S: LedgerStore>(tracker: &Tracker<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(tracker, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.category.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Type", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub category: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub amount: String,
}

/// Filtered rows, newest date first; same-day rows keep reverse entry order.
pub fn query_rows<S: LedgerStore>(
    tracker: &Tracker<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| kind_from_arg(s))
        .transpose()?;
    let month = sub
        .get_one::<String>("month")
        .map(|s| {
            s.parse::<YearMonth>()
                .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
        })
        .transpose()?;
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let limit = sub.get_one::<usize>("limit").copied();

    let mut picked: Vec<_> = tracker
        .ledger()
        .iter()
        .enumerate()
        .filter(|(_, t)| kind.is_none_or(|k| t.r#type == k))
        .filter(|(_, t)| month.is_none_or(|m| t.month() == m))
        .filter(|(_, t)| category.is_none_or(|c| t.category == c))
        .collect();
    picked.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));

    Ok(picked
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(_, t)| TransactionRow {
            date: t.date.to_string(),
            category: t.category.clone(),
            r#type: t.r#type.to_string(),
            amount: t.amount.to_string(),
        })
        .collect())
}
