// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::chart::{self, TextChart};
use crate::ledger::top_category;
use crate::models::TxnType;
use crate::report::{NO_DATA, NO_DATA_TO_ANALYZE, analysis_lines, summary_lines};
use crate::store::LedgerStore;
use crate::tracker::Tracker;
use crate::utils::parse_decimal;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use tracing::debug;

const MENU: &str = "\n=== Expense Tracker Menu ===
1. Add Income
2. Add Expense
3. Show Summary
4. Analyze & Visualize
5. Exit";

pub fn run<S, R, W>(
    tracker: &mut Tracker<S>,
    mut input: R,
    mut out: W,
    chart_width: usize,
) -> Result<()>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    if let Some(warning) = tracker.load_warning() {
        writeln!(out, "{}", warning)?;
    }
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(&mut input, &mut out, "Enter your choice: ")? else {
            debug!("input closed, leaving menu");
            break;
        };
        match choice.as_str() {
            "1" => {
                if !add_flow(tracker, &mut input, &mut out, TxnType::Income)? {
                    break;
                }
            }
            "2" => {
                if !add_flow(tracker, &mut input, &mut out, TxnType::Expense)? {
                    break;
                }
            }
            "3" => show_summary(tracker, &mut out)?,
            "4" => analyze(tracker, &mut out, chart_width)?,
            "5" => break,
            _ => writeln!(out, "Invalid choice. Try again!")?,
        }
    }

    tracker
        .save()
        .with_context(|| format!("Save ledger to {}", tracker.store().describe()))?;
    writeln!(out, "Data saved successfully!")?;
    writeln!(out, "Exiting... Have a great day!")?;
    Ok(())
}

/// Returns false when input ran out before the transaction was complete.
fn add_flow<S: LedgerStore, R: BufRead, W: Write>(
    tracker: &mut Tracker<S>,
    input: &mut R,
    out: &mut W,
    kind: TxnType,
) -> Result<bool> {
    let noun = kind.as_str().to_lowercase();
    let Some(category) = prompt(input, out, &format!("Enter {} category: ", noun))? else {
        return Ok(false);
    };
    let Some(amount) = prompt_amount(input, out, &format!("Enter {} amount: ", noun))? else {
        return Ok(false);
    };
    match tracker.add_today(&category, kind, amount) {
        Ok(()) => writeln!(out, "Transaction added!")?,
        Err(e) => writeln!(out, "Not added: {}.", e)?,
    }
    Ok(true)
}

fn show_summary<S: LedgerStore, W: Write>(tracker: &Tracker<S>, out: &mut W) -> Result<()> {
    let ledger = tracker.ledger();
    if ledger.is_empty() {
        writeln!(out, "{}", NO_DATA)?;
        return Ok(());
    }
    writeln!(out)?;
    for line in summary_lines(&ledger.totals()) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn analyze<S: LedgerStore, W: Write>(
    tracker: &Tracker<S>,
    out: &mut W,
    chart_width: usize,
) -> Result<()> {
    let ledger = tracker.ledger();
    if ledger.is_empty() {
        writeln!(out, "{}", NO_DATA_TO_ANALYZE)?;
        return Ok(());
    }
    let by_month = ledger.monthly_expense();
    let by_category = ledger.category_expense();
    writeln!(out)?;
    for line in analysis_lines(&by_month, &top_category(&by_category)) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    let charts = chart::prepare(&by_category, &by_month);
    let mut renderer = TextChart::new(&mut *out).with_width(chart_width);
    chart::render_all(&mut renderer, &charts)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> Result<Option<String>> {
    write!(out, "{}", msg)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_amount<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    msg: &str,
) -> Result<Option<Decimal>> {
    loop {
        let Some(raw) = prompt(input, out, msg)? else {
            return Ok(None);
        };
        match parse_decimal(&raw) {
            Ok(v) => return Ok(Some(v)),
            Err(e) => writeln!(out, "{}. Please enter a number.", e)?,
        }
    }
}
