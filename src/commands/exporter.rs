// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::store::write_transactions;
use anyhow::{Context, Result, bail};
use serde_json::json;
use std::fs;

pub fn export_transactions(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").context("out missing")?.trim();

    match fmt.as_str() {
        "csv" => {
            let file = fs::File::create(out).with_context(|| format!("Create {}", out))?;
            write_transactions(file, ledger.transactions())?;
        }
        "json" => {
            let items: Vec<_> = ledger
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "category": t.category,
                        "type": t.r#type.as_str(),
                        "amount": t.amount.to_string(),
                    })
                })
                .collect();
            fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transactions to {}", ledger.len(), out);
    Ok(())
}
