// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{LedgerStore, read_transactions};
use crate::tracker::Tracker;
use anyhow::{Context, Result};
use std::fs::File;

/// Appends every row of another data file. The import is all-or-nothing:
/// a malformed row aborts it before the ledger is touched.
pub fn import_transactions<S: LedgerStore>(
    tracker: &mut Tracker<S>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let path = sub.get_one::<String>("path").context("path missing")?.trim();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let rows = read_transactions(file).with_context(|| format!("Read {}", path))?;
    let count = rows.len();

    tracker
        .extend(rows)
        .with_context(|| format!("Import {}", path))?;
    tracker
        .save()
        .with_context(|| format!("Save ledger to {}", tracker.store().describe()))?;
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}
