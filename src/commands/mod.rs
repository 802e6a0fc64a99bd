// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxnType;
use anyhow::{Result, anyhow};

pub mod exporter;
pub mod importer;
pub mod menu;
pub mod reports;
pub mod transactions;

/// Maps the case-insensitive `income` / `expense` CLI values.
pub(crate) fn kind_from_arg(s: &str) -> Result<TxnType> {
    match s.trim().to_ascii_lowercase().as_str() {
        "income" => Ok(TxnType::Income),
        "expense" => Ok(TxnType::Expense),
        other => Err(anyhow!("Unknown transaction type '{}'", other)),
    }
}
