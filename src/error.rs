// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("unexpected header {found:?}, expected Date,Category,Type,Amount")]
    BadHeader { found: Vec<String> },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("amount {amount} for '{category}' would overflow the ledger totals")]
pub struct OverflowError {
    pub category: String,
    pub amount: rust_decimal::Decimal,
}
