// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{OverflowError, StoreResult};
use crate::ledger::Ledger;
use crate::models::{Transaction, TxnType};
use crate::store::LedgerStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

/// A working session: the ledger plus the store it came from.
pub struct Tracker<S: LedgerStore> {
    store: S,
    ledger: Ledger,
    load_warning: Option<String>,
}

impl<S: LedgerStore> Tracker<S> {
    /// Loads the ledger from `store`. Unreadable data is logged and the
    /// session starts from an empty ledger instead.
    pub fn open(store: S) -> Self {
        let (ledger, load_warning) = match store.load() {
            Ok(rows) => (rows.into_iter().collect(), None),
            Err(e) => {
                info!(
                    store = %store.describe(),
                    error = %e,
                    "could not read ledger, starting empty"
                );
                (Ledger::new(), Some(format!("Error reading {}: {}", store.describe(), e)))
            }
        };
        Self {
            store,
            ledger,
            load_warning,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Message describing why the persisted ledger was discarded, if it was.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Rejects amounts that would push a total past `Decimal` range; the
    /// ledger is left unchanged in that case.
    pub fn add(
        &mut self,
        date: NaiveDate,
        category: &str,
        r#type: TxnType,
        amount: Decimal,
    ) -> Result<(), OverflowError> {
        let txn = Transaction::new(date, category, r#type, amount);
        if !self.ledger.admits(&txn) {
            return Err(overflow(&txn));
        }
        info!(%date, category, kind = %r#type, %amount, "transaction added");
        self.ledger.push(txn);
        Ok(())
    }

    pub fn add_today(
        &mut self,
        category: &str,
        r#type: TxnType,
        amount: Decimal,
    ) -> Result<(), OverflowError> {
        self.add(today(), category, r#type, amount)
    }

    /// All-or-nothing append.
    pub fn extend(&mut self, txns: Vec<Transaction>) -> Result<(), OverflowError> {
        let mut next = self.ledger.clone();
        for txn in txns {
            if !next.admits(&txn) {
                return Err(overflow(&txn));
            }
            next.push(txn);
        }
        info!(count = next.len() - self.ledger.len(), "transactions imported");
        self.ledger = next;
        Ok(())
    }

    pub fn save(&self) -> StoreResult<()> {
        self.store.save(self.ledger.transactions())?;
        info!(store = %self.store.describe(), rows = self.ledger.len(), "ledger saved");
        Ok(())
    }
}

fn overflow(txn: &Transaction) -> OverflowError {
    OverflowError {
        category: txn.category.clone(),
        amount: txn.amount,
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
