// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{StoreError, StoreResult};
use crate::models::{Transaction, TxnType};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COLUMNS: [&str; 4] = ["Date", "Category", "Type", "Amount"];

pub trait LedgerStore {
    /// Returns every persisted transaction in file order. A store with
    /// nothing persisted yet yields an empty vec.
    fn load(&self) -> StoreResult<Vec<Transaction>>;

    /// Replaces the persisted contents with `txns`.
    fn save(&self, txns: &[Transaction]) -> StoreResult<()>;

    fn describe(&self) -> String;
}

pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for CsvStore {
    fn load(&self) -> StoreResult<Vec<Transaction>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no data file yet");
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let txns = read_transactions(file)?;
        debug!(path = %self.path.display(), rows = txns.len(), "loaded ledger");
        Ok(txns)
    }

    fn save(&self, txns: &[Transaction]) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let tmp = self.path.with_extension("tmp");
        let file = fs::File::create(&tmp).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        let written = write_transactions(file, txns).and_then(|()| {
            fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        debug!(path = %self.path.display(), rows = txns.len(), "saved ledger");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps rows in memory and counts saves.
#[derive(Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<Transaction>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Transaction>) -> Self {
        Self {
            rows: RefCell::new(rows),
            saves: RefCell::new(0),
        }
    }

    pub fn rows(&self) -> Vec<Transaction> {
        self.rows.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<Transaction>> {
        Ok(self.rows.borrow().clone())
    }

    fn save(&self, txns: &[Transaction]) -> StoreResult<()> {
        *self.rows.borrow_mut() = txns.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

pub fn read_transactions<R: Read>(rdr: R) -> StoreResult<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    if headers.iter().ne(COLUMNS.iter().copied()) {
        return Err(StoreError::BadHeader {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        out.push(parse_row(&rec)?);
    }
    Ok(out)
}

pub fn write_transactions<W: Write>(w: W, txns: &[Transaction]) -> StoreResult<()> {
    let mut wtr = WriterBuilder::new().from_writer(w);
    wtr.write_record(COLUMNS)?;
    for t in txns {
        wtr.write_record([
            t.date.format("%Y-%m-%d").to_string(),
            t.category.clone(),
            t.r#type.to_string(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush().map_err(|e| StoreError::Csv(e.into()))?;
    Ok(())
}

fn parse_row(rec: &StringRecord) -> StoreResult<Transaction> {
    let line = rec.position().map(|p| p.line()).unwrap_or(0);
    let malformed = |reason: String| StoreError::MalformedRow { line, reason };

    let date_raw = field(rec, 0, line)?;
    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
        .map_err(|_| malformed(format!("invalid date '{}'", date_raw)))?;
    let category = field(rec, 1, line)?.to_string();
    let r#type: TxnType = field(rec, 2, line)?
        .parse()
        .map_err(|e| malformed(format!("{}", e)))?;
    let amount_raw = field(rec, 3, line)?;
    let amount = amount_raw
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(amount_raw))
        .map_err(|_| malformed(format!("invalid amount '{}'", amount_raw)))?;

    Ok(Transaction {
        date,
        category,
        r#type,
        amount,
    })
}

fn field(rec: &StringRecord, idx: usize, line: u64) -> StoreResult<&str> {
    rec.get(idx).ok_or_else(|| StoreError::MalformedRow {
        line,
        reason: format!("missing {} column", COLUMNS[idx]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn txn(date: &str, cat: &str, ty: TxnType, amt: &str) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            cat,
            ty,
            amt.parse().unwrap(),
        )
    }

    #[test]
    fn reads_float_formatted_amounts() {
        let data = "Date,Category,Type,Amount\n2024-01-05,Salary,Income,1000.0\n2024-01-10,Food,Expense,100\n";
        let rows = read_transactions(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].r#type, TxnType::Income);
        assert_eq!(rows[0].amount, Decimal::from(1000));
        assert_eq!(rows[1].category, "Food");
    }

    #[test]
    fn header_only_file_is_empty() {
        let rows = read_transactions("Date,Category,Type,Amount\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
        assert!(read_transactions("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn malformed_row_reports_line() {
        let data = "Date,Category,Type,Amount\n2024-01-05,Salary,Income,1000\n2024-01-06,Food,Refund,5\n";
        match read_transactions(data.as_bytes()) {
            Err(StoreError::MalformedRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("Refund"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn wrong_header_is_rejected() {
        let data = "date,payee,amount\n2024-01-05,Shop,-5\n";
        assert!(matches!(
            read_transactions(data.as_bytes()),
            Err(StoreError::BadHeader { .. })
        ));
    }

    #[test]
    fn csv_store_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("nested").join("expenses.csv"));
        assert!(store.load().unwrap().is_empty());

        let rows = vec![
            txn("2024-01-05", "Salary", TxnType::Income, "1000"),
            txn("2024-02-15", "Rent, flat", TxnType::Expense, "400.50"),
        ];
        store.save(&rows).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("Date,Category,Type,Amount\n"));
        assert!(text.contains("\"Rent, flat\""));
        assert_eq!(store.load().unwrap(), rows);
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        // a non-empty directory in the way makes the final rename fail
        fs::create_dir_all(path.join("blocker")).unwrap();
        let store = CsvStore::new(&path);

        let rows = vec![txn("2024-01-05", "Salary", TxnType::Income, "1000")];
        assert!(matches!(store.save(&rows), Err(StoreError::Io { .. })));
        assert!(!path.with_extension("tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn memory_store_counts_saves() {
        let store = MemoryStore::new();
        store
            .save(&[txn("2024-01-05", "Salary", TxnType::Income, "1")])
            .unwrap();
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
