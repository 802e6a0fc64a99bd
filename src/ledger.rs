// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxnType, YearMonth};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Expense totals per calendar month, ascending.
pub type MonthlyExpense = BTreeMap<YearMonth, Decimal>;

/// Expense totals per category.
pub type CategoryExpense = BTreeMap<String, Decimal>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopCategory {
    Category { name: String, amount: Decimal },
    NoData,
}

impl TopCategory {
    pub fn name(&self) -> Option<&str> {
        match self {
            TopCategory::Category { name, .. } => Some(name),
            TopCategory::NoData => None,
        }
    }
}

impl fmt::Display for TopCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopCategory::Category { name, amount } => write!(f, "{} ({})", name, amount),
            TopCategory::NoData => f.write_str("no data"),
        }
    }
}

/// Ordered, append-only sequence of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    txns: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amounts are taken as-is; negative and zero values are not rejected.
    pub fn append(
        &mut self,
        date: NaiveDate,
        category: impl Into<String>,
        r#type: TxnType,
        amount: Decimal,
    ) {
        self.push(Transaction::new(date, category, r#type, amount));
    }

    pub fn push(&mut self, txn: Transaction) {
        self.txns.push(txn);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.txns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.txns.iter()
    }

    pub fn len(&self) -> usize {
        self.txns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txns.is_empty()
    }

    pub fn totals(&self) -> Totals {
        let mut t = Totals::default();
        for txn in &self.txns {
            match txn.r#type {
                TxnType::Income => t.income = t.income.saturating_add(txn.amount),
                TxnType::Expense => t.expense = t.expense.saturating_add(txn.amount),
            }
        }
        t
    }

    pub fn monthly_expense(&self) -> MonthlyExpense {
        let mut map = MonthlyExpense::new();
        for txn in self.expenses() {
            let sum = map.entry(txn.month()).or_insert(Decimal::ZERO);
            *sum = sum.saturating_add(txn.amount);
        }
        map
    }

    pub fn category_expense(&self) -> CategoryExpense {
        let mut map = CategoryExpense::new();
        for txn in self.expenses() {
            let sum = map.entry(txn.category.clone()).or_insert(Decimal::ZERO);
            *sum = sum.saturating_add(txn.amount);
        }
        map
    }

    /// True when appending `txn` keeps every total, bucket and the balance
    /// within `Decimal` range.
    pub fn admits(&self, txn: &Transaction) -> bool {
        let with_txn = || self.txns.iter().chain(std::iter::once(txn));
        let expense_where = |t: &&Transaction| t.r#type == TxnType::Expense;

        let income = checked_sum(with_txn().filter(|t| t.r#type == TxnType::Income));
        let expense = checked_sum(with_txn().filter(expense_where));
        let month = checked_sum(
            with_txn()
                .filter(expense_where)
                .filter(|t| t.month() == txn.month()),
        );
        let category = checked_sum(
            with_txn()
                .filter(expense_where)
                .filter(|t| t.category == txn.category),
        );
        match (income, expense, month, category) {
            (Some(i), Some(e), Some(_), Some(_)) => i.checked_sub(e).is_some(),
            _ => false,
        }
    }

    fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.txns.iter().filter(|t| t.r#type == TxnType::Expense)
    }
}

fn checked_sum<'a>(mut txns: impl Iterator<Item = &'a Transaction>) -> Option<Decimal> {
    txns.try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
}

/// Category with the largest expense total. Among equal totals the
/// lexicographically first category wins.
pub fn top_category(by_category: &CategoryExpense) -> TopCategory {
    let mut best: Option<(&String, &Decimal)> = None;
    for (name, amount) in by_category {
        match best {
            Some((_, top)) if amount <= top => {}
            _ => best = Some((name, amount)),
        }
    }
    match best {
        Some((name, amount)) => TopCategory::Category {
            name: name.clone(),
            amount: *amount,
        },
        None => TopCategory::NoData,
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            txns: iter.into_iter().collect(),
        }
    }
}

impl Extend<Transaction> for Ledger {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        self.txns.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.txns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Ledger {
        let mut l = Ledger::new();
        l.append(d(2024, 1, 5), "Salary", TxnType::Income, dec(1000));
        l.append(d(2024, 1, 10), "Food", TxnType::Expense, dec(100));
        l.append(d(2024, 2, 1), "Food", TxnType::Expense, dec(50));
        l.append(d(2024, 2, 15), "Rent", TxnType::Expense, dec(400));
        l
    }

    #[test]
    fn sample_scenario_aggregates() {
        let l = sample();
        let t = l.totals();
        assert_eq!(t.income, dec(1000));
        assert_eq!(t.expense, dec(550));
        assert_eq!(t.balance(), dec(450));

        let monthly: Vec<(String, Decimal)> = l
            .monthly_expense()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(
            monthly,
            vec![("2024-01".to_string(), dec(100)), ("2024-02".to_string(), dec(450))]
        );

        let cats = l.category_expense();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats["Food"], dec(150));
        assert_eq!(cats["Rent"], dec(400));
        assert_eq!(top_category(&cats).name(), Some("Rent"));
    }

    #[test]
    fn empty_ledger_yields_no_data() {
        let l = Ledger::new();
        assert_eq!(l.totals(), Totals::default());
        assert_eq!(l.totals().balance(), Decimal::ZERO);
        assert!(l.monthly_expense().is_empty());
        assert!(l.category_expense().is_empty());
        let top = top_category(&l.category_expense());
        assert_eq!(top, TopCategory::NoData);
        assert_eq!(top.to_string(), "no data");
    }

    #[test]
    fn partitions_sum_to_expense_total() {
        let mut l = sample();
        l.append(d(2023, 12, 31), "Gifts", TxnType::Expense, dec(-20));
        l.append(d(2024, 3, 3), "Food", TxnType::Expense, Decimal::new(1234, 2));
        l.append(d(2024, 3, 4), "Bonus", TxnType::Income, Decimal::ZERO);
        let expense = l.totals().expense;
        assert_eq!(l.monthly_expense().values().copied().sum::<Decimal>(), expense);
        assert_eq!(l.category_expense().values().copied().sum::<Decimal>(), expense);
    }

    #[test]
    fn top_category_is_a_maximal_member() {
        let mut l = Ledger::new();
        l.append(d(2024, 5, 1), "Travel", TxnType::Expense, dec(300));
        l.append(d(2024, 5, 2), "Books", TxnType::Expense, dec(300));
        l.append(d(2024, 5, 3), "Coffee", TxnType::Expense, dec(12));
        let cats = l.category_expense();
        let top = top_category(&cats);
        let name = top.name().unwrap();
        assert!(cats.contains_key(name));
        assert!(cats.values().all(|v| *v <= cats[name]));
    }

    #[test]
    fn aggregations_are_repeatable() {
        let l = sample();
        assert_eq!(l.totals(), l.totals());
        assert_eq!(l.monthly_expense(), l.monthly_expense());
        assert_eq!(l.category_expense(), l.category_expense());
    }

    #[test]
    fn aggregations_saturate_instead_of_overflowing() {
        let mut l = Ledger::new();
        l.append(d(2024, 1, 1), "A", TxnType::Expense, Decimal::MAX);
        l.append(d(2024, 1, 2), "A", TxnType::Expense, Decimal::ONE);
        l.append(d(2024, 1, 3), "Pay", TxnType::Income, Decimal::MIN);
        let t = l.totals();
        assert_eq!(t.expense, Decimal::MAX);
        assert_eq!(t.income, Decimal::MIN);
        assert_eq!(t.balance(), Decimal::MIN);
        assert_eq!(l.monthly_expense().values().next(), Some(&Decimal::MAX));
        assert_eq!(l.category_expense()["A"], Decimal::MAX);
        assert_eq!(top_category(&l.category_expense()).name(), Some("A"));
    }

    #[test]
    fn admits_rejects_amounts_that_would_overflow() {
        let mut l = Ledger::new();
        let big = Transaction::new(d(2024, 1, 1), "A", TxnType::Expense, Decimal::MAX);
        assert!(l.admits(&big));
        l.push(big);

        let one_more = Transaction::new(d(2024, 6, 1), "B", TxnType::Expense, Decimal::ONE);
        assert!(!l.admits(&one_more));

        // balance = income - expense would drop below Decimal::MIN
        let negative_income =
            Transaction::new(d(2024, 1, 1), "Refund", TxnType::Income, Decimal::NEGATIVE_ONE);
        assert!(!l.admits(&negative_income));

        let refund = Transaction::new(d(2024, 1, 2), "A", TxnType::Expense, dec(-5));
        assert!(l.admits(&refund));
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut l = Ledger::new();
        l.append(d(2024, 3, 1), "B", TxnType::Expense, dec(1));
        l.append(d(2024, 1, 1), "A", TxnType::Expense, dec(1));
        l.append(d(2024, 3, 1), "B", TxnType::Expense, dec(1));
        let cats: Vec<&str> = l.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["B", "A", "B"]);
        assert_eq!(l.len(), 3);
    }
}
