// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{MonthlyExpense, TopCategory, Totals};
use crate::utils::fmt_amount;
use serde::Serialize;

pub const NO_DATA: &str = "No data available yet.";
pub const NO_DATA_TO_ANALYZE: &str = "No data to analyze.";
pub const NO_EXPENSE_DATA: &str = "No expense data found.";

/// Income, expense and balance, one per line.
pub fn summary_lines(totals: &Totals) -> [String; 3] {
    [
        format!("Total Income: {}", fmt_amount(&totals.income)),
        format!("Total Expense: {}", fmt_amount(&totals.expense)),
        format!("Balance: {}", fmt_amount(&totals.balance())),
    ]
}

pub fn analysis_lines(monthly: &MonthlyExpense, top: &TopCategory) -> Vec<String> {
    let mut out = vec!["Monthly Expense Totals:".to_string()];
    if monthly.is_empty() {
        out.push("  (none)".to_string());
    }
    for (month, amount) in monthly {
        out.push(format!("  {}  {}", month, fmt_amount(amount)));
    }
    out.push(String::new());
    match top {
        TopCategory::Category { name, amount } => out.push(format!(
            "Highest Spending Category: {} ({})",
            name,
            fmt_amount(amount)
        )),
        TopCategory::NoData => out.push(NO_EXPENSE_DATA.to_string()),
    }
    out
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub income: String,
    pub expense: String,
    pub balance: String,
}

impl From<&Totals> for SummaryReport {
    fn from(t: &Totals) -> Self {
        Self {
            income: fmt_amount(&t.income),
            expense: fmt_amount(&t.expense),
            balance: fmt_amount(&t.balance()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub monthly_expense: Vec<(String, String)>,
    pub category_expense: Vec<(String, String)>,
    pub top_category: TopCategory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearMonth;
    use rust_decimal::Decimal;

    #[test]
    fn summary_reports_negative_balance() {
        let t = Totals {
            income: Decimal::from(100),
            expense: Decimal::new(25050, 2),
        };
        let lines = summary_lines(&t);
        assert_eq!(lines[0], "Total Income: 100.00");
        assert_eq!(lines[1], "Total Expense: 250.50");
        assert_eq!(lines[2], "Balance: -150.50");
    }

    #[test]
    fn empty_totals_balance_is_zero() {
        let lines = summary_lines(&Totals::default());
        assert_eq!(lines[2], "Balance: 0.00");
    }

    #[test]
    fn analysis_lists_months_then_top_category() {
        let mut monthly = MonthlyExpense::new();
        monthly.insert("2024-02".parse::<YearMonth>().unwrap(), Decimal::from(450));
        monthly.insert("2024-01".parse::<YearMonth>().unwrap(), Decimal::from(100));
        let top = TopCategory::Category {
            name: "Rent".into(),
            amount: Decimal::from(400),
        };
        let lines = analysis_lines(&monthly, &top);
        assert_eq!(lines[1], "  2024-01  100.00");
        assert_eq!(lines[2], "  2024-02  450.00");
        assert_eq!(lines.last().unwrap(), "Highest Spending Category: Rent (400.00)");
    }

    #[test]
    fn analysis_without_expenses_says_so() {
        let lines = analysis_lines(&MonthlyExpense::new(), &TopCategory::NoData);
        assert_eq!(lines.last().unwrap(), NO_EXPENSE_DATA);
    }
}
