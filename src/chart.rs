// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{CategoryExpense, MonthlyExpense};
use crate::utils::fmt_amount;
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: SeriesKind,
    pub points: Vec<(String, Decimal)>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSet {
    pub by_category: Series,
    pub by_month: Series,
}

/// Shapes the category totals into bars and the monthly totals into a
/// month-ordered line. Nothing is drawn here.
pub fn prepare(by_category: &CategoryExpense, by_month: &MonthlyExpense) -> ChartSet {
    ChartSet {
        by_category: Series {
            title: "Category-wise Expenses",
            x_label: "Category",
            y_label: "Amount",
            kind: SeriesKind::Bar,
            points: by_category
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        },
        by_month: Series {
            title: "Monthly Expense Trend",
            x_label: "Month",
            y_label: "Total Expense",
            kind: SeriesKind::Line,
            points: by_month.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        },
    }
}

pub trait ChartRenderer {
    fn render(&mut self, series: &Series) -> Result<()>;
}

/// Draws every non-empty series of the set.
pub fn render_all<R: ChartRenderer + ?Sized>(renderer: &mut R, charts: &ChartSet) -> Result<()> {
    for s in [&charts.by_category, &charts.by_month] {
        if !s.is_empty() {
            renderer.render(s)?;
        }
    }
    Ok(())
}

/// Horizontal unicode bars for bar series, a marker track for line series.
pub struct TextChart<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TextChart<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 40 }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn scaled(&self, v: Decimal, max: Decimal) -> usize {
        if max <= Decimal::ZERO || v <= Decimal::ZERO {
            return 0;
        }
        let ratio = (v / max).to_f64().unwrap_or(0.0);
        ((ratio * self.width as f64).round() as usize).min(self.width)
    }
}

impl<W: Write> ChartRenderer for TextChart<W> {
    fn render(&mut self, series: &Series) -> Result<()> {
        let max = series
            .points
            .iter()
            .map(|(_, v)| *v)
            .max()
            .unwrap_or(Decimal::ZERO);
        let label_w = series
            .points
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0)
            .max(series.x_label.len());

        writeln!(self.out, "{}", series.title)?;
        writeln!(self.out, "{:<label_w$} | {}", series.x_label, series.y_label)?;
        for (label, value) in &series.points {
            let n = self.scaled(*value, max);
            let track = match series.kind {
                SeriesKind::Bar => "█".repeat(n),
                SeriesKind::Line => format!("{}o", " ".repeat(n.saturating_sub(1))),
            };
            writeln!(
                self.out,
                "{:<label_w$} | {} {}",
                label,
                track,
                fmt_amount(value)
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearMonth;

    fn sample() -> ChartSet {
        let mut cats = CategoryExpense::new();
        cats.insert("Food".into(), Decimal::from(150));
        cats.insert("Rent".into(), Decimal::from(400));
        let mut months = MonthlyExpense::new();
        months.insert("2024-02".parse::<YearMonth>().unwrap(), Decimal::from(450));
        months.insert("2024-01".parse::<YearMonth>().unwrap(), Decimal::from(100));
        prepare(&cats, &months)
    }

    #[test]
    fn line_series_is_month_ordered() {
        let set = sample();
        assert_eq!(set.by_month.kind, SeriesKind::Line);
        let labels: Vec<&str> = set.by_month.points.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02"]);
        assert_eq!(set.by_category.kind, SeriesKind::Bar);
        assert_eq!(set.by_category.points.len(), 2);
    }

    #[test]
    fn text_chart_scales_to_largest_value() {
        let set = sample();
        let mut chart = TextChart::new(Vec::new()).with_width(8);
        chart.render(&set.by_category).unwrap();
        let text = String::from_utf8(chart.into_inner()).unwrap();
        assert!(text.starts_with("Category-wise Expenses\n"));
        assert!(text.contains("Rent     | ████████ 400.00"));
        assert!(text.contains("Food     | ███ 150.00"));
    }

    struct Recorder(Vec<&'static str>);

    impl ChartRenderer for Recorder {
        fn render(&mut self, series: &Series) -> Result<()> {
            self.0.push(series.title);
            Ok(())
        }
    }

    #[test]
    fn empty_series_are_skipped() {
        let set = prepare(&CategoryExpense::new(), &MonthlyExpense::new());
        let mut rec = Recorder(Vec::new());
        render_all(&mut rec, &set).unwrap();
        assert!(rec.0.is_empty());

        let mut rec = Recorder(Vec::new());
        render_all(&mut rec, &sample()).unwrap();
        assert_eq!(rec.0, vec!["Category-wise Expenses", "Monthly Expense Trend"]);
    }
}
