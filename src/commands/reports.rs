// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::chart::{self, TextChart};
use crate::ledger::{Ledger, top_category};
use crate::report::{
    AnalysisReport, NO_DATA, NO_DATA_TO_ANALYZE, SummaryReport, analysis_lines, summary_lines,
};
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn summary(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let totals = ledger.totals();
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &SummaryReport::from(&totals),
    )? {
        return Ok(());
    }
    if ledger.is_empty() {
        println!("{}", NO_DATA);
        return Ok(());
    }
    for line in summary_lines(&totals) {
        println!("{}", line);
    }
    Ok(())
}

pub fn analysis(ledger: &Ledger) -> AnalysisReport {
    let by_category = ledger.category_expense();
    AnalysisReport {
        monthly_expense: ledger
            .monthly_expense()
            .iter()
            .map(|(m, v)| (m.to_string(), fmt_amount(v)))
            .collect(),
        category_expense: by_category
            .iter()
            .map(|(c, v)| (c.clone(), fmt_amount(v)))
            .collect(),
        top_category: top_category(&by_category),
    }
}

pub fn analyze(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &analysis(ledger))? {
        return Ok(());
    }
    if ledger.is_empty() {
        println!("{}", NO_DATA_TO_ANALYZE);
        return Ok(());
    }

    let by_month = ledger.monthly_expense();
    let by_category = ledger.category_expense();
    for line in analysis_lines(&by_month, &top_category(&by_category)) {
        println!("{}", line);
    }

    if !by_category.is_empty() {
        let mut items: Vec<_> = by_category.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1));
        let rows = items
            .into_iter()
            .map(|(c, v)| vec![c.clone(), fmt_amount(v)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    if !sub.get_flag("no-chart") {
        let width = sub.get_one::<usize>("width").copied().unwrap_or(40);
        let charts = chart::prepare(&by_category, &by_month);
        println!();
        let mut out = TextChart::new(std::io::stdout().lock()).with_width(width);
        chart::render_all(&mut out, &charts)?;
    }
    Ok(())
}
