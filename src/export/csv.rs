//! CSV export of a budget report

use std::io::Write;

use crate::error::{UpscaleError, UpscaleResult};
use crate::models::Money;
use crate::services::BudgetReport;

const HEADER: [&str; 6] = ["Group", "Category", "Amount", "Range Min", "Range Max", "Verdict"];

fn amount(money: Money) -> String {
    format!("{:.2}", money.as_f64())
}

/// Export the category lines followed by Total, Income and Leftover rows
pub fn export_budget_csv<W: Write>(report: &BudgetReport, writer: &mut W) -> UpscaleResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    let err = |e: ::csv::Error| UpscaleError::Export(e.to_string());

    csv.write_record(HEADER).map_err(err)?;

    for line in &report.lines {
        let (min, max) = line
            .range
            .map(|band| (amount(band.min), amount(band.max)))
            .unwrap_or_default();
        csv.write_record([
            line.group.label(),
            line.label,
            amount(line.amount).as_str(),
            min.as_str(),
            max.as_str(),
            line.verdict.label(),
        ])
        .map_err(err)?;
    }

    let totals = &report.totals;
    for (label, value) in [
        ("Total", totals.total),
        ("Income", totals.income),
        ("Leftover", totals.leftover),
    ] {
        csv.write_record(["", label, amount(value).as_str(), "", "", ""])
            .map_err(err)?;
    }

    csv.flush()
        .map_err(|e| UpscaleError::Export(e.to_string()))?;
    Ok(())
}
