//! Budget report display formatting

use crate::charts::{bar_heights, donut_slices, range_bars, text_bar, RangeBar};
use crate::config::BudgetStyle;
use crate::models::{BudgetGroup, Money, ReferenceRanges};
use crate::services::budget::spending_bars;
use crate::services::BudgetReport;

use super::text::{format_money, format_percentage, separator};

const BAR_WIDTH: usize = 30;

/// Format a computed budget report
pub fn format_budget_report(report: &BudgetReport, symbol: &str) -> String {
    let mut output = String::new();
    let totals = &report.totals;

    let label_width = report
        .lines
        .iter()
        .map(|l| l.label.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    for group in BudgetGroup::ALL {
        output.push_str(&format!("{}\n", group.label().to_uppercase()));
        for line in report.lines.iter().filter(|l| l.group == group) {
            let mut row = format!(
                "  {:<label_width$}  {:>12}",
                line.label,
                format_money(line.amount, symbol),
                label_width = label_width,
            );
            if report.style == BudgetStyle::Student {
                if let Some(band) = &line.range {
                    row.push_str(&format!("  {:<12}  {}", band.to_string(), line.verdict));
                }
            }
            output.push_str(row.trim_end());
            output.push('\n');
        }
        output.push_str(&format!(
            "  {:<label_width$}  {:>12}\n\n",
            format!("Total {}", group.label()),
            format_money(totals.group(group), symbol),
            label_width = label_width,
        ));
    }

    output.push_str(&separator(label_width + 16));
    output.push('\n');
    output.push_str(&format!(
        "Monthly income:  {:>12}\n",
        format_money(totals.income, symbol)
    ));
    output.push_str(&format!(
        "Total spending:  {:>12}\n",
        format_money(totals.total, symbol)
    ));
    if totals.is_over_budget() {
        output.push_str(&format!(
            "Over budget:     {:>12}\n",
            format_money(totals.leftover.abs(), symbol)
        ));
    } else {
        output.push_str(&format!(
            "Leftover:        {:>12}\n",
            format_money(totals.leftover, symbol)
        ));
    }
    output.push_str(&format!(
        "Spent:           {:>12}\n",
        format_percentage(report.spending_ratio)
    ));

    if report.style == BudgetStyle::FiftyThirtyTwenty {
        output.push('\n');
        match &report.guideline {
            Some(guideline) => {
                output.push_str("50/30/20 guideline\n");
                for group in BudgetGroup::ALL {
                    output.push_str(&format!(
                        "  {:<8} {:>3}%  {:>12}  (you: {})\n",
                        group.label(),
                        group.guideline_percent(),
                        format_money(guideline.group(group), symbol),
                        format_money(totals.group(group), symbol),
                    ));
                }
            }
            None => output.push_str("Enter a monthly income to see the 50/30/20 split.\n"),
        }
    }

    output
}

/// Needs/wants/savings split and income versus spending, as text bars
pub fn format_budget_charts(report: &BudgetReport, symbol: &str) -> String {
    let mut output = String::new();
    let totals = &report.totals;

    output.push_str("Spending by group\n");
    let shares: Vec<_> = BudgetGroup::ALL
        .into_iter()
        .map(|g| (g.label(), totals.group(g).as_f64()))
        .collect();
    let slices = donut_slices(&shares);
    if slices.is_empty() {
        output.push_str("  No spending entered yet.\n");
    } else {
        for slice in &slices {
            output.push_str(&format!(
                "  {:<8} {:>5}  {}\n",
                slice.label,
                format_percentage(slice.percent()),
                text_bar(slice.percent(), BAR_WIDTH),
            ));
        }
    }

    output.push_str("\nIncome vs spending\n");
    let bars = spending_bars(totals);
    let values: Vec<f64> = bars.iter().map(|(_, v)| *v).collect();
    for ((label, value), height) in bars.iter().zip(bar_heights(&values)) {
        output.push_str(&format!(
            "  {:<8} {:>12}  {}\n",
            label,
            format_money(Money::from_cents((value * 100.0).round() as i64), symbol),
            text_bar(height, BAR_WIDTH),
        ));
    }

    output
}

/// Reference band (`-`, with the band as `=`) against the entered amount (`#`)
pub fn format_range_chart(rows: &[RangeBar]) -> String {
    let mut output = String::from("Your spending vs typical ranges\n");
    for (row, geometry) in rows.iter().zip(range_bars(rows)) {
        let range_cells = ((geometry.range_height / 100.0) * BAR_WIDTH as f64).round() as usize;
        let band_cells =
            ((geometry.band_share / 100.0) * range_cells as f64).round() as usize;
        let range_bar = format!(
            "{}{}",
            "-".repeat(range_cells.saturating_sub(band_cells)),
            "=".repeat(band_cells.min(range_cells))
        );
        let user_cells = ((geometry.user_height / 100.0) * BAR_WIDTH as f64).round() as usize;

        output.push_str(&format!(
            "  {:<10} range {:<width$} ${:.0}-${:.0}\n",
            row.label,
            range_bar,
            row.min,
            row.range_max(),
            width = BAR_WIDTH,
        ));
        output.push_str(&format!(
            "  {:<10} you   {:<width$} ${:.0}\n",
            "",
            "#".repeat(user_cells),
            row.user,
            width = BAR_WIDTH,
        ));
    }
    output
}

/// Format the reference range table
pub fn format_reference_ranges(ranges: &ReferenceRanges) -> String {
    if ranges.is_empty() {
        return "No reference ranges configured.".to_string();
    }

    let width = ranges
        .keys()
        .map(|c| c.label().chars().count())
        .max()
        .unwrap_or(8);

    let mut output = format!(
        "{:<width$}  {:<16}  {}\n",
        "Category",
        "Key",
        "Typical monthly",
        width = width
    );
    output.push_str(&format!(
        "{:-<width$}  {:-<16}  {:-<15}\n",
        "",
        "",
        "",
        width = width
    ));
    for (category, band) in ranges {
        output.push_str(&format!(
            "{:<width$}  {:<16}  {}\n",
            category.label(),
            category.key(),
            band,
            width = width
        ));
    }
    output
}
