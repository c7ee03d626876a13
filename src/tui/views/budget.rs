//! Budget view
//!
//! Editable income and category fields on the left; totals, the guideline
//! or reference comparison, and charts on the right

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::charts::{bar_heights, donut_slices, text_bar};
use crate::config::BudgetStyle;
use crate::models::{BudgetGroup, Money, RangeVerdict};
use crate::services::budget::spending_bars;
use crate::services::BudgetReport;
use crate::tui::app::{App, InputMode};
use crate::tui::layout::{MainPanelLayout, SplitLayout};

use super::titled_block;

const SHARE_BAR_WIDTH: usize = 16;

/// Render the budget view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);
    let report = app.budget_report();

    render_header(frame, app, &report, layout.header);

    let split = SplitLayout::new(layout.content, 55);
    render_form(frame, app, &report, split.left);
    render_summary(frame, app, &report, split.right);
}

fn verdict_color(verdict: RangeVerdict) -> Color {
    match verdict {
        RangeVerdict::Neutral => Color::DarkGray,
        RangeVerdict::Below => Color::Blue,
        RangeVerdict::InRange => Color::Green,
        RangeVerdict::Above => Color::Red,
    }
}

fn render_header(frame: &mut Frame, app: &App, report: &BudgetReport, area: Rect) {
    let symbol = &app.settings.currency_symbol;
    let totals = &report.totals;
    let leftover_color = if totals.is_over_budget() {
        Color::Red
    } else {
        Color::Green
    };
    let style_label = match app.budget_style {
        BudgetStyle::Student => "Student",
        BudgetStyle::FiftyThirtyTwenty => "50/30/20",
    };

    let line = Line::from(vec![
        Span::styled("Income ", Style::default().fg(Color::White)),
        Span::styled(
            totals.income.format_with_symbol(symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  Spending "),
        Span::styled(
            totals.total.format_with_symbol(symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({:.0}%)", report.spending_ratio)),
        Span::raw("  │  Leftover "),
        Span::styled(
            totals.leftover.format_with_symbol(symbol),
            Style::default()
                .fg(leftover_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph =
        Paragraph::new(line).block(titled_block(format!("Budget · {}", style_label), false));
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame, app: &App, report: &BudgetReport, area: Rect) {
    let symbol = &app.settings.currency_symbol;
    let editing = app.input_mode == InputMode::Editing;

    let header = Row::new(vec![
        Cell::from("Field"),
        Cell::from("Amount"),
        Cell::from("Typical"),
        Cell::from("Check"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let mut rows = Vec::with_capacity(app.budget_row_count());
    for index in 0..app.budget_row_count() {
        let is_editing = editing && index == app.budget_index;
        let row = match app.budget_row(index) {
            None => {
                let amount = if is_editing {
                    format!("{}▏", app.budget_input.value())
                } else {
                    app.budget_form.monthly_income.clone()
                };
                Row::new(vec![
                    Cell::from("Monthly income").style(Style::default().fg(Color::Cyan)),
                    Cell::from(amount),
                    Cell::from(""),
                    Cell::from(""),
                ])
            }
            Some(category) => {
                let line = report.lines.iter().find(|l| l.category == category);
                let amount = if is_editing {
                    format!("{}▏", app.budget_input.value())
                } else {
                    app.budget_form.raw(category).to_string()
                };
                let typical = line
                    .and_then(|l| l.range)
                    .map(|band| {
                        format!(
                            "{}-{}",
                            band.min.format_with_symbol(symbol),
                            band.max.format_with_symbol(symbol)
                        )
                    })
                    .unwrap_or_default();
                let verdict = line.map(|l| l.verdict).unwrap_or(RangeVerdict::Neutral);
                Row::new(vec![
                    Cell::from(category.label()),
                    Cell::from(amount),
                    Cell::from(typical).style(Style::default().fg(Color::DarkGray)),
                    Cell::from(verdict.label()).style(Style::default().fg(verdict_color(verdict))),
                ])
            }
        };
        rows.push(row);
    }

    let widths = [
        Constraint::Length(22),
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block("Monthly budget", true))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.budget_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, report: &BudgetReport, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(10)])
        .split(area);

    let symbol = &app.settings.currency_symbol;
    let totals = &report.totals;
    let mut lines = Vec::new();

    let shares: Vec<(&str, f64)> = BudgetGroup::ALL
        .into_iter()
        .map(|g| (g.label(), totals.group(g).as_f64()))
        .collect();
    let slices = donut_slices(&shares);
    if slices.is_empty() {
        lines.push(Line::from(Span::styled(
            "Enter amounts to see your breakdown",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for slice in &slices {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<8}", slice.label)),
                Span::raw(format!("{:>4.0}% ", slice.percent())),
                Span::styled(
                    text_bar(slice.percent(), SHARE_BAR_WIDTH),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    match (app.budget_style, report.guideline) {
        (BudgetStyle::FiftyThirtyTwenty, Some(guideline)) => {
            lines.push(Line::from(Span::styled(
                "50/30/20 guideline",
                Style::default().fg(Color::Yellow),
            )));
            for group in BudgetGroup::ALL {
                lines.push(Line::from(format!(
                    "{:<8} {:>12} of {}",
                    group.label(),
                    totals.group(group).format_with_symbol(symbol),
                    guideline.group(group).format_with_symbol(symbol)
                )));
            }
        }
        (BudgetStyle::FiftyThirtyTwenty, None) => {
            lines.push(Line::from(Span::styled(
                "Enter your income to see the 50/30/20 split",
                Style::default().fg(Color::DarkGray),
            )));
        }
        (BudgetStyle::Student, _) => {
            let flagged = report
                .lines
                .iter()
                .filter(|l| l.verdict == RangeVerdict::Above)
                .count();
            lines.push(Line::from(if flagged == 0 {
                Span::styled("Every category is within typical ranges", Style::default().fg(Color::Green))
            } else {
                Span::styled(
                    format!("{} categor{} above typical", flagged, if flagged == 1 { "y" } else { "ies" }),
                    Style::default().fg(Color::Red),
                )
            }));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] edit  [s] style  [x] clear",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Summary", false)),
        chunks[0],
    );

    let data = spending_bars(totals);
    let values: Vec<f64> = data.iter().map(|(_, v)| *v).collect();
    let bars: Vec<Bar> = data
        .iter()
        .zip(bar_heights(&values))
        .map(|((label, value), height)| {
            let amount = Money::from_cents((value * 100.0).round() as i64);
            Bar::default()
                .value(height.round() as u64)
                .text_value(amount.format_with_symbol(symbol))
                .label(Line::from(*label))
        })
        .collect();
    let chart = BarChart::default()
        .block(titled_block("Income vs spending", false))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(2)
        .max(100)
        .bar_style(Style::default().fg(Color::Cyan));
    frame.render_widget(chart, chunks[1]);
}
