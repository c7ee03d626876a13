//! Stocks view
//!
//! One page of companies; each price fills in as its own request settles

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::services::PriceSlot;
use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;

use super::titled_block;

/// Render the stocks view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);
    render_pager(frame, app, layout.header);
    render_table(frame, app, layout.content);
}

fn pager_key(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label.to_string(), style)
}

fn render_pager(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.stocks.state();
    let mut spans = vec![
        pager_key("◀ [p] Prev", state.can_prev()),
        Span::raw(format!(
            "   Page {} of {}   ",
            state.page() + 1,
            state.max_page() + 1
        )),
        pager_key("[n] Next ▶", state.can_next()),
        Span::styled("   [r] Reload", Style::default().fg(Color::Yellow)),
    ];
    if state.error().is_some() {
        spans.push(Span::styled(
            "   Try again with [r]",
            Style::default().fg(Color::Red),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(titled_block("Stocks", false));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.stocks.state();
    let block = titled_block("Companies", true);

    if state.companies().is_empty() {
        let message = if state.is_loading() {
            Span::styled("Loading companies...", Style::default().fg(Color::Yellow))
        } else if let Some(error) = state.error() {
            Span::styled(format!("Could not load companies: {}", error), Style::default().fg(Color::Red))
        } else {
            Span::styled("No companies on this page", Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(Paragraph::new(Line::from(message)).block(block), area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Symbol"),
        Cell::from("Company"),
        Cell::from("Exchange"),
        Cell::from("Price"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .companies()
        .iter()
        .map(|company| {
            let (price, style) = match state.price_slot(&company.symbol) {
                Some(PriceSlot::Pending) => ("…".to_string(), Style::default().fg(Color::Yellow)),
                Some(PriceSlot::Failed(_)) => (
                    state.display_price(company),
                    Style::default().fg(Color::Red),
                ),
                Some(PriceSlot::Known(_)) => (
                    state.display_price(company),
                    Style::default().fg(Color::Green),
                ),
                _ => (
                    state.display_price(company),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            Row::new(vec![
                Cell::from(company.symbol.clone())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(company.name.clone()),
                Cell::from(company.exchange.clone().unwrap_or_default()),
                Cell::from(price).style(style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default();
    table_state.select(Some(app.stock_index));
    frame.render_stateful_widget(table, area, &mut table_state);
}
