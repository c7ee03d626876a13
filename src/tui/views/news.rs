//! News view
//!
//! Search field and category filter over the fetched articles

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::NewsCategory;
use crate::tui::app::{App, InputMode};

use super::titled_block;

/// Render the news view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    render_filters(frame, app, chunks[0]);
    render_articles(frame, app, chunks[1]);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Market News", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let search = app
        .news_search
        .clone()
        .focused(app.input_mode == InputMode::Editing);
    frame.render_widget(&search, rows[0]);

    let mut spans = vec![Span::raw("Topic: ")];
    for category in NewsCategory::ALL {
        let style = if app.news.category() == category {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", category.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "  [/] search [c] topic [x] clear [r] refresh",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

fn render_articles(frame: &mut Frame, app: &App, area: Rect) {
    let articles = app.news.filtered();
    let title = format!("{} of {} articles", articles.len(), app.news.articles().len());
    let block = titled_block(title, app.input_mode == InputMode::Normal);

    if articles.is_empty() {
        let message = if app.news.is_loading() {
            Line::from(Span::styled("Loading news...", Style::default().fg(Color::Yellow)))
        } else if let Some(error) = app.news.error() {
            Line::from(vec![
                Span::styled(format!("Could not load news: {}", error), Style::default().fg(Color::Red)),
                Span::styled("  [r] Try again", Style::default().fg(Color::Yellow)),
            ])
        } else if app.news.has_filters() {
            Line::from(Span::styled(
                "No articles match your filters. [x] clears them.",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled("No news available", Style::default().fg(Color::DarkGray)))
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let now = Utc::now();
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = articles
        .iter()
        .map(|article| {
            let meta = format!("{} · {}", article.source_name(), article.relative_date(now));
            let summary: String = article.summary().chars().take(width).collect();
            ListItem::new(vec![
                Line::from(Span::styled(
                    article.title().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(meta, Style::default().fg(Color::Cyan))),
                Line::from(Span::styled(summary, Style::default().fg(Color::Gray))),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▌");

    let mut state = ListState::default();
    state.select(Some(app.news_index));
    frame.render_stateful_widget(list, area, &mut state);
}
