//! Home view
//!
//! Welcome panel with progress at a glance and account actions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;

use super::titled_block;

/// Render the home view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);

    let percent = app.progress.overall_progress();
    let gauge = Gauge::default()
        .block(titled_block("Learning progress", false))
        .gauge_style(Style::default().fg(Color::Green))
        .label(format!(
            "{}/{} lessons · {}",
            app.progress.completed_count(),
            app.progress.total_lessons(),
            app.progress.progress_level()
        ))
        .percent(u16::from(percent));
    frame.render_widget(gauge, layout.header);

    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled("Welcome to UpScale", heading)),
        Line::from("Learn to budget, follow the market and invest with confidence."),
        Line::from(""),
    ];

    if let Some(unit) = app.progress.resume_unit() {
        lines.push(Line::from(vec![
            Span::raw("Continue with: "),
            Span::styled(unit.title.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }
    let badges = app.progress.badges();
    if !badges.is_empty() {
        let names: Vec<&str> = badges.iter().map(|b| b.label()).collect();
        lines.push(Line::from(vec![
            Span::raw("Badges: "),
            Span::styled(names.join(", "), Style::default().fg(Color::Magenta)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Account", heading)));
    match &app.user {
        Some(user) => {
            lines.push(Line::from(format!("Signed in as {}", user.email)));
            lines.push(key_hint("o", "Sign out"));
        }
        None => {
            lines.push(key_hint("l", "Sign in"));
            lines.push(key_hint("s", "Create an account"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Where to go", heading)));
    lines.push(key_hint("2", "Budget calculator"));
    lines.push(key_hint("3", "Stock prices"));
    lines.push(key_hint("4", "Market news"));
    lines.push(key_hint("5", "Learning center"));
    lines.push(key_hint("6", "Ask the assistant"));

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Home", true))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, layout.content);
}

fn key_hint(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  [{}] ", key), Style::default().fg(Color::Yellow)),
        Span::raw(description.to_string()),
    ])
}
