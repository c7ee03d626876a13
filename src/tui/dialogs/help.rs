//! Help dialog
//!
//! Shows contextual keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Help lines for the given view
fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show help"),
        key_line("1-6", "Switch view"),
        key_line("Tab", "Next view"),
        key_line("Esc", "Close dialog / stop typing"),
        Line::from(""),
        section(view.label()),
        Line::from(""),
    ];

    let keys: &[(&str, &str)] = match view {
        ActiveView::Home => &[
            ("l", "Sign in"),
            ("s", "Create an account"),
            ("o", "Sign out"),
        ],
        ActiveView::Budget => &[
            ("j/k", "Move between fields"),
            ("Enter/e", "Edit the selected amount"),
            ("s", "Switch student / 50-30-20 style"),
            ("x", "Clear the form"),
        ],
        ActiveView::Stocks => &[
            ("n/→", "Next page"),
            ("p/←", "Previous page"),
            ("r", "Reload the page"),
            ("j/k", "Move selection"),
        ],
        ActiveView::News => &[
            ("/ or i", "Type a search"),
            ("c", "Next topic"),
            ("x", "Clear filters"),
            ("r", "Refresh / try again"),
            ("j/k", "Move selection"),
        ],
        ActiveView::Learn => &[
            ("Enter", "Expand unit / open lesson"),
            ("r", "Resume where you left off"),
            ("z", "Start the final quiz"),
            ("Space", "Choose an answer (quiz)"),
            ("Enter", "Next question (quiz)"),
            ("d", "Course details"),
            ("b", "Leaderboard"),
        ],
        ActiveView::Chat => &[
            ("i/Enter", "Start typing"),
            ("Enter", "Send message"),
            ("Esc", "Stop typing"),
        ],
    };
    lines.extend(keys.iter().map(|(key, description)| key_line(key, description)));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
