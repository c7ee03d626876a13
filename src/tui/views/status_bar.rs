//! Status bar view
//!
//! Shows session state, the active view's loading/error state, transient
//! messages and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App, InputMode};

/// Loading / error note for the active view
fn view_state(app: &App) -> Option<(String, Color)> {
    match app.active_view {
        ActiveView::Stocks => {
            let state = app.stocks.state();
            if state.is_loading() {
                Some(("Loading companies...".into(), Color::Yellow))
            } else if let Some(error) = state.error() {
                Some((error.to_string(), Color::Red))
            } else if !state.prices_settled() {
                Some(("Loading prices...".into(), Color::Yellow))
            } else {
                None
            }
        }
        ActiveView::News => {
            if app.news.is_loading() {
                Some(("Loading news...".into(), Color::Yellow))
            } else {
                app.news.error().map(|e| (e.to_string(), Color::Red))
            }
        }
        ActiveView::Chat if app.chat.is_pending() => {
            Some(("Waiting for reply...".into(), Color::Yellow))
        }
        _ => None,
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![];

    let session_color = if app.session.is_connected() {
        Color::Green
    } else {
        Color::Red
    };
    spans.push(Span::styled(
        format!(" {} ", app.session.status_label()),
        Style::default()
            .fg(session_color)
            .add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        app.active_view.label(),
        Style::default().fg(Color::Cyan),
    ));

    if let Some((note, color)) = view_state(app) {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(note, Style::default().fg(color)));
    }

    if let Some(message) = app.status_text() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = match app.input_mode {
        InputMode::Editing => " Enter:Confirm  Esc:Done ",
        InputMode::Normal => " q:Quit  ?:Help  1-6:Views ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
