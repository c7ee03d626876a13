//! Chat view
//!
//! Transcript with the assistant and an input line

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::models::Sender;
use crate::tui::app::{App, InputMode};

use super::{titled_block, visible_rows};

/// Render the chat view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    render_transcript(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.chat.messages() {
        let color = match message.sender {
            Sender::User => Color::Cyan,
            Sender::Bot => Color::Green,
        };
        lines.push(Line::from(vec![
            Span::styled(
                message.sender.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", message.timestamp.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(message.text.clone()));
        lines.push(Line::from(""));
    }
    if app.chat.is_pending() {
        lines.push(Line::from(Span::styled(
            "UpScale is typing...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // keep the newest messages in view; wrapped lines may still push older ones out
    let scroll = lines.len().saturating_sub(visible_rows(area)) as u16;
    let paragraph = Paragraph::new(lines)
        .block(titled_block("Financial Assistant", false))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let title = if editing {
        "Message · Enter to send, Esc to stop typing"
    } else {
        "Message · press i to type"
    };
    let block = titled_block(title, editing);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = app.chat_input.clone().focused(editing);
    frame.render_widget(&input, inner);
}
