//! Course details dialog

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::CourseDetails;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the course details dialog
pub fn render(frame: &mut Frame, app: &App) {
    let details = CourseDetails::for_curriculum(&app.curriculum);
    let area = centered_rect_fixed(46, 11, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Course Details ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:>12}  ", label), Style::default().fg(Color::Yellow)),
            Span::raw(value),
        ])
    };

    let lines = vec![
        Line::from(""),
        row("Units", details.units.to_string()),
        row("Lessons", details.lessons.to_string()),
        row("Difficulty", details.difficulty.to_string()),
        row("Pace", details.pace.to_string()),
        row(
            "Progress",
            format!("{}%", app.progress.overall_progress()),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
