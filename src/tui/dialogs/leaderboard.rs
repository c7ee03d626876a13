//! Leaderboard dialog

use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Row, Table},
    Frame,
};

use crate::models::LEADERBOARD;
use crate::tui::layout::centered_rect_fixed;

/// Render the leaderboard dialog
pub fn render(frame: &mut Frame) {
    let area = centered_rect_fixed(46, LEADERBOARD.len() as u16 + 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Leaderboard ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(" Esc to close ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Learner"),
        Cell::from("Points"),
        Cell::from("Streak"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = LEADERBOARD
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let style = if rank == 0 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from((rank + 1).to_string()),
                Cell::from(entry.name),
                Cell::from(entry.points.to_string()),
                Cell::from(format!("{} days", entry.streak)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(14),
        Constraint::Length(8),
        Constraint::Length(9),
    ];
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
