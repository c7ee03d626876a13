//! Learning center view
//!
//! Units and their lessons on the left, the open lesson or the final quiz
//! on the right

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::LessonKind;
use crate::services::QuizState;
use crate::tui::app::{App, LearnRow};
use crate::tui::layout::SplitLayout;

use super::titled_block;

/// Render the learn view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let split = SplitLayout::new(area, 40);
    render_units(frame, app, split.left);

    if app.quiz_in_progress() {
        render_quiz(frame, app, split.right);
    } else {
        render_lesson(frame, app, split.right);
    }
}

fn render_units(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let gauge = Gauge::default()
        .block(titled_block(app.progress.progress_level(), false))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::from(app.progress.overall_progress()));
    frame.render_widget(gauge, chunks[0]);

    let units = &app.curriculum.units;
    let items: Vec<ListItem> = app
        .learn_rows()
        .into_iter()
        .map(|row| match row {
            LearnRow::Unit(index) => {
                let unit = &units[index];
                let locked = app.progress.is_unit_locked(index);
                let expanded = app.progress.expanded_unit() == Some(unit.id);
                let marker = if locked {
                    "🔒"
                } else if expanded {
                    "▾"
                } else {
                    "▸"
                };
                let style = if locked {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} {} ", marker, unit.title), style),
                    Span::styled(
                        format!("{}%", app.progress.unit_progress(unit)),
                        Style::default().fg(Color::Yellow),
                    ),
                ]))
            }
            LearnRow::Lesson(unit_index, lesson_index) => {
                let lesson = &units[unit_index].lessons[lesson_index];
                let done = app.progress.is_completed(&lesson.id);
                let active = app.progress.active_lesson().map(|l| &l.id) == Some(&lesson.id);
                let check = if done { "✓" } else { "○" };
                let style = if active {
                    Style::default().fg(Color::Cyan)
                } else if done {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("    {} {}", check, lesson.title), style),
                    Span::styled(
                        format!("  {}", lesson.duration),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            }
            LearnRow::Quiz => {
                let style = if app.progress.is_quiz_unlocked() {
                    Style::default().fg(Color::Magenta)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let marker = if app.progress.is_quiz_unlocked() { "★" } else { "🔒" };
                ListItem::new(Line::from(Span::styled(
                    format!("{} Final quiz", marker),
                    style,
                )))
            }
        })
        .collect();

    let list = List::new(items)
        .block(titled_block("Units", !app.quiz_in_progress()))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.learn_index));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_lesson(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    match app.progress.active_lesson() {
        Some(lesson) => {
            lines.push(Line::from(Span::styled(
                lesson.title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            let mut meta = format!("{} · {}", lesson.kind.label(), lesson.duration);
            if let LessonKind::Video { url } = &lesson.kind {
                meta.push_str(&format!(" · {}", url));
            }
            lines.push(Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))));
            lines.push(Line::from(""));
            lines.extend(lesson.content.lines().map(|l| Line::from(l.to_string())));
        }
        None => {
            let resume = app.progress.resume_unit();
            lines.push(Line::from(Span::styled(
                "Pick a lesson to start reading",
                Style::default().fg(Color::Yellow),
            )));
            if let Some(unit) = resume {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::raw("Continue with "),
                    Span::styled(unit.title.clone(), Style::default().fg(Color::Cyan)),
                    Span::raw(" ([r] resume)"),
                ]));
                lines.push(Line::from(unit.description.clone()));
            }
            let badges = app.progress.badges();
            if !badges.is_empty() {
                lines.push(Line::from(""));
                let names: Vec<&str> = badges.iter().map(|b| b.label()).collect();
                lines.push(Line::from(vec![
                    Span::raw("Badges: "),
                    Span::styled(names.join(", "), Style::default().fg(Color::Magenta)),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[Enter] open  [z] quiz  [d] details  [b] leaderboard",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Lesson", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_quiz(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    let total = app.quiz.question_count();

    match app.quiz.state() {
        QuizState::InProgress {
            index, selected, ..
        } => {
            if let Some(question) = app.quiz.current_question() {
                lines.push(Line::from(Span::styled(
                    format!("Question {} of {}", index + 1, total),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::from(Span::styled(
                    question.question.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                for (n, option) in question.options.iter().enumerate() {
                    let chosen = selected == Some(n);
                    let cursor = if app.quiz_cursor == n { "▶" } else { " " };
                    let mark = if chosen { "(•)" } else { "( )" };
                    let style = if chosen {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    lines.push(Line::from(Span::styled(
                        format!("{} {} {}", cursor, mark, option),
                        style,
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "[Space] choose  [Enter] next  [Esc] leave quiz",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        QuizState::Finished { score } => {
            lines.push(Line::from(Span::styled(
                format!("You scored {}/{}", score, total),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            if let Some(message) = app.quiz.result_message() {
                lines.push(Line::from(message));
            }
            lines.push(Line::from(format!("Quizzes passed: {}", app.quiz.quizzes_passed())));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[r] retake  [Esc] back to units",
                Style::default().fg(Color::DarkGray),
            )));
        }
        QuizState::NotStarted => {}
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Final quiz", true))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
