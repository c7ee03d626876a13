//! TUI Views module
//!
//! One view per page (home, budget, stocks, news, learn, chat), plus the
//! sidebar and status bar.

pub mod budget;
pub mod chat;
pub mod home;
pub mod learn;
pub mod news;
pub mod sidebar;
pub mod status_bar;
pub mod stocks;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::Home => home::render(frame, app, layout.main),
        ActiveView::Budget => budget::render(frame, app, layout.main),
        ActiveView::Stocks => stocks::render(frame, app, layout.main),
        ActiveView::News => news::render(frame, app, layout.main),
        ActiveView::Learn => learn::render(frame, app, layout.main),
        ActiveView::Chat => chat::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Login => dialogs::login::render(frame, app),
        ActiveDialog::CourseDetails => dialogs::course_details::render(frame, app),
        ActiveDialog::Leaderboard => dialogs::leaderboard::render(frame),
        ActiveDialog::None => {}
    }
}

/// Bordered block with the cyan title every panel uses
pub(crate) fn titled_block(title: impl Into<String>, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::White };
    Block::default()
        .title(format!(" {} ", title.into()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// Rows that fit inside a bordered block
pub(crate) fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}
