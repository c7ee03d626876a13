//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state, and folds network results into it.

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, InputMode};
use super::dialogs::login::{LoginAction, LoginMode};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.expire_status();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
        Event::Stock(update) => {
            app.stocks.handle(update);
            let count = app.stocks.state().companies().len();
            app.stock_index = app.stock_index.min(count.saturating_sub(1));
            Ok(())
        }
        Event::News(result) => {
            app.finish_news(result);
            Ok(())
        }
        Event::Chat(result) => {
            app.receive_chat(result);
            Ok(())
        }
        Event::Identity(result) => {
            app.finish_login(result);
            Ok(())
        }
        Event::InputClosed(reason) => {
            app.quit();
            Err(anyhow!("Terminal input failed: {}", reason))
        }
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
    Ok(())
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        // any key closes help
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::Login => match app.login.handle_key(key) {
            LoginAction::Submit => app.submit_login(),
            LoginAction::Cancel => app.close_dialog(),
            LoginAction::None => {}
        },
        ActiveDialog::CourseDetails | ActiveDialog::Leaderboard => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_dialog();
            }
        }
        ActiveDialog::None => {}
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return;
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return;
        }
        KeyCode::Char(c @ '1'..='6') => {
            if let Some(view) = ActiveView::from_key(c) {
                app.switch_view(view);
            }
            return;
        }
        KeyCode::Tab => {
            app.switch_view(app.active_view.next());
            return;
        }
        KeyCode::BackTab => {
            app.switch_view(app.active_view.prev());
            return;
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Home => handle_home_key(app, key),
        ActiveView::Budget => handle_budget_key(app, key),
        ActiveView::Stocks => handle_stocks_key(app, key),
        ActiveView::News => handle_news_key(app, key),
        ActiveView::Learn => handle_learn_key(app, key),
        ActiveView::Chat => handle_chat_key(app, key),
    }
}

fn move_index(index: &mut usize, count: usize, down: bool) {
    if down {
        if *index + 1 < count {
            *index += 1;
        }
    } else {
        *index = index.saturating_sub(1);
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') if app.user.is_none() => app.open_login(LoginMode::SignIn),
        KeyCode::Char('s') if app.user.is_none() => app.open_login(LoginMode::SignUp),
        KeyCode::Char('o') => app.sign_out(),
        _ => {}
    }
}

fn handle_budget_key(app: &mut App, key: KeyEvent) {
    let count = app.budget_row_count();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => move_index(&mut app.budget_index, count, true),
        KeyCode::Char('k') | KeyCode::Up => move_index(&mut app.budget_index, count, false),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_budget_edit(),
        KeyCode::Char('s') => app.toggle_budget_style(),
        KeyCode::Char('x') => {
            app.budget_form = Default::default();
            app.set_status("Budget cleared");
        }
        _ => {}
    }
}

fn handle_stocks_key(app: &mut App, key: KeyEvent) {
    let count = app.stocks.state().companies().len();
    match key.code {
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char('l') => app.next_stock_page(),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::Char('h') => app.prev_stock_page(),
        KeyCode::Char('r') => app.reload_stocks(),
        KeyCode::Char('j') | KeyCode::Down => move_index(&mut app.stock_index, count, true),
        KeyCode::Char('k') | KeyCode::Up => move_index(&mut app.stock_index, count, false),
        _ => {}
    }
}

fn handle_news_key(app: &mut App, key: KeyEvent) {
    let count = app.news.filtered().len();
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.news_search.focused = true;
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('c') => app.cycle_news_category(),
        KeyCode::Char('x') => app.clear_news_filters(),
        KeyCode::Char('r') => app.fetch_news(),
        KeyCode::Char('j') | KeyCode::Down => move_index(&mut app.news_index, count, true),
        KeyCode::Char('k') | KeyCode::Up => move_index(&mut app.news_index, count, false),
        _ => {}
    }
}

fn handle_learn_key(app: &mut App, key: KeyEvent) {
    if app.quiz_in_progress() {
        handle_quiz_key(app, key);
        return;
    }

    let count = app.learn_rows().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => move_index(&mut app.learn_index, count, true),
        KeyCode::Char('k') | KeyCode::Up => move_index(&mut app.learn_index, count, false),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_learn_row(),
        KeyCode::Char('r') => app.resume_learning(),
        KeyCode::Char('z') => app.start_quiz(),
        KeyCode::Char('d') => app.open_dialog(ActiveDialog::CourseDetails),
        KeyCode::Char('b') => app.open_dialog(ActiveDialog::Leaderboard),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if app.quiz.final_score().is_some() {
        match key.code {
            KeyCode::Char('r') => app.start_quiz(),
            KeyCode::Esc | KeyCode::Enter => app.leave_quiz(),
            _ => {}
        }
        return;
    }

    let options = app
        .quiz
        .current_question()
        .map_or(0, |q| q.options.len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => move_index(&mut app.quiz_cursor, options, true),
        KeyCode::Char('k') | KeyCode::Up => move_index(&mut app.quiz_cursor, options, false),
        KeyCode::Char(' ') => app.select_quiz_answer(),
        KeyCode::Enter => app.advance_quiz(),
        KeyCode::Esc => app.leave_quiz(),
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char('i') | KeyCode::Enter) {
        app.begin_chat_input();
    }
}

/// Keys while a text field has focus
fn handle_editing_key(app: &mut App, key: KeyEvent) {
    match app.active_view {
        ActiveView::Budget => match key.code {
            KeyCode::Enter => app.commit_budget_edit(),
            KeyCode::Esc => app.input_mode = InputMode::Normal,
            _ => {
                app.budget_input.handle_key(key);
            }
        },
        ActiveView::News => match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.news_search.focused = false;
                app.input_mode = InputMode::Normal;
            }
            _ => {
                if app.news_search.handle_key(key) {
                    app.sync_news_search();
                }
            }
        },
        ActiveView::Chat => match key.code {
            KeyCode::Enter => app.send_chat(),
            KeyCode::Esc => app.end_chat_input(),
            _ => {
                app.chat_input.handle_key(key);
            }
        },
        _ => app.input_mode = InputMode::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::testing::ScriptedHttpClient;
    use crate::tui::app::testing::Harness;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_number_keys_switch_views_and_q_quits() {
        let harness = Harness::new(ScriptedHttpClient::new());
        let mut app = harness.app();

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_view, ActiveView::Budget);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active_view, ActiveView::Learn);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_q_is_typed_while_editing() {
        let harness = Harness::new(ScriptedHttpClient::new());
        let mut app = harness.app();

        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.input_mode, InputMode::Editing);
        type_text(&mut app, "q1");
        assert!(!app.should_quit);
        assert_eq!(app.active_view, ActiveView::Chat);
        assert_eq!(app.chat_input.value(), "q1");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[tokio::test]
    async fn test_help_opens_and_esc_closes() {
        let harness = Harness::new(ScriptedHttpClient::new());
        let mut app = harness.app();

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());

        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.active_dialog, ActiveDialog::Leaderboard);
        // view keys do not leak through an open dialog
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_view, ActiveView::Learn);
        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());
    }

    #[tokio::test]
    async fn test_budget_field_editing() {
        let harness = Harness::new(ScriptedHttpClient::new());
        let mut app = harness.app();

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "1500");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "1600");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.budget_form.monthly_income, "1500");
        // Esc discards the edit
        assert_eq!(app.budget_form.raw(crate::models::BudgetCategory::Housing), "");
    }

    #[tokio::test]
    async fn test_news_search_filters_live() {
        let harness = Harness::new(ScriptedHttpClient::new());
        let mut app = harness.app();

        press(&mut app, KeyCode::Char('4'));
        app.finish_news(Ok(serde_json::from_str(
            r#"[{"title": "Crypto rally"}, {"title": "Fed holds rates"}]"#,
        )
        .unwrap()));
        assert_eq!(app.news.filtered().len(), 2);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "fed");
        assert_eq!(app.news.filtered().len(), 1);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.news.filtered().len(), 2);
        assert_eq!(app.news_search.value(), "");
    }

    #[tokio::test]
    async fn test_learn_opens_first_lesson() {
        let harness = Harness::new(ScriptedHttpClient::new());
        let mut app = harness.app();

        press(&mut app, KeyCode::Char('5'));
        // unit 1 is expanded on start; its first lesson is the next row
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.progress.completed_count(), 1);
        assert_eq!(
            app.progress.active_lesson().map(|l| l.id.as_str()),
            Some("intro-stock-market")
        );
    }
}
