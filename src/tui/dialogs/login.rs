//! Sign-in / sign-up dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::api::Credentials;
use crate::error::{UpscaleError, UpscaleResult};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

impl LoginMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SignIn => " Sign In ",
            Self::SignUp => " Create Account ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// What a key did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
    Cancel,
}

/// Form state for the dialog
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub mode: LoginMode,
    pub focus: LoginField,
    pub email: TextInput,
    pub password: TextInput,
    pub pending: bool,
    pub error: Option<String>,
}

impl LoginState {
    pub fn new(mode: LoginMode) -> Self {
        Self {
            mode,
            focus: LoginField::Email,
            email: TextInput::new().label("Email").placeholder("you@example.com"),
            password: TextInput::new().label("Password").masked(true),
            pending: false,
            error: None,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    /// Route a key to the focused field
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.pending {
            return match key.code {
                KeyCode::Esc => LoginAction::Cancel,
                _ => LoginAction::None,
            };
        }
        match key.code {
            KeyCode::Esc => LoginAction::Cancel,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                LoginAction::None
            }
            KeyCode::Enter => match self.focus {
                LoginField::Email => {
                    self.focus = LoginField::Password;
                    LoginAction::None
                }
                LoginField::Password => LoginAction::Submit,
            },
            _ => {
                let field = match self.focus {
                    LoginField::Email => &mut self.email,
                    LoginField::Password => &mut self.password,
                };
                field.handle_key(key);
                LoginAction::None
            }
        }
    }

    /// Validate the form and build credentials
    pub fn credentials(&self) -> UpscaleResult<Credentials> {
        let email = self.email.value().trim();
        if email.is_empty() || !email.contains('@') {
            return Err(UpscaleError::Validation("Enter a valid email address".into()));
        }
        if self.password.value().is_empty() {
            return Err(UpscaleError::Validation("Password is required".into()));
        }
        Ok(Credentials::new(email, self.password.value()))
    }
}

/// Render the dialog
pub fn render(frame: &mut Frame, app: &App) {
    let state = &app.login;
    let area = centered_rect_fixed(54, 11, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(state.mode.title())
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // email
            Constraint::Length(1),
            Constraint::Length(1), // password
            Constraint::Length(1),
            Constraint::Length(1), // message
            Constraint::Min(1),    // hints
        ])
        .split(inner);

    let email = state
        .email
        .clone()
        .focused(!state.pending && state.focus == LoginField::Email);
    let password = state
        .password
        .clone()
        .focused(!state.pending && state.focus == LoginField::Password);
    frame.render_widget(&email, rows[0]);
    frame.render_widget(&password, rows[2]);

    let message = if state.pending {
        Line::from(Span::styled("Contacting identity provider...", Style::default().fg(Color::Yellow)))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(message), rows[4]);

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Switch field  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Submit  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), rows[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(state: &mut LoginState, code: KeyCode) -> LoginAction {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut LoginState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_moves_to_password_then_submits() {
        let mut state = LoginState::new(LoginMode::SignIn);
        type_text(&mut state, "ada@example.com");
        assert_eq!(press(&mut state, KeyCode::Enter), LoginAction::None);
        assert_eq!(state.focus, LoginField::Password);
        type_text(&mut state, "hunter22");
        assert_eq!(press(&mut state, KeyCode::Enter), LoginAction::Submit);

        let credentials = state.credentials().unwrap();
        assert_eq!(credentials.email, "ada@example.com");
        assert_eq!(credentials.password.as_str(), "hunter22");
    }

    #[test]
    fn test_incomplete_form_is_rejected() {
        let mut state = LoginState::new(LoginMode::SignUp);
        type_text(&mut state, "not-an-email");
        assert!(state.credentials().unwrap_err().is_validation());

        let mut state = LoginState::new(LoginMode::SignUp);
        type_text(&mut state, "ada@example.com");
        assert!(state.credentials().unwrap_err().is_validation());
    }

    #[test]
    fn test_pending_form_ignores_typing() {
        let mut state = LoginState::new(LoginMode::SignIn);
        state.pending = true;
        type_text(&mut state, "abc");
        assert_eq!(state.email.value(), "");
        assert_eq!(press(&mut state, KeyCode::Esc), LoginAction::Cancel);
    }
}
