//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::activity::ActivityLog;
use crate::api::{BackendClient, HttpClient};
use crate::config::Settings;
use crate::models::Curriculum;
use crate::services::Session;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Restore the terminal before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
pub fn run_tui(
    settings: &Settings,
    curriculum: Arc<Curriculum>,
    log: ActivityLog,
    http: Arc<dyn HttpClient>,
    runtime: Handle,
) -> Result<()> {
    // Session setup happens before the alternate screen so a slow backend
    // leaves the shell usable
    let client = BackendClient::from_settings(settings, Arc::clone(&http));
    let session = runtime.block_on(Session::bootstrap(&client, &log));

    let events = EventHandler::default();
    let mut app = App::new(
        settings,
        curriculum,
        log,
        http,
        runtime,
        session,
        events.sender(),
    );
    let offline = app
        .session
        .bootstrap_error()
        .map(|error| format!("Offline: {}", error));
    if let Some(message) = offline {
        app.set_status(message);
    }

    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &events);
    app.quit();
    restore_terminal()?;

    result
}

fn event_loop(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| {
            super::views::render(frame, app);
        })?;

        let event = events.next()?;
        handle_event(app, event)?;
    }
    Ok(())
}
