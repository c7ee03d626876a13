//! Terminal User Interface module
//!
//! This module provides the interactive UpScale dashboard using ratatui:
//! a sidebar of views (home, budget, stocks, news, learn, chat), a status
//! bar, and modal dialogs for help, sign-in and course information.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
