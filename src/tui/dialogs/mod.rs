//! Dialog modules for the TUI
//!
//! Contains modal dialogs for help, sign-in and course information

pub mod course_details;
pub mod help;
pub mod leaderboard;
pub mod login;
