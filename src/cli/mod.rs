//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod activity;
pub mod auth;
pub mod budget;
pub mod chat;
pub mod config;
pub mod learn;
pub mod news;
pub mod stocks;

use std::io::{self, Write};
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::activity::ActivityLog;
use crate::api::{BackendClient, HttpClient};
use crate::config::{Settings, UpscalePaths};
use crate::error::{UpscaleError, UpscaleResult};
use crate::models::Curriculum;
use crate::services::Session;

pub use activity::{handle_activity_command, ActivityArgs};
pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use chat::{handle_chat_command, ChatArgs};
pub use config::{handle_config_command, ConfigCommands};
pub use learn::{handle_learn_command, LearnCommands};
pub use news::{handle_news_command, NewsArgs};
pub use stocks::{handle_stocks_command, StocksCommands};

/// Everything a command handler may need, built once in `main`
pub struct CliContext {
    pub paths: UpscalePaths,
    pub settings: Settings,
    pub curriculum: Arc<Curriculum>,
    pub log: ActivityLog,
    pub http: Arc<dyn HttpClient>,
    pub runtime: Handle,
}

impl CliContext {
    pub fn backend(&self) -> BackendClient {
        BackendClient::from_settings(&self.settings, Arc::clone(&self.http))
    }

    /// Connect to the backend; a failure is reported and yields an anonymous session
    pub fn session(&self, client: &BackendClient) -> Session {
        let session = self
            .runtime
            .block_on(Session::bootstrap(client, &self.log));
        if let Some(error) = session.bootstrap_error() {
            eprintln!("Warning: could not start a backend session ({})", error);
        }
        session
    }
}

/// Prompt for a single line of input
pub(crate) fn prompt_line(prompt: &str) -> UpscaleResult<String> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| UpscaleError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| UpscaleError::Io(e.to_string()))?;

    Ok(input.trim().to_string())
}

/// Split a comma-separated `--completed` list
pub(crate) fn split_ids(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ids() {
        let raw = vec!["a, b".to_string(), "c".to_string(), " ,".to_string()];
        assert_eq!(split_ids(&raw), vec!["a", "b", "c"]);
    }
}
