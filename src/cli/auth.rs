//! Account CLI commands backed by the identity provider

use std::sync::Arc;

use clap::Subcommand;

use crate::api::{Credentials, FirebaseIdentity, SecureString};
use crate::error::{UpscaleError, UpscaleResult};
use crate::services::AuthService;

use super::CliContext;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,
    },

    /// Create an account
    Signup {
        #[arg(short, long)]
        email: String,
    },
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> UpscaleResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| UpscaleError::Io(format!("Failed to read password: {}", e)))
}

/// Handle an auth command
pub fn handle_auth_command(ctx: &CliContext, cmd: AuthCommands) -> UpscaleResult<()> {
    let api_key = ctx.settings.identity_api_key.clone().ok_or_else(|| {
        UpscaleError::Config(
            "No identity API key configured. Set identity_api_key in config.json, \
             pass --identity-key or set UPSCALE_IDENTITY_API_KEY."
                .into(),
        )
    })?;
    let provider = FirebaseIdentity::new(
        Arc::clone(&ctx.http),
        api_key,
        ctx.settings.request_timeout_ms,
    );
    let auth = AuthService::new(Arc::new(provider), ctx.log.clone());

    match cmd {
        AuthCommands::Login { email } => {
            let password = prompt_password("Password: ")?;
            let credentials = Credentials::new(email, password);
            let user = ctx.runtime.block_on(auth.sign_in(&credentials))?;
            println!("Signed in as {}", user.email);
        }
        AuthCommands::Signup { email } => {
            let password = prompt_password("Choose a password: ")?;
            let confirm = prompt_password("Confirm password: ")?;
            if password.as_str() != confirm.as_str() {
                return Err(UpscaleError::Validation("Passwords do not match".into()));
            }
            let credentials = Credentials::new(email, password);
            let user = ctx.runtime.block_on(auth.sign_up(&credentials))?;
            println!("Account created for {}", user.email);
        }
    }
    Ok(())
}
