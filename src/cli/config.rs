//! Configuration CLI commands

use clap::Subcommand;

use crate::error::UpscaleResult;

use super::CliContext;

/// Configuration subcommands (defaults to `show`)
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Write config.json with the effective settings
    Init,
}

/// Handle a config command
pub fn handle_config_command(ctx: &CliContext, cmd: Option<ConfigCommands>) -> UpscaleResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            let settings = &ctx.settings;
            println!("UpScale Configuration");
            println!("=====================");
            println!("Data directory:  {}", ctx.paths.base_dir().display());
            println!("Settings file:   {}", ctx.paths.settings_file().display());
            println!("Activity log:    {}", ctx.paths.activity_log().display());
            println!("Exports:         {}", ctx.paths.export_dir().display());
            let curriculum_file = ctx.paths.curriculum_file();
            if curriculum_file.exists() {
                println!("Curriculum:      {}", curriculum_file.display());
            } else {
                println!("Curriculum:      built-in");
            }
            println!();
            println!("API base URL:    {}", settings.api_base_url);
            println!("Timeout:         {} ms", settings.request_timeout_ms);
            println!(
                "Identity key:    {}",
                if settings.identity_api_key.is_some() {
                    "configured"
                } else {
                    "not set"
                }
            );
            println!(
                "News feed:       {}",
                if settings.news_everything {
                    "everything"
                } else {
                    "top headlines"
                }
            );
            println!("Budget style:    {}", settings.budget_style);
            println!("Currency:        {}", settings.currency_symbol);
            println!("Stock pages:     {}", settings.max_stock_page + 1);
            println!(
                "Activity log:    {}",
                if settings.activity_log { "on" } else { "off" }
            );
            Ok(())
        }

        ConfigCommands::Init => {
            ctx.settings.save(&ctx.paths)?;
            println!("Wrote {}", ctx.paths.settings_file().display());
            Ok(())
        }
    }
}
