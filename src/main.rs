use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use upscale_cli::activity::open_activity_log;
use upscale_cli::api::{HttpClient, ReqwestHttpClient};
use upscale_cli::cli::{
    handle_activity_command, handle_auth_command, handle_budget_command, handle_chat_command,
    handle_config_command, handle_learn_command, handle_news_command, handle_stocks_command,
    ActivityArgs, AuthCommands, BudgetCommands, ChatArgs, CliContext, ConfigCommands,
    LearnCommands, NewsArgs, StocksCommands,
};
use upscale_cli::config::{load_curriculum, Settings, UpscalePaths};
use upscale_cli::tui::run_tui;

#[derive(Parser)]
#[command(
    name = "upscale",
    version,
    about = "Financial literacy in the terminal",
    long_about = "UpScale teaches personal finance from the command line: plan a \
                  monthly budget, browse stock prices and financial news, work \
                  through the investing course and ask the assistant questions."
)]
struct Cli {
    /// Backend base URL (overrides the configured value)
    #[arg(long, global = true, env = "UPSCALE_API_URL")]
    api_url: Option<String>,

    /// Identity provider API key used for sign-in
    #[arg(long, global = true, env = "UPSCALE_IDENTITY_API_KEY", hide_env_values = true)]
    identity_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Budget calculator commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Stock listing, history and charts
    #[command(subcommand)]
    Stocks(StocksCommands),

    /// Browse the financial news feed
    News(NewsArgs),

    /// Investing course and final quiz
    #[command(subcommand)]
    Learn(LearnCommands),

    /// Ask the finance assistant
    Chat(ChatArgs),

    /// Sign in or create an account
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Show the activity log
    Activity(ActivityArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    // Initialize paths and settings
    let paths = UpscalePaths::new()?;
    paths.ensure_directories()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }
    if let Some(key) = cli.identity_key {
        settings.identity_api_key = Some(key);
    }
    settings.validate()?;

    let curriculum = load_curriculum(&paths)?;
    let log = open_activity_log(&paths, &settings);
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);

    let ctx = CliContext {
        paths,
        settings,
        curriculum,
        log,
        http,
        runtime: runtime.handle().clone(),
    };

    match cli.command {
        Some(Commands::Tui) => {
            run_tui(
                &ctx.settings,
                Arc::clone(&ctx.curriculum),
                ctx.log.clone(),
                Arc::clone(&ctx.http),
                ctx.runtime.clone(),
            )?;
        }
        Some(Commands::Budget(cmd)) => handle_budget_command(&ctx, cmd)?,
        Some(Commands::Stocks(cmd)) => handle_stocks_command(&ctx, cmd)?,
        Some(Commands::News(args)) => handle_news_command(&ctx, args)?,
        Some(Commands::Learn(cmd)) => handle_learn_command(&ctx, cmd)?,
        Some(Commands::Chat(args)) => handle_chat_command(&ctx, args)?,
        Some(Commands::Auth(cmd)) => handle_auth_command(&ctx, cmd)?,
        Some(Commands::Config { command }) => handle_config_command(&ctx, command)?,
        Some(Commands::Activity(args)) => handle_activity_command(&ctx, args)?,
        None => {
            println!("UpScale - financial literacy in the terminal");
            println!();
            println!("Run 'upscale --help' for usage information.");
            println!("Run 'upscale tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
