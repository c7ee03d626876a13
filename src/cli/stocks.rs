//! Stock CLI commands

use std::path::PathBuf;
use std::sync::Arc;

use clap::Subcommand;
use tokio::sync::mpsc;

use crate::display::{format_company_page, format_price_history, format_quote};
use crate::error::{UpscaleError, UpscaleResult};
use crate::models::{FrameInterval, FramePeriod};
use crate::services::{StockController, StockFeed, UpdateSink};

use super::CliContext;

/// Stock subcommands
#[derive(Subcommand, Debug)]
pub enum StocksCommands {
    /// List one page of companies with their latest prices
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show the price history of a company
    History {
        /// Ticker symbol (e.g., AAPL)
        symbol: String,

        #[arg(short, long, value_enum, default_value = "LAST_MONTH")]
        period: FramePeriod,

        #[arg(short, long, value_enum, default_value = "DAY")]
        interval: FrameInterval,
    },

    /// Show the current quote of a company
    Quote {
        /// Ticker symbol (e.g., AAPL)
        symbol: String,
    },

    /// Save a candlestick chart image
    Chart {
        /// Ticker symbol (e.g., AAPL)
        symbol: String,

        /// Output file (defaults to <exports>/<SYMBOL>.<ext>)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "LAST_MONTH")]
        period: FramePeriod,

        #[arg(short, long, value_enum, default_value = "DAY")]
        interval: FrameInterval,

        /// Side length of the square image in pixels
        #[arg(long)]
        size: Option<u32>,
    },
}

/// Handle a stocks command
pub fn handle_stocks_command(ctx: &CliContext, cmd: StocksCommands) -> UpscaleResult<()> {
    let client = ctx.backend();
    let session = ctx.session(&client);

    match cmd {
        StocksCommands::List { page } => {
            let max_page = ctx.settings.max_stock_page;
            if page == 0 || page > max_page + 1 {
                return Err(UpscaleError::Validation(format!(
                    "Page must be between 1 and {}",
                    max_page + 1
                )));
            }

            let (tx, mut rx) = mpsc::unbounded_channel();
            let sink: UpdateSink = Arc::new(move |update| {
                let _ = tx.send(update);
            });
            let feed = StockFeed::new(
                client,
                Arc::new(session),
                ctx.runtime.clone(),
                sink,
                ctx.log.clone(),
            );
            let mut controller = StockController::new(max_page, feed);
            controller.load(page - 1)?;

            ctx.runtime.block_on(async {
                while controller.state().is_loading() || !controller.state().prices_settled() {
                    match rx.recv().await {
                        Some(update) => controller.handle(update),
                        None => break,
                    }
                }
            });

            let state = controller.state();
            print!("{}", format_company_page(state));
            for (symbol, error) in state.price_failures() {
                eprintln!("  {}: {}", symbol, error);
            }
            match state.error() {
                Some(error) => Err(UpscaleError::Network(error.to_string())),
                None => Ok(()),
            }
        }

        StocksCommands::History {
            symbol,
            period,
            interval,
        } => {
            let symbol = symbol.to_uppercase();
            let bars = ctx.runtime.block_on(client.company_history(
                session.token(),
                &symbol,
                period,
                interval,
            ))?;
            println!("{}", format_price_history(&symbol, &bars));
            Ok(())
        }

        StocksCommands::Quote { symbol } => {
            let symbol = symbol.to_uppercase();
            let bar = ctx
                .runtime
                .block_on(client.company_current(session.token(), &symbol))?;
            println!("{}", format_quote(&symbol, &bar));
            Ok(())
        }

        StocksCommands::Chart {
            symbol,
            out,
            period,
            interval,
            size,
        } => {
            let symbol = symbol.to_uppercase();
            let image = ctx.runtime.block_on(client.company_chart(
                session.token(),
                &symbol,
                period,
                interval,
                size,
            ))?;

            let out = match out {
                Some(path) => path,
                None => {
                    ctx.paths.ensure_directories()?;
                    ctx.paths
                        .export_dir()
                        .join(format!("{}.{}", symbol, image.extension()))
                }
            };
            std::fs::write(&out, &image.bytes).map_err(|e| {
                UpscaleError::Export(format!("Failed to write {}: {}", out.display(), e))
            })?;
            println!(
                "Saved {} chart ({}, {} bytes) to {}",
                symbol,
                image.mime_type,
                image.bytes.len(),
                out.display()
            );
            Ok(())
        }
    }
}
