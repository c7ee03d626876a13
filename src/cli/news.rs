//! News CLI command

use chrono::Utc;
use clap::Args;

use crate::activity::ActivityKind;
use crate::display::format_articles;
use crate::error::UpscaleResult;
use crate::models::NewsCategory;
use crate::services::NewsFeed;

use super::CliContext;

/// Arguments for `upscale news`
#[derive(Args, Debug)]
pub struct NewsArgs {
    /// Only articles whose title, description or source contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only articles mentioning a topic
    #[arg(short, long, value_enum, default_value = "all")]
    pub category: NewsCategory,

    /// Ask for all articles instead of top headlines
    #[arg(long)]
    pub everything: bool,

    /// Show at most this many articles
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Fetch the feed once and print the filtered cards
pub fn handle_news_command(ctx: &CliContext, args: NewsArgs) -> UpscaleResult<()> {
    let client = ctx.backend();
    let session = ctx.session(&client);
    let everything = args.everything || ctx.settings.news_everything;

    let mut feed = NewsFeed::new();
    feed.begin_fetch();
    let articles = ctx
        .runtime
        .block_on(client.news(session.token(), everything))
        .inspect_err(|e| ctx.log.record_failure(ActivityKind::RequestFailed, "news", e))?;
    feed.finish(Ok(articles));

    if let Some(search) = args.search {
        feed.set_search(search);
    }
    feed.set_category(args.category);

    let mut matching = feed.filtered();
    if let Some(limit) = args.limit {
        matching.truncate(limit);
    }
    println!(
        "{}",
        format_articles(&matching, feed.articles().len(), Utc::now())
    );
    Ok(())
}
