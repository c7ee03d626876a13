//! Activity log CLI command

use clap::Args;

use crate::error::UpscaleResult;

use super::CliContext;

/// Arguments for `upscale activity`
#[derive(Args, Debug)]
pub struct ActivityArgs {
    /// Number of most recent entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,

    /// Only show failures
    #[arg(long)]
    pub failures: bool,
}

/// Print the most recent activity entries
pub fn handle_activity_command(ctx: &CliContext, args: ActivityArgs) -> UpscaleResult<()> {
    let entries = ctx.log.read_recent(args.count)?;
    let entries: Vec<_> = entries
        .iter()
        .filter(|entry| !args.failures || entry.kind.is_failure())
        .collect();

    if entries.is_empty() {
        println!("No activity recorded yet.");
        return Ok(());
    }
    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
