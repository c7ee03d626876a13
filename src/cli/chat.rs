//! Chat CLI command

use clap::Args;

use crate::error::UpscaleResult;
use crate::models::Sender;
use crate::services::ChatSession;

use super::{prompt_line, CliContext};

/// Arguments for `upscale chat`
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Ask one question and exit; without it, read questions line by line
    pub message: Option<String>,
}

/// One-shot question, or a REPL until an empty line / end of input
pub fn handle_chat_command(ctx: &CliContext, args: ChatArgs) -> UpscaleResult<()> {
    let client = ctx.backend();
    let session = ctx.session(&client);
    let mut chat = ChatSession::new();

    if let Some(message) = args.message {
        let reply = ctx
            .runtime
            .block_on(chat.send(&client, session.token(), &message, &ctx.log))?;
        if let Some(reply) = reply {
            println!("{}", reply);
        }
        return Ok(());
    }

    if let Some(greeting) = chat.messages().first() {
        println!("{}: {}", Sender::Bot.label(), greeting.text);
    }
    println!("(empty line to quit)");

    loop {
        let input = prompt_line(&format!("{}: ", Sender::User.label()))?;
        if input.is_empty() {
            break;
        }
        let reply = ctx
            .runtime
            .block_on(chat.send(&client, session.token(), &input, &ctx.log))?;
        if let Some(reply) = reply {
            println!("{}: {}", Sender::Bot.label(), reply);
        }
    }
    Ok(())
}
