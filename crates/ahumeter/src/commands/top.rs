//! Top command — show a chat's ranked leaderboard.

use clap::Args;
use tracing::{debug, instrument};

use ahumeter_core::config::Config;
use ahumeter_core::ranking::format_ranking;

use super::open_store;

/// Arguments for the `top` subcommand.
#[derive(Args, Debug)]
pub struct TopArgs {
    /// Chat to rank.
    #[arg(long)]
    pub chat: String,
}

/// Print the medal-annotated ranking for a chat.
#[instrument(name = "cmd_top", skip_all, fields(chat = %args.chat))]
pub fn cmd_top(args: TopArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let chat = store.chat(&args.chat);
    debug!(users = chat.len(), "loaded chat counters");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
        return Ok(());
    }

    let ranking = format_ranking(&chat);
    if ranking.ends_with('\n') {
        print!("{ranking}");
    } else {
        println!("{ranking}");
    }
    Ok(())
}
