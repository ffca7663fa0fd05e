//! Reset command — zero counters for one chat or all chats.
//!
//! Admin-gated. A denied request is logged and otherwise dropped with
//! no output at all; the gate's existence is deliberately not revealed
//! to the requester.

use clap::{ArgGroup, Args};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use ahumeter_core::auth::{Authorization, authorize_reset};
use ahumeter_core::config::Config;
use ahumeter_core::store::ResetOutcome;

use super::open_store;

/// Arguments for the `reset` subcommand.
#[derive(Args, Debug)]
#[command(group = ArgGroup::new("scope").required(true).args(["chat", "all"]))]
pub struct ResetArgs {
    /// Identity of the user requesting the reset.
    #[arg(long)]
    pub requester: String,

    /// Chat whose counters should be zeroed.
    #[arg(long)]
    pub chat: Option<String>,

    /// Zero counters in every chat.
    #[arg(long)]
    pub all: bool,
}

#[derive(Serialize)]
struct ResetReport {
    reset: bool,
    status: String,
}

/// Execute an admin-gated reset.
#[instrument(name = "cmd_reset", skip_all, fields(requester = %args.requester))]
pub fn cmd_reset(args: ResetArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(
        admin_configured = config.admin_id.is_some(),
        all = args.all,
        chat = ?args.chat,
        "reset requested"
    );

    if authorize_reset(&args.requester, config.admin_id.as_deref()) == Authorization::Denied {
        // Log only; no user-visible reply, successful exit.
        warn!("reset denied, request dropped");
        return Ok(());
    }

    let store = open_store(config)?;
    let outcome = match args.chat {
        Some(ref chat) => store.reset_chat(chat),
        None => store.reset_all(),
    };
    info!(outcome = %outcome, "reset executed");

    if global_json {
        let report = ResetReport {
            reset: !matches!(outcome, ResetOutcome::ChatNotFound(_)),
            status: outcome.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{outcome}");
    }
    Ok(())
}
