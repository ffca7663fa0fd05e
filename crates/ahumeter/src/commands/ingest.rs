//! Ingest command — feed one message event through the matcher.
//!
//! This is the CLI counterpart of the transport layer's message
//! handler: scan the text, and on a match increment the sender's
//! counter. Non-matching messages are a success with nothing counted;
//! counting is best-effort telemetry and never replies into the chat.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use ahumeter_core::config::Config;
use ahumeter_core::patterns::first_match;
use ahumeter_core::store::MatchEvent;

use super::open_store;

/// Arguments for the `ingest` subcommand.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Chat the message was posted in.
    #[arg(long)]
    pub chat: String,

    /// Sender identifier.
    #[arg(long)]
    pub user: String,

    /// Sender's display handle.
    #[arg(long)]
    pub username: Option<String>,

    /// Sender's first name.
    #[arg(long)]
    pub first_name: Option<String>,

    /// Message text to scan.
    pub text: String,
}

#[derive(Serialize)]
struct IngestReport {
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'static str>,
}

/// Scan a message and count a match against its sender.
#[instrument(name = "cmd_ingest", skip_all, fields(chat = %args.chat, user = %args.user))]
pub fn cmd_ingest(args: IngestArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let Some(hit) = first_match(&args.text) else {
        debug!("no surprise expression in message");
        if global_json {
            let report = IngestReport {
                matched: false,
                count: None,
                pattern: None,
                lang: None,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{} no surprise expression", "SKIP:".dimmed());
        }
        return Ok(());
    };

    let store = open_store(config)?;
    let count = store.increment(&MatchEvent {
        chat_id: &args.chat,
        user_id: &args.user,
        username: args.username.as_deref(),
        first_name: args.first_name.as_deref(),
    });
    info!(
        count,
        pattern = hit.pattern,
        lang = hit.lang,
        "surprise expression counted"
    );

    if global_json {
        let report = IngestReport {
            matched: true,
            count: Some(count),
            pattern: Some(hit.pattern),
            lang: Some(hit.lang),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize ingest report")?
        );
    } else {
        println!("{} count is now {}", "MATCH:".green(), count.bold());
    }

    Ok(())
}
