//! Core library for ahumeter.
//!
//! This crate provides the matching, counting, and ranking machinery
//! used by the `ahumeter` CLI and any downstream transport glue.
//!
//! # Modules
//!
//! - [`patterns`] - Surprise-expression matching
//! - [`store`] - File-backed per-chat, per-user counters
//! - [`ranking`] - Leaderboard rendering
//! - [`auth`] - Admin authorization for resets
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use ahumeter_core::{Store, MatchEvent, is_surprise};
//!
//! let store = Store::new("counter.json");
//! if is_surprise("я ахуел") {
//!     let count = store.increment(&MatchEvent {
//!         chat_id: "1",
//!         user_id: "100",
//!         username: Some("alice"),
//!         first_name: None,
//!     });
//!     println!("counted: {count}");
//! }
//! ```
#![deny(unsafe_code)]

pub mod auth;

pub mod config;

pub mod error;

pub mod patterns;

pub mod ranking;

pub mod store;

pub use auth::{Authorization, authorize_reset};

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult, StoreError, StoreResult};

pub use patterns::{SURPRISE_PATTERNS, SurprisePattern, first_match, is_surprise};

pub use ranking::{EMPTY_RANKING, format_ranking};

pub use store::{ChatCounters, CounterMap, MatchEvent, ResetOutcome, Store, UserRecord};
