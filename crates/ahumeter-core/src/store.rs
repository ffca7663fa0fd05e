//! Persisted per-chat, per-user match counters.
//!
//! The store is a single JSON file mapping chat-id strings to maps of
//! user-id strings to [`UserRecord`]s. Every mutation is a full
//! load-modify-save cycle against that file; nothing is cached between
//! calls, so the file is the sole source of truth. The design assumes a
//! single logical writer (one event stream handled sequentially);
//! concurrent writers can lose increments and are not supported.
//!
//! Read and write failures are best-effort: they are logged and
//! recovered locally (empty snapshot on read, dropped mutation on
//! write) and never surface to end users.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{StoreError, StoreResult};

/// Counter state for one user in one chat.
///
/// Created on the user's first match in the chat and never deleted;
/// resets only zero the count. Insertion order in the surrounding map
/// reflects first-match order, which ranking uses for tie-breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    /// Number of matched messages attributed to this user in this chat.
    pub count: u64,
    /// Display handle, if the transport supplied one.
    pub username: Option<String>,
    /// Human first-name fallback, if the transport supplied one.
    pub first_name: Option<String>,
    /// Timestamp of the last increment or reset; absent until the first.
    pub last_update: Option<DateTime<Utc>>,
}

/// Per-chat counters keyed by user-id string, in first-match order.
pub type ChatCounters = IndexMap<String, UserRecord>;

/// The entire persisted state keyed by chat-id string.
pub type CounterMap = IndexMap<String, ChatCounters>;

/// An inbound message event attributed to a (chat, user) pair.
///
/// Identifiers arrive as opaque strings; empty `username`/`first_name`
/// values are treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct MatchEvent<'a> {
    /// Conversation identifier.
    pub chat_id: &'a str,
    /// Sender identifier.
    pub user_id: &'a str,
    /// Sender's display handle, if any.
    pub username: Option<&'a str>,
    /// Sender's first name, if any.
    pub first_name: Option<&'a str>,
}

/// Outcome of a reset operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// All counters in the named chat were zeroed.
    ChatReset(String),
    /// The named chat has no counters; nothing was changed.
    ChatNotFound(String),
    /// Every counter in every chat was zeroed.
    AllReset,
}

impl std::fmt::Display for ResetOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChatReset(chat_id) => {
                write!(f, "Счетчики для чата {chat_id} сброшены")
            }
            Self::ChatNotFound(chat_id) => {
                write!(f, "Чат {chat_id} не найден в статистике")
            }
            Self::AllReset => f.write_str("Счетчики для всех чатов сброшены"),
        }
    }
}

/// File-backed counter store with an injected path.
///
/// Construct one at startup and pass it by reference to handlers; the
/// path injection keeps tests on temp files and avoids a hidden global
/// singleton.
#[derive(Debug, Clone)]
pub struct Store {
    path: Utf8PathBuf,
}

impl Store {
    /// Create a store backed by the given file path.
    ///
    /// The file is created lazily on the first successful save.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the full counter snapshot.
    ///
    /// A missing file yields an empty map. Read or parse failures are
    /// logged and also yield an empty map — counting is best-effort
    /// telemetry and must not crash the host.
    pub fn load(&self) -> CounterMap {
        match self.try_load() {
            Ok(map) => map,
            Err(err) => {
                warn!(error = %err, "counter load failed, treating store as empty");
                CounterMap::new()
            }
        }
    }

    /// Counters for one chat, or an empty map if the chat is unknown.
    pub fn chat(&self, chat_id: &str) -> ChatCounters {
        self.load().shift_remove(chat_id).unwrap_or_default()
    }

    /// Record one match for the event's (chat, user) pair.
    ///
    /// Ensures the chat and user entries exist, bumps the count, stamps
    /// `last_update`, and refreshes the stored names when the event
    /// carries non-empty values that differ. Returns the new count.
    /// Write failures are logged; the increment is then lost for future
    /// reads since nothing else caches it.
    #[tracing::instrument(skip_all, fields(chat = event.chat_id, user = event.user_id))]
    pub fn increment(&self, event: &MatchEvent<'_>) -> u64 {
        let mut map = self.load();
        let chat = map.entry(event.chat_id.to_string()).or_default();
        let record = chat.entry(event.user_id.to_string()).or_insert_with(|| UserRecord {
            count: 0,
            username: non_empty(event.username).map(str::to_string),
            first_name: non_empty(event.first_name).map(str::to_string),
            last_update: None,
        });

        record.count += 1;
        record.last_update = Some(Utc::now());

        if let Some(username) = non_empty(event.username)
            && record.username.as_deref() != Some(username)
        {
            record.username = Some(username.to_string());
        }
        if let Some(first_name) = non_empty(event.first_name)
            && record.first_name.as_deref() != Some(first_name)
        {
            record.first_name = Some(first_name.to_string());
        }

        let count = record.count;
        self.save(&map);
        info!(count, "match counted");
        count
    }

    /// Zero every user's count in one chat.
    ///
    /// Records stay in place (names and first-match order survive);
    /// only counts and timestamps change. An unknown chat leaves the
    /// file untouched.
    #[tracing::instrument(skip(self))]
    pub fn reset_chat(&self, chat_id: &str) -> ResetOutcome {
        let mut map = self.load();
        let Some(chat) = map.get_mut(chat_id) else {
            debug!("chat not present in counter store");
            return ResetOutcome::ChatNotFound(chat_id.to_string());
        };

        let now = Utc::now();
        for record in chat.values_mut() {
            record.count = 0;
            record.last_update = Some(now);
        }
        self.save(&map);
        info!("chat counters reset");
        ResetOutcome::ChatReset(chat_id.to_string())
    }

    /// Zero every user's count in every chat.
    #[tracing::instrument(skip(self))]
    pub fn reset_all(&self) -> ResetOutcome {
        let mut map = self.load();
        let now = Utc::now();
        for chat in map.values_mut() {
            for record in chat.values_mut() {
                record.count = 0;
                record.last_update = Some(now);
            }
        }
        self.save(&map);
        info!("all counters reset");
        ResetOutcome::AllReset
    }

    fn try_load(&self) -> StoreResult<CounterMap> {
        if !self.path.exists() {
            return Ok(CounterMap::new());
        }
        let raw = std::fs::read_to_string(self.path.as_std_path()).map_err(|source| {
            StoreError::Read {
                path: self.path.clone(),
                source,
            }
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist the full snapshot, logging (not propagating) failures.
    fn save(&self, map: &CounterMap) {
        if let Err(err) = self.try_save(map) {
            error!(error = %err, "counter save failed, mutation lost");
        }
    }

    fn try_save(&self, map: &CounterMap) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent.as_std_path()).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let raw = serde_json::to_vec_pretty(map).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source: std::io::Error::other(source),
        })?;
        std::fs::write(self.path.as_std_path(), raw).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store(tmp: &TempDir) -> Store {
        let path = Utf8PathBuf::try_from(tmp.path().join("counter.json")).unwrap();
        Store::new(path)
    }

    fn event<'a>(chat: &'a str, user: &'a str) -> MatchEvent<'a> {
        MatchEvent {
            chat_id: chat,
            user_id: user,
            username: None,
            first_name: None,
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(temp_store(&tmp).load().is_empty());
    }

    #[test]
    fn increment_counts_and_persists() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        assert_eq!(store.increment(&event("1", "100")), 1);
        assert_eq!(store.increment(&event("1", "100")), 2);
        assert_eq!(store.increment(&event("1", "100")), 3);

        // A fresh Store on the same path sees the persisted counts.
        let reopened = Store::new(store.path().to_path_buf());
        assert_eq!(reopened.chat("1")["100"].count, 3);
    }

    #[test]
    fn increment_records_names_and_timestamp() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&MatchEvent {
            chat_id: "1",
            user_id: "100",
            username: Some("alice"),
            first_name: Some("Алиса"),
        });

        let record = &store.chat("1")["100"];
        assert_eq!(record.username.as_deref(), Some("alice"));
        assert_eq!(record.first_name.as_deref(), Some("Алиса"));
        assert!(record.last_update.is_some());
    }

    #[test]
    fn empty_names_do_not_clobber_stored_ones() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&MatchEvent {
            chat_id: "1",
            user_id: "100",
            username: Some("alice"),
            first_name: Some("Алиса"),
        });
        store.increment(&MatchEvent {
            chat_id: "1",
            user_id: "100",
            username: Some(""),
            first_name: None,
        });

        let record = &store.chat("1")["100"];
        assert_eq!(record.count, 2);
        assert_eq!(record.username.as_deref(), Some("alice"));
        assert_eq!(record.first_name.as_deref(), Some("Алиса"));
    }

    #[test]
    fn changed_username_is_refreshed() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&MatchEvent {
            chat_id: "1",
            user_id: "100",
            username: Some("alice"),
            first_name: None,
        });
        store.increment(&MatchEvent {
            chat_id: "1",
            user_id: "100",
            username: Some("alice_new"),
            first_name: None,
        });

        assert_eq!(store.chat("1")["100"].username.as_deref(), Some("alice_new"));
    }

    #[test]
    fn chats_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&event("1", "100"));
        store.increment(&event("2", "100"));
        store.increment(&event("2", "100"));

        assert_eq!(store.chat("1")["100"].count, 1);
        assert_eq!(store.chat("2")["100"].count, 2);
    }

    #[test]
    fn reset_chat_zeroes_only_that_chat() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&event("1", "100"));
        store.increment(&event("1", "200"));
        store.increment(&event("2", "100"));

        assert_eq!(store.reset_chat("1"), ResetOutcome::ChatReset("1".into()));

        let chat1 = store.chat("1");
        assert_eq!(chat1["100"].count, 0);
        assert_eq!(chat1["200"].count, 0);
        // Records survive a reset; only counts drop.
        assert_eq!(chat1.len(), 2);
        assert_eq!(store.chat("2")["100"].count, 1);
    }

    #[test]
    fn reset_unknown_chat_reports_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);
        store.increment(&event("1", "100"));

        assert_eq!(
            store.reset_chat("99"),
            ResetOutcome::ChatNotFound("99".into())
        );
        assert_eq!(store.chat("1")["100"].count, 1);
    }

    #[test]
    fn reset_all_zeroes_every_chat() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&event("1", "100"));
        store.increment(&event("2", "200"));
        store.increment(&event("2", "200"));

        assert_eq!(store.reset_all(), ResetOutcome::AllReset);
        assert_eq!(store.chat("1")["100"].count, 0);
        assert_eq!(store.chat("2")["200"].count, 0);
    }

    #[test]
    fn malformed_file_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);
        std::fs::write(store.path().as_std_path(), "{not json").unwrap();

        assert!(store.load().is_empty());
        // A subsequent increment starts fresh and succeeds.
        assert_eq!(store.increment(&event("1", "100")), 1);
        assert_eq!(store.chat("1")["100"].count, 1);
    }

    #[test]
    fn persisted_layout_uses_wire_keys() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&MatchEvent {
            chat_id: "1",
            user_id: "100",
            username: None,
            first_name: Some("Боря"),
        });

        let raw = std::fs::read_to_string(store.path().as_std_path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let leaf = &json["1"]["100"];
        assert_eq!(leaf["count"], 1);
        assert!(leaf["username"].is_null());
        assert_eq!(leaf["firstName"], "Боря");
        assert!(leaf["lastUpdate"].is_string());
    }

    #[test]
    fn insertion_order_survives_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = temp_store(&tmp);

        store.increment(&event("1", "300"));
        store.increment(&event("1", "100"));
        store.increment(&event("1", "200"));

        let keys: Vec<_> = store.chat("1").keys().cloned().collect();
        assert_eq!(keys, ["300", "100", "200"]);
    }
}
