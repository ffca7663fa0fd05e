//! Leaderboard rendering.
//!
//! Turns one chat's counters into the display block the bot posts:
//! descending by count, medals for the top three, numeric markers from
//! fourth place, usernames rendered as t.me hyperlinks.

use crate::store::ChatCounters;

/// Fallback shown when a chat has no counters at all.
///
/// Triggers on an empty chat map only; users reset to zero still get a
/// ranked listing.
pub const EMPTY_RANKING: &str = "Никто еще не ахуел! Будьте первым 😉";

/// Placeholder for users with neither a username nor a first name.
pub const UNNAMED: &str = "Безымянный";

const HEADER: &str = "🏆 Рейтинг ахуевших:";

/// Render a chat's counters as a ranked, medal-annotated block.
///
/// The sort is stable, so users tied on count keep first-match order.
/// Names prefer a hyperlinked username, then the first name, then
/// [`UNNAMED`].
pub fn format_ranking(chat: &ChatCounters) -> String {
    if chat.is_empty() {
        return EMPTY_RANKING.to_string();
    }

    let mut users: Vec<_> = chat.values().collect();
    users.sort_by(|a, b| b.count.cmp(&a.count));

    let mut result = format!("{HEADER}\n\n");
    for (index, user) in users.iter().enumerate() {
        let medal = match index {
            0 => "🥇".to_string(),
            1 => "🥈".to_string(),
            2 => "🥉".to_string(),
            n => format!("{}.", n + 1),
        };

        let name = match (non_empty(&user.username), non_empty(&user.first_name)) {
            (Some(username), _) => {
                format!(r#"<a href="https://t.me/{username}">{username}</a>"#)
            }
            (None, Some(first_name)) => first_name.to_string(),
            (None, None) => UNNAMED.to_string(),
        };

        result.push_str(&format!("{medal} {name}: {} раз(а)\n", user.count));
    }

    result
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UserRecord;

    fn record(count: u64, username: Option<&str>, first_name: Option<&str>) -> UserRecord {
        UserRecord {
            count,
            username: username.map(str::to_string),
            first_name: first_name.map(str::to_string),
            last_update: None,
        }
    }

    fn chat(entries: Vec<(&str, UserRecord)>) -> ChatCounters {
        entries
            .into_iter()
            .map(|(id, r)| (id.to_string(), r))
            .collect()
    }

    #[test]
    fn empty_chat_gets_fallback() {
        assert_eq!(format_ranking(&ChatCounters::new()), EMPTY_RANKING);
    }

    #[test]
    fn sorts_descending_by_count() {
        let chat = chat(vec![
            ("1", record(2, Some("low"), None)),
            ("2", record(7, Some("high"), None)),
            ("3", record(5, Some("mid"), None)),
        ]);
        let out = format_ranking(&chat);
        let high = out.find("high").unwrap();
        let mid = out.find("mid").unwrap();
        let low = out.find("low").unwrap();
        assert!(high < mid && mid < low);
    }

    #[test]
    fn ties_keep_first_match_order() {
        let chat = chat(vec![
            ("1", record(1, Some("first"), None)),
            ("2", record(1, Some("second"), None)),
        ]);
        let out = format_ranking(&chat);
        assert!(out.find("first").unwrap() < out.find("second").unwrap());
        assert!(out.contains("🥇"));
        assert!(out.contains("🥈"));
    }

    #[test]
    fn top_three_get_medals_then_numbers() {
        let chat = chat(vec![
            ("1", record(9, Some("a"), None)),
            ("2", record(8, Some("b"), None)),
            ("3", record(7, Some("c"), None)),
            ("4", record(6, Some("d"), None)),
            ("5", record(5, Some("e"), None)),
        ]);
        let out = format_ranking(&chat);
        assert!(out.contains("🥇"));
        assert!(out.contains("🥈"));
        assert!(out.contains("🥉"));
        assert!(out.contains("4. "));
        assert!(out.contains("5. "));
        assert!(!out.contains("1. "));
    }

    #[test]
    fn username_renders_as_link() {
        let chat = chat(vec![("1", record(3, Some("alice"), Some("Алиса")))]);
        let out = format_ranking(&chat);
        assert!(out.contains(r#"<a href="https://t.me/alice">alice</a>: 3 раз(а)"#));
        // Username wins over first name.
        assert!(!out.contains("Алиса"));
    }

    #[test]
    fn first_name_when_no_username() {
        let chat = chat(vec![("1", record(2, None, Some("Боря")))]);
        let out = format_ranking(&chat);
        assert!(out.contains("Боря: 2 раз(а)"));
        assert!(!out.contains("t.me"));
    }

    #[test]
    fn unnamed_fallback() {
        let chat = chat(vec![("1", record(1, None, None))]);
        assert!(format_ranking(&chat).contains(UNNAMED));
    }

    #[test]
    fn empty_string_names_count_as_absent() {
        let chat = chat(vec![("1", record(1, Some(""), Some("")))]);
        assert!(format_ranking(&chat).contains(UNNAMED));
    }

    #[test]
    fn zero_counts_still_listed() {
        // All-zero chats are listed, not collapsed to the fallback.
        let chat = chat(vec![
            ("1", record(0, Some("a"), None)),
            ("2", record(0, Some("b"), None)),
        ]);
        let out = format_ranking(&chat);
        assert_ne!(out, EMPTY_RANKING);
        assert!(out.contains("a: 0 раз(а)"));
    }

    #[test]
    fn includes_header() {
        let chat = chat(vec![("1", record(1, None, None))]);
        assert!(format_ranking(&chat).starts_with("🏆 Рейтинг ахуевших:"));
    }
}
