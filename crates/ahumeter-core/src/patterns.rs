//! Surprise-expression matching.
//!
//! A fixed table of word-boundary patterns covering colloquial
//! surprise/shock expressions: Russian and Ukrainian morphological
//! variants plus the English "wtf". The table is declarative data so
//! individual patterns can be tested and extended without touching the
//! matching logic.

use std::sync::LazyLock;

use regex::Regex;

/// One entry in the surprise-expression table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurprisePattern {
    /// BCP-47-style language tag ("ru", "uk", "en").
    pub lang: &'static str,
    /// Word-boundary regular expression, compiled case-insensitively.
    pub pattern: &'static str,
    /// Short human description of the expression family.
    pub note: &'static str,
}

/// The fixed surprise-expression table.
///
/// `\b` in the `regex` crate is Unicode-aware, so boundaries work for
/// Cyrillic words the same way they do for ASCII.
pub static SURPRISE_PATTERNS: &[SurprisePattern] = &[
    SurprisePattern {
        lang: "ru",
        pattern: r"\bаху[йеё]\w*\b",
        note: "ахуй / ахуел / ахуеть / ахуенно",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bвахуй\b",
        note: "вахуй",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bафиг\b",
        note: "афиг",
    },
    SurprisePattern {
        lang: "uk",
        pattern: r"\bафіг\b",
        note: "афіг (Ukrainian і)",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bв\s*аф[иі]ге\b",
        note: "в афиге / в афіге",
    },
    SurprisePattern {
        lang: "uk",
        pattern: r"\bв\s*афігі\b",
        note: "в афігі (Ukrainian і)",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bох[уе]е[втлн]\b",
        note: "охуев / охеел / ... stems",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bобал?де[втлн]\b",
        note: "обалдев / обадел / ... stems",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bв\s*шоке\b",
        note: "в шоке",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bшок\b",
        note: "шок",
    },
    SurprisePattern {
        lang: "ru",
        pattern: r"\bне\s*мог[уе]?\s*поверить\b",
        note: "не могу поверить",
    },
    SurprisePattern {
        lang: "en",
        pattern: r"\bwtf\b",
        note: "wtf",
    },
];

/// Patterns compiled once at startup; every message gets a full scan.
static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SURPRISE_PATTERNS
        .iter()
        .map(|p| {
            Regex::new(&format!("(?i){}", p.pattern)).expect("built-in pattern must compile")
        })
        .collect()
});

/// Returns `true` if the text contains any surprise expression.
///
/// Pure and side-effect free. Empty or whitespace-only text never
/// matches.
pub fn is_surprise(text: &str) -> bool {
    first_match(text).is_some()
}

/// Returns the first table entry whose pattern matches the text.
///
/// Table order decides which entry is reported when several would
/// match; callers that only need a yes/no answer should use
/// [`is_surprise`].
pub fn first_match(text: &str) -> Option<&'static SurprisePattern> {
    COMPILED
        .iter()
        .position(|re| re.is_match(text))
        .map(|i| &SURPRISE_PATTERNS[i])
}
