//! Glossary keyword matching.
//!
//! Each enabled dictionary entry is scored by the first tier it satisfies:
//! literal keyword, literal alias, then (when pinyin data is loaded)
//! phonetic keyword and phonetic alias. Results are ranked by score with
//! dictionary order kept among ties.

mod query;
mod tiers;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::phonetic::{PhoneticProvider, Romanize};

pub use query::{is_query_punctuation, keyword_query_at, sanitize_query, KeywordQuery, QUERY_STRIP_CHARS};
pub use tiers::ALIAS_PHONETIC_PENALTY;

/// Result count used when the caller does not pass one.
pub const DEFAULT_MATCH_LIMIT: usize = 5;

/// A glossary entry of one world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldKeywordItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub keyword: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "enabled_by_default")]
    pub is_enabled: bool,
    /// Tooltip text shown for the keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

impl WorldKeywordItem {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            id: None,
            keyword: keyword.into(),
            aliases: Vec::new(),
            is_enabled: true,
            description: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }
}

/// Which rule produced a keyword hit. Listed best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    ExactKeyword,
    PrefixKeyword,
    ContainsKeyword,
    ExactAlias,
    PrefixAlias,
    ContainsAlias,
    PhoneticInitialsExact,
    PhoneticInitialsPrefix,
    PhoneticInitialsContains,
    PhoneticFullPrefix,
    PhoneticFullContains,
}

impl MatchType {
    /// Score of a hit on the keyword itself.
    pub fn score(self) -> u32 {
        match self {
            Self::ExactKeyword => 100,
            Self::PrefixKeyword => 90,
            Self::ContainsKeyword => 80,
            Self::ExactAlias => 70,
            Self::PrefixAlias => 65,
            Self::ContainsAlias => 60,
            Self::PhoneticInitialsExact => 50,
            Self::PhoneticInitialsPrefix => 40,
            Self::PhoneticInitialsContains => 30,
            Self::PhoneticFullPrefix => 25,
            Self::PhoneticFullContains => 20,
        }
    }

    pub fn is_phonetic(self) -> bool {
        self.score() <= Self::PhoneticInitialsExact.score()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatchResult<'a> {
    pub keyword: &'a WorldKeywordItem,
    pub score: u32,
    pub match_type: MatchType,
    /// The alias that matched, for alias and alias-phonetic hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_alias: Option<&'a str>,
}

/// Rank `dictionary` against `query` using the global phonetic provider.
///
/// Kicks off the pinyin load in the background if it has not started; until
/// it finishes only the literal tiers apply.
pub fn match_keywords<'a>(
    query: &str,
    dictionary: &'a [WorldKeywordItem],
    limit: usize,
) -> Vec<KeywordMatchResult<'a>> {
    let provider = PhoneticProvider::global();
    provider.request_load();
    match_keywords_with(query, dictionary, limit, &**provider)
}

/// Rank `dictionary` against `query` with an explicit romanizer.
pub fn match_keywords_with<'a>(
    query: &str,
    dictionary: &'a [WorldKeywordItem],
    limit: usize,
    phonetic: &dyn Romanize,
) -> Vec<KeywordMatchResult<'a>> {
    if limit == 0 {
        return Vec::new();
    }
    let needle = tiers::Needle::new(&sanitize_query(query));
    if needle.is_empty() {
        return Vec::new();
    }
    let _span = debug_span!("match_keywords", query = %needle.literal, entries = dictionary.len()).entered();

    let mut results: Vec<KeywordMatchResult<'a>> = dictionary
        .iter()
        .filter(|item| item.is_enabled)
        .filter_map(|item| tiers::best_match(&needle, item, phonetic))
        .collect();

    // Stable: equal scores keep dictionary order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    debug!(hits = results.len(), "keyword matches");
    results
}

/// Search-as-you-type containment check using the global phonetic provider.
pub fn matches_text(query: &str, text: &str) -> bool {
    let provider = PhoneticProvider::global();
    provider.request_load();
    matches_text_with(query, text, &**provider)
}

/// `true` when `text` contains `query` literally (case-insensitive) or its
/// pinyin initials / full reading contains it. An empty query matches
/// everything; empty text matches only the empty query.
pub fn matches_text_with(query: &str, text: &str, phonetic: &dyn Romanize) -> bool {
    let needle = tiers::Needle::new(query.trim());
    if needle.is_empty() {
        return true;
    }
    if text.is_empty() {
        return false;
    }
    if text.to_lowercase().contains(&needle.literal) {
        return true;
    }
    if !needle.phonetic_eligible() {
        return false;
    }
    phonetic.romanize(text).is_some_and(|forms| {
        forms.initials.contains(&needle.initials) || forms.full.contains(&needle.full)
    })
}
