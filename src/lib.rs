//! Inline annotation engine for chat messages: dice roll recognition and
//! glossary keyword matching with optional pinyin support.
//!
//! The algorithms live in `rune_core`; this crate re-exports them and adds
//! the [`Annotator`] facade used by editors and message renderers.

mod annotator;
mod trace_init;

pub use annotator::{Annotation, Annotator, Completion};
pub use trace_init::init_tracing;

pub use rune_core::{dice, keyword, phonetic, settings, unicode};

use rune_core::dice::{DefaultDice, DiceMatch};
use rune_core::phonetic::{PhoneticProvider, SubscriptionId};

/// Recognize dice expressions in `text`.
///
/// `default_expr` is the channel's default dice (`d<N>` or `<N>`); `None`
/// uses the configured default.
pub fn recognize_dice(text: &str, default_expr: Option<&str>) -> Vec<DiceMatch> {
    match default_expr {
        Some(raw) => dice::recognize_dice_with(text, &DefaultDice::from_raw(raw)),
        None => dice::recognize_dice(text),
    }
}

pub fn is_hidden_roll_command(text: &str) -> bool {
    dice::is_hidden_roll_command(text)
}

/// Rank `dictionary` against `query`; `None` returns at most
/// [`keyword::DEFAULT_MATCH_LIMIT`] results.
pub fn match_keywords<'a>(
    query: &str,
    dictionary: &'a [keyword::WorldKeywordItem],
    limit: Option<usize>,
) -> Vec<keyword::KeywordMatchResult<'a>> {
    let limit = limit.unwrap_or(keyword::DEFAULT_MATCH_LIMIT);
    keyword::match_keywords(query, dictionary, limit)
}

pub fn matches_text(query: &str, text: &str) -> bool {
    keyword::matches_text(query, text)
}

/// Block until the shared pinyin data has settled. Returns `true` when it
/// loaded.
pub fn ensure_phonetic_loaded() -> bool {
    PhoneticProvider::global().ensure_loaded()
}

/// Bumped each time pinyin data becomes available; cached keyword results
/// computed under an older version should be recomputed.
pub fn phonetic_ready_version() -> u64 {
    PhoneticProvider::global().ready_version()
}

/// Register `observer` for ready-version changes of the shared provider.
pub fn subscribe_phonetic(observer: impl Fn(u64) + Send + Sync + 'static) -> SubscriptionId {
    PhoneticProvider::global().subscribe(observer)
}

pub fn unsubscribe_phonetic(id: SubscriptionId) -> bool {
    PhoneticProvider::global().unsubscribe(id)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use keyword::{MatchType, WorldKeywordItem};

    #[test]
    fn dice_helpers_use_configured_default() {
        let matches = recognize_dice(".r", None);
        assert_eq!(matches[0].normalized, settings::settings().dice.default_expr);
        assert_eq!(recognize_dice(".r", Some("6"))[0].normalized, "d6");
        assert_eq!(recognize_dice(".r", Some("junk"))[0].normalized, "d20");
        assert!(is_hidden_roll_command(".rh"));
        assert!(!is_hidden_roll_command(".r"));
    }

    // Every use of the shared provider lives in this one test so the load
    // order is deterministic.
    #[test]
    fn shared_provider_lifecycle() {
        let seen = Arc::new(AtomicU64::new(0));
        let dropped = Arc::new(AtomicUsize::new(0));
        let seen_in = Arc::clone(&seen);
        subscribe_phonetic(move |version| seen_in.store(version, Ordering::SeqCst));
        let dropped_in = Arc::clone(&dropped);
        let id = subscribe_phonetic(move |_| {
            dropped_in.fetch_add(1, Ordering::SeqCst);
        });
        assert!(unsubscribe_phonetic(id));
        assert!(!unsubscribe_phonetic(id));

        assert!(ensure_phonetic_loaded());
        assert!(ensure_phonetic_loaded());
        assert_eq!(phonetic_ready_version(), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(dropped.load(Ordering::SeqCst), 0);

        let dict: Vec<WorldKeywordItem> = ["张三", "张三丰", "老张三", "张飞", "张角", "张辽"]
            .into_iter()
            .map(WorldKeywordItem::new)
            .collect();
        let hits = match_keywords("zs", &dict, None);
        assert_eq!(hits[0].keyword.keyword, "张三");
        assert_eq!(hits[0].match_type, MatchType::PhoneticInitialsExact);
        assert_eq!(match_keywords("张", &dict, None).len(), keyword::DEFAULT_MATCH_LIMIT);
        assert_eq!(match_keywords("张", &dict, Some(2)).len(), 2);
        assert!(match_keywords("张", &dict, Some(0)).is_empty());

        assert!(matches_text("zs", "张三"));
        assert!(matches_text("", "anything"));
        assert!(!matches_text("x", ""));
    }
}
