use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use rune_core::dice::{self, DefaultDice, DiceMatch};
use rune_core::keyword::{
    self, keyword_query_at, KeywordMatchResult, KeywordQuery, WorldKeywordItem,
};
use rune_core::phonetic::PhoneticProvider;
use rune_core::settings::settings;

/// Dice annotations for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub dice: Vec<DiceMatch>,
    /// The message is a hidden roll; do not echo the result publicly.
    pub hidden_roll: bool,
}

/// Autocomplete suggestions for the token under the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion<'a> {
    pub query: KeywordQuery,
    pub results: Vec<KeywordMatchResult<'a>>,
}

/// Entry point for editor overlays and autocomplete popups.
///
/// Holds the per-channel default dice expression, the result limit and the
/// phonetic provider used for keyword lookup.
pub struct Annotator {
    default_dice: DefaultDice,
    keyword_limit: usize,
    max_query_chars: usize,
    phonetic: Arc<PhoneticProvider>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator {
    /// Configured from the global settings and phonetic provider.
    pub fn new() -> Self {
        let s = settings();
        Self {
            default_dice: DefaultDice::from_raw(&s.dice.default_expr),
            keyword_limit: s.keywords.max_results,
            max_query_chars: s.keywords.max_query_chars,
            phonetic: Arc::clone(PhoneticProvider::global()),
        }
    }

    /// Use a channel's default-dice preference (`d<N>` or `<N>`).
    pub fn with_default_dice(mut self, raw: &str) -> Self {
        self.default_dice = DefaultDice::from_raw(raw);
        self
    }

    pub fn with_keyword_limit(mut self, limit: usize) -> Self {
        self.keyword_limit = limit;
        self
    }

    pub fn with_phonetic(mut self, provider: Arc<PhoneticProvider>) -> Self {
        self.phonetic = provider;
        self
    }

    pub fn default_dice(&self) -> &str {
        self.default_dice.expr()
    }

    pub fn phonetic(&self) -> &Arc<PhoneticProvider> {
        &self.phonetic
    }

    pub fn recognize_dice(&self, text: &str) -> Vec<DiceMatch> {
        dice::recognize_dice_with(text, &self.default_dice)
    }

    pub fn is_hidden_roll(&self, text: &str) -> bool {
        dice::is_hidden_roll_command(text)
    }

    pub fn annotate(&self, text: &str) -> Annotation {
        Annotation {
            dice: self.recognize_dice(text),
            hidden_roll: self.is_hidden_roll(text),
        }
    }

    /// Rank `dictionary` against `query`. Starts the phonetic load in the
    /// background on first use.
    pub fn match_keywords<'a>(
        &self,
        query: &str,
        dictionary: &'a [WorldKeywordItem],
    ) -> Vec<KeywordMatchResult<'a>> {
        self.phonetic.request_load();
        keyword::match_keywords_with(query, dictionary, self.keyword_limit, &*self.phonetic)
    }

    pub fn matches_text(&self, query: &str, text: &str) -> bool {
        self.phonetic.request_load();
        keyword::matches_text_with(query, text, &*self.phonetic)
    }

    /// Suggestions for the token ending at `cursor` (a char offset).
    pub fn complete_at<'a>(
        &self,
        text: &str,
        cursor: usize,
        dictionary: &'a [WorldKeywordItem],
    ) -> Option<Completion<'a>> {
        let query = keyword_query_at(text, cursor, self.max_query_chars)?;
        debug!(query = %query.text, start = query.start, "completion query");
        let results = self.match_keywords(&query.text, dictionary);
        if results.is_empty() {
            return None;
        }
        Some(Completion { query, results })
    }
}
