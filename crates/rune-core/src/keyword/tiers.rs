use crate::phonetic::{PhoneticForms, Romanize};

use super::{KeywordMatchResult, MatchType, WorldKeywordItem};

/// Alias-level phonetic hits score this much below keyword-level ones.
pub const ALIAS_PHONETIC_PENALTY: u32 = 5;
const ALIAS_PHONETIC_FLOOR: u32 = 10;

type Predicate = fn(&str, &str) -> bool;

fn exact(hay: &str, needle: &str) -> bool {
    hay == needle
}

fn prefix(hay: &str, needle: &str) -> bool {
    hay.starts_with(needle)
}

fn contains(hay: &str, needle: &str) -> bool {
    hay.contains(needle)
}

const KEYWORD_TIERS: [(MatchType, Predicate); 3] = [
    (MatchType::ExactKeyword, exact),
    (MatchType::PrefixKeyword, prefix),
    (MatchType::ContainsKeyword, contains),
];

const ALIAS_TIERS: [(MatchType, Predicate); 3] = [
    (MatchType::ExactAlias, exact),
    (MatchType::PrefixAlias, prefix),
    (MatchType::ContainsAlias, contains),
];

#[derive(Clone, Copy)]
enum Field {
    Initials,
    Full,
}

const PHONETIC_TIERS: [(MatchType, Field, Predicate); 5] = [
    (MatchType::PhoneticInitialsExact, Field::Initials, exact),
    (MatchType::PhoneticInitialsPrefix, Field::Initials, prefix),
    (MatchType::PhoneticInitialsContains, Field::Initials, contains),
    (MatchType::PhoneticFullPrefix, Field::Full, prefix),
    (MatchType::PhoneticFullContains, Field::Full, contains),
];

/// A sanitized query in the shapes each tier compares against.
pub(super) struct Needle {
    /// Lower-cased query.
    pub literal: String,
    /// Upper-cased, whitespace removed; compared with pinyin initials.
    pub initials: String,
    /// Lower-cased, whitespace removed; compared with full pinyin.
    pub full: String,
}

impl Needle {
    pub fn new(query: &str) -> Self {
        let literal = query.to_lowercase();
        let full: String = literal.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            initials: full.to_ascii_uppercase(),
            full,
            literal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }

    /// Pinyin forms are ASCII; a query with anything else cannot hit them.
    pub fn phonetic_eligible(&self) -> bool {
        !self.full.is_empty() && self.full.chars().all(|c| c.is_ascii_alphanumeric())
    }

    fn key(&self, field: Field) -> &str {
        match field {
            Field::Initials => &self.initials,
            Field::Full => &self.full,
        }
    }
}

fn form(forms: &PhoneticForms, field: Field) -> &str {
    match field {
        Field::Initials => &forms.initials,
        Field::Full => &forms.full,
    }
}

fn hit<'a>(
    item: &'a WorldKeywordItem,
    match_type: MatchType,
    score: u32,
    alias: Option<&'a str>,
) -> KeywordMatchResult<'a> {
    KeywordMatchResult {
        keyword: item,
        score,
        match_type,
        matched_alias: alias,
    }
}

/// Score one entry by the first tier it satisfies.
///
/// Tier groups, in order: keyword literal, alias literal, keyword phonetic,
/// alias phonetic. Within a group the tiers run best first and, for
/// aliases, the first alias satisfying a tier wins it.
pub(super) fn best_match<'a>(
    needle: &Needle,
    item: &'a WorldKeywordItem,
    phonetic: &dyn Romanize,
) -> Option<KeywordMatchResult<'a>> {
    let keyword = item.keyword.to_lowercase();
    let aliases: Vec<String> = item.aliases.iter().map(|a| a.to_lowercase()).collect();
    let n = needle.literal.as_str();

    let groups: [Box<dyn Fn() -> Option<KeywordMatchResult<'a>> + '_>; 4] = [
        Box::new(|| {
            KEYWORD_TIERS
                .iter()
                .find_map(|&(mt, test)| test(&keyword, n).then(|| hit(item, mt, mt.score(), None)))
        }),
        Box::new(|| {
            ALIAS_TIERS.iter().find_map(|&(mt, test)| {
                item.aliases
                    .iter()
                    .zip(&aliases)
                    .find(|(_, lowered)| test(lowered, n))
                    .map(|(alias, _)| hit(item, mt, mt.score(), Some(alias.as_str())))
            })
        }),
        Box::new(|| {
            if !needle.phonetic_eligible() {
                return None;
            }
            let forms = phonetic.romanize(&item.keyword)?;
            PHONETIC_TIERS.iter().find_map(|&(mt, field, test)| {
                test(form(&forms, field), needle.key(field)).then(|| hit(item, mt, mt.score(), None))
            })
        }),
        Box::new(|| {
            if !needle.phonetic_eligible() || item.aliases.is_empty() {
                return None;
            }
            let alias_forms: Vec<(&'a str, PhoneticForms)> = item
                .aliases
                .iter()
                .filter_map(|alias| phonetic.romanize(alias).map(|f| (alias.as_str(), f)))
                .collect();
            PHONETIC_TIERS.iter().find_map(|&(mt, field, test)| {
                alias_forms
                    .iter()
                    .find(|(_, forms)| test(form(forms, field), needle.key(field)))
                    .map(|&(alias, _)| {
                        let score = mt
                            .score()
                            .saturating_sub(ALIAS_PHONETIC_PENALTY)
                            .max(ALIAS_PHONETIC_FLOOR);
                        hit(item, mt, score, Some(alias))
                    })
            })
        }),
    ];

    groups.iter().find_map(|group| group())
}
