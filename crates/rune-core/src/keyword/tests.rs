use super::*;
use crate::phonetic::{NoPhonetic, PinyinTable};

fn names<'a>(results: &[KeywordMatchResult<'a>]) -> Vec<&'a str> {
    results.iter().map(|r| r.keyword.keyword.as_str()).collect()
}

fn pinyin() -> PinyinTable {
    PinyinTable::bundled().unwrap()
}

#[test]
fn exact_beats_prefix_beats_contains() {
    let dict = vec![
        WorldKeywordItem::new("xabcx"),
        WorldKeywordItem::new("abcdef"),
        WorldKeywordItem::new("abc"),
    ];
    let results = match_keywords_with("abc", &dict, 5, &NoPhonetic);
    assert_eq!(names(&results), vec!["abc", "abcdef", "xabcx"]);
    let types: Vec<MatchType> = results.iter().map(|r| r.match_type).collect();
    assert_eq!(
        types,
        vec![
            MatchType::ExactKeyword,
            MatchType::PrefixKeyword,
            MatchType::ContainsKeyword
        ]
    );
    let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![100, 90, 80]);
}

#[test]
fn matching_is_case_insensitive() {
    let dict = vec![WorldKeywordItem::new("Dark Elf")];
    let results = match_keywords_with("dark ELF", &dict, 5, &NoPhonetic);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].match_type, MatchType::ExactKeyword);
}

#[test]
fn alias_tiers() {
    let dict = vec![
        WorldKeywordItem::new("Gandalf").with_aliases(["Mithrandir", "Grey Pilgrim"]),
        WorldKeywordItem::new("Saruman").with_aliases(["Curunir", "Sharkey the grey"]),
        WorldKeywordItem::new("Radagast").with_aliases(["grey"]),
    ];
    let results = match_keywords_with("grey", &dict, 5, &NoPhonetic);
    assert_eq!(names(&results), vec!["Radagast", "Gandalf", "Saruman"]);
    assert_eq!(results[0].match_type, MatchType::ExactAlias);
    assert_eq!(results[0].score, 70);
    assert_eq!(results[1].match_type, MatchType::PrefixAlias);
    assert_eq!(results[1].matched_alias, Some("Grey Pilgrim"));
    assert_eq!(results[2].match_type, MatchType::ContainsAlias);
    assert_eq!(results[2].score, 60);
}

#[test]
fn keyword_tier_wins_over_alias_tier() {
    let dict = vec![WorldKeywordItem::new("Ironforge").with_aliases(["iron"])];
    let results = match_keywords_with("iron", &dict, 5, &NoPhonetic);
    assert_eq!(results[0].match_type, MatchType::PrefixKeyword);
    assert_eq!(results[0].matched_alias, None);
}

#[test]
fn first_exact_alias_wins() {
    let dict = vec![WorldKeywordItem::new("Elrond").with_aliases(["Half-elven", "half-elven"])];
    let results = match_keywords_with("HALF-ELVEN", &dict, 5, &NoPhonetic);
    assert_eq!(results[0].matched_alias, Some("Half-elven"));
}

#[test]
fn disabled_entries_never_match() {
    let dict = vec![
        WorldKeywordItem::new("abc").disabled(),
        WorldKeywordItem::new("abcd"),
    ];
    let results = match_keywords_with("abc", &dict, 5, &pinyin());
    assert_eq!(names(&results), vec!["abcd"]);
}

#[test]
fn ties_keep_dictionary_order() {
    let dict = vec![
        WorldKeywordItem::new("orc chief"),
        WorldKeywordItem::new("orc shaman"),
        WorldKeywordItem::new("orc"),
        WorldKeywordItem::new("orc grunt"),
    ];
    let results = match_keywords_with("orc", &dict, 5, &NoPhonetic);
    assert_eq!(
        names(&results),
        vec!["orc", "orc chief", "orc shaman", "orc grunt"]
    );
}

#[test]
fn limit_truncates_and_zero_is_empty() {
    let dict: Vec<WorldKeywordItem> = (0..10)
        .map(|i| WorldKeywordItem::new(format!("goblin {i}")))
        .collect();
    assert_eq!(match_keywords_with("goblin", &dict, 3, &NoPhonetic).len(), 3);
    assert_eq!(
        match_keywords_with("goblin", &dict, DEFAULT_MATCH_LIMIT, &NoPhonetic).len(),
        5
    );
    assert!(match_keywords_with("goblin", &dict, 0, &NoPhonetic).is_empty());
}

#[test]
fn punctuation_only_query_is_empty() {
    let dict = vec![WorldKeywordItem::new("，")];
    assert!(match_keywords_with("，。！", &dict, 5, &NoPhonetic).is_empty());
    assert!(match_keywords_with("", &dict, 5, &NoPhonetic).is_empty());
}

#[test]
fn query_punctuation_is_stripped() {
    let dict = vec![WorldKeywordItem::new("龙骑士")];
    let results = match_keywords_with("“龙骑士”！", &dict, 5, &NoPhonetic);
    assert_eq!(results[0].match_type, MatchType::ExactKeyword);
}

#[test]
fn phonetic_keyword_tiers() {
    let dict = vec![
        WorldKeywordItem::new("张三"),
        WorldKeywordItem::new("张三丰"),
        WorldKeywordItem::new("老张三"),
        WorldKeywordItem::new("长安城"),
    ];
    let table = pinyin();

    let results = match_keywords_with("zs", &dict, 5, &table);
    assert_eq!(names(&results), vec!["张三", "张三丰", "老张三"]);
    let types: Vec<MatchType> = results.iter().map(|r| r.match_type).collect();
    assert_eq!(
        types,
        vec![
            MatchType::PhoneticInitialsExact,
            MatchType::PhoneticInitialsPrefix,
            MatchType::PhoneticInitialsContains
        ]
    );

    let results = match_keywords_with("changan", &dict, 5, &table);
    assert_eq!(names(&results), vec!["长安城"]);
    assert_eq!(results[0].match_type, MatchType::PhoneticFullPrefix);
    assert_eq!(results[0].score, 25);

    let results = match_keywords_with("ancheng", &dict, 5, &table);
    assert_eq!(results[0].match_type, MatchType::PhoneticFullContains);
    assert_eq!(results[0].score, 20);
}

#[test]
fn phonetic_alias_scores_lower() {
    let dict = vec![
        WorldKeywordItem::new("Red Dragon").with_aliases(["赤龙"]),
        WorldKeywordItem::new("赤色"),
    ];
    let results = match_keywords_with("cl", &dict, 5, &pinyin());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].keyword.keyword, "Red Dragon");
    assert_eq!(results[0].match_type, MatchType::PhoneticInitialsExact);
    assert_eq!(results[0].score, 45);
    assert_eq!(results[0].matched_alias, Some("赤龙"));
}

#[test]
fn keyword_phonetic_checked_before_alias_phonetic() {
    let dict = vec![WorldKeywordItem::new("长老会").with_aliases(["长老"])];
    let results = match_keywords_with("cl", &dict, 5, &pinyin());
    assert_eq!(results[0].match_type, MatchType::PhoneticInitialsPrefix);
    assert_eq!(results[0].score, 40);
    assert_eq!(results[0].matched_alias, None);
}

#[test]
fn phonetic_ranks_below_literal() {
    let dict = vec![
        WorldKeywordItem::new("张三"),
        WorldKeywordItem::new("zsword"),
    ];
    let results = match_keywords_with("zs", &dict, 5, &pinyin());
    assert_eq!(names(&results), vec!["zsword", "张三"]);
}

#[test]
fn literal_tiers_identical_without_phonetic_data() {
    let dict = vec![
        WorldKeywordItem::new("张三"),
        WorldKeywordItem::new("Zsombor").with_aliases(["zs"]),
        WorldKeywordItem::new("Lizs"),
    ];
    let with_table = match_keywords_with("zs", &dict, 5, &pinyin());
    let without = match_keywords_with("zs", &dict, 5, &NoPhonetic);

    let literal_only: Vec<_> = with_table
        .iter()
        .filter(|r| !r.match_type.is_phonetic())
        .cloned()
        .collect();
    assert_eq!(literal_only, without);
    assert!(without.iter().all(|r| !r.match_type.is_phonetic()));
    assert_eq!(names(&without), vec!["Zsombor", "Lizs"]);
}

#[test]
fn non_ascii_query_skips_phonetic() {
    let dict = vec![WorldKeywordItem::new("张三")];
    assert!(match_keywords_with("章", &dict, 5, &pinyin()).is_empty());
}

#[test]
fn matches_text_vacuous_and_empty() {
    assert!(matches_text_with("", "anything", &NoPhonetic));
    assert!(matches_text_with("   ", "", &NoPhonetic));
    assert!(!matches_text_with("x", "", &NoPhonetic));
}

#[test]
fn matches_text_literal_and_phonetic() {
    let table = pinyin();
    assert!(matches_text_with("ali", "Alice", &NoPhonetic));
    assert!(!matches_text_with("zs", "张三", &NoPhonetic));
    assert!(matches_text_with("zs", "张三", &table));
    assert!(matches_text_with("sanfeng", "张三丰", &table));
    assert!(!matches_text_with("lisi", "张三", &table));
}

#[test]
fn deserialize_dictionary_json() {
    let json = r#"[
        {"id": "k1", "keyword": "张三", "aliases": ["三哥"], "isEnabled": true, "description": "NPC"},
        {"keyword": "Mordor"},
        {"keyword": "Hidden", "isEnabled": false}
    ]"#;
    let dict: Vec<WorldKeywordItem> = serde_json::from_str(json).unwrap();
    assert_eq!(dict.len(), 3);
    assert_eq!(dict[0].aliases, vec!["三哥"]);
    assert_eq!(dict[0].description.as_deref(), Some("NPC"));
    assert!(dict[1].is_enabled);
    assert!(dict[1].aliases.is_empty());
    assert!(!dict[2].is_enabled);
}

#[test]
fn serialize_match_result() {
    let dict = vec![WorldKeywordItem::new("Mordor").with_aliases(["Black Land"])];
    let results = match_keywords_with("black", &dict, 5, &NoPhonetic);
    let value = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(value["matchType"], "prefix-alias");
    assert_eq!(value["score"], 65);
    assert_eq!(value["matchedAlias"], "Black Land");
    assert_eq!(value["keyword"]["keyword"], "Mordor");
}
