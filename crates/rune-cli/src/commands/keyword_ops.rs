use std::fs;
use std::path::Path;
use std::process;

use serde::Serialize;

use rune_engine::keyword::{match_keywords_with, KeywordMatchResult, WorldKeywordItem};
use rune_engine::phonetic::{PhoneticProvider, PhoneticState, Romanize};

use super::pad;
use super::phonetic_ops::load_romanizer;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a keyword dictionary: a JSON array of entries.
pub fn load_dictionary(path: &Path) -> Result<Vec<WorldKeywordItem>, DictionaryError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeywordReport<'a> {
    query: &'a str,
    phonetic: PhoneticState,
    results: &'a [KeywordMatchResult<'a>],
}

pub fn keywords_cmd(dict_file: &str, query: &str, limit: usize, table: Option<&str>, json: bool) {
    let dict = die!(
        load_dictionary(Path::new(dict_file)),
        "Error reading {dict_file}: {}"
    );
    let provider: PhoneticProvider = load_romanizer(table);
    let results = match_keywords_with(query, &dict, limit, &provider as &dyn Romanize);

    if json {
        let report = KeywordReport {
            query,
            phonetic: provider.state(),
            results: &results,
        };
        let out = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{out}");
        return;
    }

    if results.is_empty() {
        println!("(no matches)");
        return;
    }
    for (i, r) in results.iter().enumerate() {
        let alias = r
            .matched_alias
            .map(|a| format!("  via {a}"))
            .unwrap_or_default();
        println!(
            "#{:>2}: {} {:>3}  {:?}{}",
            i + 1,
            pad(&r.keyword.keyword, 16),
            r.score,
            r.match_type,
            alias
        );
    }
}
