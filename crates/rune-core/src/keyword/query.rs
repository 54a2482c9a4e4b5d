use serde::Serialize;

/// Punctuation removed from keyword queries, ASCII and CJK full-width.
pub const QUERY_STRIP_CHARS: &[char] = &[
    ',', '.', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}', '<', '>', '@', '#',
    '，', '。', '！', '？', '；', '：', '、', '“', '”', '‘', '’', '（', '）', '【', '】', '《',
    '》', '「', '」', '『', '』', '…', '～', '·',
];

pub fn is_query_punctuation(c: char) -> bool {
    QUERY_STRIP_CHARS.contains(&c)
}

/// Remove stripped punctuation and surrounding whitespace.
pub fn sanitize_query(query: &str) -> String {
    let stripped: String = query.chars().filter(|&c| !is_query_punctuation(c)).collect();
    stripped.trim().to_string()
}

/// The token under an editing cursor, used to drive autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordQuery {
    /// Char offset of the first query character.
    pub start: usize,
    /// Char offset one past the last query character (the cursor).
    pub end: usize,
    pub text: String,
}

/// Extract the token immediately before `cursor` (a char offset).
///
/// The token runs back to the nearest whitespace or query punctuation and
/// is capped at `max_chars`. Returns `None` when there is nothing to query.
pub fn keyword_query_at(text: &str, cursor: usize, max_chars: usize) -> Option<KeywordQuery> {
    let chars: Vec<char> = text.chars().collect();
    let end = cursor.min(chars.len());
    let mut start = end;
    while start > 0 && end - start < max_chars {
        let c = chars[start - 1];
        if c.is_whitespace() || is_query_punctuation(c) {
            break;
        }
        start -= 1;
    }
    if start == end {
        return None;
    }
    Some(KeywordQuery {
        start,
        end,
        text: chars[start..end].iter().collect(),
    })
}
