//! Character-level Unicode helpers shared by the recognizers.

/// CJK Unified Ideographs plus Extension A and B.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Map a full-width form (U+FF01..U+FF5E) or a common multiplication sign to
/// its ASCII counterpart. The ideographic space becomes a plain space.
pub fn fold_fullwidth_char(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        '\u{3000}' => ' ',
        '×' | '·' | '✕' | '∗' => '*',
        _ => c,
    }
}

pub fn fold_fullwidth(s: &str) -> String {
    s.chars().map(fold_fullwidth_char).collect()
}

/// Byte offset → char offset lookup for a single text.
///
/// Regex matches report byte offsets; public spans use char offsets.
pub(crate) struct CharOffsets {
    starts: Vec<usize>,
    byte_len: usize,
}

impl CharOffsets {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(i, _)| i).collect(),
            byte_len: text.len(),
        }
    }

    pub(crate) fn char_len(&self) -> usize {
        self.starts.len()
    }

    /// `byte` must lie on a char boundary (or equal the text length).
    pub(crate) fn to_char(&self, byte: usize) -> usize {
        if byte >= self.byte_len {
            return self.starts.len();
        }
        match self.starts.binary_search(&byte) {
            Ok(i) | Err(i) => i,
        }
    }
}
