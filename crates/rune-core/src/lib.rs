//! Inline annotation engine for chat input.
//!
//! Recognizes dice-roll expressions and glossary keyword references in free
//! text. Keyword lookup can use pinyin romanization once the phonetic table
//! has been loaded.

pub mod dice;
pub mod keyword;
pub mod phonetic;
pub mod settings;
pub mod unicode;
