//! Pinyin romanization for keyword lookup.
//!
//! The pinyin table is not available up front: [`PhoneticProvider`] loads it
//! lazily from an ordered list of [`PhoneticSource`]s (remote first, then the
//! bundled copy) and publishes a ready version once it lands. Until then
//! every lookup answers `None` and keyword matching runs without its
//! phonetic tiers.

mod provider;
mod source;
mod table;

use std::time::Duration;

use serde::Serialize;

pub use provider::{PhoneticProvider, PhoneticState, SubscriptionId};
pub use source::{BundledSource, FileSource, HttpSource, PhoneticSource};
pub use table::{PinyinTable, BUNDLED_TABLE_TOML};

/// Romanized forms of one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneticForms {
    /// First letter of each syllable, upper-cased (`张三` → `ZS`).
    pub initials: String,
    /// Full tone-less reading, lower-cased, no whitespace (`张三` → `zhangsan`).
    pub full: String,
}

/// Anything that can produce phonetic forms for a string.
///
/// Returns `None` when the string has no Han characters or when no phonetic
/// data is available.
pub trait Romanize {
    fn romanize(&self, text: &str) -> Option<PhoneticForms>;

    fn initials(&self, text: &str) -> Option<String> {
        self.romanize(text).map(|f| f.initials)
    }

    fn full(&self, text: &str) -> Option<String> {
        self.romanize(text).map(|f| f.full)
    }
}

/// Romanizer with no data; phonetic tiers never match.
pub struct NoPhonetic;

impl Romanize for NoPhonetic {
    fn romanize(&self, _text: &str) -> Option<PhoneticForms> {
        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhoneticError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("pinyin table is empty")]
    Empty,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("source {0} stopped without a result")]
    SourcePanicked(String),
}
