//! Dice-roll recognition in free text.
//!
//! Two inline forms are recognized:
//!
//! - brace formulas such as `{2d6+3}`
//! - shorthand roll commands such as `.r`, `。rh` and `.r2d6`
//!
//! Brace formulas are scanned first and claim their characters, so a
//! command that would overlap one is dropped. Offsets are char offsets.

mod normalize;

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::settings::settings;
use crate::unicode::CharOffsets;

pub use normalize::{ensure_default_dice_expr, normalize_formula, DefaultDice, FALLBACK_DICE_EXPR};

/// Characters that can open a shorthand roll command.
const COMMAND_MARKERS: &[char] = &['.', '。', '．', '｡'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiceMatchKind {
    /// Marker-prefixed shorthand such as `.r2d6`.
    Command,
    /// `{...}` delimited formula.
    Brace,
}

/// A recognized dice span. `start..end` is a half-open char range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceMatch {
    pub start: usize,
    pub end: usize,
    pub source: String,
    pub normalized: String,
    pub kind: DiceMatchKind,
}

impl DiceMatch {
    pub fn overlaps(&self, other: &DiceMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn brace_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("brace pattern must compile"))
}

fn command_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[.。．｡]r[^\s，,；;。、]*").expect("command pattern must compile")
    })
}

fn hidden_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*[.。．｡]rh").expect("hidden pattern must compile"))
}

/// Recognize dice spans using the configured default expression.
pub fn recognize_dice(text: &str) -> Vec<DiceMatch> {
    let default = DefaultDice::from_raw(&settings().dice.default_expr);
    recognize_dice_with(text, &default)
}

/// Recognize dice spans, substituting `default` for bare roll commands.
///
/// The result is sorted by `start` and no two spans overlap.
pub fn recognize_dice_with(text: &str, default: &DefaultDice) -> Vec<DiceMatch> {
    if text.is_empty() {
        return Vec::new();
    }
    let _span = debug_span!("recognize_dice", chars = text.chars().count()).entered();

    let offsets = CharOffsets::new(text);
    let mut consumed = vec![false; offsets.char_len()];
    let mut matches = Vec::new();

    // 1. Brace formulas claim their whole range.
    for caps in brace_pattern().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let start = offsets.to_char(whole.start());
        let end = offsets.to_char(whole.end());
        if start >= end {
            continue;
        }
        consumed[start..end].iter_mut().for_each(|c| *c = true);
        matches.push(DiceMatch {
            start,
            end,
            source: whole.as_str().to_string(),
            normalized: normalize_formula(inner.as_str(), default),
            kind: DiceMatchKind::Brace,
        });
    }

    // 2. Commands, skipping anything that touches a claimed char.
    for m in command_pattern().find_iter(text) {
        if text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric())
        {
            // `file.rs`, `v1.r2`: the marker belongs to a word.
            continue;
        }
        let start = offsets.to_char(m.start());
        let end = offsets.to_char(m.end());
        if start >= end || consumed[start..end].iter().any(|&c| c) {
            continue;
        }
        let source = m.as_str();
        let body = source.strip_prefix(COMMAND_MARKERS).unwrap_or(source);
        matches.push(DiceMatch {
            start,
            end,
            source: source.to_string(),
            normalized: normalize_formula(normalize::strip_roll_token(body), default),
            kind: DiceMatchKind::Command,
        });
    }

    matches.sort_by_key(|m| m.start);
    debug!(count = matches.len(), "dice matches");
    matches
}

/// Whether `text` is a hidden roll (`.rh...`), whose result should not be
/// echoed publicly.
pub fn is_hidden_roll_command(text: &str) -> bool {
    hidden_pattern().is_match(text)
}
