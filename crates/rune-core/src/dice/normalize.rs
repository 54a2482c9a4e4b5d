use crate::unicode::fold_fullwidth;

/// Used when a default-expression preference is missing or unparseable.
pub const FALLBACK_DICE_EXPR: &str = "d20";

/// Normalize a default-dice preference string to `d<N>`.
///
/// Accepts `d<N>` (any case, full-width allowed) or a bare die size `<N>`.
/// Anything else, including zero-sided dice, yields [`FALLBACK_DICE_EXPR`].
pub fn ensure_default_dice_expr(raw: &str) -> String {
    let folded = fold_fullwidth(raw).trim().to_lowercase();
    let digits = folded.strip_prefix('d').unwrap_or(&folded);
    match parse_die_size(digits) {
        Some(size) => format!("d{size}"),
        None => FALLBACK_DICE_EXPR.to_string(),
    }
}

fn parse_die_size(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|&n| n > 0)
}

/// A normalized default formula together with its die size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultDice {
    expr: String,
    size: u32,
}

impl DefaultDice {
    pub fn from_raw(raw: &str) -> Self {
        let expr = ensure_default_dice_expr(raw);
        let size = expr[1..].parse().unwrap_or(20);
        Self { expr, size }
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl Default for DefaultDice {
    fn default() -> Self {
        Self::from_raw(FALLBACK_DICE_EXPR)
    }
}

/// Strip the `rh` / `r` roll token from a command body (marker already removed).
pub(super) fn strip_roll_token(body: &str) -> &str {
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some('r' | 'R'), Some('h' | 'H')) => &body[2..],
        (Some('r' | 'R'), _) => &body[1..],
        _ => body,
    }
}

/// Canonicalize a dice formula.
///
/// Folds full-width symbols to ASCII, lower-cases, and trims. An empty
/// formula (or a lone `r` / `rd`) becomes the default expression; a bare `d`
/// without a die size picks up the default size.
pub fn normalize_formula(formula: &str, default: &DefaultDice) -> String {
    let folded = fold_fullwidth(formula).to_lowercase();
    let trimmed = folded.trim();
    if matches!(trimmed, "" | "r" | "rd") {
        return default.expr().to_string();
    }
    expand_bare_dice(trimmed, default.size())
}

/// Rewrite every bare `d` (no die size after it) to `d<size>`.
///
/// A `d` counts as bare only when it stands alone as a token letter: the
/// neighbours must not be letters (so `adv`, `4df` and `dc` are untouched) and
/// the next character must not be a digit or `%`.
fn expand_bare_dice(formula: &str, size: u32) -> String {
    let chars: Vec<char> = formula.chars().collect();
    let mut out = String::with_capacity(formula.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if c != 'd' {
            continue;
        }
        let prev_letter = i > 0 && chars[i - 1].is_alphabetic();
        let next = chars.get(i + 1).copied();
        let next_blocks = next.is_some_and(|n| n.is_alphanumeric() || n == '%');
        if !prev_letter && !next_blocks {
            out.push_str(&size.to_string());
        }
    }
    out
}
