pub mod config_ops;
pub mod dice_ops;
pub mod keyword_ops;
pub mod phonetic_ops;

/// Right-pad `s` with spaces to `width` terminal columns.
pub(crate) fn pad(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let display_width = UnicodeWidthStr::width(s);
    if display_width < width {
        format!("{}{}", s, " ".repeat(width - display_width))
    } else {
        s.to_string()
    }
}
