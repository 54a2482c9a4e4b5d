use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::{PhoneticError, PhoneticForms, Romanize};
use crate::unicode::is_han;

pub const BUNDLED_TABLE_TOML: &str = include_str!("bundled_pinyin.toml");

#[derive(Deserialize)]
struct TableFile {
    syllables: BTreeMap<String, String>,
    #[serde(default)]
    overrides: BTreeMap<String, String>,
}

/// Han character → tone-less pinyin syllable.
#[derive(Debug, Clone, Default)]
pub struct PinyinTable {
    readings: HashMap<char, String>,
}

impl PinyinTable {
    /// Parse a `[syllables]` / `[overrides]` TOML table.
    pub fn parse(toml_str: &str) -> Result<Self, PhoneticError> {
        let file: TableFile =
            toml::from_str(toml_str).map_err(|e| PhoneticError::Parse(e.to_string()))?;

        let mut readings = HashMap::new();
        // BTreeMap order: a polyphone keeps its alphabetically first syllable.
        for (syllable, chars) in &file.syllables {
            validate_syllable(syllable)?;
            for c in chars.chars().filter(|c| !c.is_whitespace()) {
                readings.entry(c).or_insert_with(|| syllable.clone());
            }
        }
        for (key, syllable) in &file.overrides {
            validate_syllable(syllable)?;
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(PhoneticError::Parse(format!(
                    "override key must be a single character: {key:?}"
                )));
            };
            readings.insert(c, syllable.clone());
        }

        if readings.is_empty() {
            return Err(PhoneticError::Empty);
        }
        Ok(Self { readings })
    }

    /// The table shipped inside the crate.
    pub fn bundled() -> Result<Self, PhoneticError> {
        Self::parse(BUNDLED_TABLE_TOML)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn reading(&self, c: char) -> Option<&str> {
        self.readings.get(&c).map(String::as_str)
    }
}

fn validate_syllable(syllable: &str) -> Result<(), PhoneticError> {
    if syllable.is_empty() || !syllable.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(PhoneticError::Parse(format!(
            "syllable must be lowercase ASCII letters: {syllable:?}"
        )));
    }
    Ok(())
}

impl Romanize for PinyinTable {
    /// Strings without any Han character have no phonetic forms.
    fn romanize(&self, text: &str) -> Option<PhoneticForms> {
        let mut initials = String::new();
        let mut full = String::new();
        let mut saw_han = false;

        for c in text.chars() {
            if is_han(c) {
                saw_han = true;
                if let Some(syllable) = self.reading(c) {
                    full.push_str(syllable);
                    initials.extend(syllable.chars().next().map(|i| i.to_ascii_uppercase()));
                }
            } else if c.is_ascii_alphanumeric() {
                full.push(c.to_ascii_lowercase());
                initials.push(c.to_ascii_uppercase());
            }
        }

        saw_han.then_some(PhoneticForms { initials, full })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bundled_table() {
        let table = PinyinTable::bundled().unwrap();
        assert!(table.len() > 1500, "expected 1500+ readings, got {}", table.len());
        assert_eq!(table.reading('张'), Some("zhang"));
        assert_eq!(table.reading('绿'), Some("lv"));
    }

    #[test]
    fn overrides_pin_polyphones() {
        let table = PinyinTable::bundled().unwrap();
        assert_eq!(table.reading('长'), Some("chang"));
        assert_eq!(table.reading('还'), Some("hai"));
        assert_eq!(table.reading('乐'), Some("le"));
    }

    #[test]
    fn polyphone_without_override_takes_first_syllable() {
        let toml = r#"
[syllables]
zhong = "重"
chong = "重"
"#;
        let table = PinyinTable::parse(toml).unwrap();
        assert_eq!(table.reading('重'), Some("chong"));
    }

    #[test]
    fn romanize_han_text() {
        let table = PinyinTable::bundled().unwrap();
        let forms = table.romanize("长 安城").unwrap();
        assert_eq!(forms.initials, "CAC");
        assert_eq!(forms.full, "changancheng");
    }

    #[test]
    fn romanize_mixed_text() {
        let table = PinyinTable::bundled().unwrap();
        let forms = table.romanize("HP值!").unwrap();
        assert_eq!(forms.initials, "HPZ");
        assert_eq!(forms.full, "hpzhi");
    }

    #[test]
    fn romanize_skips_unknown_han() {
        let table = PinyinTable::parse("[syllables]\nzhang = \"张\"\n").unwrap();
        let forms = table.romanize("张龘").unwrap();
        assert_eq!(forms.initials, "Z");
        assert_eq!(forms.full, "zhang");
    }

    #[test]
    fn romanize_without_han_is_none() {
        let table = PinyinTable::bundled().unwrap();
        assert_eq!(table.romanize("Dark Elf"), None);
        assert_eq!(table.romanize(""), None);
    }

    #[test]
    fn error_empty_table() {
        let err = PinyinTable::parse("[syllables]\n").unwrap_err();
        assert!(matches!(err, PhoneticError::Empty));
    }

    #[test]
    fn error_bad_syllable() {
        let err = PinyinTable::parse("[syllables]\nZhang = \"张\"\n").unwrap_err();
        assert!(matches!(err, PhoneticError::Parse(_)));
    }

    #[test]
    fn error_bad_override_key() {
        let toml = r#"
[syllables]
zhang = "张"

[overrides]
"张三" = "zhang"
"#;
        let err = PinyinTable::parse(toml).unwrap_err();
        assert!(err.to_string().contains("single character"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = PinyinTable::parse("not valid toml {{{").unwrap_err();
        assert!(matches!(err, PhoneticError::Parse(_)));
    }
}
