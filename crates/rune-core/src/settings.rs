//! Engine settings: the fallback dice expression, keyword result limits and
//! where pinyin data comes from.
//!
//! A host that wants its own values calls [`init_custom`] once at startup;
//! otherwise the embedded `default_settings.toml` is used. The dice default
//! is stored already normalized, so readers never see `"100"` or `"D8"`.

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::dice::ensure_default_dice_expr;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub dice: DiceSettings,
    pub keywords: KeywordSettings,
    pub phonetic: PhoneticSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiceSettings {
    /// Always stored in canonical `d<N>` form after parsing.
    pub default_expr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSettings {
    pub max_results: usize,
    pub max_query_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneticSettings {
    #[serde(default)]
    pub remote_url: String,
    pub timeout_ms: u64,
    #[serde(default = "default_true")]
    pub use_bundled: bool,
}

impl PhoneticSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_true() -> bool {
    true
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.dice.default_expr = ensure_default_dice_expr(&s.dice.default_expr);
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(keywords.max_results);
    check_positive!(keywords.max_query_chars);
    check_positive!(phonetic.timeout_ms);

    let url = s.phonetic.remote_url.trim();
    if !url.is_empty() && !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(SettingsError::InvalidValue {
            field: "phonetic.remote_url".to_string(),
            reason: "must be an http(s) URL or empty".to_string(),
        });
    }

    Ok(())
}
