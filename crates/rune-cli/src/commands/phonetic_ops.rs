use std::process;

use rune_engine::phonetic::{
    FileSource, PhoneticProvider, PhoneticSource, PhoneticState, PinyinTable, Romanize,
};
use rune_engine::settings::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// A loaded provider: the custom table at `table`, or the configured
/// sources when `None`. Exits when a custom table cannot be read.
pub fn load_romanizer(table: Option<&str>) -> PhoneticProvider {
    match table {
        Some(path) => {
            let table: PinyinTable =
                die!(FileSource::new(path).load(), "Error loading {path}: {}");
            PhoneticProvider::preloaded(table)
        }
        None => {
            let provider = PhoneticProvider::from_settings(&settings().phonetic);
            if !provider.ensure_loaded() {
                eprintln!("Warning: pinyin data unavailable; phonetic tiers disabled");
            }
            provider
        }
    }
}

pub fn romanize_cmd(text: &str, table: Option<&str>) {
    let provider = load_romanizer(table);
    if provider.state() != PhoneticState::Loaded {
        process::exit(1);
    }
    match provider.romanize(text) {
        Some(forms) => {
            println!("initials: {}", forms.initials);
            println!("full:     {}", forms.full);
        }
        None => println!("(no Han characters)"),
    }
}

pub fn pinyin_validate(file: &str) {
    let table = die!(FileSource::new(file).load(), "Error: {}");
    println!("OK: {} characters", table.len());
}
