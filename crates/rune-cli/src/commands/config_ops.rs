use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", rune_engine::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        rune_engine::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: dice.default_expr={}, keywords.max_results={}, phonetic.timeout_ms={}",
        s.dice.default_expr, s.keywords.max_results, s.phonetic.timeout_ms
    );
}
