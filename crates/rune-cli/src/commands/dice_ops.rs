use std::process;

use rune_engine::dice::DiceMatchKind;
use rune_engine::Annotator;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn annotator(default: Option<&str>) -> Annotator {
    let annotator = Annotator::new();
    match default {
        Some(raw) => annotator.with_default_dice(raw),
        None => annotator,
    }
}

pub fn dice_cmd(text: &str, default: Option<&str>, json: bool) {
    let annotation = annotator(default).annotate(text);
    if json {
        let out = die!(serde_json::to_string_pretty(&annotation), "Error: {}");
        println!("{out}");
        return;
    }

    if annotation.dice.is_empty() {
        println!("(no dice)");
    }
    for m in &annotation.dice {
        let kind = match m.kind {
            DiceMatchKind::Command => "command",
            DiceMatchKind::Brace => "brace",
        };
        println!(
            "[{:>3},{:>3}) {:<7} {} -> {}",
            m.start, m.end, kind, m.source, m.normalized
        );
    }
    if annotation.hidden_roll {
        println!("hidden roll");
    }
}

pub fn hidden_cmd(text: &str) {
    let hidden = annotator(None).is_hidden_roll(text);
    println!("{hidden}");
    if !hidden {
        process::exit(1);
    }
}
