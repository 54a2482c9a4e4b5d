use clap::{Parser, Subcommand};

use rune_cli::commands::{config_ops, dice_ops, keyword_ops, phonetic_ops};
use rune_engine::keyword::DEFAULT_MATCH_LIMIT;

#[derive(Parser)]
#[command(name = "runetool", about = "Rune annotation engine diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the dice expressions recognized in a message
    Dice {
        /// Message text
        text: String,
        /// Channel default dice (d<N> or <N>)
        #[arg(long)]
        default: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check whether a message is a hidden roll (exit status 1 if not)
    Hidden {
        /// Message text
        text: String,
    },
    /// Rank dictionary entries against a query
    Keywords {
        /// Keyword dictionary (JSON array)
        dict_file: String,
        /// Query text
        query: String,
        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_MATCH_LIMIT)]
        n: usize,
        /// Custom pinyin table (TOML) instead of the configured sources
        #[arg(long)]
        table: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show pinyin initials and full reading of a string
    Romanize {
        /// Text to romanize
        text: String,
        /// Custom pinyin table (TOML) instead of the configured sources
        #[arg(long)]
        table: Option<String>,
    },
    /// Validate a custom pinyin table file
    PinyinValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = std::env::var_os("RUNE_TRACE_DIR") {
        rune_engine::init_tracing(std::path::Path::new(&dir));
    }

    match cli.command {
        Command::Dice {
            text,
            default,
            json,
        } => dice_ops::dice_cmd(&text, default.as_deref(), json),
        Command::Hidden { text } => dice_ops::hidden_cmd(&text),
        Command::Keywords {
            dict_file,
            query,
            n,
            table,
            json,
        } => keyword_ops::keywords_cmd(&dict_file, &query, n, table.as_deref(), json),
        Command::Romanize { text, table } => phonetic_ops::romanize_cmd(&text, table.as_deref()),
        Command::PinyinValidate { file } => phonetic_ops::pinyin_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
