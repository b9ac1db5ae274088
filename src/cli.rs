//! Command line definition.
//!
//! Lives in the library so the man page generator can render it.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Directory the pipeline writes its CSV files into by default.
pub const DEFAULT_TEMP_DIR: &str = "temp-output";

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("CHATPOSTER_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CHATPOSTER_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "chatposter")]
#[command(version = VERSION)]
#[command(about = "Turn exported chat transcripts into CSV tables and poster statistics")]
#[command(
    long_about = "Turn exported chat transcripts into CSV tables and poster statistics.

Parses a flat transcript export once and writes:
  textual.csv   one row per message with sentiment flags
  emoji.csv     emoji frequencies (UTF-16 by default)
  links.csv     per-message link category counts

The stats command aggregates those files into stats.json and values.json.

EXAMPLES:
    chatposter convert -i chat.txt
    chatposter stats -t temp-output
    chatposter run -i chat.txt -t out
    chatposter emoji -i chat.txt -o emoji.csv --until 2021-06-30"
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_name = "LEVEL",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Transcript input and output directory.
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Exported chat transcript
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the CSV files (created if missing)
    #[arg(short, long, value_name = "TEMP", default_value = DEFAULT_TEMP_DIR)]
    pub temp: PathBuf,
}

/// Transcript input and a single output file.
#[derive(Args, Debug, Clone)]
pub struct EmitArgs {
    /// Exported chat transcript
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a transcript and write all three CSV files
    #[command(long_about = "Parse a transcript once and write textual.csv, emoji.csv and links.csv.

The output directory is created if it does not exist. Existing files are
overwritten.

EXAMPLES:
    chatposter convert -i chat.txt
    chatposter convert -i chat.txt -t out")]
    Convert(PipelineArgs),

    /// Write only the textual CSV
    Textual(EmitArgs),

    /// Write only the emoji CSV
    Emoji {
        #[command(flatten)]
        io: EmitArgs,

        /// Only count messages up to this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        until: Option<NaiveDate>,
    },

    /// Write only the link occurrence CSV
    Links(EmitArgs),

    /// Aggregate CSV files into stats.json and values.json
    Stats {
        /// Directory containing textual.csv and emoji.csv
        #[arg(short, long, value_name = "TEMP", default_value = DEFAULT_TEMP_DIR)]
        temp: PathBuf,

        /// Print the statistics as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Convert a transcript and aggregate the result
    Run(PipelineArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}
