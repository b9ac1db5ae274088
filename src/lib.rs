//! Chat Poster - chat transcript conversion and statistics.
//!
//! Turns an exported chat transcript into three CSV tables (messages with
//! sentiment, emoji frequencies, link occurrences) and aggregates those
//! tables into the numbers shown on a conversation poster.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod export;
pub mod stats;
pub mod transcript;

pub use config::Config;
pub use transcript::{Message, Transcript};
