//! Message content analysis.
//!
//! Everything here works on a single message body at a time and knows
//! nothing about files or CSV layout:
//!
//! - [`normalize`] - noise stripping for scoring and word counts
//! - [`sentiment`] - polarity scoring and good/neutral/bad binning
//! - [`emoji`] - emoji detection and tallies
//! - [`links`] - link category counting

pub mod emoji;
pub mod links;
pub mod normalize;
pub mod sentiment;

pub use emoji::{is_emoji, EmojiTally};
pub use links::{default_categories, LinkCategory, LinkCounts};
pub use normalize::normalize;
pub use sentiment::{classify, LexiconScorer, PolarityScorer, ScorerError, SentimentBin};
