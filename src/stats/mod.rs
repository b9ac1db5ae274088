//! Conversation statistics from the emitted CSV files.
//!
//! Reads `textual.csv` and `emoji.csv` back from an output directory and
//! aggregates them into two JSON reports:
//!
//! - `stats.json` ([`ChatStats`]) - hourly activity, sentiment, people, words, emoji
//! - `values.json` ([`PosterValues`]) - flat values for the poster template

mod values;
mod words;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use values::{date_range, format_count, year_span, PosterValues};
pub use words::{WordCount, WordCounter};

use crate::analyzer::EmojiTally;
use crate::config::Config;
use crate::export::{Encoding, EMOJI_FILE, EMOJI_HEADER, TEXTUAL_FILE};
use crate::transcript::datetime::parse_time;

/// File name of the statistics report inside an output directory.
pub const STATS_FILE: &str = "stats.json";
/// File name of the poster values inside an output directory.
pub const VALUES_FILE: &str = "values.json";

const HOURS_PER_DAY: usize = 24;

/// Errors that can occur while aggregating statistics.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is neither UTF-8 nor UTF-16 text")]
    Encoding { path: PathBuf },

    #[error("Malformed emoji row {line} in {path}: '{row}'")]
    EmojiRow {
        path: PathBuf,
        line: usize,
        row: String,
    },

    #[error("No messages to aggregate")]
    Empty,

    #[error("No message date matches format '{format}'")]
    NoValidDates { format: String },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the textual CSV.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextualRecord {
    pub index: u32,
    pub person: String,
    pub date: String,
    pub time: String,
    pub message: String,
    pub good_sentiment: u8,
    pub neutral_sentiment: u8,
    pub bad_sentiment: u8,
}

/// Read textual CSV rows from any reader.
pub fn read_textual_from<R: Read>(reader: R) -> Result<Vec<TextualRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// Read a textual CSV file.
pub fn read_textual(path: &Path) -> Result<Vec<TextualRecord>, StatsError> {
    let file = File::open(path).map_err(|source| StatsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_textual_from(BufReader::new(file)).map_err(|source| StatsError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an emoji table. On failure returns the 1-based line and its text.
pub fn parse_emoji_table(text: &str) -> Result<EmojiTally, (usize, String)> {
    let mut counts = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.is_empty() || (i == 0 && line == EMOJI_HEADER) {
            continue;
        }
        let parsed = line.split_once('\t').and_then(|(emoji, count)| {
            let mut chars = emoji.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Some((c, count.trim().parse::<usize>().ok()?))
        });
        match parsed {
            Some(entry) => counts.push(entry),
            None => return Err((i + 1, line.to_string())),
        }
    }

    Ok(EmojiTally::from_counts(counts))
}

/// Read an emoji CSV file in either encoding.
pub fn read_emoji_file(path: &Path) -> Result<EmojiTally, StatsError> {
    let bytes = fs::read(path).map_err(|source| StatsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = Encoding::decode(&bytes).ok_or_else(|| StatsError::Encoding {
        path: path.to_path_buf(),
    })?;
    parse_emoji_table(&text).map_err(|(line, row)| StatsError::EmojiRow {
        path: path.to_path_buf(),
        line,
        row,
    })
}

/// Distinct people in first-appearance order.
pub fn people(records: &[TextualRecord]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for record in records {
        if !seen.contains(&record.person.as_str()) {
            seen.push(&record.person);
        }
    }
    seen
}

/// Activity in one hour of the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub messages: usize,
    pub good: usize,
    pub neutral: usize,
    pub bad: usize,
}

/// Per-person activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStats {
    pub name: String,
    pub messages: usize,
    /// Share of all messages, 0.0 to 1.0
    pub proportion: f64,
    pub top_words: Vec<WordCount>,
}

/// Sentiment totals and shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentTotals {
    pub good: usize,
    pub neutral: usize,
    pub bad: usize,
    pub positive_share: f64,
    pub neutral_share: f64,
    pub negative_share: f64,
}

impl SentimentTotals {
    fn from_records(records: &[TextualRecord]) -> Self {
        let mut totals = Self::default();
        for record in records {
            totals.good += record.good_sentiment as usize;
            totals.neutral += record.neutral_sentiment as usize;
            totals.bad += record.bad_sentiment as usize;
        }

        let sum = (totals.good + totals.neutral + totals.bad) as f64;
        if sum > 0.0 {
            totals.positive_share = totals.good as f64 / sum;
            totals.neutral_share = totals.neutral as f64 / sum;
            totals.negative_share = totals.bad as f64 / sum;
        }
        totals
    }
}

/// An emoji and how often it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

/// Aggregated conversation statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStats {
    pub messages: usize,
    /// ISO date of the earliest message
    pub first_date: String,
    /// ISO date of the latest message
    pub last_date: String,
    pub years: u32,
    pub people: Vec<PersonStats>,
    /// Always 24 entries, hour 0 first
    pub hours: Vec<HourBucket>,
    pub sentiment: SentimentTotals,
    pub top_emoji: Vec<EmojiCount>,
    pub total_emoji: usize,
}

impl ChatStats {
    /// Aggregate textual rows and the emoji tally.
    pub fn compute(
        records: &[TextualRecord],
        emoji: &EmojiTally,
        config: &Config,
    ) -> Result<Self, StatsError> {
        if records.is_empty() {
            return Err(StatsError::Empty);
        }

        let (first, last) = date_range(records, &config.transcript.date_format)?;

        Ok(Self {
            messages: records.len(),
            first_date: first.to_string(),
            last_date: last.to_string(),
            years: year_span(first, last),
            people: person_stats(records, config),
            hours: hourly(records),
            sentiment: SentimentTotals::from_records(records),
            top_emoji: emoji
                .top(config.stats.top_emoji)
                .into_iter()
                .map(|(c, count)| EmojiCount {
                    emoji: c.to_string(),
                    count,
                })
                .collect(),
            total_emoji: emoji.total(),
        })
    }

    /// The person with the most messages (first in order on ties).
    pub fn most_active(&self) -> Option<&PersonStats> {
        self.people
            .iter()
            .rev()
            .max_by_key(|p| p.messages)
    }
}

fn person_stats(records: &[TextualRecord], config: &Config) -> Vec<PersonStats> {
    let total = records.len() as f64;

    people(records)
        .into_iter()
        .map(|name| {
            let mut counter = WordCounter::new(&config.stats.stopwords);
            let mut messages = 0;
            for record in records.iter().filter(|r| r.person == name) {
                counter.add(&record.message);
                messages += 1;
            }
            PersonStats {
                name: name.to_string(),
                messages,
                proportion: messages as f64 / total,
                top_words: counter.top(config.stats.top_words),
            }
        })
        .collect()
}

fn hourly(records: &[TextualRecord]) -> Vec<HourBucket> {
    let mut hours: Vec<HourBucket> = (0..HOURS_PER_DAY as u32)
        .map(|hour| HourBucket {
            hour,
            ..HourBucket::default()
        })
        .collect();

    let mut skipped = 0usize;
    for record in records {
        let Some(time) = parse_time(&record.time) else {
            skipped += 1;
            continue;
        };
        let bucket = &mut hours[time.hour() as usize];
        bucket.messages += 1;
        bucket.good += record.good_sentiment as usize;
        bucket.neutral += record.neutral_sentiment as usize;
        bucket.bad += record.bad_sentiment as usize;
    }

    if skipped > 0 {
        warn!(skipped, "records with unparseable times left out of hourly stats");
    }
    hours
}

/// Both reports for one output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    pub stats: ChatStats,
    pub values: PosterValues,
}

impl Reports {
    /// Aggregate the CSV files in `dir`.
    pub fn from_dir(dir: &Path, config: &Config) -> Result<Self, StatsError> {
        let records = read_textual(&dir.join(TEXTUAL_FILE))?;
        let emoji = read_emoji_file(&dir.join(EMOJI_FILE))?;
        Self::compute(&records, &emoji, config)
    }

    pub fn compute(
        records: &[TextualRecord],
        emoji: &EmojiTally,
        config: &Config,
    ) -> Result<Self, StatsError> {
        Ok(Self {
            stats: ChatStats::compute(records, emoji, config)?,
            values: PosterValues::from_records(
                records,
                &config.transcript.date_format,
                &config.stats.thousands_separator,
            )?,
        })
    }

    /// Write `stats.json` and `values.json` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<(), StatsError> {
        write_json(&dir.join(STATS_FILE), &self.stats)?;
        write_json(&dir.join(VALUES_FILE), &self.values)?;

        info!(dir = %dir.display(), "wrote statistics reports");
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StatsError> {
    let io_err = |source| StatsError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
