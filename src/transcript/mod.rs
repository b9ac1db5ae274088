//! Flat chat transcript parsing.
//!
//! An exported transcript is a sequence of lines where each message starts
//! with a header (`<date>, <time> - <person>: <text>`) and may continue over
//! any number of following lines. [`MessageParser`] is a single-pass state
//! machine that rebuilds logical messages from those lines:
//!
//! - **No message open**: body lines are discarded (transcripts start with a
//!   header, anything before it is export noise)
//! - **Message open**: body lines are appended until the next header, which
//!   flushes the open message and starts a new one
//!
//! After the last line the open message is flushed once more. Every header
//! consumes an index, even if its message is later dropped by an emitter.

pub mod datetime;
mod header;

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

pub use datetime::DateMode;
pub use header::{Header, LineKind, DATE_SEPARATOR, HEADER_SEPARATOR, SENDER_SEPARATOR};

/// Errors that can occur while reading a transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Could not open transcript {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read transcript line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// One logical chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// 1-based position among all recognized headers
    pub index: u32,
    pub person: String,
    pub date: String,
    pub time: String,
    /// Message text; continuation lines are joined with `\n`
    pub body: String,
}

impl Message {
    /// Whether the message carries no content worth tabulating.
    ///
    /// Empty bodies and export placeholders (e.g. `<Media omitted>`) match.
    pub fn is_placeholder(&self, placeholders: &[String]) -> bool {
        self.body.is_empty() || placeholders.iter().any(|p| *p == self.body)
    }
}

/// Counters collected while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Header lines recognized (equals the last assigned index)
    pub headers: u32,
    /// Date-like lines without a sender, kept as body text
    pub false_positives: usize,
    /// Lines seen before the first header
    pub discarded_lines: usize,
}

/// Line-by-line message reconstruction state machine.
#[derive(Debug)]
pub struct MessageParser {
    date_mode: DateMode,
    pending: Option<Message>,
    stats: ParseStats,
}

impl MessageParser {
    /// Create a parser in the no-message state.
    pub fn new(date_mode: DateMode) -> Self {
        Self {
            date_mode,
            pending: None,
            stats: ParseStats::default(),
        }
    }

    /// Feed one line (without its terminator).
    ///
    /// Returns the previous message when this line starts a new one.
    pub fn push_line(&mut self, line: &str) -> Option<Message> {
        match LineKind::classify(line, self.date_mode) {
            LineKind::Header { header, first_line } => {
                self.stats.headers += 1;
                let next = Message {
                    index: self.stats.headers,
                    person: header.person,
                    date: header.date,
                    time: header.time,
                    body: first_line.to_string(),
                };
                self.pending.replace(next)
            }
            LineKind::FalsePositive => {
                self.stats.false_positives += 1;
                debug!(line, "date-like line without sender, treating as body");
                self.append(line);
                None
            }
            LineKind::Body => {
                self.append(line);
                None
            }
        }
    }

    /// Flush the open message at end of input.
    pub fn finish(&mut self) -> Option<Message> {
        self.pending.take()
    }

    /// Counters gathered so far.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    fn append(&mut self, line: &str) {
        match self.pending.as_mut() {
            Some(message) => {
                message.body.push('\n');
                message.body.push_str(line);
            }
            None => {
                self.stats.discarded_lines += 1;
                debug!(line, "discarding line before first header");
            }
        }
    }
}

/// A fully parsed transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub messages: Vec<Message>,
    pub stats: ParseStats,
}

impl Transcript {
    /// Parse a transcript file.
    ///
    /// The file is read to the end and closed before this returns.
    pub fn parse<P: AsRef<Path>>(path: P, date_mode: DateMode) -> Result<Self, TranscriptError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| TranscriptError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_reader(BufReader::new(file), date_mode)
    }

    /// Parse a transcript from a buffered reader.
    pub fn parse_reader<R: BufRead>(reader: R, date_mode: DateMode) -> Result<Self, TranscriptError> {
        let mut parser = MessageParser::new(date_mode);
        let mut messages = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|source| TranscriptError::Read {
                line: line_num + 1,
                source,
            })?;

            // Some exports start with a byte order mark
            let line = if line_num == 0 {
                line.trim_start_matches('\u{feff}')
            } else {
                line.as_str()
            };

            if let Some(message) = parser.push_line(line) {
                messages.push(message);
            }
        }

        if let Some(message) = parser.finish() {
            messages.push(message);
        }

        Ok(Self {
            messages,
            stats: parser.stats(),
        })
    }

    /// Parse from a string.
    pub fn parse_str(content: &str, date_mode: DateMode) -> Self {
        let mut parser = MessageParser::new(date_mode);
        let mut messages: Vec<Message> = content
            .trim_start_matches('\u{feff}')
            .lines()
            .filter_map(|line| parser.push_line(line))
            .collect();

        messages.extend(parser.finish());

        Self {
            messages,
            stats: parser.stats(),
        }
    }

    /// Distinct senders in order of first appearance.
    pub fn people(&self) -> Vec<&str> {
        let mut people: Vec<&str> = Vec::new();
        for message in &self.messages {
            if !people.contains(&message.person.as_str()) {
                people.push(&message.person);
            }
        }
        people
    }
}
