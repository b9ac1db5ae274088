//! Header line detection.
//!
//! A header looks like `<date>, <time> - <person>: <text>`. Detection is a
//! two-stage check: the part before the first `" - "` must read as a date,
//! then a `": "` must follow. The order matters; lines that only pass the
//! first stage are body text.

use super::datetime::{self, DateMode};

/// Separates the timestamp from the sender.
pub const HEADER_SEPARATOR: &str = " - ";

/// Separates the sender from the first line of the message.
pub const SENDER_SEPARATOR: &str = ": ";

/// Separates the date from the time inside the timestamp.
pub const DATE_SEPARATOR: &str = ", ";

/// Sender and timestamp of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub date: String,
    pub time: String,
    pub person: String,
}

/// How a single transcript line was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Starts a new message; `first_line` is the text after the sender.
    Header { header: Header, first_line: &'a str },
    /// Has a date-like prefix but no sender separator.
    FalsePositive,
    /// Continues the body of the open message.
    Body,
}

impl<'a> LineKind<'a> {
    /// Classify a raw line (without its line terminator).
    pub fn classify(line: &'a str, mode: DateMode) -> Self {
        let Some((prefix, rest)) = line.split_once(HEADER_SEPARATOR) else {
            return LineKind::Body;
        };

        if !datetime::is_date_expression(prefix, mode) {
            return LineKind::Body;
        }

        let Some((person, first_line)) = rest.split_once(SENDER_SEPARATOR) else {
            return LineKind::FalsePositive;
        };

        // Exports without a time component still carry a usable date
        let (date, time) = prefix.split_once(DATE_SEPARATOR).unwrap_or((prefix, ""));

        LineKind::Header {
            header: Header {
                date: date.to_string(),
                time: time.to_string(),
                person: person.to_string(),
            },
            first_line,
        }
    }
}
