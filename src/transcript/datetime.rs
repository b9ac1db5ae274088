//! Date/time expression recognition for header prefixes.
//!
//! Chat exports write the message timestamp in whatever format the phone's
//! locale dictates (`2021-01-05, 14:30`, `1/5/21, 2:30 PM`, `05.01.21, 14:30`).
//! Rather than committing to one format, the prefix is tokenized and every
//! token is checked against the shapes a date parser would accept.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// How strictly a header prefix must look like a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    /// Every token of the prefix must be part of a date or time.
    #[default]
    Strict,
    /// Unknown tokens are skipped as long as one date/time token is present.
    Fuzzy,
}

/// Numeric date layouts tried for tokens like `2021-01-05` or `05/01/2021`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y", "%m.%d.%Y",
    "%d-%m-%Y", "%m-%d-%Y", "%d/%m/%y", "%m/%d/%y", "%d.%m.%y", "%d-%m-%y",
];

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%H:%M:%S%.f"];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "mon", "tue",
    "tues", "wed", "thu", "thur", "thurs", "fri", "sat", "sun",
];

/// Meridiem spellings with trailing dots removed. Spanish exports split
/// them over two tokens (`p. m.`), hence the lone `m`.
const MERIDIEMS: &[&str] = &["am", "pm", "a.m", "p.m", "a", "p", "m"];

/// Zone abbreviations that may trail a timestamp.
const ZONES: &[&str] = &[
    "utc", "gmt", "z", "bst", "cet", "cest", "eet", "eest", "wet", "west", "msk", "ist", "jst",
    "kst", "aest", "aedt", "est", "edt", "cst", "cdt", "mst", "mdt", "pst", "pdt",
];

/// Filler words a date parser skips between components ("Jan 5 at 14:30").
const CONNECTORS: &[&str] = &["at", "on", "of", "and", "-", "/"];

/// What a single prefix token was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Date,
    Time,
    Month,
    Weekday,
    Number,
    Meridiem,
    Zone,
    Connector,
    Unknown,
}

impl Token {
    /// Whether the token carries date or time information on its own.
    fn is_temporal(self) -> bool {
        matches!(
            self,
            Token::Date | Token::Time | Token::Month | Token::Weekday | Token::Number
        )
    }
}

/// Returns true when `text` reads as a date/time expression.
pub fn is_date_expression(text: &str, mode: DateMode) -> bool {
    let tokens: Vec<Token> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(classify_token)
        .collect();

    if !tokens.iter().any(|t| t.is_temporal()) {
        return false;
    }

    match mode {
        DateMode::Strict => tokens.iter().all(|t| *t != Token::Unknown),
        DateMode::Fuzzy => true,
    }
}

/// Parses a message date with an explicit chrono format.
pub fn parse_date(date: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), format).ok()
}

/// Parses a message time of day (`14:30`, `14:30:05`, `2:30 PM`).
///
/// WhatsApp puts a narrow no-break space before the meridiem on newer
/// Android builds; it is treated like a regular space.
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    let cleaned = time
        .replace(['\u{202f}', '\u{a0}'], " ")
        .to_lowercase()
        .replace("a. m.", "am")
        .replace("p. m.", "pm")
        .replace("a.m.", "am")
        .replace("p.m.", "pm");
    let cleaned = cleaned.trim();

    for fmt in [
        "%H:%M",
        "%H:%M:%S",
        "%H:%M:%S%.f",
        "%I:%M %p",
        "%I:%M:%S %p",
        "%I:%M%p",
    ] {
        if let Ok(parsed) = NaiveTime::parse_from_str(cleaned, fmt) {
            return Some(parsed);
        }
    }
    None
}

fn classify_token(token: &str) -> Token {
    let lower = token.to_lowercase();
    let word = lower.trim_end_matches('.');

    if CONNECTORS.contains(&lower.as_str()) {
        return Token::Connector;
    }
    if MERIDIEMS.contains(&word) {
        return Token::Meridiem;
    }
    if is_zone(word) {
        return Token::Zone;
    }
    if MONTHS.contains(&word) {
        return Token::Month;
    }
    if WEEKDAYS.contains(&word) {
        return Token::Weekday;
    }
    if is_number(word) {
        return Token::Number;
    }
    if is_time(word) {
        return Token::Time;
    }
    if is_numeric_date(word) || is_iso_datetime(word) {
        return Token::Date;
    }
    Token::Unknown
}

/// Plain numbers (day, year) and ordinals like `5th`.
fn is_number(token: &str) -> bool {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token);

    !digits.is_empty() && digits.len() <= 4 && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_time(token: &str) -> bool {
    if !token.contains(':') {
        return false;
    }
    // "2:30pm" carries its meridiem inline
    let clock = token
        .strip_suffix("am")
        .or_else(|| token.strip_suffix("pm"))
        .unwrap_or(token);

    TIME_FORMATS
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(clock, fmt).is_ok())
}

/// Zone names (`UTC`) and numeric offsets (`+01:00`, `-0500`).
fn is_zone(token: &str) -> bool {
    if ZONES.contains(&token) {
        return true;
    }
    let offset = token
        .strip_prefix("utc")
        .or_else(|| token.strip_prefix("gmt"))
        .unwrap_or(token);
    let Some(digits) = offset.strip_prefix(['+', '-']) else {
        return false;
    };
    let digits = digits.replace(':', "");
    (1..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// `2021-01-05t14:30`, optionally with a trailing `z`.
fn is_iso_datetime(token: &str) -> bool {
    let Some((date, time)) = token.split_once('t') else {
        return false;
    };
    let time = time.strip_suffix('z').unwrap_or(time);
    is_numeric_date(date) && is_time(time)
}

fn is_numeric_date(token: &str) -> bool {
    if !token.contains(['/', '-', '.']) {
        return false;
    }
    if DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(token, fmt).is_ok())
    {
        return true;
    }

    // Day and month without a year ("5/1")
    let parts: Vec<&str> = token.split(['/', '-', '.']).collect();
    if let [a, b] = parts.as_slice() {
        if let (Ok(a), Ok(b)) = (a.parse::<u32>(), b.parse::<u32>()) {
            return NaiveDate::from_ymd_opt(2000, a, b).is_some()
                || NaiveDate::from_ymd_opt(2000, b, a).is_some();
        }
    }
    false
}
