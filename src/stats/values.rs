//! Poster template values.
//!
//! A flat, ordered name → value map (`Name1`, `FullName1`, ..., `Messages`,
//! `Years`) that a template renderer substitutes into the poster.

use chrono::{Datelike, NaiveDate};
use serde::ser::{Serialize, Serializer};
use tracing::warn;

use super::{StatsError, TextualRecord};
use crate::transcript::datetime::parse_date;

/// Months past the last whole year after which the span is rounded up.
const YEAR_ROUND_UP_MONTHS: u32 = 5;

/// Ordered template values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosterValues {
    entries: Vec<(String, String)>,
}

impl PosterValues {
    /// Compute values from textual records.
    pub fn from_records(
        records: &[TextualRecord],
        date_format: &str,
        thousands_separator: &str,
    ) -> Result<Self, StatsError> {
        if records.is_empty() {
            return Err(StatsError::Empty);
        }

        let mut values = Self::default();

        for (i, person) in super::people(records).into_iter().enumerate() {
            let first_name = person.split(' ').next().unwrap_or(person);
            let full_name: String = person.chars().filter(|c| *c != ' ').collect();
            values.insert(format!("Name{}", i + 1), first_name.to_string());
            values.insert(format!("FullName{}", i + 1), full_name);
        }

        values.insert(
            "Messages".to_string(),
            format_count(records.len(), thousands_separator),
        );

        let (first, last) = date_range(records, date_format)?;
        values.insert("Years".to_string(), year_span(first, last).to_string());

        Ok(values)
    }

    fn insert(&mut self, key: String, value: String) {
        self.entries.push((key, value));
    }

    /// Look up a value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl Serialize for PosterValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

/// Format a count with digit grouping (`12345` → `12,345`).
pub fn format_count(value: usize, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Earliest and latest parseable record dates.
pub fn date_range(
    records: &[TextualRecord],
    date_format: &str,
) -> Result<(NaiveDate, NaiveDate), StatsError> {
    let mut range: Option<(NaiveDate, NaiveDate)> = None;
    let mut skipped = 0usize;

    for record in records {
        let Some(date) = parse_date(&record.date, date_format) else {
            skipped += 1;
            continue;
        };
        range = Some(match range {
            Some((lo, hi)) => (lo.min(date), hi.max(date)),
            None => (date, date),
        });
    }

    if skipped > 0 {
        warn!(skipped, date_format, "records with unparseable dates ignored");
    }

    range.ok_or_else(|| StatsError::NoValidDates {
        format: date_format.to_string(),
    })
}

/// Whole years between two dates, rounded up from five remaining months.
pub fn year_span(first: NaiveDate, last: NaiveDate) -> u32 {
    let (first, last) = if first <= last {
        (first, last)
    } else {
        (last, first)
    };

    let mut months = (last.year() - first.year()) * 12 + last.month() as i32 - first.month() as i32;
    if last.day() < first.day() {
        months -= 1;
    }
    let months = months.max(0) as u32;

    let years = months / 12;
    if months % 12 >= YEAR_ROUND_UP_MONTHS {
        years + 1
    } else {
        years
    }
}
