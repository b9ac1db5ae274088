//! Textual message CSV.
//!
//! One row per message with content, sentiment as one-hot flags. The message
//! field is always quoted; everything else is written verbatim.

use std::io::Write;
use std::path::Path;

use tracing::info;

use super::{create_output, ExportError};
use crate::analyzer::{classify, PolarityScorer, SentimentBin};
use crate::transcript::Message;

/// Column header of the textual CSV.
pub const TEXTUAL_HEADER: &str =
    "index,person,date,time,message,goodSentiment,neutralSentiment,badSentiment";

/// Counters for one textual export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextualSummary {
    /// Rows written (excluding the header)
    pub written: usize,
    /// Placeholder or empty messages skipped
    pub dropped: usize,
    pub good: usize,
    pub neutral: usize,
    pub bad: usize,
}

impl TextualSummary {
    fn record(&mut self, bin: SentimentBin) {
        self.written += 1;
        match bin {
            SentimentBin::Good => self.good += 1,
            SentimentBin::Neutral => self.neutral += 1,
            SentimentBin::Bad => self.bad += 1,
        }
    }
}

/// Make a message body safe for a single quoted CSV field.
///
/// Non-ASCII characters (emoji, accents) are dropped, newlines and tabs
/// become literal `\n` / `\t`, quotes are doubled.
pub fn sanitize_field(body: &str) -> String {
    let ascii: String = body.chars().filter(char::is_ascii).collect();
    let escaped = ascii
        .replace('\n', "\\n")
        .replace('\t', "\\t")
        .replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// Reverse [`sanitize_field`] (minus the dropped non-ASCII characters).
pub fn unsanitize_field(field: &str) -> String {
    let inner = field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field);
    unescape_controls(&inner.replace("\"\"", "\""))
}

/// Turn literal `\n` / `\t` back into newlines and tabs.
pub fn unescape_controls(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

/// Write the textual CSV for `messages`.
///
/// Messages that are empty or match a placeholder are skipped but keep
/// their index. A scorer failure aborts the export; rows written before it
/// stay in `writer`.
pub fn write_textual<W: Write>(
    writer: &mut W,
    messages: &[Message],
    scorer: &dyn PolarityScorer,
    placeholders: &[String],
) -> Result<TextualSummary, ExportError> {
    writeln!(writer, "{}", TEXTUAL_HEADER)?;

    let mut summary = TextualSummary::default();
    for message in messages {
        if message.is_placeholder(placeholders) {
            summary.dropped += 1;
            continue;
        }

        let field = sanitize_field(&message.body);
        let bin = classify(scorer, &field).map_err(|source| ExportError::Classifier {
            index: message.index,
            source,
        })?;
        let (good, neutral, bad) = bin.flags();

        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            message.index, message.person, message.date, message.time, field, good, neutral, bad
        )?;
        summary.record(bin);
    }

    Ok(summary)
}

/// Write the textual CSV to a file.
pub fn write_textual_file(
    path: &Path,
    messages: &[Message],
    scorer: &dyn PolarityScorer,
    placeholders: &[String],
) -> Result<TextualSummary, ExportError> {
    let mut writer = create_output(path)?;
    let summary = write_textual(&mut writer, messages, scorer, placeholders)?;
    writer.flush()?;

    info!(
        path = %path.display(),
        written = summary.written,
        dropped = summary.dropped,
        "wrote textual CSV"
    );
    Ok(summary)
}
