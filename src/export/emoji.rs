//! Emoji frequency CSV.
//!
//! Tab separated, one row per distinct emoji, least frequent first. The file
//! is UTF-16 by default because the word cloud tooling that consumes it
//! expects that; UTF-8 can be selected in the config.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{create_output, ExportError};
use crate::analyzer::EmojiTally;
use crate::transcript::datetime::parse_date;
use crate::transcript::Message;

/// Column header of the emoji CSV.
pub const EMOJI_HEADER: &str = "emoji\tfrequency";

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Text encoding of the emoji CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-16 little endian with byte order mark
    #[default]
    Utf16,
    Utf8,
}

impl Encoding {
    /// Encode text for writing.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf16 => {
                let mut bytes = Vec::with_capacity(2 + text.len() * 2);
                bytes.extend_from_slice(&UTF16_LE_BOM);
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                bytes
            }
        }
    }

    /// Decode bytes written by either encoding, detected by byte order mark.
    ///
    /// Input without a BOM is read as UTF-8. Returns `None` for invalid data.
    pub fn decode(bytes: &[u8]) -> Option<String> {
        if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
            return decode_utf16(rest, u16::from_le_bytes);
        }
        if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
            return decode_utf16(rest, u16::from_be_bytes);
        }
        let rest = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
        String::from_utf8(rest.to_vec()).ok()
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

/// Count emoji in every message body.
pub fn tally_messages(messages: &[Message]) -> EmojiTally {
    EmojiTally::from_texts(messages.iter().map(|m| m.body.as_str()))
}

/// Count emoji up to and including `cutoff`.
///
/// Stops at the first message dated after the cutoff; later messages are
/// not looked at even if their dates go backwards.
pub fn tally_messages_until(
    messages: &[Message],
    cutoff: NaiveDate,
    date_format: &str,
) -> Result<EmojiTally, ExportError> {
    let mut tally = EmojiTally::new();

    for message in messages {
        let date =
            parse_date(&message.date, date_format).ok_or_else(|| ExportError::InvalidDate {
                index: message.index,
                date: message.date.clone(),
                format: date_format.to_string(),
            })?;

        if date > cutoff {
            break;
        }
        tally = tally.with_text(&message.body);
    }

    Ok(tally)
}

/// Render the emoji table as text.
pub fn render_emoji_table(tally: &EmojiTally) -> String {
    let mut out = String::new();
    out.push_str(EMOJI_HEADER);
    out.push('\n');
    for (emoji, count) in tally.ascending() {
        out.push(emoji);
        out.push('\t');
        out.push_str(&count.to_string());
        out.push('\n');
    }
    out
}

/// Write the emoji CSV.
pub fn write_emoji<W: Write>(
    writer: &mut W,
    tally: &EmojiTally,
    encoding: Encoding,
) -> Result<(), ExportError> {
    writer.write_all(&encoding.encode(&render_emoji_table(tally)))?;
    Ok(())
}

/// Write the emoji CSV to a file.
pub fn write_emoji_file(
    path: &Path,
    tally: &EmojiTally,
    encoding: Encoding,
) -> Result<(), ExportError> {
    let mut writer = create_output(path)?;
    write_emoji(&mut writer, tally, encoding)?;
    writer.flush()?;

    info!(path = %path.display(), distinct = tally.len(), "wrote emoji CSV");
    Ok(())
}
