//! Link occurrence CSV.
//!
//! One row per message, placeholders included, with one count column per
//! configured link category.

use std::io::Write;
use std::path::Path;

use tracing::info;

use super::{create_output, ExportError};
use crate::analyzer::{LinkCategory, LinkCounts};
use crate::transcript::Message;

/// Header row for the given categories.
pub fn links_header(categories: &[LinkCategory]) -> String {
    let mut header = String::from("index,person,date,time");
    for category in categories {
        header.push(',');
        header.push_str(&category.name);
    }
    header
}

/// Write the link occurrence CSV. Returns the number of rows written.
pub fn write_links<W: Write>(
    writer: &mut W,
    messages: &[Message],
    categories: &[LinkCategory],
) -> Result<usize, ExportError> {
    writeln!(writer, "{}", links_header(categories))?;

    for message in messages {
        let counts = LinkCounts::count(&message.body, categories);
        write!(
            writer,
            "{},{},{},{}",
            message.index, message.person, message.date, message.time
        )?;
        for count in counts.as_slice() {
            write!(writer, ",{}", count)?;
        }
        writeln!(writer)?;
    }

    Ok(messages.len())
}

/// Write the link occurrence CSV to a file.
pub fn write_links_file(
    path: &Path,
    messages: &[Message],
    categories: &[LinkCategory],
) -> Result<usize, ExportError> {
    let mut writer = create_output(path)?;
    let rows = write_links(&mut writer, messages, categories)?;
    writer.flush()?;

    info!(path = %path.display(), rows, "wrote link occurrence CSV");
    Ok(rows)
}
