//! CSV emitters for parsed transcripts.
//!
//! Three independent outputs are produced from the same message list:
//!
//! - [`textual`] - one row per message with content plus sentiment flags
//! - [`emoji`] - emoji frequency table
//! - [`links`] - per-message link category counts
//!
//! Each emitter owns its output file. [`write_all`] runs all three in
//! parallel since they only share the immutable message list.

mod emoji;
mod error;
mod links;
mod textual;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub use emoji::{
    render_emoji_table, tally_messages, tally_messages_until, write_emoji, write_emoji_file,
    Encoding, EMOJI_HEADER,
};
pub use error::ExportError;
pub use links::{links_header, write_links, write_links_file};
pub use textual::{
    sanitize_field, unescape_controls, unsanitize_field, write_textual, write_textual_file,
    TextualSummary, TEXTUAL_HEADER,
};

use crate::analyzer::PolarityScorer;
use crate::config::Config;
use crate::transcript::Message;

/// File name of the textual CSV inside an output directory.
pub const TEXTUAL_FILE: &str = "textual.csv";
/// File name of the emoji CSV inside an output directory.
pub const EMOJI_FILE: &str = "emoji.csv";
/// File name of the link occurrence CSV inside an output directory.
pub const LINKS_FILE: &str = "links.csv";

/// Open an output file for writing, truncating it.
pub(crate) fn create_output(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::OutputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Locations of the three CSV files in an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub textual: PathBuf,
    pub emoji: PathBuf,
    pub links: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            textual: dir.join(TEXTUAL_FILE),
            emoji: dir.join(EMOJI_FILE),
            links: dir.join(LINKS_FILE),
        }
    }
}

/// Outcome of writing all three CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub textual: TextualSummary,
    /// Distinct emoji found
    pub distinct_emoji: usize,
    /// Rows in the link occurrence CSV
    pub link_rows: usize,
}

/// Write the textual, emoji and link CSV files.
///
/// The emitters run in parallel; the first error in textual, emoji, links
/// order is returned. Files of emitters that succeeded are left in place.
pub fn write_all(
    paths: &OutputPaths,
    messages: &[Message],
    scorer: &dyn PolarityScorer,
    config: &Config,
) -> Result<ExportSummary, ExportError> {
    let (textual, (emoji, links)) = rayon::join(
        || {
            write_textual_file(
                &paths.textual,
                messages,
                scorer,
                &config.transcript.placeholders,
            )
        },
        || {
            rayon::join(
                || {
                    let tally = tally_messages(messages);
                    write_emoji_file(&paths.emoji, &tally, config.emoji.encoding)
                        .map(|()| tally.len())
                },
                || write_links_file(&paths.links, messages, &config.links),
            )
        },
    );

    Ok(ExportSummary {
        textual: textual?,
        distinct_emoji: emoji?,
        link_rows: links?,
    })
}
