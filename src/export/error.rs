//! CSV export errors.

use std::path::PathBuf;

use crate::analyzer::ScorerError;
use crate::transcript::TranscriptError;

/// Errors that can occur while emitting CSV files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("Could not open output file {path} for writing: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("Sentiment scoring failed for message {index}: {source}")]
    Classifier {
        index: u32,
        #[source]
        source: ScorerError,
    },

    #[error("Message {index} has date '{date}' that does not match format '{format}'")]
    InvalidDate {
        index: u32,
        date: String,
        format: String,
    },
}
