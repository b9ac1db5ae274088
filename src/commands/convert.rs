//! Convert command handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};

use chatposter::analyzer::LexiconScorer;
use chatposter::cli::PipelineArgs;
use chatposter::export::{write_all, ExportSummary, OutputPaths};
use chatposter::{Config, Transcript};

/// Parse the transcript once and write all three CSV files.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PipelineArgs, config: &Config) -> Result<ExportSummary> {
    let transcript = Transcript::parse(&args.input, config.transcript.date_mode)?;

    fs::create_dir_all(&args.temp).with_context(|| {
        format!("Could not create output directory {}", args.temp.display())
    })?;

    let paths = OutputPaths::in_dir(&args.temp);
    let summary = write_all(&paths, &transcript.messages, &LexiconScorer::new(), config)?;

    println!("{}", parse_line(&args.input, &transcript));
    println!(
        "Wrote {} ({} rows, {} without content)",
        paths.textual.display(),
        summary.textual.written,
        summary.textual.dropped
    );
    println!(
        "Wrote {} ({} distinct emoji)",
        paths.emoji.display(),
        summary.distinct_emoji
    );
    println!(
        "Wrote {} ({} rows)",
        paths.links.display(),
        summary.link_rows
    );

    Ok(summary)
}

fn parse_line(input: &Path, transcript: &Transcript) -> String {
    let size = fs::metadata(input)
        .map(|m| format!(" ({})", format_size(m.len(), DECIMAL)))
        .unwrap_or_default();

    format!(
        "Parsed {}{}: {} messages from {} people",
        input.display(),
        size,
        transcript.messages.len(),
        transcript.people().len()
    )
}
