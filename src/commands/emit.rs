//! Single-emitter command handlers

use anyhow::Result;
use chrono::NaiveDate;

use chatposter::analyzer::LexiconScorer;
use chatposter::cli::EmitArgs;
use chatposter::export::{
    tally_messages, tally_messages_until, write_emoji_file, write_links_file, write_textual_file,
};
use chatposter::{Config, Transcript};

#[cfg(not(tarpaulin_include))]
pub fn handle_textual(args: &EmitArgs, config: &Config) -> Result<()> {
    let transcript = Transcript::parse(&args.input, config.transcript.date_mode)?;
    let summary = write_textual_file(
        &args.output,
        &transcript.messages,
        &LexiconScorer::new(),
        &config.transcript.placeholders,
    )?;

    println!(
        "Wrote {} ({} rows: {} good, {} neutral, {} bad)",
        args.output.display(),
        summary.written,
        summary.good,
        summary.neutral,
        summary.bad
    );
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_emoji(args: &EmitArgs, until: Option<NaiveDate>, config: &Config) -> Result<()> {
    let transcript = Transcript::parse(&args.input, config.transcript.date_mode)?;
    let tally = match until {
        Some(cutoff) => {
            tally_messages_until(&transcript.messages, cutoff, &config.transcript.date_format)?
        }
        None => tally_messages(&transcript.messages),
    };
    write_emoji_file(&args.output, &tally, config.emoji.encoding)?;

    println!(
        "Wrote {} ({} distinct emoji, {} total)",
        args.output.display(),
        tally.len(),
        tally.total()
    );
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_links(args: &EmitArgs, config: &Config) -> Result<()> {
    let transcript = Transcript::parse(&args.input, config.transcript.date_mode)?;
    let rows = write_links_file(&args.output, &transcript.messages, &config.links)?;

    println!("Wrote {} ({} rows)", args.output.display(), rows);
    Ok(())
}
