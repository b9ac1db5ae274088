//! Stats command handler

use std::path::Path;

use anyhow::{Context, Result};

use chatposter::stats::{ChatStats, Reports, STATS_FILE, VALUES_FILE};
use chatposter::Config;

/// Aggregate the CSV files in `temp` and write the JSON reports next to them.
#[cfg(not(tarpaulin_include))]
pub fn handle(temp: &Path, json: bool, config: &Config) -> Result<()> {
    let reports = Reports::from_dir(temp, config)
        .with_context(|| format!("Failed to aggregate {}", temp.display()))?;
    reports.write_to(temp)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports.stats)?);
    } else {
        print!("{}", render_summary(&reports.stats));
        println!(
            "Wrote {} and {}",
            temp.join(STATS_FILE).display(),
            temp.join(VALUES_FILE).display()
        );
    }
    Ok(())
}

fn percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// Human readable overview of the statistics.
pub fn render_summary(stats: &ChatStats) -> String {
    let mut out = format!(
        "{} messages between {} and {} ({} years)\n",
        stats.messages, stats.first_date, stats.last_date, stats.years
    );

    let width = stats.people.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    for person in &stats.people {
        out.push_str(&format!(
            "  {:<width$}  {} ({})\n",
            person.name,
            person.messages,
            percent(person.proportion),
            width = width
        ));
    }

    out.push_str(&format!(
        "Sentiment: {} positive, {} neutral, {} negative\n",
        percent(stats.sentiment.positive_share),
        percent(stats.sentiment.neutral_share),
        percent(stats.sentiment.negative_share)
    ));

    if let Some(busiest) = stats
        .hours
        .iter()
        .filter(|h| h.messages > 0)
        .max_by_key(|h| (h.messages, std::cmp::Reverse(h.hour)))
    {
        out.push_str(&format!(
            "Busiest hour: {:02}:00 ({} messages)\n",
            busiest.hour, busiest.messages
        ));
    }

    if !stats.top_emoji.is_empty() {
        let emoji: Vec<String> = stats
            .top_emoji
            .iter()
            .map(|e| format!("{} {}", e.emoji, e.count))
            .collect();
        out.push_str(&format!("Top emoji: {}\n", emoji.join(", ")));
    }

    out
}
