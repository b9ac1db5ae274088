//! End-to-end conversion and aggregation through the library API

use std::fs;

use tempfile::TempDir;

use chatposter::analyzer::LexiconScorer;
use chatposter::export::{write_all, Encoding, OutputPaths};
use chatposter::stats::{read_textual, Reports, STATS_FILE, VALUES_FILE};
use chatposter::transcript::{DateMode, Transcript};
use chatposter::Config;

use super::helpers::temp_fixture;

/// Convert the chat fixture into a fresh output directory.
fn convert(config: &Config) -> (TempDir, OutputPaths) {
    let (dir, input) = temp_fixture("chat.txt");
    let transcript = Transcript::parse(&input, DateMode::Strict).unwrap();
    let paths = OutputPaths::in_dir(dir.path());
    write_all(&paths, &transcript.messages, &LexiconScorer::new(), config).unwrap();
    (dir, paths)
}

// ============================================================================
// CSV Output
// ============================================================================

#[test]
fn textual_csv_skips_placeholders_and_keeps_indexes() {
    let (_dir, paths) = convert(&Config::default());
    let textual = fs::read_to_string(&paths.textual).unwrap();

    insta::assert_snapshot!(textual.trim_end(), @r###"
    index,person,date,time,message,goodSentiment,neutralSentiment,badSentiment
    1,Alice Smith,2021-01-05,09:15,"Happy new year! ",1,0,0
    2,Bob,2021-01-05,09:16,"Thanks, you too ",1,0,0
    4,Alice Smith,2021-01-05,22:40,"check this vm.tiktok.com/abc\nand this vm.tiktok.com/def\n2021-03-10 - reminder without sender",0,1,0
    5,Bob,2021-06-20,14:05,"This is terrible news ",0,0,1
    7,Alice Smith,2022-02-01,08:00,"Great pizza, love it ",1,0,0
    "###);
}

#[test]
fn emoji_csv_is_utf16_and_ascending() {
    let (_dir, paths) = convert(&Config::default());
    let bytes = fs::read(&paths.emoji).unwrap();

    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
    assert_eq!(
        Encoding::decode(&bytes).unwrap(),
        "emoji\tfrequency\n😢\t1\n🎉\t2\n😀\t2\n"
    );
}

#[test]
fn emoji_csv_honors_utf8_config() {
    let mut config = Config::default();
    config.emoji.encoding = Encoding::Utf8;
    let (_dir, paths) = convert(&config);

    assert_eq!(
        fs::read_to_string(&paths.emoji).unwrap(),
        "emoji\tfrequency\n😢\t1\n🎉\t2\n😀\t2\n"
    );
}

#[test]
fn links_csv_has_a_row_per_message() {
    let (_dir, paths) = convert(&Config::default());
    let links = fs::read_to_string(&paths.links).unwrap();
    let lines: Vec<&str> = links.lines().collect();

    assert_eq!(lines[0], "index,person,date,time,tiktok,reddit,youtube,media");
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[3], "3,Bob,2021-01-05,09:17,0,0,0,1");
    assert_eq!(lines[4], "4,Alice Smith,2021-01-05,22:40,2,0,0,0");
    assert_eq!(lines[6], "6,Alice Smith,2021-06-20,14:06,0,0,0,0");
}

#[test]
fn textual_csv_reads_back_with_csv_reader() {
    let (_dir, paths) = convert(&Config::default());
    let records = read_textual(&paths.textual).unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(records[1].message, "Thanks, you too ");
    assert_eq!(records[2].index, 4);
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn reports_aggregate_converted_output() {
    let config = Config::default();
    let (dir, _paths) = convert(&config);

    let reports = Reports::from_dir(dir.path(), &config).unwrap();
    let stats = &reports.stats;

    assert_eq!(stats.messages, 5);
    assert_eq!(stats.first_date, "2021-01-05");
    assert_eq!(stats.last_date, "2022-02-01");
    assert_eq!(stats.years, 1);
    assert_eq!(stats.people[0].name, "Alice Smith");
    assert_eq!(stats.people[0].messages, 3);
    assert_eq!(stats.people[1].messages, 2);
    assert_eq!(stats.sentiment.good, 3);
    assert_eq!(stats.sentiment.neutral, 1);
    assert_eq!(stats.sentiment.bad, 1);
    assert_eq!(stats.hours[9].messages, 2);
    assert_eq!(stats.top_emoji[0].emoji, "🎉");
    assert_eq!(stats.total_emoji, 5);
}

#[test]
fn reports_are_written_as_json() {
    let config = Config::default();
    let (dir, _paths) = convert(&config);

    Reports::from_dir(dir.path(), &config)
        .unwrap()
        .write_to(dir.path())
        .unwrap();

    let values = fs::read_to_string(dir.path().join(VALUES_FILE)).unwrap();
    insta::assert_snapshot!(values.trim_end(), @r###"
    {
      "Name1": "Alice",
      "FullName1": "AliceSmith",
      "Name2": "Bob",
      "FullName2": "Bob",
      "Messages": "5",
      "Years": "1"
    }
    "###);

    let stats: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(STATS_FILE)).unwrap()).unwrap();
    assert_eq!(stats["hours"].as_array().map(Vec::len), Some(24));
    assert_eq!(stats["people"][1]["name"], "Bob");
}
