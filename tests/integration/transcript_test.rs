//! Transcript parsing against realistic exports

use chatposter::transcript::{DateMode, Message, Transcript};

use super::helpers::{fixtures_dir, load_fixture};

fn parse(content: &str) -> Transcript {
    Transcript::parse_str(content, DateMode::Strict)
}

// ============================================================================
// Message Reconstruction
// ============================================================================

#[test]
fn continuation_lines_join_the_open_message() {
    let transcript = parse(
        "2021-01-05, 14:30 - Alice: Hello there\n\
         how are you?\n\
         2021-01-05, 14:31 - Bob: fine\n",
    );

    assert_eq!(
        transcript.messages[0],
        Message {
            index: 1,
            person: "Alice".to_string(),
            date: "2021-01-05".to_string(),
            time: "14:30".to_string(),
            body: "Hello there\nhow are you?".to_string(),
        }
    );
    assert_eq!(transcript.messages[1].body, "fine");
}

#[test]
fn consecutive_headers_keep_their_own_indexes() {
    let transcript = parse(
        "2021-01-05, 14:30 - Alice: \n\
         2021-01-05, 14:31 - Bob: second\n",
    );

    assert_eq!(transcript.messages.len(), 2);
    assert_eq!(transcript.messages[0].index, 1);
    assert_eq!(transcript.messages[0].body, "");
    assert_eq!(transcript.messages[1].index, 2);
}

#[test]
fn fixture_parses_every_header() {
    let transcript = Transcript::parse(fixtures_dir().join("chat.txt"), DateMode::Strict).unwrap();

    assert_eq!(transcript.messages.len(), 7);
    assert_eq!(transcript.stats.headers, 7);
    assert_eq!(transcript.stats.false_positives, 1);
    assert_eq!(transcript.stats.discarded_lines, 1);
    assert_eq!(transcript.people(), vec!["Alice Smith", "Bob"]);
}

#[test]
fn indexes_are_contiguous_and_end_at_header_count() {
    let transcript = parse(&load_fixture("chat.txt"));

    let indexes: Vec<u32> = transcript.messages.iter().map(|m| m.index).collect();
    assert_eq!(indexes, (1..=7).collect::<Vec<u32>>());
    assert_eq!(
        transcript.messages.iter().map(|m| m.index).max(),
        Some(transcript.stats.headers)
    );
}

#[test]
fn false_positive_header_stays_in_body() {
    let transcript = parse(&load_fixture("chat.txt"));

    assert_eq!(
        transcript.messages[3].body,
        "check this vm.tiktok.com/abc\nand this vm.tiktok.com/def\n2021-03-10 - reminder without sender"
    );
}

#[test]
fn windows_line_endings_and_bom_are_tolerated() {
    let transcript = parse("\u{feff}2021-01-05, 14:30 - Alice: hi\r\nthere\r\n");

    assert_eq!(transcript.messages.len(), 1);
    assert_eq!(transcript.messages[0].date, "2021-01-05");
    assert_eq!(transcript.messages[0].body, "hi\nthere");
}

// ============================================================================
// Date Modes
// ============================================================================

#[test]
fn twelve_hour_exports_are_recognized() {
    let transcript = parse("1/5/21, 2:30\u{202f}PM - Alice: afternoon\n");

    assert_eq!(transcript.messages.len(), 1);
    assert_eq!(transcript.messages[0].date, "1/5/21");
    assert_eq!(transcript.messages[0].time, "2:30\u{202f}PM");
}

#[test]
fn spanish_exports_with_split_meridiem_are_recognized() {
    let transcript = parse(
        "5/1/21, 2:30\u{a0}p.\u{a0}m. - Alice: hola\n\
         5/1/21, 2:31 p. m. - Bob: buenas\n",
    );

    assert_eq!(transcript.messages.len(), 2);
    assert_eq!(transcript.messages[0].person, "Alice");
    assert_eq!(transcript.messages[1].time, "2:31 p. m.");
}

#[test]
fn hungarian_exports_with_dotted_dates_are_recognized() {
    let transcript = parse(
        "2021. 01. 05. 14:30 - Alice: szia\n\
         2021. 01. 05. 14:31 - Bob: hello\n",
    );

    assert_eq!(transcript.messages.len(), 2);
    assert_eq!(transcript.messages[1].body, "hello");
}

#[test]
fn iso_zoned_and_fractional_timestamps_are_recognized() {
    let transcript = parse(
        "2021-01-05T14:30 - Alice: one\n\
         2021-01-05, 14:30 UTC - Bob: two\n\
         2021-01-05, 12:00:00.5 - Alice: three\n",
    );

    let people: Vec<&str> = transcript.messages.iter().map(|m| m.person.as_str()).collect();
    assert_eq!(people, vec!["Alice", "Bob", "Alice"]);
    assert_eq!(transcript.messages[1].time, "14:30 UTC");
}

#[test]
fn fuzzy_mode_accepts_decorated_timestamps() {
    let line = "sent 2021-01-05, 14:30 - Alice: hi\n";

    assert!(Transcript::parse_str(line, DateMode::Strict)
        .messages
        .is_empty());
    assert_eq!(Transcript::parse_str(line, DateMode::Fuzzy).messages.len(), 1);
}

#[test]
fn missing_transcript_is_reported() {
    let err = Transcript::parse("/nonexistent/chat.txt", DateMode::Strict).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/chat.txt"));
}
