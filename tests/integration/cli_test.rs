//! Integration tests for the chatposter CLI

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{fixtures_dir, temp_fixture};

/// Command with its config dir pointed at `home` so the user's config is never read.
fn chatposter(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chatposter").expect("binary is built");
    cmd.env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    chatposter(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("textual.csv"));
}

#[test]
fn convert_without_input_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    chatposter(home.path())
        .arg("convert")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--input <INPUT>"));
}

// ============================================================================
// Pipeline Commands
// ============================================================================

#[test]
fn convert_writes_csv_files() {
    let (dir, input) = temp_fixture("chat.txt");
    let out = dir.path().join("out");

    chatposter(dir.path())
        .args(["convert", "-i"])
        .arg(&input)
        .arg("-t")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 messages from 2 people"))
        .stdout(predicate::str::contains("5 rows, 2 without content"))
        .stdout(predicate::str::contains("3 distinct emoji"));

    assert!(out.join("textual.csv").exists());
    assert!(out.join("emoji.csv").exists());
    assert!(out.join("links.csv").exists());
}

#[test]
fn convert_defaults_to_temp_output_dir() {
    let (dir, input) = temp_fixture("chat.txt");

    chatposter(dir.path())
        .current_dir(dir.path())
        .args(["convert", "-i"])
        .arg(&input)
        .assert()
        .success();

    assert!(dir.path().join("temp-output").join("textual.csv").exists());
}

#[test]
fn run_converts_and_aggregates() {
    let (dir, input) = temp_fixture("chat.txt");
    let out = dir.path().join("out");

    chatposter(dir.path())
        .args(["run", "-i"])
        .arg(&input)
        .arg("-t")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "5 messages between 2021-01-05 and 2022-02-01 (1 years)",
        ))
        .stdout(predicate::str::contains("Alice Smith"));

    let values = fs::read_to_string(out.join("values.json")).unwrap();
    assert!(values.contains("\"FullName1\": \"AliceSmith\""));
    assert!(out.join("stats.json").exists());
}

#[test]
fn stats_json_prints_machine_readable_output() {
    let (dir, input) = temp_fixture("chat.txt");
    let out = dir.path().join("out");

    chatposter(dir.path())
        .args(["convert", "-i"])
        .arg(&input)
        .arg("-t")
        .arg(&out)
        .assert()
        .success();

    let output = chatposter(dir.path())
        .args(["stats", "--json", "-t"])
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["messages"], 5);
    assert_eq!(stats["years"], 1);
}

#[test]
fn emoji_until_stops_at_cutoff() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "[emoji]\nencoding = \"utf8\"\n");
    let output = dir.path().join("emoji.csv");

    chatposter(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["emoji", "-i"])
        .arg(fixtures_dir().join("chat.txt"))
        .arg("-o")
        .arg(&output)
        .args(["--until", "2021-01-05"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "emoji\tfrequency\n😀\t1\n🎉\t2\n"
    );
}

#[test]
fn links_uses_configured_categories() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "[[links]]\nname = \"tiktok\"\npatterns = [\"vm.tiktok.com\"]\n",
    );
    let output = dir.path().join("links.csv");

    chatposter(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["links", "-i"])
        .arg(fixtures_dir().join("chat.txt"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 rows"));

    let links = fs::read_to_string(&output).unwrap();
    assert!(links.starts_with("index,person,date,time,tiktok\n"));
    assert!(links.contains("4,Alice Smith,2021-01-05,22:40,2\n"));
}

#[test]
fn textual_reports_sentiment_counts() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("textual.csv");

    chatposter(dir.path())
        .args(["textual", "-i"])
        .arg(fixtures_dir().join("chat.txt"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 rows: 3 good, 1 neutral, 1 bad"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn missing_input_exits_1() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    chatposter(dir.path())
        .args(["convert", "-i", "/nonexistent/chat.txt", "-t"])
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Could not open transcript"));

    assert!(!out.exists());
    assert!(!out.join("textual.csv").exists());
    assert!(!out.join("emoji.csv").exists());
    assert!(!out.join("links.csv").exists());
}

#[test]
fn missing_input_writes_nothing_into_existing_dir() {
    let dir = TempDir::new().unwrap();

    chatposter(dir.path())
        .args(["convert", "-i", "/nonexistent/chat.txt", "-t"])
        .arg(dir.path())
        .assert()
        .code(1);

    assert!(!dir.path().join("textual.csv").exists());
    assert!(!dir.path().join("emoji.csv").exists());
    assert!(!dir.path().join("links.csv").exists());
}

#[test]
fn single_emitter_with_missing_input_creates_no_file() {
    let dir = TempDir::new().unwrap();

    for command in ["textual", "emoji", "links"] {
        let output = dir.path().join(format!("{}.csv", command));

        chatposter(dir.path())
            .args([command, "-i", "/nonexistent/chat.txt", "-o"])
            .arg(&output)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Could not open transcript"));

        assert!(!output.exists(), "{} created {}", command, output.display());
    }
}

#[test]
fn stats_without_csv_files_exits_1() {
    let dir = TempDir::new().unwrap();

    chatposter(dir.path())
        .args(["stats", "-t"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("textual.csv"));
}

#[test]
fn invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "[transcript]\ndate_mode = \"sloppy\"\n");

    chatposter(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

// ============================================================================
// Config and Completions
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();

    chatposter(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("date_mode = \"strict\""))
        .stdout(predicate::str::contains("encoding = \"utf16\""))
        .stdout(predicate::str::contains("[[links]]"));
}

#[test]
fn config_path_prints_explicit_path() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");

    chatposter(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();

    chatposter(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chatposter"));
}
