//! Configuration loading.
//!
//! Settings live in `<config dir>/chatposter/config.toml`. A missing file
//! means defaults; missing fields in an existing file fall back to their
//! defaults individually.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::analyzer::{default_categories, LinkCategory};
use crate::export::Encoding;
use crate::transcript::DateMode;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transcript: TranscriptConfig,
    pub emoji: EmojiConfig,
    pub stats: StatsConfig,
    /// Link categories, one CSV column each, in this order
    pub links: Vec<LinkCategory>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcript: TranscriptConfig::default(),
            emoji: EmojiConfig::default(),
            stats: StatsConfig::default(),
            links: default_categories(),
        }
    }
}

/// How transcripts are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Header prefix date matching mode
    pub date_mode: DateMode,
    /// Bodies that mark a message without content
    pub placeholders: Vec<String>,
    /// chrono format of the date part of a header
    pub date_format: String,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            date_mode: DateMode::Strict,
            placeholders: vec!["<Media omitted>".to_string()],
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Emoji CSV output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiConfig {
    pub encoding: Encoding,
}

/// Aggregation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Digit group separator for formatted counts ("," → 12,345)
    pub thousands_separator: String,
    /// Words kept per person
    pub top_words: usize,
    /// Emoji kept for the emoji summary
    pub top_emoji: usize,
    /// Extra words ignored when counting, on top of the built-in list
    pub stopwords: Vec<String>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            thousands_separator: ",".to_string(),
            top_words: 50,
            top_emoji: 15,
            stopwords: Vec::new(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("chatposter").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings that would produce broken output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.transcript.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "transcript.date_format '{}' is not a valid date format",
                self.transcript.date_format
            )));
        }

        let mut seen: Vec<&str> = Vec::new();
        for category in &self.links {
            let name = category.name.as_str();
            if name.is_empty() || name.contains([',', '\n']) {
                return Err(ConfigError::Invalid(format!(
                    "link category name '{}' must be non-empty and contain no commas",
                    name
                )));
            }
            if seen.contains(&name) {
                return Err(ConfigError::Invalid(format!(
                    "link category '{}' is defined twice",
                    name
                )));
            }
            if category.patterns.iter().all(|p| p.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "link category '{}' has no patterns",
                    name
                )));
            }
            seen.push(name);
        }

        Ok(())
    }
}
