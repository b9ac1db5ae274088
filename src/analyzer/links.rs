//! Link occurrence counting.
//!
//! Each category has a name (used as the CSV column) and a list of literal
//! substrings; a message's count for a category is the number of
//! non-overlapping matches of all its patterns.

use serde::{Deserialize, Serialize};

/// A named group of link patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCategory {
    pub name: String,
    pub patterns: Vec<String>,
}

impl LinkCategory {
    pub fn new(name: &str, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Occurrences of this category's patterns in `body`.
    pub fn count_in(&self, body: &str) -> usize {
        self.patterns
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| body.matches(p.as_str()).count())
            .sum()
    }
}

/// Categories counted when no configuration overrides them.
pub fn default_categories() -> Vec<LinkCategory> {
    vec![
        LinkCategory::new("tiktok", &["vm.tiktok.com"]),
        LinkCategory::new("reddit", &["redd.it", "www.reddit.com"]),
        LinkCategory::new("youtube", &["youtu.be", "youtube.com"]),
        LinkCategory::new("media", &["<Media omitted>"]),
    ]
}

/// Per-category counts for one message, in category order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCounts(Vec<usize>);

impl LinkCounts {
    /// Count every category in `body`.
    pub fn count(body: &str, categories: &[LinkCategory]) -> Self {
        Self(categories.iter().map(|c| c.count_in(body)).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}
