//! Emoji occurrence counting.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static EMOJI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Emoji}$").expect("emoji pattern is valid"));

/// Whether a single character is an emoji.
///
/// ASCII digits, `#` and `*` carry the Unicode Emoji property (they form
/// keycaps) but are not counted.
pub fn is_emoji(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    let mut buf = [0u8; 4];
    EMOJI_RE.is_match(c.encode_utf8(&mut buf))
}

/// Per-emoji occurrence counts, remembering first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiTally {
    entries: Vec<(char, usize)>,
    positions: HashMap<char, usize>,
}

impl EmojiTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every emoji in a list of texts.
    pub fn from_texts<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().fold(Self::new(), Self::with_text)
    }

    /// Rebuild a tally from `(emoji, count)` pairs, e.g. read back from CSV.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (char, usize)>,
    {
        counts
            .into_iter()
            .fold(Self::new(), |tally, (c, n)| tally.with_count(c, n))
    }

    /// Returns the tally with all emoji of `text` added.
    pub fn with_text(self, text: &str) -> Self {
        text.chars()
            .filter(|c| is_emoji(*c))
            .fold(self, |tally, c| tally.with_count(c, 1))
    }

    fn with_count(mut self, c: char, n: usize) -> Self {
        match self.positions.get(&c) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.positions.insert(c, self.entries.len());
                self.entries.push((c, n));
            }
        }
        self
    }

    /// Occurrences of one emoji.
    pub fn count(&self, c: char) -> usize {
        self.positions
            .get(&c)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct emoji.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total emoji occurrences.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries sorted by count, lowest first; ties keep first-seen order.
    pub fn ascending(&self) -> Vec<(char, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|(_, n)| *n);
        sorted
    }

    /// The `limit` most frequent entries, highest first; ties keep first-seen order.
    pub fn top(&self, limit: usize) -> Vec<(char, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(limit);
        sorted
    }
}
