//! Word frequency counting.

use std::collections::HashMap;

use serde::Serialize;

use crate::analyzer::normalize;

/// Common English words that carry no meaning on their own.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few", "for",
    "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he",
    "he'd", "he'll", "he's", "her", "here", "here's", "hers", "herself", "him", "himself", "his",
    "how", "how's", "however", "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is",
    "isn't", "it", "it's", "its", "itself", "just", "let's", "like", "me", "more", "most",
    "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shall", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "since", "so",
    "some", "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves",
    "then", "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've",
    "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't",
    "we", "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when",
    "when's", "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's",
    "with", "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your",
    "yours", "yourself", "yourselves", "media", "omitted",
];

/// A word and how often it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Counts words across messages, skipping stopwords.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    counts: HashMap<String, usize>,
    extra_stopwords: Vec<String>,
}

impl WordCounter {
    /// Counter that also skips `extra_stopwords` (case-insensitive).
    pub fn new(extra_stopwords: &[String]) -> Self {
        Self {
            counts: HashMap::new(),
            extra_stopwords: extra_stopwords.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add the words of one message.
    pub fn add(&mut self, message: &str) {
        let cleaned = normalize(message).to_lowercase();
        for raw in cleaned.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            if self.is_countable(word) {
                *self.counts.entry(word.to_string()).or_insert(0) += 1;
            }
        }
    }

    fn is_countable(&self, word: &str) -> bool {
        word.chars().count() > 1
            && !word.chars().all(|c| c.is_ascii_digit())
            && !STOPWORDS.contains(&word)
            && !self.extra_stopwords.iter().any(|w| w == word)
    }

    /// The `limit` most used words, most frequent first, ties alphabetical.
    pub fn top(&self, limit: usize) -> Vec<WordCount> {
        let mut words: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count: *count,
            })
            .collect();
        words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        words.truncate(limit);
        words
    }
}
