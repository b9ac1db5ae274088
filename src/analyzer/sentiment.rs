//! Sentiment polarity scoring and binning.
//!
//! Scoring sits behind the [`PolarityScorer`] trait; the rest of the crate
//! only looks at the sign of the score. [`LexiconScorer`] is the built-in
//! implementation, a word-list scorer with simple negation and intensifier
//! handling.

use std::collections::HashMap;

use serde::Serialize;

use super::normalize::normalize;

/// Word polarity list, one `word<TAB>score` per line, scores in [-1, 1].
const LEXICON: &str = include_str!("lexicon.tsv");

/// Words that flip the polarity of the next scored word.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "dont", "don't", "isnt", "isn't", "wasnt", "wasn't",
    "cant", "can't", "wont", "won't", "didnt", "didn't", "aint", "ain't", "hardly",
];

/// Words that strengthen the next scored word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.3),
    ("extremely", 1.5),
    ("totally", 1.3),
    ("too", 1.1),
];

/// Negated words keep half their strength with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

/// Errors that can occur while scoring a message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScorerError {
    #[error("Scorer '{scorer}' returned polarity {value}, expected a value in [-1, 1]")]
    OutOfRange { scorer: &'static str, value: f64 },

    #[error("Scorer '{scorer}' failed: {message}")]
    Failed {
        scorer: &'static str,
        message: String,
    },
}

/// Produces a polarity score in [-1, 1] for normalized text.
///
/// Implementations must be deterministic; the emitters may call them from
/// several threads at once.
pub trait PolarityScorer: Send + Sync {
    /// Scorer name for diagnostics.
    fn name(&self) -> &'static str;

    /// Score normalized text. Negative means negative sentiment.
    fn polarity(&self, text: &str) -> Result<f64, ScorerError>;
}

/// Coarse sentiment class of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBin {
    Good,
    Neutral,
    Bad,
}

impl SentimentBin {
    /// Threshold a polarity score at zero.
    pub fn from_polarity(score: f64) -> Self {
        if score > 0.0 {
            Self::Good
        } else if score < 0.0 {
            Self::Bad
        } else {
            Self::Neutral
        }
    }

    /// `(good, neutral, bad)` one-hot flags as written to the CSV.
    pub fn flags(self) -> (u8, u8, u8) {
        match self {
            Self::Good => (1, 0, 0),
            Self::Neutral => (0, 1, 0),
            Self::Bad => (0, 0, 1),
        }
    }
}

/// Normalize, score and bin a message.
pub fn classify(scorer: &dyn PolarityScorer, message: &str) -> Result<SentimentBin, ScorerError> {
    let cleaned = normalize(message);
    let score = scorer.polarity(&cleaned)?;

    if !(-1.0..=1.0).contains(&score) {
        return Err(ScorerError::OutOfRange {
            scorer: scorer.name(),
            value: score,
        });
    }

    Ok(SentimentBin::from_polarity(score))
}

/// Word-list polarity scorer.
///
/// The score is the mean polarity of all words found in the lexicon, after
/// applying intensifiers and negation from the words right before them.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Scorer backed by the bundled word list.
    pub fn new() -> Self {
        Self::from_tsv(LEXICON)
    }

    /// Build a scorer from `word<TAB>score` lines. Malformed lines are skipped.
    pub fn from_tsv(content: &str) -> Self {
        let words = content
            .lines()
            .filter(|line| !line.starts_with('#'))
            .filter_map(|line| line.split_once('\t'))
            .filter_map(|(word, score)| {
                let score = score.trim().parse::<f64>().ok()?;
                Some((word.trim().to_lowercase(), score.clamp(-1.0, 1.0)))
            })
            .collect();

        Self { words }
    }

    /// Number of words in the lexicon.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> Result<f64, ScorerError> {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|t| {
                t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|t| !t.is_empty())
            .collect();

        let mut total = 0.0;
        let mut scored = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.words.get(token) else {
                continue;
            };

            let mut score = base;
            let previous = &tokens[i.saturating_sub(2)..i];

            if let Some(last) = previous.last() {
                if let Some((_, factor)) =
                    INTENSIFIERS.iter().find(|(word, _)| *word == last.as_str())
                {
                    score *= factor;
                }
            }
            if previous.iter().any(|w| NEGATORS.contains(&w.as_str())) {
                score *= NEGATION_FACTOR;
            }

            total += score;
            scored += 1;
        }

        if scored == 0 {
            return Ok(0.0);
        }
        Ok((total / scored as f64).clamp(-1.0, 1.0))
    }
}
