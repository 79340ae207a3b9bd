//! Score normalization: compresses the raw rule-engine total into `[-4, 4]`
//! and maps it onto a three-way label.
//!
//! normalized = raw / sqrt(raw + 15) / sqrt(1 + word_count * 0.001)

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCORE_LIMIT: f64 = 4.0;
pub const LABEL_THRESHOLD: f64 = 0.05;

const ALPHA: f64 = 15.0;
const LENGTH_DAMPING: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score >= LABEL_THRESHOLD {
            Sentiment::Positive
        } else if score <= -LABEL_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Human label used by the console driver.
    pub fn label_ru(self) -> &'static str {
        match self {
            Sentiment::Positive => "Позитивная тональность",
            Sentiment::Negative => "Негативная тональность",
            Sentiment::Neutral => "Нейтральная",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_ru())
    }
}

/// Normalize a raw total. `word_count == 0` always gives exactly `0.0`.
///
/// For `raw <= -15` the square root is undefined; the result is pinned to the
/// lower bound, which is where the formula tends as `raw` approaches -15.
pub fn normalize_score(raw: f64, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    if raw + ALPHA <= 0.0 {
        return -SCORE_LIMIT;
    }
    let compressed = raw / (raw + ALPHA).sqrt();
    let damped = compressed / (1.0 + word_count as f64 * LENGTH_DAMPING).sqrt();
    damped.clamp(-SCORE_LIMIT, SCORE_LIMIT)
}
