// src/tokenizer.rs
//! Tokenizer: Cyrillic words (with trailing punctuation kept in the surface form),
//! ASCII emoticons and single-code-point Unicode emoji.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trailing punctuation attached to a word token.
const TRAILING_PUNCT: [char; 5] = ['!', '?', '.', ',', ';'];

// One combined pattern; alternatives are tried left to right, so emoticons win
// over words at the same position. Only the word alternative has a capture group.
static COMPREHENSIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)",
        r"(?:[:;8=][\-\^]?[)D(PO3]+)|",                 // ASCII emoticons
        r"(?:[\x{1F300}-\x{1F5FF}])|",                  // symbols & pictographs
        r"(?:[\x{1F600}-\x{1F64F}])|",                  // emoticons block
        r"(?:[\x{1F680}-\x{1F6FF}])|",                  // transport & map
        r"(?:[\x{1F1E0}-\x{1F1FF}])|",                  // regional indicators (flags)
        r"(?:[\x{2600}-\x{26FF}])|",                    // misc symbols
        r"(?:[\x{2700}-\x{27BF}])|",                    // dingbats
        r"(\b[а-яё]+\b[!?.,;]*)",                       // words with punctuation
    ))
    .expect("tokenizer regex")
});

/// A single token. `value` is the lookup form, `original_value` the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub original_value: String,
    pub is_emoji: bool,
}

impl Token {
    pub fn word(original: &str) -> Self {
        Self {
            value: strip_trailing_punct(original).to_lowercase(),
            original_value: original.to_string(),
            is_emoji: false,
        }
    }

    pub fn emoji(glyph: &str) -> Self {
        Self {
            value: glyph.to_string(),
            original_value: glyph.to_string(),
            is_emoji: true,
        }
    }

    /// Same token with a new lookup value; the surface form is kept.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            original_value: self.original_value.clone(),
            is_emoji: self.is_emoji,
        }
    }

    /// Surface form without trailing punctuation, case preserved.
    pub fn surface(&self) -> &str {
        if self.is_emoji {
            &self.original_value
        } else {
            strip_trailing_punct(&self.original_value)
        }
    }

    pub fn exclamations(&self) -> usize {
        self.original_value.matches('!').count()
    }

    pub fn questions(&self) -> usize {
        self.original_value.matches('?').count()
    }
}

fn strip_trailing_punct(s: &str) -> &str {
    s.trim_end_matches(&TRAILING_PUNCT[..])
}

/// Split `text` into tokens in order of appearance.
pub fn tokenize(text: &str) -> Vec<Token> {
    COMPREHENSIVE
        .captures_iter(text)
        .filter_map(|caps| match caps.get(1) {
            Some(word) => Some(Token::word(word.as_str())),
            None => caps.get(0).map(|m| Token::emoji(m.as_str())),
        })
        .filter(|t| !t.value.is_empty())
        .collect()
}
