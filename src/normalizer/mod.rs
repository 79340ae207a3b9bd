// src/normalizer/mod.rs
//! Lemmatization seam: word tokens in, the same tokens with their lemma as `value` out.
//!
//! Implementations must keep length and order and preserve `original_value`.
//! A word without a known lemma keeps its current `value`.

pub mod mystem;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{AppConfig, NormalizerKind};
use crate::tokenizer::Token;

pub use mystem::{MorphResult, MyStemNormalizer};

#[async_trait]
pub trait Normalizer: Send + Sync {
    async fn normalize(&self, words: Vec<Token>) -> Vec<Token>;
    /// Name for diagnostics/logs.
    fn name(&self) -> &'static str;
}

pub type DynNormalizer = Arc<dyn Normalizer>;

/// Returns words unchanged; used when lemmatization is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

#[async_trait]
impl Normalizer for IdentityNormalizer {
    async fn normalize(&self, words: Vec<Token>) -> Vec<Token> {
        words
    }
    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Factory: build the normalizer selected in config.
pub fn build_normalizer(cfg: &AppConfig) -> DynNormalizer {
    match cfg.normalizer {
        NormalizerKind::Mystem => Arc::new(MyStemNormalizer::new(cfg.mystem_path.clone())),
        NormalizerKind::None => Arc::new(IdentityNormalizer),
    }
}

/// Replace each word's `value` with its lemma, keyed by lowercase surface word.
pub fn apply_lemmas(words: Vec<Token>, lemmas: &HashMap<String, MorphResult>) -> Vec<Token> {
    words
        .into_iter()
        .map(|w| {
            let lemma = lemmas
                .get(&w.value)
                .and_then(|r| r.lemma.as_deref())
                .filter(|l| !l.is_empty());
            match lemma {
                Some(l) => w.with_value(l.to_lowercase()),
                None => w,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn morph(word: &str, lemma: Option<&str>) -> MorphResult {
        MorphResult {
            original_word: word.to_string(),
            lemma: lemma.map(str::to_string),
            grammar_info: None,
            part_of_speech: "UNKN".to_string(),
        }
    }

    #[tokio::test]
    async fn identity_keeps_tokens() {
        let words = vec![Token::word("Хорошие!"), Token::word("дни")];
        let out = IdentityNormalizer.normalize(words.clone()).await;
        assert_eq!(out, words);
    }

    #[test]
    fn lemmas_replace_value_only() {
        let mut map = HashMap::new();
        map.insert("хорошие".to_string(), morph("Хорошие", Some("хороший")));
        map.insert("дни".to_string(), morph("дни", None));
        let out = apply_lemmas(
            vec![Token::word("Хорошие!"), Token::word("дни"), Token::word("вечер")],
            &map,
        );
        assert_eq!(out[0].value, "хороший");
        assert_eq!(out[0].original_value, "Хорошие!");
        assert_eq!(out[1].value, "дни");
        assert_eq!(out[2].value, "вечер");
    }
}
