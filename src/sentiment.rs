// src/sentiment.rs
//! Analyzer: tokenize -> lemmatize words -> contextual rules -> normalized score.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, enabled, warn, Level};

use crate::analyze::{apply_rules, normalize_score, Sentiment};
use crate::config::AppConfig;
use crate::lexicon::Lexicon;
use crate::normalizer::{build_normalizer, DynNormalizer, IdentityNormalizer};
use crate::tokenizer::{tokenize, Token};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Normalized score in `[-4.0, 4.0]`.
    pub score: f64,
    pub sentiment: Sentiment,
    /// Tokens (words and emoji) found in the lexicon.
    pub word_count: usize,
}

impl SentimentResult {
    pub fn from_raw(raw_score: f64, word_count: usize) -> Self {
        let score = normalize_score(raw_score, word_count);
        Self {
            score,
            sentiment: Sentiment::from_score(score),
            word_count,
        }
    }
}

#[derive(Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
    normalizer: DynNormalizer,
    timeout: Duration,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>, normalizer: DynNormalizer, timeout: Duration) -> Self {
        Self {
            lexicon,
            normalizer,
            timeout,
        }
    }

    /// Analyzer that scores surface (lowercased) words without lemmatization.
    pub fn without_normalizer(lexicon: Lexicon) -> Self {
        Self::new(
            Arc::new(lexicon),
            Arc::new(IdentityNormalizer),
            Duration::from_secs(1),
        )
    }

    /// Build from config. A missing lexicon file leaves the analyzer in degraded
    /// (always neutral) mode instead of failing.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let lexicon = Lexicon::load_or_empty(&cfg.lexicon_path);
        Self::new(
            Arc::new(lexicon),
            build_normalizer(cfg),
            cfg.normalizer_timeout(),
        )
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn normalizer_name(&self) -> &'static str {
        self.normalizer.name()
    }

    /// Full pipeline for one text.
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = self.normalize_words(tokenize(text)).await;
        let result = self.analyze_tokens(&tokens);
        if enabled!(target: "sentiment", Level::DEBUG) {
            // Raw text is never logged; a digest prefix correlates repeats.
            let digest = Sha256::digest(text.as_bytes());
            debug!(
                target: "sentiment",
                id = %format!("{digest:.12x}"),
                tokens = tokens.len(),
                words = result.word_count,
                score = result.score,
                sentiment = ?result.sentiment,
                "analyzed"
            );
        }
        result
    }

    /// Synchronous scoring half: tokens must already be in textual order.
    pub fn analyze_tokens(&self, tokens: &[Token]) -> SentimentResult {
        let (raw, word_count) = apply_rules(tokens, &self.lexicon);
        SentimentResult::from_raw(raw, word_count)
    }

    /// Lemmatize the word tokens and put them back at their original positions.
    /// On timeout or a malformed reply the tokens are returned unchanged.
    pub async fn normalize_words(&self, tokens: Vec<Token>) -> Vec<Token> {
        let positions: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_emoji)
            .map(|(i, _)| i)
            .collect();
        if positions.is_empty() {
            return tokens;
        }
        let words: Vec<Token> = positions.iter().map(|&i| tokens[i].clone()).collect();

        let normalized =
            match tokio::time::timeout(self.timeout, self.normalizer.normalize(words)).await {
                Ok(n) => n,
                Err(_) => {
                    warn!(
                        target: "sentiment",
                        normalizer = self.normalizer.name(),
                        timeout_ms = self.timeout.as_millis() as u64,
                        "normalizer timed out; using surface forms"
                    );
                    return tokens;
                }
            };
        if normalized.len() != positions.len() {
            warn!(
                target: "sentiment",
                normalizer = self.normalizer.name(),
                expected = positions.len(),
                got = normalized.len(),
                "normalizer changed token count; using surface forms"
            );
            return tokens;
        }

        let mut merged = tokens;
        for (pos, word) in positions.into_iter().zip(normalized) {
            merged[pos] = Token {
                is_emoji: false,
                ..word
            };
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;
    use async_trait::async_trait;

    struct Stalling;

    #[async_trait]
    impl Normalizer for Stalling {
        async fn normalize(&self, words: Vec<Token>) -> Vec<Token> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            words
        }
        fn name(&self) -> &'static str {
            "stalling"
        }
    }

    struct Dropping;

    #[async_trait]
    impl Normalizer for Dropping {
        async fn normalize(&self, mut words: Vec<Token>) -> Vec<Token> {
            words.pop();
            words
        }
        fn name(&self) -> &'static str {
            "dropping"
        }
    }

    struct Suffix;

    #[async_trait]
    impl Normalizer for Suffix {
        async fn normalize(&self, words: Vec<Token>) -> Vec<Token> {
            words
                .into_iter()
                .map(|w| {
                    let v = format!("{}_л", w.value);
                    w.with_value(v)
                })
                .collect()
        }
        fn name(&self) -> &'static str {
            "suffix"
        }
    }

    fn analyzer_with(n: DynNormalizer) -> SentimentAnalyzer {
        SentimentAnalyzer::new(
            Arc::new(Lexicon::from_entries([("хорошо", 2.0)])),
            n,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn words_are_merged_back_in_place() {
        let a = analyzer_with(Arc::new(Suffix));
        let out = a.normalize_words(tokenize("раз 😀 два :) три")).await;
        let values: Vec<&str> = out.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["раз_л", "😀", "два_л", ":)", "три_л"]);
        assert!(out[1].is_emoji && out[3].is_emoji);
    }

    #[tokio::test]
    async fn timeout_falls_back_to_surface_forms() {
        let a = analyzer_with(Arc::new(Stalling));
        let r = a.analyze("хорошо").await;
        assert_eq!(r.word_count, 1);
        assert_eq!(r.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn length_mismatch_falls_back() {
        let a = analyzer_with(Arc::new(Dropping));
        let r = a.analyze("день хорошо").await;
        assert_eq!(r.word_count, 1);
    }

    #[test]
    fn from_raw_assembles_label() {
        let r = SentimentResult::from_raw(-3.0, 1);
        assert_eq!(r.sentiment, Sentiment::Negative);
        assert!(r.score < 0.0);
        let z = SentimentResult::from_raw(5.0, 0);
        assert_eq!(z.score, 0.0);
        assert_eq!(z.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn debug_logging_does_not_change_result() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        assert!(enabled!(target: "sentiment", Level::DEBUG));

        let a = SentimentAnalyzer::without_normalizer(Lexicon::parse("хорошо\t2\n"));
        let logged = a.analyze("день хорошо").await;
        assert_eq!(logged, a.analyze_tokens(&tokenize("день хорошо")));
    }
}
