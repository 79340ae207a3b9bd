// src/analyze/mod.rs
//! Scoring core: contextual rules over lexicon hits, then normalization into a label.

pub mod rules;
pub mod scoring;

// Re-export convenient items.
pub use crate::analyze::rules::{apply_global_rules, apply_rules, score_token};
pub use crate::analyze::scoring::{normalize_score, Sentiment, LABEL_THRESHOLD, SCORE_LIMIT};
