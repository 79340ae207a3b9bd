// src/lexicon.rs
//! Polarity lexicon: word or emoji -> score.
//!
//! File format (UTF-8, one entry per line):
//! `<word>\t<score>[\t...]`, score may use `,` as decimal separator.
//! Blank, malformed and unparsable lines are skipped; extra columns are ignored.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
}

impl Lexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Parse lexicon text. Later duplicates override earlier ones.
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        for (lineno, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((word, score)) => {
                    entries.insert(word.to_string(), score);
                }
                None => debug!(target: "lexicon", line = lineno + 1, "skipping malformed entry"),
            }
        }
        Self { entries }
    }

    /// Strict load: I/O errors are returned to the caller.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        let lex = Self::parse(&content);
        info!(target: "lexicon", entries = lex.len(), path = %path.display(), "lexicon loaded");
        Ok(lex)
    }

    /// Lenient load: a missing or unreadable file yields an empty lexicon.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(lex) => lex,
            Err(e) => {
                warn!(target: "lexicon", error = ?e, "lexicon unavailable, continuing with an empty one");
                Self::empty()
            }
        }
    }

    #[inline]
    pub fn score(&self, word: &str) -> Option<f64> {
        self.entries.get(word).copied()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(&str, f64)> {
    let mut cols = line.split('\t');
    let word = cols.next()?.trim();
    let score_raw = cols.next()?;
    if word.is_empty() {
        return None;
    }
    let score: f64 = score_raw.replace(',', ".").trim().parse().ok()?;
    // `parse` accepts "inf"/"NaN"; those would break the bounded score range.
    score.is_finite().then_some((word, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_tabs_and_comma_decimals() {
        let lex = Lexicon::parse("хорошо\t2,5\nплохо\t-1.5\textra\tcols\n😀\t1\n");
        assert_eq!(lex.len(), 3);
        assert_eq!(lex.score("хорошо"), Some(2.5));
        assert_eq!(lex.score("плохо"), Some(-1.5));
        assert_eq!(lex.score("😀"), Some(1.0));
    }

    #[test]
    fn skips_malformed_lines() {
        let lex = Lexicon::parse("\n   \nбез_оценки\nслово\tабв\n\t1.0\nбесконечно\tinf\nок\t0.5\n");
        assert_eq!(lex.len(), 1);
        assert!(lex.contains("ок"));
        assert!(!lex.contains("слово"));
        assert!(!lex.contains("бесконечно"));
    }

    #[test]
    fn missing_file_is_empty_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(Lexicon::load_from(&missing).is_err());
        assert!(Lexicon::load_or_empty(&missing).is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "ужасно\t-3,1").unwrap();
        writeln!(f, "отлично\t3.2").unwrap();
        let lex = Lexicon::load_from(f.path()).unwrap();
        assert_eq!(lex.score("ужасно"), Some(-3.1));
        assert_eq!(lex.score("отлично"), Some(3.2));
    }
}
