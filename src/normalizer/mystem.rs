// src/normalizer/mystem.rs
//! MyStem lemmatizer driven as a child process (`mystem -nig --format json`).
//!
//! Output is one JSON object per line:
//! `{"text":"слова","analysis":[{"lex":"слово","gr":"S,сред,неод=(вин,мн|род,ед|им,мн)"}]}`
//! Only the first analysis of each word is used.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{apply_lemmas, Normalizer};
use crate::encoding::repair_mojibake;
use crate::tokenizer::Token;

const CANDIDATES: [&str; 6] = [
    "mystem",
    "mystem.exe",
    "./mystem",
    "./mystem.exe",
    "/usr/bin/mystem",
    "/usr/local/bin/mystem",
];

/// Morphological analysis of one surface word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphResult {
    pub original_word: String,
    pub lemma: Option<String>,
    pub grammar_info: Option<String>,
    pub part_of_speech: String,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(default)]
    text: String,
    #[serde(default)]
    analysis: Vec<RawAnalysis>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    lex: String,
    #[serde(default)]
    gr: String,
}

#[derive(Debug, Clone)]
pub struct MyStemNormalizer {
    path: Option<PathBuf>,
}

impl MyStemNormalizer {
    /// `path`: explicit executable; when `None` well-known locations are probed.
    pub fn new(path: Option<PathBuf>) -> Self {
        let path = path.or_else(find_mystem);
        match &path {
            Some(p) => info!(target: "normalizer", path = %p.display(), "using mystem"),
            None => warn!(target: "normalizer", "mystem executable not found; words stay unlemmatized"),
        }
        Self { path }
    }

    /// Run mystem over `text` and return analyses keyed by lowercase surface word.
    pub async fn analyze_text(&self, text: &str) -> Result<HashMap<String, MorphResult>> {
        let exe = self
            .path
            .as_deref()
            .ok_or_else(|| anyhow!("mystem executable not found"))?;

        let mut child = Command::new(exe)
            .args(["-nig", "--format", "json"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawning {}", exe.display()))?;

        let mut stdin = child.stdin.take().context("mystem stdin not captured")?;
        let input = text.as_bytes().to_vec();
        // Feed stdin concurrently so a full stdout pipe cannot stall the child.
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .context("waiting for mystem")?;
        writer
            .await
            .context("joining mystem stdin writer")?
            .context("writing to mystem stdin")?;

        if !output.stderr.is_empty() {
            warn!(
                target: "normalizer",
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "mystem reported errors"
            );
        }
        Ok(parse_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[async_trait]
impl Normalizer for MyStemNormalizer {
    async fn normalize(&self, words: Vec<Token>) -> Vec<Token> {
        if words.is_empty() {
            return words;
        }
        let text = words
            .iter()
            .map(|w| w.value.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        match self.analyze_text(&text).await {
            Ok(lemmas) => apply_lemmas(words, &lemmas),
            Err(e) => {
                warn!(target: "normalizer", error = ?e, "mystem failed; using surface forms");
                words
            }
        }
    }

    fn name(&self) -> &'static str {
        "mystem"
    }
}

/// Parse mystem JSON-lines output. Unparsable lines are skipped.
pub fn parse_output(output: &str) -> HashMap<String, MorphResult> {
    let mut out = HashMap::new();
    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_line(line) {
            Some(mut r) => {
                r.lemma = r.lemma.map(|l| repair_mojibake(&l));
                out.insert(r.original_word.to_lowercase(), r);
            }
            None => debug!(target: "normalizer", "skipping mystem line"),
        }
    }
    out
}

fn parse_line(line: &str) -> Option<MorphResult> {
    let raw: RawLine = serde_json::from_str(line).ok()?;
    if raw.text.is_empty() {
        return None;
    }
    let Some(first) = raw.analysis.into_iter().next() else {
        return Some(MorphResult {
            original_word: raw.text,
            lemma: None,
            grammar_info: None,
            part_of_speech: "UNKN".to_string(),
        });
    };
    Some(MorphResult {
        original_word: raw.text,
        part_of_speech: part_of_speech(&first.gr).to_string(),
        lemma: Some(first.lex).filter(|l| !l.is_empty()),
        grammar_info: Some(first.gr).filter(|g| !g.is_empty()),
    })
}

/// Map the leading grammeme of a mystem `gr` string to a coarse POS tag.
pub fn part_of_speech(gr: &str) -> &'static str {
    let head = gr.split(|c: char| c == ',' || c == '=').next().unwrap_or_default();
    match head {
        "S" => "NOUN",
        "A" => "ADJ",
        "V" => "VERB",
        "ADV" => "ADV",
        "PR" => "PREP",
        "CONJ" => "CONJ",
        "PART" => "PART",
        "SPRO" => "PRON",
        "NUM" => "NUM",
        _ => "UNKN",
    }
}

fn find_mystem() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = CANDIDATES.iter().map(PathBuf::from).collect();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join("mystem"));
        candidates.push(dir.join("mystem.exe"));
    }
    candidates.into_iter().find(|p| is_executable(p))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
