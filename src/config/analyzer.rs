// src/config/analyzer.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";
pub const DEFAULT_LEXICON_PATH: &str = "data/lexicon_ru.tsv";
pub const DEFAULT_NORMALIZER_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_LEXICON_PATH: &str = "LEXICON_PATH";
pub const ENV_MYSTEM_PATH: &str = "MYSTEM_PATH";
pub const ENV_NORMALIZER_TIMEOUT_MS: &str = "NORMALIZER_TIMEOUT_MS";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerKind {
    Mystem,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lexicon_path: PathBuf,
    /// "mystem" | "none"
    pub normalizer: NormalizerKind,
    /// Explicit mystem executable; probed in well-known places when absent.
    pub mystem_path: Option<PathBuf>,
    pub normalizer_timeout_ms: u64,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from(DEFAULT_LEXICON_PATH),
            normalizer: NormalizerKind::Mystem,
            mystem_path: None,
            normalizer_timeout_ms: DEFAULT_NORMALIZER_TIMEOUT_MS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML file; missing keys take their defaults. No env overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: AppConfig =
            toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }

    /// Resolve config:
    /// 1) $SENTIMENT_CONFIG_PATH (must exist)
    /// 2) config/analyzer.toml
    /// 3) built-in defaults
    ///
    /// then apply env overrides (LEXICON_PATH, MYSTEM_PATH, NORMALIZER_TIMEOUT_MS, BIND_ADDR).
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(p) = non_empty_env(ENV_LEXICON_PATH) {
            self.lexicon_path = PathBuf::from(p);
        }
        if let Some(p) = non_empty_env(ENV_MYSTEM_PATH) {
            self.mystem_path = Some(PathBuf::from(p));
        }
        if let Some(ms) = non_empty_env(ENV_NORMALIZER_TIMEOUT_MS).and_then(|s| s.parse().ok()) {
            self.normalizer_timeout_ms = ms;
        }
        if let Some(addr) = non_empty_env(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }
    }

    pub fn normalizer_timeout(&self) -> Duration {
        Duration::from_millis(self.normalizer_timeout_ms)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ENV: [&str; 5] = [
        ENV_CONFIG_PATH,
        ENV_LEXICON_PATH,
        ENV_MYSTEM_PATH,
        ENV_NORMALIZER_TIMEOUT_MS,
        ENV_BIND_ADDR,
    ];

    fn clear_env() {
        for k in ALL_ENV {
            env::remove_var(k);
        }
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
lexicon_path = "lex.tsv"
normalizer = "none"
"#,
        )
        .unwrap();
        assert_eq!(cfg.lexicon_path, PathBuf::from("lex.tsv"));
        assert_eq!(cfg.normalizer, NormalizerKind::None);
        assert_eq!(cfg.normalizer_timeout_ms, DEFAULT_NORMALIZER_TIMEOUT_MS);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert!(cfg.mystem_path.is_none());
    }

    #[test]
    fn unknown_normalizer_is_an_error() {
        assert!(toml::from_str::<AppConfig>(r#"normalizer = "pymorphy""#).is_err());
    }

    #[serial_test::serial]
    #[test]
    fn env_path_then_overrides() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("analyzer.toml");
        fs::write(&p, "normalizer_timeout_ms = 250\nbind_addr = \"0.0.0.0:9000\"\n").unwrap();

        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        let cfg = AppConfig::load_default().unwrap();
        assert_eq!(cfg.normalizer_timeout(), Duration::from_millis(250));
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");

        env::set_var(ENV_LEXICON_PATH, "/tmp/other.tsv");
        env::set_var(ENV_NORMALIZER_TIMEOUT_MS, "not-a-number");
        let cfg = AppConfig::load_default().unwrap();
        assert_eq!(cfg.lexicon_path, PathBuf::from("/tmp/other.tsv"));
        assert_eq!(cfg.normalizer_timeout_ms, 250);

        env::set_var(ENV_CONFIG_PATH, dir.path().join("missing.toml").display().to_string());
        assert!(AppConfig::load_default().is_err());
        clear_env();
    }
}
