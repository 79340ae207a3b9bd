// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod encoding;
pub mod lexicon;
pub mod metrics;
pub mod normalizer;
pub mod sentiment;
pub mod tables;
pub mod tokenizer;

// ---- Re-exports for stable public API ----
pub use crate::analyze::Sentiment;
pub use crate::api::router;
pub use crate::config::AppConfig;
pub use crate::lexicon::Lexicon;
pub use crate::sentiment::{SentimentAnalyzer, SentimentResult};
pub use crate::tokenizer::{tokenize, Token};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing once per process. `RUST_LOG` wins over `default_directives`;
/// `LOG_FORMAT=json` switches to JSON lines. Logs go to stderr.
pub fn init_tracing(default_directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}
