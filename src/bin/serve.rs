//! HTTP entrypoint: serves `/health`, `/analyze`, `/batch` and `/metrics`.

use anyhow::{Context, Result};
use tracing::info;

use ru_sentiment_analyzer::api::{self, AppState};
use ru_sentiment_analyzer::metrics::Metrics;
use ru_sentiment_analyzer::{init_tracing, AppConfig, SentimentAnalyzer};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing("ru_sentiment_analyzer=info,warn");

    let cfg = AppConfig::load_default()?;
    let analyzer = SentimentAnalyzer::from_config(&cfg);
    info!(
        lexicon_entries = analyzer.lexicon().len(),
        normalizer = analyzer.normalizer_name(),
        timeout_ms = cfg.normalizer_timeout_ms,
        "analyzer ready"
    );

    let metrics = Metrics::init(analyzer.lexicon().len())?;
    let app = api::router(AppState::new(analyzer)).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    info!(addr = %cfg.bind_addr, "listening");
    axum::serve(listener, app).await.context("http server")?;
    Ok(())
}
