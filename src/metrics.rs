// src/metrics.rs
//! Prometheus exposition for the HTTP host.
//!
//! Series:
//! - `sentiment_lexicon_entries` (gauge, set once at startup)
//! - `sentiment_analyze_total{sentiment}` (counter, one per analyzed text)
//! - `sentiment_words_matched_total` (counter, lexicon hits)

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and publish the lexicon size.
    /// Fails if a recorder is already installed in this process.
    pub fn init(lexicon_entries: usize) -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        gauge!("sentiment_lexicon_entries").set(lexicon_entries as f64);
        Ok(Self { handle })
    }

    /// `GET /metrics`, to be merged into the API router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(render))
            .with_state(self.handle.clone())
    }
}

async fn render(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
