// src/api.rs
//! HTTP surface: `/health`, `/analyze`, `/batch`.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use tower_http::cors::CorsLayer;

use crate::sentiment::{SentimentAnalyzer, SentimentResult};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/batch", post(analyze_batch))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    text: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchItem {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct BatchResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub result: SentimentResult,
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Json<SentimentResult> {
    Json(run(&state, &body.text).await)
}

async fn analyze_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<BatchItem>>,
) -> Json<Vec<BatchResult>> {
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let result = run(&state, &it.text).await;
        out.push(BatchResult { id: it.id, result });
    }
    Json(out)
}

async fn run(state: &AppState, text: &str) -> SentimentResult {
    let result = state.analyzer.analyze(text).await;
    counter!("sentiment_analyze_total", "sentiment" => result.sentiment.as_str()).increment(1);
    counter!("sentiment_words_matched_total").increment(result.word_count as u64);
    result
}
