// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.

use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, StatusCode};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use ru_sentiment_analyzer::api::{self, AppState};
use ru_sentiment_analyzer::{Lexicon, SentimentAnalyzer};

const BODY_LIMIT: usize = 1024 * 1024;

fn test_router() -> Router {
    let lex = Lexicon::parse("хорошо\t2,0\nужасно\t-3,1\n😀\t2\n");
    api::router(AppState::new(SentimentAnalyzer::without_normalizer(lex)))
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, value)
}

#[tokio::test]
async fn health_is_ok() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "ok");
}

#[tokio::test]
async fn analyze_returns_result_fields() {
    let (status, body) =
        post_json(test_router(), "/analyze", json!({ "text": "это было ужасно" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "negative");
    assert_eq!(body["word_count"], 1);
    let score = body["score"].as_f64().expect("score is a number");
    assert!(score < 0.0 && score >= -4.0);
}

#[tokio::test]
async fn batch_keeps_order_and_ids() {
    let payload = json!([
        { "id": "a", "text": "хорошо 😀" },
        { "text": "ничего особенного" },
        { "id": "c", "text": "ужасно" }
    ]);
    let (status, body) = post_json(test_router(), "/batch", payload).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], "a");
    assert_eq!(items[0]["sentiment"], "positive");
    assert_eq!(items[0]["word_count"], 2);
    assert!(items[1]["id"].is_null());
    assert_eq!(items[1]["sentiment"], "neutral");
    assert_eq!(items[1]["score"], 0.0);
    assert_eq!(items[2]["id"], "c");
    assert_eq!(items[2]["sentiment"], "negative");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, _) = post_json(test_router(), "/analyze", json!({ "txt": "нет поля" })).await;
    assert!(status.is_client_error());
}
