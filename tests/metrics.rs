// tests/metrics.rs
//
// The Prometheus recorder is process-global, so everything that needs it
// lives in a single test.

use axum::body::{self, Body};
use axum::Router;
use http::{Request, StatusCode};
use tower::ServiceExt as _;

use ru_sentiment_analyzer::api::{self, AppState};
use ru_sentiment_analyzer::metrics::Metrics;
use ru_sentiment_analyzer::{Lexicon, SentimentAnalyzer};

const BODY_LIMIT: usize = 1_048_576;

async fn body_text(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn analyze_requests_show_up_in_exposition() {
    let lex = Lexicon::parse("хорошо\t2,0\nужасно\t-3,1\n😀\t2\n");
    let metrics = Metrics::init(lex.len()).expect("recorder installs once per process");
    let app = api::router(AppState::new(SentimentAnalyzer::without_normalizer(lex)))
        .merge(metrics.router());

    for text in ["хорошо 😀", "это было ужасно"] {
        let req = Request::post("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::json!({ "text": text }).to_string()))
            .unwrap();
        let (status, _) = body_text(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, text) =
        body_text(app, Request::get("/metrics").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);

    for needle in [
        "sentiment_lexicon_entries",
        r#"sentiment_analyze_total{sentiment="positive"} 1"#,
        r#"sentiment_analyze_total{sentiment="negative"} 1"#,
        "sentiment_words_matched_total 3",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}
