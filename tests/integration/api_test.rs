//! HTTP API tests

use crate::common::{analyzer, irvine_request};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use homeconfidence::api::{router, AppState};
use homeconfidence::explain::{ExplainRequest, Explainer, TemplateExplainer};
use homeconfidence::report::AnalysisResult;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct FailingExplainer;

#[async_trait]
impl Explainer for FailingExplainer {
    async fn explain(&self, _request: &ExplainRequest) -> anyhow::Result<String> {
        anyhow::bail!("upstream unavailable")
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn app_with(explainer: Arc<dyn Explainer>) -> Router {
    router(AppState::new(Arc::new(analyzer()), explainer))
}

fn app() -> Router {
    app_with(Arc::new(TemplateExplainer::new()))
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn explain_body() -> Value {
    json!({
        "confidence_score": 0.62,
        "prob_downside": 0.31,
        "p10": 690000.0,
        "p50": 820000.0,
        "p90": 960000.0,
        "offer_price": 770000.0,
        "fair_value_low": 712500.0,
        "fair_value_high": 787500.0,
        "fragility_index": "High",
        "risk_tolerance": 0.5
    })
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_analyze_returns_result() {
    let body = serde_json::to_string(&irvine_request(Some(42))).unwrap();
    let response = app().oneshot(post_json("/analyze", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let value = read_json(response).await;
    assert_eq!(value["market_data"], "zip");
    assert_eq!(value["seed"], 42);

    let result: AnalysisResult = serde_json::from_value(value).unwrap();
    assert!(result.p10 <= result.p50 && result.p50 <= result.p90);
}

#[tokio::test]
async fn test_analyze_is_reproducible_over_http() {
    let body = serde_json::to_string(&irvine_request(Some(7))).unwrap();
    let first = read_json(app().oneshot(post_json("/analyze", body.clone())).await.unwrap()).await;
    let second = read_json(app().oneshot(post_json("/analyze", body)).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_analyze_validation_error() {
    let mut request = irvine_request(None);
    request.horizon_years = 31;
    let body = serde_json::to_string(&request).unwrap();

    let response = app().oneshot(post_json("/analyze", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let detail = read_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("horizon_years"));
}

#[tokio::test]
async fn test_analyze_malformed_json() {
    let response = app()
        .oneshot(post_json("/analyze", "{not json".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["detail"].is_string());
}

#[tokio::test]
async fn test_analyze_missing_field() {
    let response = app()
        .oneshot(post_json("/analyze", json!({ "zip": "92602" }).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(read_json(response).await["detail"].is_string());
}

#[tokio::test]
async fn test_fallback_flagged_in_response() {
    let mut request = irvine_request(Some(3));
    request.zip = "30301".to_string();
    let body = serde_json::to_string(&request).unwrap();

    let value = read_json(app().oneshot(post_json("/analyze", body)).await.unwrap()).await;
    assert_eq!(value["market_data"], "national_fallback");
}

#[tokio::test]
async fn test_explain_with_template() {
    let response = app()
        .oneshot(post_json("/explain", explain_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let value = read_json(response).await;
    let text = value["explanation"].as_str().unwrap();
    assert!(!text.is_empty());
}

#[tokio::test]
async fn test_explain_provider_failure_is_bad_gateway() {
    let response = app_with(Arc::new(FailingExplainer))
        .oneshot(post_json("/explain", explain_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let detail = read_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("LLM error:"));
}

#[tokio::test]
async fn test_unknown_route() {
    let response = app()
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
