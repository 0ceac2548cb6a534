//! End-to-end tests for the HTTP surface, driving the router directly.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use socialrank::resolver::{AccountMetrics, MetricsResolver, ResolveError, ResolveResult};
use socialrank::server::{AppState, router};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

/// Stub resolver: fails handles starting with `doesnotexist`, succeeds on
/// everything else, and counts calls.
struct StubResolver {
    calls: AtomicUsize,
}

impl StubResolver {
    fn new() -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0) })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricsResolver for StubResolver {
    async fn resolve(&self, handle: &str) -> ResolveResult {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        if handle.starts_with("doesnotexist") {
            Err(ResolveError::Provider("account not found".to_string()))
        } else {
            Ok(AccountMetrics {
                display_name: handle.to_uppercase(),
                handle: handle.to_string(),
                followers: Some(1_000_000),
                average_views: None,
                average_likes: Some(40_000),
                engagement_rate: Some(3.456),
                category: Some("Science".to_string()),
                location: None,
            })
        }
    }
}

fn app(resolver: Arc<StubResolver>) -> Router {
    router(AppState { resolver })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(StubResolver::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_empty_handles_rejected_without_dispatch() {
    let stub = StubResolver::new();
    let (status, body) = post_json(app(Arc::clone(&stub)), "/api/analyze", json!({ "handles": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!parse(&body)["message"].as_str().unwrap().is_empty());
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_missing_handles_field_rejected() {
    let (status, body) = post_json(app(StubResolver::new()), "/api/analyze", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!parse(&body)["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_malformed_body_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = app(StubResolver::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_whitespace_only_handles_rejected() {
    let stub = StubResolver::new();
    let (status, _) = post_json(app(Arc::clone(&stub)), "/api/analyze", json!({ "handles": ["   ", "@", ""] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_partial_success_with_dedup() {
    let stub = StubResolver::new();
    let (status, body) = post_json(
        app(Arc::clone(&stub)),
        "/api/analyze",
        json!({ "handles": ["@nasa", "doesnotexist123456", "nasa"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // `@nasa` and `nasa` canonicalize to the same handle.
    assert_eq!(stub.call_count(), 2);

    let parsed = parse(&body);
    let data = parsed["data"].as_array().unwrap();
    let errors = parsed["errors"].as_array().unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["handle"], "nasa");
    assert_eq!(data[0]["displayName"], "NASA");
    assert_eq!(data[0]["followers"], 1_000_000);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["handle"], "doesnotexist123456");
    assert_eq!(errors[0]["message"], "account not found");
}

#[tokio::test]
async fn test_analyze_all_failing_batch_is_still_ok() {
    let (status, body) = post_json(
        app(StubResolver::new()),
        "/api/analyze",
        json!({ "handles": ["@doesnotexist123456"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let parsed = parse(&body);
    assert_eq!(parsed["data"].as_array().unwrap().len(), 0);
    let errors = parsed["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["handle"], "doesnotexist123456");
    assert!(!errors[0]["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_export_csv_download() {
    let records = json!({
        "records": [{
            "displayName": "NASA",
            "handle": "nasa",
            "followers": 1_000_000,
            "engagementRate": 3.456
        }]
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/export/csv")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(records.to_string()))
        .unwrap();

    let response = app(StubResolver::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));

    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"account-metrics-"));
    assert!(disposition.ends_with(".csv\""));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.lines().next().unwrap().contains(",Followers,"));
    assert!(text.contains("NASA,@nasa,1000000,,,3.46,,"));
}

#[tokio::test]
async fn test_export_xlsx_download() {
    let records = json!({ "records": [] });

    let request = Request::builder()
        .method("POST")
        .uri("/api/export/xlsx")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(records.to_string()))
        .unwrap();

    let response = app(StubResolver::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.ends_with(".xlsx\""));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[0..2], b"PK");
}

#[tokio::test]
async fn test_export_missing_records_rejected() {
    let (status, _) = post_json(app(StubResolver::new()), "/api/export/csv", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
