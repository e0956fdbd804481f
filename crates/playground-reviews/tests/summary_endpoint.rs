use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use playground_reviews::reviews::{InMemoryReviewStore, ReviewCsvImporter};
use playground_reviews::summary::{
    summary_router, GradioSummaryClient, ReviewSummaryService, SummaryClientConfig,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FACILITIES: &str = "id,name,prefecture,address\n\
10,中央公園,東京都,新宿区\n\
11,口コミ少ない公園,東京都,港区\n";

fn reviews_csv() -> String {
    let long = "あ".repeat(100);
    format!(
        "facility_id,author,rating,content,created_at\n\
10,a@example.com,5,口コミ1 {long},2025-05-01T09:00:00Z\n\
10,b@example.com,3,口コミ2 {long},2025-05-02T09:00:00Z\n\
10,c@example.com,4,口コミ3 {long},2025-05-03T09:00:00Z\n\
11,a@example.com,5,{long},2025-05-01T09:00:00Z\n"
    )
}

fn seeded_store() -> InMemoryReviewStore {
    ReviewCsvImporter::from_readers(FACILITIES.as_bytes(), reviews_csv().as_bytes())
        .expect("seed data imports")
}

fn app(config: &SummaryClientConfig) -> axum::Router {
    let client = GradioSummaryClient::new(config).expect("client builds");
    let service = ReviewSummaryService::new(Arc::new(seeded_store()), Arc::new(client));
    summary_router(Arc::new(service))
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("route executes");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&body).expect("json body"))
}

#[tokio::test]
async fn eligible_facility_round_trips_through_summarizer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": ["AIによる要約結果です。"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let router = app(&SummaryClientConfig::new(server.uri()));
    let (status, body) = get_json(router, "/api/v1/playgrounds/10/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "AIによる要約結果です。" }));

    let requests = server.received_requests().await.expect("recording enabled");
    let sent: Value = serde_json::from_slice(&requests[0].body).expect("json request");
    let text = sent["data"][0].as_str().expect("text payload");
    assert!(text.starts_with("口コミ3 "));
    assert_eq!(text.matches("\n\n").count(), 2);
}

#[tokio::test]
async fn summarizer_outage_returns_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let router = app(&SummaryClientConfig::new(server.uri()));
    let (status, body) = get_json(router, "/api/v1/playgrounds/10/summary").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "サーバーでエラーが発生しました。" }));
}

#[tokio::test]
async fn missing_endpoint_fails_eligible_requests_only() {
    let router = app(&SummaryClientConfig::default());

    let (status, body) = get_json(router.clone(), "/api/v1/playgrounds/10/summary").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "サーバーでエラーが発生しました。" }));

    let (status, body) = get_json(router, "/api/v1/playgrounds/11/summary").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "口コミが3件未満のため、要約できません。" }));
}

#[tokio::test]
async fn ineligible_facility_never_reaches_summarizer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": ["unused"] })))
        .expect(0)
        .mount(&server)
        .await;

    let router = app(&SummaryClientConfig::new(server.uri()));
    let (status, _) = get_json(router, "/api/v1/playgrounds/11/summary").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
