use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use crate::reviews::{
    Facility, FacilityId, InMemoryReviewStore, Rating, RepositoryError, Review, ReviewStore,
};
use crate::summary::{
    summary_router, ReviewSummaryService, SummaryError, SummaryFailure, SummaryGateway,
};

pub(super) const SUMMARY_TEXT: &str = "AIによる要約結果です。";

pub(super) const ELIGIBLE: FacilityId = FacilityId(1);
pub(super) const TWO_REVIEWS: FacilityId = FacilityId(2);
pub(super) const SHORT_REVIEWS: FacilityId = FacilityId(3);
pub(super) const NO_REVIEWS: FacilityId = FacilityId(4);

fn facility(id: FacilityId, name: &str) -> Facility {
    Facility {
        id,
        name: name.to_string(),
        prefecture: "東京都".to_string(),
        address: "テスト住所".to_string(),
    }
}

fn review(facility_id: FacilityId, day_offset: i64, content: String) -> Review {
    let base = Utc
        .with_ymd_and_hms(2025, 4, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Review {
        facility_id,
        author: "testuser@example.com".to_string(),
        rating: Rating::new(5).expect("valid rating"),
        content,
        created_at: base + Duration::days(day_offset),
    }
}

/// Store seeded with one facility per eligibility scenario.
pub(super) fn seeded_store() -> InMemoryReviewStore {
    let store = InMemoryReviewStore::default();
    let long_content = "あ".repeat(100);

    store
        .insert_facility(facility(ELIGIBLE, "テストの公園"))
        .expect("insert");
    for (day, label) in [(0, "口コミ1"), (1, "口コミ2"), (2, "口コミ3")] {
        store
            .add_review(review(ELIGIBLE, day, format!("{label} {long_content}")))
            .expect("review");
    }

    store
        .insert_facility(facility(TWO_REVIEWS, "口コミ少ない公園"))
        .expect("insert");
    store
        .add_review(review(TWO_REVIEWS, 0, "a".repeat(150)))
        .expect("review");
    store
        .add_review(review(TWO_REVIEWS, 1, "b".repeat(150)))
        .expect("review");

    store
        .insert_facility(facility(SHORT_REVIEWS, "文字少ない公園"))
        .expect("insert");
    for day in 0..3 {
        // three reviews, 200 characters in total
        let content = if day == 0 { "c".repeat(66) } else { "d".repeat(67) };
        store
            .add_review(review(SHORT_REVIEWS, day, content))
            .expect("review");
    }

    store
        .insert_facility(facility(NO_REVIEWS, "新しい公園"))
        .expect("insert");

    store
}

/// Gateway double that records every text it receives.
#[derive(Default)]
pub(super) struct RecordingGateway {
    pub(super) received: Mutex<Vec<String>>,
}

#[async_trait]
impl SummaryGateway for RecordingGateway {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        self.received
            .lock()
            .expect("gateway mutex poisoned")
            .push(text.to_string());
        Ok(SUMMARY_TEXT.to_string())
    }
}

impl RecordingGateway {
    pub(super) fn calls(&self) -> Vec<String> {
        self.received.lock().expect("gateway mutex poisoned").clone()
    }
}

/// Gateway double that always fails the way an upstream outage would.
#[derive(Default)]
pub(super) struct FailingGateway {
    pub(super) attempts: AtomicUsize,
}

#[async_trait]
impl SummaryGateway for FailingGateway {
    async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SummaryFailure::Status(reqwest::StatusCode::BAD_GATEWAY).into())
    }
}

pub(super) struct UnavailableStore;

impl ReviewStore for UnavailableStore {
    fn get_facility(&self, _id: FacilityId) -> Result<Option<Facility>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_reviews(&self, _facility: &Facility) -> Result<Vec<Review>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service<G: SummaryGateway + 'static>(
    gateway: Arc<G>,
) -> ReviewSummaryService<InMemoryReviewStore, G> {
    ReviewSummaryService::new(Arc::new(seeded_store()), gateway)
}

pub(super) fn router_with_gateway<G: SummaryGateway + 'static>(gateway: Arc<G>) -> axum::Router {
    summary_router(Arc::new(build_service(gateway)))
}

pub(super) fn summary_path(id: impl std::fmt::Display) -> String {
    format!("/api/v1/playgrounds/{id}/summary")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
