use std::error::Error;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::{error, warn};

use super::client::SummaryGateway;
use super::service::{ReviewSummaryService, SummaryOutcome, SummaryServiceError};
use crate::reviews::{FacilityId, ReviewStore};

pub const NOT_FOUND_MESSAGE: &str = "施設が見つかりません。";
pub const INTERNAL_ERROR_MESSAGE: &str = "サーバーでエラーが発生しました。";

/// Router builder exposing the review summary endpoint.
pub fn summary_router<S, G>(service: Arc<ReviewSummaryService<S, G>>) -> Router
where
    S: ReviewStore + 'static,
    G: SummaryGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/playgrounds/:facility_id/summary",
            get(summary_handler::<S, G>),
        )
        .with_state(service)
}

pub(crate) async fn summary_handler<S, G>(
    State(service): State<Arc<ReviewSummaryService<S, G>>>,
    Path(raw_id): Path<String>,
) -> Response
where
    S: ReviewStore + 'static,
    G: SummaryGateway + 'static,
{
    let Some(facility_id) = parse_facility_id(&raw_id) else {
        return error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE);
    };

    match service.summarize_facility(facility_id).await {
        Ok(SummaryOutcome::Summarized(summary)) => {
            (StatusCode::OK, axum::Json(json!({ "summary": summary }))).into_response()
        }
        Ok(SummaryOutcome::Ineligible(reason)) => {
            warn!(%facility_id, ?reason, "review summary rejected");
            error_response(StatusCode::BAD_REQUEST, reason.message())
        }
        Err(SummaryServiceError::FacilityNotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
        }
        Err(other) => {
            error!(%facility_id, error = %error_chain(&other), "review summary failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

/// Accepts digits only; `u64::from_str` would also take a leading `+`.
fn parse_facility_id(raw: &str) -> Option<FacilityId> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().map(FacilityId)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
