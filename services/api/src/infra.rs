use metrics_exporter_prometheus::PrometheusHandle;
use playground_reviews::config::DataConfig;
use playground_reviews::error::AppError;
use playground_reviews::reviews::{InMemoryReviewStore, ReviewCsvImporter};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the review store from the configured CSV exports; empty when none are set.
pub(crate) fn build_review_store(data: &DataConfig) -> Result<InMemoryReviewStore, AppError> {
    let store = match (&data.facilities_csv, &data.reviews_csv) {
        (Some(facilities), reviews) => ReviewCsvImporter::from_paths(facilities, reviews.as_ref())?,
        (None, Some(_)) => {
            warn!("PLAYGROUND_REVIEWS_CSV ignored because PLAYGROUND_FACILITIES_CSV is not set");
            InMemoryReviewStore::default()
        }
        (None, None) => InMemoryReviewStore::default(),
    };

    info!(
        facilities = store.facility_count()?,
        reviews = store.review_count()?,
        "review store ready"
    );
    Ok(store)
}
