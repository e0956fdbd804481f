use std::sync::Arc;

use tracing::info;

use super::aggregate::aggregate_reviews;
use super::client::{SummaryError, SummaryGateway};
use super::eligibility::{check_eligibility, Eligibility, IneligibleReason};
use crate::reviews::{FacilityId, RepositoryError, ReviewStore};

/// Result of a summary request that reached a business decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summarized(String),
    Ineligible(IneligibleReason),
}

/// Runs lookup, eligibility, aggregation, and the outbound call in sequence.
/// Nothing is cached between calls.
pub struct ReviewSummaryService<S, G> {
    store: Arc<S>,
    gateway: Arc<G>,
}

impl<S, G> ReviewSummaryService<S, G>
where
    S: ReviewStore + 'static,
    G: SummaryGateway + 'static,
{
    pub fn new(store: Arc<S>, gateway: Arc<G>) -> Self {
        Self { store, gateway }
    }

    pub async fn summarize_facility(
        &self,
        facility_id: FacilityId,
    ) -> Result<SummaryOutcome, SummaryServiceError> {
        let facility = self
            .store
            .get_facility(facility_id)?
            .ok_or(SummaryServiceError::FacilityNotFound(facility_id))?;

        let reviews = self.store.list_reviews(&facility)?;
        let contents: Vec<&str> = reviews.iter().map(|review| review.content.as_str()).collect();

        if let Eligibility::Ineligible(reason) = check_eligibility(&contents) {
            return Ok(SummaryOutcome::Ineligible(reason));
        }

        let combined = aggregate_reviews(&contents);
        let summary = self.gateway.summarize(&combined).await?;

        info!(
            facility_id = %facility.id,
            reviews = contents.len(),
            "review summary generated"
        );
        Ok(SummaryOutcome::Summarized(summary))
    }
}

/// Error raised by the summary service.
#[derive(Debug, thiserror::Error)]
pub enum SummaryServiceError {
    #[error("facility {0} not found")]
    FacilityNotFound(FacilityId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
