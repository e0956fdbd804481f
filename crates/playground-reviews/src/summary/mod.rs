//! AI summaries of a facility's reviews.
//!
//! A facility qualifies once it has at least three reviews totalling 300
//! characters. Qualifying reviews are joined into one text and sent to the
//! hosted summarizer; the endpoint answers with the summary, a 400 carrying
//! the eligibility reason, a 404 for unknown facilities, or a generic 500.

pub mod aggregate;
pub mod client;
pub mod eligibility;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_reviews, REVIEW_SEPARATOR};
pub use client::{
    GradioSummaryClient, SummaryClientConfig, SummaryError, SummaryFailure, SummaryGateway,
};
pub use eligibility::{
    check_eligibility, total_chars, Eligibility, IneligibleReason, MIN_REVIEW_COUNT,
    MIN_TOTAL_CHARS,
};
pub use router::{summary_router, INTERNAL_ERROR_MESSAGE, NOT_FOUND_MESSAGE};
pub use service::{ReviewSummaryService, SummaryOutcome, SummaryServiceError};
