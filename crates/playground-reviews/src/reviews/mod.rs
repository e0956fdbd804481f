//! Facilities, their reviews, and the storage seam the summary pipeline reads from.

pub mod domain;
pub mod import;
pub mod store;

pub use domain::{Facility, FacilityId, Rating, RatingError, Review};
pub use import::{ReviewCsvImporter, ReviewImportError};
pub use store::{InMemoryReviewStore, RepositoryError, ReviewStore};
