use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Facility, FacilityId, Review};

/// Read side of the facility/review storage consumed by the summary pipeline.
pub trait ReviewStore: Send + Sync {
    fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>, RepositoryError>;

    /// Every review of the facility, most recent first. Never paged.
    fn list_reviews(&self, facility: &Facility) -> Result<Vec<Review>, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct FacilityEntry {
    facility: Option<Facility>,
    reviews: Vec<Review>,
}

/// Mutex-guarded store used by the service binary and the test suites.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReviewStore {
    entries: Arc<Mutex<BTreeMap<FacilityId, FacilityEntry>>>,
}

impl InMemoryReviewStore {
    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<FacilityId, FacilityEntry>>, RepositoryError> {
        self.entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("review store mutex poisoned".to_string()))
    }

    pub fn insert_facility(&self, facility: Facility) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        let entry = guard.entry(facility.id).or_default();
        if entry.facility.is_some() {
            return Err(RepositoryError::Conflict);
        }
        entry.facility = Some(facility);
        Ok(())
    }

    pub fn add_review(&self, review: Review) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&review.facility_id) {
            Some(entry) if entry.facility.is_some() => {
                entry.reviews.push(review);
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    pub fn facility_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn review_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.values().map(|entry| entry.reviews.len()).sum())
    }
}

impl ReviewStore for InMemoryReviewStore {
    fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(&id).and_then(|entry| entry.facility.clone()))
    }

    fn list_reviews(&self, facility: &Facility) -> Result<Vec<Review>, RepositoryError> {
        let guard = self.lock()?;
        let mut reviews = guard
            .get(&facility.id)
            .map(|entry| entry.reviews.clone())
            .unwrap_or_default();
        // stable, so equal timestamps keep insertion order
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }
}
