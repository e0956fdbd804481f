use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier wrapper for listed facilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacilityId(pub u64);

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playground or child-care venue that reviews are attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub prefecture: String,
    pub address: String,
}

/// Star rating constrained to 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("rating must be between 1 and 5 (got {value})")]
    OutOfRange { value: u8 },
}

/// User-submitted comment on a facility. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub facility_id: FacilityId,
    pub author: String,
    pub rating: Rating,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
