//! CSV seeding for the in-memory review store.
//!
//! Facilities are read from `id,name,prefecture,address` exports and reviews
//! from `facility_id,author,rating,content,created_at` exports. Timestamps
//! accept RFC 3339, `YYYY-MM-DD HH:MM:SS` (treated as UTC) or a bare date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::domain::{Facility, FacilityId, Rating, RatingError, Review};
use super::store::{InMemoryReviewStore, RepositoryError};

#[derive(Debug)]
pub enum ReviewImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Rating { line: usize, source: RatingError },
    Timestamp { line: usize, value: String },
    Store { line: usize, source: RepositoryError },
}

impl std::fmt::Display for ReviewImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewImportError::Io(err) => write!(f, "failed to read seed export: {}", err),
            ReviewImportError::Csv(err) => write!(f, "invalid seed CSV data: {}", err),
            ReviewImportError::Rating { line, source } => {
                write!(f, "row {}: {}", line, source)
            }
            ReviewImportError::Timestamp { line, value } => {
                write!(f, "row {}: unrecognised timestamp '{}'", line, value)
            }
            ReviewImportError::Store { line, source } => {
                write!(f, "row {}: could not store record: {}", line, source)
            }
        }
    }
}

impl std::error::Error for ReviewImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReviewImportError::Io(err) => Some(err),
            ReviewImportError::Csv(err) => Some(err),
            ReviewImportError::Rating { source, .. } => Some(source),
            ReviewImportError::Timestamp { .. } => None,
            ReviewImportError::Store { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ReviewImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReviewImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct FacilityRow {
    id: u64,
    name: String,
    #[serde(default)]
    prefecture: String,
    #[serde(default)]
    address: String,
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    facility_id: u64,
    author: String,
    rating: u8,
    content: String,
    created_at: String,
}

pub struct ReviewCsvImporter;

impl ReviewCsvImporter {
    pub fn from_paths<P, Q>(
        facilities: P,
        reviews: Option<Q>,
    ) -> Result<InMemoryReviewStore, ReviewImportError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let store = InMemoryReviewStore::default();
        Self::load_facilities(&store, std::fs::File::open(facilities)?)?;
        if let Some(path) = reviews {
            Self::load_reviews(&store, std::fs::File::open(path)?)?;
        }
        Ok(store)
    }

    pub fn from_readers<F: Read, R: Read>(
        facilities: F,
        reviews: R,
    ) -> Result<InMemoryReviewStore, ReviewImportError> {
        let store = InMemoryReviewStore::default();
        Self::load_facilities(&store, facilities)?;
        Self::load_reviews(&store, reviews)?;
        Ok(store)
    }

    /// Returns the number of facilities added.
    pub fn load_facilities<R: Read>(
        store: &InMemoryReviewStore,
        reader: R,
    ) -> Result<usize, ReviewImportError> {
        let mut count = 0;
        for (index, row) in csv_reader(reader).deserialize::<FacilityRow>().enumerate() {
            let row = row?;
            store
                .insert_facility(Facility {
                    id: FacilityId(row.id),
                    name: row.name,
                    prefecture: row.prefecture,
                    address: row.address,
                })
                .map_err(|source| ReviewImportError::Store {
                    line: data_line(index),
                    source,
                })?;
            count += 1;
        }
        Ok(count)
    }

    /// Returns the number of reviews added. Facilities must be loaded first.
    pub fn load_reviews<R: Read>(
        store: &InMemoryReviewStore,
        reader: R,
    ) -> Result<usize, ReviewImportError> {
        let mut count = 0;
        for (index, row) in csv_reader(reader).deserialize::<ReviewRow>().enumerate() {
            let row = row?;
            let line = data_line(index);
            let rating = Rating::new(row.rating)
                .map_err(|source| ReviewImportError::Rating { line, source })?;
            let created_at = parse_timestamp(&row.created_at).ok_or_else(|| {
                ReviewImportError::Timestamp {
                    line,
                    value: row.created_at.clone(),
                }
            })?;

            store
                .add_review(Review {
                    facility_id: FacilityId(row.facility_id),
                    author: row.author,
                    rating,
                    content: row.content,
                    created_at,
                })
                .map_err(|source| ReviewImportError::Store { line, source })?;
            count += 1;
        }
        Ok(count)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    // content is kept verbatim; only the header row is trimmed
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

/// Header occupies line 1.
fn data_line(index: usize) -> usize {
    index + 2
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
