//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

#[cfg(test)]
use chrono::{DateTime, Utc};

#[cfg(test)]
use crate::index::CategoryId;
#[cfg(test)]
use crate::state::Record;

#[cfg(test)]
/// What: Build a `CategoryId` from a literal known to be non-zero.
pub fn cat(n: u32) -> CategoryId {
    CategoryId::new(n).expect("test category ids are non-zero")
}

#[cfg(test)]
/// What: Build a record whose `last_updated` is `hours` after a fixed epoch.
///
/// Inputs:
/// - `id`, `title`: Identity and title
/// - `hours`: Offset used for ordering by time
/// - `cats`: Raw category ids
///
/// Output: Record with a derived description and image
pub fn record(id: &str, title: &str, hours: i64, cats: &[u32]) -> Record {
    Record {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        image: format!("https://img.example.test/{id}.jpg"),
        category_ids: cats.iter().map(|c| cat(*c)).collect(),
        season_count: 1,
        last_updated: at_hours(hours),
    }
}

#[cfg(test)]
/// What: Fixed-epoch timestamp `hours` later.
pub fn at_hours(hours: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_600_000_000 + hours * 3600, 0).expect("timestamp in range")
}
