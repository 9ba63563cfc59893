use std::cmp::Ordering;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};

use crate::state::{Record, SortKey};

/// What: Order `records` by `key` into a new vector.
///
/// Inputs:
/// - `records`: Filtered references (not modified)
/// - `key`: Ordering policy
///
/// Output:
/// - A freshly ordered vector of the same references.
///
/// Details:
/// - All policies are stable: records with equal keys keep their input order, including
///   under the descending policies, so page contents do not shuffle between renders.
/// - Titles compare on their trimmed form with the root-locale collator at secondary
///   strength: accents sort next to their base letter and case is ignored.
#[must_use]
pub fn sort_records<'a>(records: &[&'a Record], key: SortKey) -> Vec<&'a Record> {
    let mut out = records.to_vec();
    match key {
        SortKey::Newest => out.sort_by(|a, b| b.last_updated.cmp(&a.last_updated)),
        SortKey::Oldest => out.sort_by(|a, b| a.last_updated.cmp(&b.last_updated)),
        SortKey::TitleAsc => {
            let titles = TitleOrder::new();
            out.sort_by(|a, b| titles.compare(a, b));
        }
        SortKey::TitleDesc => {
            let titles = TitleOrder::new();
            out.sort_by(|a, b| titles.compare(a, b).reverse());
        }
    }
    out
}

/// Title comparison: locale collation, or a lowercase fold if collation data is unavailable.
enum TitleOrder {
    /// Root-locale collator ignoring case.
    Collated(CollatorBorrowed<'static>),
    /// Code-point order of the lowercased titles.
    Folded,
}

impl TitleOrder {
    fn new() -> Self {
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Secondary);
        match Collator::try_new(CollatorPreferences::default(), options) {
            Ok(collator) => Self::Collated(collator),
            Err(e) => {
                tracing::warn!(error = %e, "title collator unavailable; using lowercase order");
                Self::Folded
            }
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let (a, b) = (a.title.trim(), b.title.trim());
        match self {
            Self::Collated(collator) => collator.compare(a, b),
            Self::Folded => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}
