//! The derived-view pipeline: filter, then sort, then paginate.
//!
//! Every stage is a pure function over borrowed records; the source set is
//! never reordered or modified. [`derive_view`] glues the stages together in
//! their fixed order and is what the coordinator calls on every change.

pub mod filter;
pub mod paginate;
pub mod sort;

pub use filter::filter_records;
pub use paginate::{Page, page_count, paginate};
pub use sort::sort_records;

use crate::state::{DerivedView, Record, ViewParameters};

/// Records per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// What: Filter and order `records` for `params`, ignoring the page index.
///
/// Output:
/// - Every matching record in display order.
#[must_use]
pub fn matched_records<'a>(records: &'a [Record], params: &ViewParameters) -> Vec<&'a Record> {
    let filtered = filter_records(records, &params.query, params.category);
    sort_records(&filtered, params.sort_key)
}

/// What: Compute the full derived view for `params`.
///
/// Inputs:
/// - `records`: Source set
/// - `params`: Current parameters; `page_index` is used as given (no clamping)
/// - `page_size`: Window length
///
/// Output:
/// - Fresh [`DerivedView`] with cloned page items.
#[must_use]
pub fn derive_view(records: &[Record], params: &ViewParameters, page_size: usize) -> DerivedView {
    let ordered = matched_records(records, params);
    let page = paginate(&ordered, params.page_index, page_size);
    DerivedView {
        items: page.items.into_iter().cloned().collect(),
        total_matched: ordered.len(),
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortKey;
    use crate::test_utils::{cat, record};

    #[test]
    /// What: Derivation is idempotent for identical inputs
    fn derive_view_is_idempotent() {
        let records: Vec<Record> = (0..30)
            .map(|i| {
                let cat = 1 + (i as u32 % 3);
                record(&i.to_string(), &format!("Show {}", i % 7), i % 5, &[cat])
            })
            .collect();
        let params = ViewParameters {
            query: "show".into(),
            category: Some(cat(2)),
            sort_key: SortKey::TitleDesc,
            page_index: 2,
        };
        let a = derive_view(&records, &params, 4);
        let b = derive_view(&records, &params, 4);
        assert_eq!(a, b);
        assert_eq!(a.total_matched, 10);
        assert_eq!(a.total_pages, 3);
        assert_eq!(a.items.len(), 4);
    }

    #[test]
    /// What: Filtering happens before pagination, so counts reflect the filtered population
    fn counts_follow_filtered_population() {
        let records = vec![
            record("1", "True Crime Stories", 2, &[2]),
            record("2", "Comedy Hour", 1, &[4]),
        ];
        let params = ViewParameters {
            query: "crime".into(),
            ..ViewParameters::default()
        };
        let view = derive_view(&records, &params, DEFAULT_PAGE_SIZE);
        assert_eq!(view.total_matched, 1);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.items[0].id, "1");
    }
}
