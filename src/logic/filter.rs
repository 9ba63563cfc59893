use crate::index::CategoryId;
use crate::state::Record;

/// What: Narrow `records` by free text and category.
///
/// Inputs:
/// - `records`: Full source set (not modified)
/// - `query`: Free text; surrounding whitespace is ignored and an empty query matches all
/// - `category`: Optional category the record must carry
///
/// Output:
/// - References to the matching records, in input order.
///
/// Details:
/// - Text matches when the title OR the description contains the query, compared after
///   Unicode lowercasing on both sides.
/// - Both predicates must hold.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [Record],
    query: &str,
    category: Option<CategoryId>,
) -> Vec<&'a Record> {
    let needle = fold_query(query);
    records
        .iter()
        .filter(|r| matches_query(r, &needle) && matches_category(r, category))
        .collect()
}

/// What: Normalize raw query text into the form [`matches_query`] expects.
#[must_use]
pub fn fold_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// What: Check a record against an already folded query.
///
/// Inputs:
/// - `needle`: Output of [`fold_query`]
#[must_use]
pub fn matches_query(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record.title.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
}

/// What: Check category membership; `None` admits every record.
#[must_use]
pub fn matches_category(record: &Record, category: Option<CategoryId>) -> bool {
    category.is_none_or(|c| record.category_ids.contains(&c))
}
