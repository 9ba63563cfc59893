/// One fixed-size window over an ordered sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on the requested page.
    pub items: Vec<T>,
    /// `ceil(len / page_size)`; `0` for an empty input.
    pub total_pages: usize,
}

/// What: Number of pages needed for `len` items.
///
/// Details:
/// - A zero `page_size` is treated as one so the result is always defined.
#[must_use]
pub const fn page_count(len: usize, page_size: usize) -> usize {
    let size = if page_size == 0 { 1 } else { page_size };
    len.div_ceil(size)
}

/// What: Slice `records` into the window for `page_index`.
///
/// Inputs:
/// - `records`: Ordered sequence
/// - `page_index`: One-based page number
/// - `page_size`: Window length
///
/// Output:
/// - The window (clipped at the end) plus the total page count.
///
/// Details:
/// - An empty input yields no items and `0` pages, whatever `page_index` is.
/// - `page_index` of `0` or beyond the last page yields an empty window; clamping is the
///   caller's job.
#[must_use]
pub fn paginate<T: Clone>(records: &[T], page_index: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let total_pages = page_count(records.len(), size);
    let items = if page_index == 0 || page_index > total_pages {
        Vec::new()
    } else {
        let start = (page_index - 1).saturating_mul(size);
        records.iter().skip(start).take(size).cloned().collect()
    };
    Page { items, total_pages }
}
