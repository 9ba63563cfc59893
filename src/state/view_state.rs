//! The view-state coordinator.
//!
//! [`ViewState`] is the single owner of the current [`ViewParameters`] and of
//! the source record set. Every mutation goes through a named operation that
//! recomputes the [`DerivedView`] from scratch, so the view is always a pure
//! function of `(source, params)` and never patched in place.

use tracing::{debug, info, warn};

use crate::error::ViewError;
use crate::index::{CategoryId, CategoryIndex};
use crate::logic::{DEFAULT_PAGE_SIZE, derive_view};
use crate::state::{DerivedView, Record, SortKey, ViewParameters, ViewStatus};

/// Where the one-shot catalog fetch stands.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SourcePhase {
    /// Fetch outstanding.
    Loading,
    /// Records loaded (possibly zero of them).
    Loaded,
    /// Fetch failed terminally with this message.
    Failed(String),
}

/// Owner of view parameters, the source set and the current derived view.
#[derive(Clone, Debug)]
pub struct ViewState {
    /// Source records as delivered by the record source.
    source: Vec<Record>,
    /// Current parameters.
    params: ViewParameters,
    /// Parameters `reset` returns to.
    defaults: ViewParameters,
    /// Fixed window length.
    page_size: usize,
    /// Last computed view.
    view: DerivedView,
    /// Fetch lifecycle.
    phase: SourcePhase,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    /// What: Create a coordinator in the loading state with default parameters.
    ///
    /// Inputs:
    /// - `page_size`: Records per page; `0` is raised to `1`
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self::with_defaults(page_size, ViewParameters::default())
    }

    /// What: Create a coordinator whose starting (and `reset`) parameters are `defaults`.
    ///
    /// Details:
    /// - `defaults.page_index` is ignored; sessions always start on page 1.
    #[must_use]
    pub fn with_defaults(page_size: usize, mut defaults: ViewParameters) -> Self {
        defaults.page_index = 1;
        Self {
            source: Vec::new(),
            params: defaults.clone(),
            defaults,
            page_size: page_size.max(1),
            view: DerivedView::default(),
            phase: SourcePhase::Loading,
        }
    }

    /// Read-only snapshot of the current parameters.
    #[must_use]
    pub const fn params(&self) -> &ViewParameters {
        &self.params
    }

    /// Read-only snapshot of the current derived view.
    #[must_use]
    pub const fn view(&self) -> &DerivedView {
        &self.view
    }

    /// Records per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Size of the loaded source set.
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source.len()
    }

    /// What: Rendering branch for the current state.
    #[must_use]
    pub fn status(&self) -> ViewStatus<'_> {
        match &self.phase {
            SourcePhase::Loading => ViewStatus::Loading,
            SourcePhase::Failed(msg) => ViewStatus::Error(msg),
            SourcePhase::Loaded if self.view.total_matched == 0 => ViewStatus::Empty,
            SourcePhase::Loaded => ViewStatus::Ready(&self.view),
        }
    }

    /// What: Replace the source set after a successful fetch.
    ///
    /// Details:
    /// - Leaves any error state.
    /// - Keeps the current page when it is still valid, otherwise clamps it into
    ///   `[1, max(1, total_pages)]`.
    pub fn load(&mut self, records: Vec<Record>) {
        info!(count = records.len(), "show catalog loaded");
        self.source = records;
        self.phase = SourcePhase::Loaded;
        self.recompute();
    }

    /// What: Enter the terminal error state.
    ///
    /// Details:
    /// - The view becomes empty with zero pages; parameters are kept so a later
    ///   successful `load` resumes where the user was.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "show catalog unavailable");
        self.source.clear();
        self.phase = SourcePhase::Failed(message);
        self.recompute();
    }

    /// What: Set the free-text query, reset to page 1, recompute.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.params.query = text.into();
        self.params.page_index = 1;
        self.recompute();
    }

    /// What: Select a category (or all with `None`), reset to page 1, recompute.
    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.params.category = category;
        self.params.page_index = 1;
        self.recompute();
    }

    /// What: Select a category from user text.
    ///
    /// Inputs:
    /// - `raw`: Numeric id in any textual form, a display name from `index`, or empty/`all`
    ///   for no filter
    ///
    /// # Errors
    /// - `InvalidParameter` when `raw` cannot be resolved; state is left untouched.
    pub fn set_category_raw(&mut self, raw: &str, index: &CategoryIndex) -> Result<(), ViewError> {
        let category = index.resolve_choice(raw)?;
        self.set_category(category);
        Ok(())
    }

    /// What: Change the ordering, reset to page 1, recompute.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.params.sort_key = key;
        self.params.page_index = 1;
        self.recompute();
    }

    /// What: Change the ordering from user text.
    ///
    /// # Errors
    /// - `InvalidParameter` for unknown keys; state is left untouched.
    pub fn set_sort_key_raw(&mut self, raw: &str) -> Result<(), ViewError> {
        let key = raw.parse::<SortKey>()?;
        self.set_sort_key(key);
        Ok(())
    }

    /// What: Jump to page `n` when it exists in the current view.
    ///
    /// Output:
    /// - `true` if the page changed; out-of-range requests are ignored and return `false`.
    pub fn set_page(&mut self, n: usize) -> bool {
        if n == 0 || n > self.view.total_pages {
            debug!(requested = n, total = self.view.total_pages, "page request ignored");
            return false;
        }
        if n == self.params.page_index {
            return false;
        }
        self.params.page_index = n;
        self.recompute();
        true
    }

    /// What: Advance one page if possible.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.params.page_index.saturating_add(1))
    }

    /// What: Go back one page if possible.
    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.params.page_index.saturating_sub(1))
    }

    /// What: Jump to the first page.
    pub fn first_page(&mut self) -> bool {
        self.set_page(1)
    }

    /// What: Jump to the last page.
    pub fn last_page(&mut self) -> bool {
        self.set_page(self.view.total_pages)
    }

    /// What: Restore the default parameters and recompute.
    pub fn reset(&mut self) {
        self.params = self.defaults.clone();
        self.recompute();
    }

    /// What: Rebuild the derived view from `(source, params)`.
    ///
    /// Details:
    /// - In the error state the view is empty with zero pages.
    /// - Clamps `page_index` into `[1, max(1, total_pages)]` and rebuilds once more when
    ///   clamping moved it.
    fn recompute(&mut self) {
        if matches!(self.phase, SourcePhase::Failed(_)) {
            self.params.page_index = 1;
            self.view = DerivedView::default();
            return;
        }
        let mut view = derive_view(&self.source, &self.params, self.page_size);
        let upper = view.total_pages.max(1);
        let clamped = self.params.page_index.clamp(1, upper);
        if clamped != self.params.page_index {
            debug!(
                from = self.params.page_index,
                to = clamped,
                "page index clamped"
            );
            self.params.page_index = clamped;
            view = derive_view(&self.source, &self.params, self.page_size);
        }
        self.view = view;
    }
}
