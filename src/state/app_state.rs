//! UI-session state wrapped around the view coordinator.

use ratatui::widgets::ListState;

use crate::index::CategoryIndex;
use crate::state::{Record, ViewState};

/// Everything the terminal UI needs between frames.
///
/// The coordinator stays the only authority over parameters and the derived
/// view; this struct adds purely presentational bits (row highlight, spinner
/// frame, quit flag).
#[derive(Debug)]
pub struct AppState {
    /// The view coordinator.
    pub view: ViewState,
    /// Category labels for the header and rows.
    pub categories: &'static CategoryIndex,
    /// Highlighted row within the current page.
    pub selected: usize,
    /// Ratatui list state mirroring `selected`.
    pub list_state: ListState,
    /// Spinner frame counter while loading.
    pub spinner: usize,
    /// Set when the user asked to leave.
    pub should_quit: bool,
}

impl AppState {
    /// What: Wrap `view` with the standard category table.
    #[must_use]
    pub fn new(view: ViewState) -> Self {
        let mut out = Self {
            view,
            categories: CategoryIndex::standard(),
            selected: 0,
            list_state: ListState::default(),
            spinner: 0,
            should_quit: false,
        };
        out.clamp_selection();
        out
    }

    /// Record under the highlight, if the page has any.
    #[must_use]
    pub fn selected_record(&self) -> Option<&Record> {
        self.view.view().items.get(self.selected)
    }

    /// What: Keep the highlight inside the current page.
    ///
    /// Details:
    /// - Clears the list selection when the page is empty.
    pub fn clamp_selection(&mut self) {
        let len = self.view.view().items.len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// What: Move the highlight by `delta` rows, clamped to the page.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.view.view().items.len();
        if len == 0 {
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    /// What: Put the highlight back on the first row (after the page contents changed).
    pub fn reset_selection(&mut self) {
        self.selected = 0;
        self.clamp_selection();
    }
}
