//! Non-interactive `--list` mode: print one page of the catalog and exit.

use std::fmt::Write;

use crate::index::CategoryIndex;
use crate::sources::{SourceConfig, deliver, fetch_records};
use crate::state::{ViewState, ViewStatus};
use crate::util::{plural, short_date};

/// What: Render the coordinator's current state as plain text.
///
/// Inputs:
/// - `state`: Coordinator to describe
/// - `index`: Category labels
///
/// Output:
/// - Multi-line text; one line per show on the current page, preceded by a summary line.
///
/// Details:
/// - Loading, error and empty states each get a single distinct line.
#[must_use]
pub fn render_page_text(state: &ViewState, index: &CategoryIndex) -> String {
    let params = state.params();
    match state.status() {
        ViewStatus::Loading => "Loading shows…\n".to_string(),
        ViewStatus::Error(msg) => format!("Could not load shows: {msg}\n"),
        ViewStatus::Empty => "No shows match the current filters.\n".to_string(),
        ViewStatus::Ready(view) => {
            let mut out = format!(
                "Page {} of {} · {} · sorted by {}\n",
                params.page_index,
                view.total_pages,
                plural(view.total_matched, "show", "shows"),
                params.sort_key.label()
            );
            for r in &view.items {
                let labels = index.labels(&r.category_ids);
                let cats = if labels.is_empty() {
                    "No categories".to_string()
                } else {
                    labels.join(", ")
                };
                let _ = writeln!(
                    out,
                    "  {}  {}  [{}]  {}",
                    short_date(&r.last_updated),
                    r.title,
                    plural(r.season_count as usize, "season", "seasons"),
                    cats
                );
            }
            out
        }
    }
}

/// What: Fetch the catalog, apply the requested parameters and print one page.
///
/// Inputs:
/// - `state`: Coordinator already configured with the starting parameters
/// - `source`: Where to fetch from
/// - `page`: Page to print
///
/// Output:
/// - Process exit code: `0` on success (including an empty result), `1` when the fetch failed.
pub async fn handle_list(mut state: ViewState, source: &SourceConfig, page: usize) -> u8 {
    tracing::info!(url = %source.url, page, "list mode requested from CLI");
    deliver(&mut state, fetch_records(source).await);
    if page != 1 && !state.set_page(page) {
        tracing::warn!(page, total = state.view().total_pages, "requested page out of range");
    }
    let text = render_page_text(&state, CategoryIndex::standard());
    print!("{text}");
    u8::from(matches!(state.status(), ViewStatus::Error(_)))
}
