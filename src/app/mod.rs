//! Interactive runtime: terminal setup, background fetch, event loop and cleanup.

mod terminal;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::error::FetchError;
use crate::sources::{SourceConfig, deliver, fetch_records};
use crate::state::{AppState, Record, ViewParameters, ViewState};
use crate::ui::ui;

use terminal::{restore_terminal, setup_terminal};

/// Boxed error used by the application plumbing.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Redraw cadence while idle (drives the loading spinner).
const TICK: Duration = Duration::from_millis(120);

/// What: Build the coordinator for a session.
///
/// Inputs:
/// - `settings`: Effective settings (page size and default sort)
/// - `params`: Starting parameters from the command line
///
/// Output:
/// - A coordinator in the loading state whose `reset` target is the configured sort with
///   no search text and no category, while the current parameters are `params`.
#[must_use]
pub fn initial_view_state(settings: &Settings, params: &ViewParameters) -> ViewState {
    let defaults = ViewParameters {
        sort_key: settings.sort_key,
        ..ViewParameters::default()
    };
    let mut state = ViewState::with_defaults(settings.page_size, defaults);
    state.set_sort_key(params.sort_key);
    state.set_query(params.query.clone());
    state.set_category(params.category);
    state
}

/// What: Switch the terminal into UI mode and build the drawing handle.
///
/// Inputs:
/// - `setup`: Enters raw mode and the alternate screen
/// - `build`: Creates the terminal handle
/// - `restore`: Undoes `setup`
///
/// # Errors
/// - The `setup` or `build` failure. When `build` fails, `restore` has already run so the
///   shell is not left in raw mode.
fn enter_terminal<T, E>(
    setup: impl FnOnce() -> Result<()>,
    build: impl FnOnce() -> std::result::Result<T, E>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    setup()?;
    match build() {
        Ok(t) => Ok(t),
        Err(e) => {
            if let Err(restore_err) = restore() {
                tracing::warn!(error = %restore_err, "failed to restore terminal");
            }
            Err(e.into())
        }
    }
}

/// What: Spawn the blocking terminal reader.
///
/// Details:
/// - Polls with a short timeout so the thread notices `cancelled` and a closed channel.
fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    if let Ok(ev) = crossterm::event::read() {
                        if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
    });
}

/// What: Run the one catalog fetch on the runtime and report back over `tx`.
fn spawn_fetch(
    source: SourceConfig,
    tx: mpsc::UnboundedSender<std::result::Result<Vec<Record>, FetchError>>,
) {
    tokio::spawn(async move {
        let outcome = fetch_records(&source).await;
        let _ = tx.send(outcome);
    });
}

/// What: Run the catalog browser until the user quits.
///
/// Inputs:
/// - `settings`: Effective settings (source, page size, retry, default sort)
/// - `params`: Starting view parameters
///
/// Output:
/// - `Ok(())` on a clean exit; `Err` on terminal failures.
///
/// Details:
/// - With `SHOWSHELF_TEST_HEADLESS=1` no terminal is touched and no event thread is started;
///   the loop still runs the fetch and ticks so it can be driven by tests.
/// - The fetch runs once at startup; its outcome goes through [`deliver`].
/// - The terminal is restored before returning, including on render errors.
pub async fn run(settings: Settings, params: ViewParameters) -> Result<()> {
    let headless = std::env::var("SHOWSHELF_TEST_HEADLESS").ok().as_deref() == Some("1");
    let mut terminal = if headless {
        None
    } else {
        Some(enter_terminal(
            setup_terminal,
            || Terminal::new(CrosstermBackend::new(std::io::stdout())),
            restore_terminal,
        )?)
    };

    let mut app = AppState::new(initial_view_state(&settings, &params));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CEvent>();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    if !headless {
        spawn_event_thread(event_tx, cancelled.clone());
    }
    spawn_fetch(settings.source_config(), fetch_tx);

    let mut tick = tokio::time::interval(TICK);
    let outcome = loop {
        if let Some(t) = terminal.as_mut()
            && let Err(e) = t.draw(|f| ui(f, &mut app))
        {
            break Err(e.into());
        }
        select! {
            Some(ev) = event_rx.recv() => {
                if crate::events::handle_event(ev, &mut app) {
                    break Ok(());
                }
            }
            Some(result) = fetch_rx.recv() => {
                deliver(&mut app.view, result);
                app.reset_selection();
                tracing::info!(
                    shows = app.view.source_len(),
                    pages = app.view.view().total_pages,
                    "catalog delivered"
                );
            }
            _ = tick.tick() => {
                app.spinner = app.spinner.wrapping_add(1);
            }
        }
    };

    cancelled.store(true, Ordering::Relaxed);
    if !headless {
        restore_terminal()?;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CategoryId;
    use crate::state::SortKey;
    use crate::test_utils::record;
    use std::cell::Cell;

    #[test]
    /// What: CLI parameters apply to the session while reset returns to configured defaults
    fn initial_state_separates_params_from_defaults() {
        let settings = Settings {
            page_size: 2,
            sort_key: SortKey::TitleAsc,
            ..Settings::default()
        };
        let params = ViewParameters {
            query: "crime".into(),
            category: CategoryId::new(2),
            sort_key: SortKey::Oldest,
            page_index: 1,
        };
        let mut state = initial_view_state(&settings, &params);
        state.load(vec![
            record("1", "Crime A", 1, &[2]),
            record("2", "Comedy", 2, &[4]),
        ]);
        assert_eq!(state.params().query, "crime");
        assert_eq!(state.params().sort_key, SortKey::Oldest);
        assert_eq!(state.view().total_matched, 1);
        state.reset();
        assert_eq!(state.params().query, "");
        assert_eq!(state.params().category, None);
        assert_eq!(state.params().sort_key, SortKey::TitleAsc);
        assert_eq!(state.view().total_matched, 2);
    }

    #[test]
    /// What: A failure to build the terminal after setup still restores it
    ///
    /// - Input: Setup succeeds, build fails with an I/O error
    /// - Output: Error returned and restore called exactly once
    fn terminal_restored_when_build_fails() {
        let restored = Cell::new(0);
        let out: Result<()> = enter_terminal(
            || Ok(()),
            || Err(std::io::Error::other("no tty")),
            || {
                restored.set(restored.get() + 1);
                Ok(())
            },
        );
        assert!(out.is_err());
        assert_eq!(restored.get(), 1);

        let ok = enter_terminal(
            || Ok(()),
            || Ok::<_, std::io::Error>(7),
            || {
                restored.set(restored.get() + 1);
                Ok(())
            },
        );
        assert_eq!(ok.unwrap(), 7);
        assert_eq!(restored.get(), 1);
    }
}
