//! Keyboard handling: maps terminal events onto coordinator operations.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::AppState;

/// What: Dispatch one terminal event.
///
/// Inputs:
/// - `ev`: Event read from the terminal
/// - `app`: Mutable application state
///
/// Output:
/// - `true` when the application should exit.
///
/// Details:
/// - Only key presses are handled; resize events simply cause the next redraw.
pub fn handle_event(ev: CEvent, app: &mut AppState) -> bool {
    if let CEvent::Key(ke) = ev {
        handle_key(app, ke);
    }
    app.should_quit
}

/// What: Apply a key press to the application state.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `ke`: Key event
///
/// Details:
/// - Typing edits the search text; Backspace removes the last character and Ctrl+U clears it.
/// - Tab / Shift+Tab cycle the category filter; F2 or Ctrl+S cycles the sort key.
/// - Left/Right and PageUp/PageDown change page; Home/End jump to the first/last page.
/// - Up/Down move the highlight; Ctrl+R resets all parameters; Esc or Ctrl+C quits.
/// - Any change to the page contents puts the highlight back on the first row.
pub fn handle_key(app: &mut AppState, ke: KeyEvent) {
    if ke.kind != KeyEventKind::Press {
        return;
    }
    let ctrl = ke.modifiers.contains(KeyModifiers::CONTROL);
    let changed = match ke.code {
        KeyCode::Esc => {
            app.should_quit = true;
            false
        }
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            false
        }
        KeyCode::Char('r') if ctrl => {
            tracing::debug!("reset requested from keyboard");
            app.view.reset();
            true
        }
        KeyCode::Char('s') if ctrl => cycle_sort(app),
        KeyCode::F(2) => cycle_sort(app),
        KeyCode::Char('u') if ctrl => edit_query(app, |q| q.clear()),
        KeyCode::Tab => cycle_category(app, true),
        KeyCode::BackTab => cycle_category(app, false),
        KeyCode::Left | KeyCode::PageUp => app.view.prev_page(),
        KeyCode::Right | KeyCode::PageDown => app.view.next_page(),
        KeyCode::Home => app.view.first_page(),
        KeyCode::End => app.view.last_page(),
        KeyCode::Up => {
            app.move_selection(-1);
            false
        }
        KeyCode::Down => {
            app.move_selection(1);
            false
        }
        KeyCode::Backspace => edit_query(app, |q| {
            q.pop();
        }),
        KeyCode::Char(ch) if !ctrl && !ke.modifiers.contains(KeyModifiers::ALT) => {
            edit_query(app, |q| q.push(ch))
        }
        _ => false,
    };
    if changed {
        app.reset_selection();
    }
}

fn cycle_sort(app: &mut AppState) -> bool {
    let next = app.view.params().sort_key.next();
    app.view.set_sort_key(next);
    true
}

fn cycle_category(app: &mut AppState, forward: bool) -> bool {
    let next = app.categories.cycle(app.view.params().category, forward);
    app.view.set_category(next);
    true
}

/// What: Edit a copy of the search text and hand it to the coordinator when it changed.
fn edit_query(app: &mut AppState, edit: impl FnOnce(&mut String)) -> bool {
    let mut query = app.view.params().query.clone();
    edit(&mut query);
    if query == app.view.params().query {
        return false;
    }
    app.view.set_query(query);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CategoryId;
    use crate::state::{SortKey, ViewState};
    use crate::test_utils::record;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> AppState {
        let mut view = ViewState::new(2);
        view.load(vec![
            record("1", "Crime Files", 5, &[2]),
            record("2", "Comedy Hour", 4, &[4]),
            record("3", "Crime Nights", 3, &[2]),
            record("4", "Business Daily", 2, &[6]),
            record("5", "History Now", 1, &[3]),
        ]);
        AppState::new(view)
    }

    #[test]
    /// What: Typing edits the query and Backspace removes characters
    fn typing_edits_query() {
        let mut app = app();
        for ch in "crime".chars() {
            handle_key(&mut app, key(KeyCode::Char(ch)));
        }
        assert_eq!(app.view.params().query, "crime");
        assert_eq!(app.view.view().total_matched, 2);
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.view.params().query, "crim");
        handle_key(&mut app, ctrl('u'));
        assert_eq!(app.view.params().query, "");
        assert_eq!(app.view.view().total_matched, 5);
    }

    #[test]
    /// What: Paging keys move between pages and reset the highlight
    fn paging_keys() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected, 1);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.view.params().page_index, 2);
        assert_eq!(app.selected, 0);
        handle_key(&mut app, key(KeyCode::End));
        assert_eq!(app.view.params().page_index, 3);
        handle_key(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.view.params().page_index, 3);
        handle_key(&mut app, key(KeyCode::Home));
        assert_eq!(app.view.params().page_index, 1);
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.view.params().page_index, 1);
    }

    #[test]
    /// What: Tab cycles categories, F2 cycles sort, Ctrl+R resets
    fn parameter_cycling_and_reset() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view.params().category, CategoryId::new(1));
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view.params().category, CategoryId::new(2));
        assert_eq!(app.view.view().total_matched, 2);
        handle_key(&mut app, key(KeyCode::F(2)));
        assert_eq!(app.view.params().sort_key, SortKey::Oldest);
        handle_key(&mut app, ctrl('r'));
        assert_eq!(app.view.params().category, None);
        assert_eq!(app.view.params().sort_key, SortKey::Newest);
        assert_eq!(app.view.view().total_matched, 5);
    }

    #[test]
    /// What: Esc and Ctrl+C request exit; releases are ignored
    fn quit_keys() {
        let mut app = app();
        let mut release = key(KeyCode::Esc);
        release.kind = KeyEventKind::Release;
        assert!(!handle_event(CEvent::Key(release), &mut app));
        assert!(handle_event(CEvent::Key(key(KeyCode::Esc)), &mut app));
        let mut app2 = self::app();
        handle_key(&mut app2, ctrl('c'));
        assert!(app2.should_quit);
    }
}
