//! Terminal mode switching for the interactive UI.

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use super::Result;

/// What: Enter raw mode and the alternate screen.
///
/// # Errors
/// - Propagates terminal I/O failures.
pub fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// What: Leave the alternate screen and restore cooked mode.
///
/// # Errors
/// - Propagates terminal I/O failures.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
