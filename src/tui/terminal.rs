//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{OrdertabError, Result};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal in raw mode on the alternate screen.
///
/// Also installs a panic hook that restores the terminal before the panic
/// message is printed, so a crash does not leave the shell in raw mode.
///
/// # Errors
///
/// Returns [`OrdertabError::Io`] if stdout is not a TTY or the terminal
/// cannot be switched.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(OrdertabError::Io(
            "ordertab needs an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| OrdertabError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        OrdertabError::Io(format!("failed to enter alternate screen: {e}"))
    })?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        reset();
        OrdertabError::Io(format!("failed to create terminal: {e}"))
    })?;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        reset();
        default_hook(info);
    }));

    Ok(terminal)
}

/// Best-effort restore used on error paths and from the panic hook.
fn reset() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Restores the terminal to its original state.
///
/// # Errors
///
/// Returns [`OrdertabError::Io`] if raw mode or the alternate screen
/// cannot be left.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| OrdertabError::Io(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| OrdertabError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| OrdertabError::Io(e.to_string()))?;
    Ok(())
}
