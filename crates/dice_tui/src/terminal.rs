//! Raw mode and the alternate screen for the shell.

use std::io::{self, Stdout};

use crossterm::{cursor, execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// The shell's terminal: ratatui over crossterm on stdout.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Takes over stdout. Undo with [`restore_terminal`].
pub fn init_terminal() -> io::Result<Tui> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

/// Gives stdout back. The screen is switched back even if leaving raw mode
/// fails; that failure is still reported.
pub fn restore_terminal() -> io::Result<()> {
    let raw = terminal::disable_raw_mode();
    execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
    raw
}

/// Panics inside the loop print on the normal screen.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_without_init_does_not_panic() {
        // No tty under test; errors are fine, panics are not.
        install_panic_hook();
        let _ = restore_terminal();
    }
}
