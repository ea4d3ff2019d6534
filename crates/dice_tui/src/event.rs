//! Event source for the shell loop.
//!
//! Polls crossterm for input and turns an expired timeout into a tick.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Events consumed by the main loop.
#[derive(Clone, Debug)]
pub enum TuiEvent {
    /// A key was pressed.
    Key(KeyEvent),
    /// Nothing arrived within the tick interval.
    Tick,
    /// The terminal was resized.
    Resize(u16, u16),
}

/// Waits up to `timeout` for the next event.
///
/// Key releases and repeats (reported by some terminals) are folded into
/// [`TuiEvent::Tick`] so each physical press is handled once.
pub fn poll_event(timeout: Duration) -> std::io::Result<TuiEvent> {
    if !event::poll(timeout)? {
        return Ok(TuiEvent::Tick);
    }
    Ok(match event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => TuiEvent::Key(key),
        CrosstermEvent::Resize(w, h) => TuiEvent::Resize(w, h),
        _ => TuiEvent::Tick,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_event_without_terminal_does_not_panic() {
        // Under test there is no tty: crossterm may error or time out.
        let _ = poll_event(Duration::from_millis(1));
    }

    #[test]
    fn tui_event_debug() {
        assert!(format!("{:?}", TuiEvent::Tick).contains("Tick"));
        assert!(format!("{:?}", TuiEvent::Resize(80, 24)).contains("80"));
    }
}
