//! Terminal width and tty probing.

use crossterm::tty::IsTty;
use std::io;

/// Width assumed when the real terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 80;

/// Current terminal width in columns, falling back to [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((width, _)) if width > 0 => width as usize,
        _ => DEFAULT_WIDTH,
    }
}

/// Whether stdout is attached to a terminal.
pub fn stdout_is_tty() -> bool {
    io::stdout().is_tty()
}

/// Whether stderr is attached to a terminal.
pub fn stderr_is_tty() -> bool {
    io::stderr().is_tty()
}
