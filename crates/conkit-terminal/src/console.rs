//! The console: where wrapped, coloured, tabular output lands.
//!
//! A [`Console`] pairs an output sink with a width and a colour mode.
//! Applications normally use [`Console::stdout`]; tests use
//! [`Console::capture`] to assert on rendered output.

use crate::render::render_ansi;
use crate::width::{stderr_is_tty, stdout_is_tty, terminal_width, DEFAULT_WIDTH};
use conkit_core::strip_markup;
use conkit_layout::Table;
use conkit_text::wrap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Whether embedded colour annotations render as ANSI escapes or are
/// stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Enabled,
    Disabled,
}

/// A console output target.
pub struct Console {
    out: Box<dyn Write + Send>,
    width: usize,
    color: ColorMode,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("width", &self.width)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Console over an arbitrary writer.
    pub fn new(out: Box<dyn Write + Send>, width: usize, color: ColorMode) -> Self {
        Self {
            out,
            width: width.max(1),
            color,
        }
    }

    /// Console on stdout: real terminal width, colour when attached to a
    /// terminal.
    pub fn stdout() -> Self {
        let color = if stdout_is_tty() {
            ColorMode::Enabled
        } else {
            ColorMode::Disabled
        };
        Self::new(Box::new(io::stdout()), terminal_width(), color)
    }

    /// Console on stderr.
    pub fn stderr() -> Self {
        let color = if stderr_is_tty() {
            ColorMode::Enabled
        } else {
            ColorMode::Disabled
        };
        Self::new(Box::new(io::stderr()), terminal_width(), color)
    }

    /// Console recording output into a buffer, for tests.
    pub fn capture(width: usize, color: ColorMode) -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        let console = Self::new(Box::new(buffer.clone()), width, color);
        (console, buffer)
    }

    /// The width wrapped and tabular output is laid out against.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Overrides the layout width.
    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(1);
    }

    /// The active colour mode.
    pub fn color_mode(&self) -> ColorMode {
        self.color
    }

    /// Overrides the colour mode.
    pub fn set_color_mode(&mut self, color: ColorMode) {
        self.color = color;
    }

    /// Writes annotated text followed by a newline. Embedded newlines
    /// are honoured; no wrapping is applied.
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        for line in text.split('\n') {
            let rendered = self.render(line);
            writeln!(self.out, "{}", rendered)?;
        }
        Ok(())
    }

    /// Writes annotated text without a trailing newline.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        let rendered = self.render(text);
        write!(self.out, "{}", rendered)?;
        self.out.flush()
    }

    /// Word-wraps annotated text to the console width and writes it.
    pub fn wrap_line(&mut self, text: &str) -> io::Result<()> {
        for line in wrap(text, self.width) {
            let rendered = self.render(&line);
            writeln!(self.out, "{}", rendered)?;
        }
        Ok(())
    }

    /// Renders a table at the console width and writes it.
    pub fn print_table(&mut self, table: &Table) -> io::Result<()> {
        for line in table.render(self.width) {
            let rendered = self.render(&line);
            writeln!(self.out, "{}", rendered)?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn render(&self, line: &str) -> String {
        match self.color {
            ColorMode::Enabled => render_ansi(line),
            ColorMode::Disabled => strip_markup(line).into_owned(),
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(
            Box::new(io::stdout()),
            DEFAULT_WIDTH,
            ColorMode::Disabled,
        )
    }
}

/// Shared in-memory sink backing [`Console::capture`].
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    data: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&data).into_owned()
    }

    /// The captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        let contents = self.contents();
        let trimmed = contents.strip_suffix('\n').unwrap_or(&contents);
        if trimmed.is_empty() {
            return Vec::new();
        }
        trimmed.split('\n').map(str::to_string).collect()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
