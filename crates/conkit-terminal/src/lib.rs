//! Console abstraction and ANSI rendering for conkit.
//!
//! Annotated strings flow through the framework as plain data; this
//! crate is where they finally meet a terminal. [`Console`] owns the
//! output sink, the layout width, and the colour mode; [`render_ansi`]
//! translates embedded markup into SGR escape sequences.

pub mod console;
pub mod render;
pub mod width;

pub use console::{CaptureBuffer, ColorMode, Console};
pub use render::render_ansi;
pub use width::{stderr_is_tty, stdout_is_tty, terminal_width, DEFAULT_WIDTH};
