//! Core types for the conkit console framework.
//!
//! This crate defines the colour model, text attributes, combined
//! [`Style`]s, and the embedded markup scheme that carries colour
//! annotations inside ordinary strings. Everything downstream — the
//! measurement and wrapping engine, the column sizer, the terminal
//! renderer — builds on these types.

pub mod color;
pub mod error;
pub mod markup;
pub mod style;

pub use color::Color;
pub use error::ColorParseError;
pub use markup::{segments, strip_markup, Colorize, Instruction, Segment};
pub use style::{Style, TextAttributes, ANSI_RESET};
