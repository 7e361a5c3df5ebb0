//! Annotation-aware text measurement and layout primitives.
//!
//! Everything in this crate measures *visible* columns: grapheme
//! clusters contribute their terminal width, embedded colour annotations
//! contribute nothing. The column-sizing engine and the terminal
//! renderer both build on these primitives.

pub mod align;
pub mod grapheme;
pub mod measure;
pub mod wrap;

pub use align::{pad, truncate_to_width, Alignment};
pub use measure::{fits_in_width, max_line_width, visible_width};
pub use wrap::{measure_height, wrap, wrap_with_options, WrapOptions};
