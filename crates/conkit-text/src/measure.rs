//! Annotation-aware text measurement.
//!
//! All widths here are *visible* widths: embedded markup instructions
//! contribute nothing, grapheme clusters contribute their terminal column
//! count. This is the measurement the column sizer and the wrapping
//! engine negotiate with.

use crate::grapheme::grapheme_widths;
use conkit_core::markup::{segments, Segment};

/// Visible display width of an annotated string, in terminal columns.
///
/// Newlines measure as zero; use [`max_line_width`] for multi-line text.
///
/// # Example
///
/// ```
/// use conkit_core::Colorize;
/// use conkit_text::measure::visible_width;
///
/// assert_eq!(visible_width("hello"), 5);
/// assert_eq!(visible_width(&"hello".red().bold()), 5);
/// assert_eq!(visible_width("日本語"), 6);
/// ```
pub fn visible_width(text: &str) -> usize {
    segments(text)
        .map(|segment| match segment {
            Segment::Text(t) => text_width(t),
            Segment::Instr(_) => 0,
        })
        .sum()
}

fn text_width(text: &str) -> usize {
    // Fast path: one column per byte for ASCII (tabs measure as one
    // column, matching `grapheme_width`).
    if text.is_ascii() {
        return text.bytes().filter(|&b| b != b'\n' && b != b'\r').count();
    }
    grapheme_widths(text).map(|(_, w)| w).sum()
}

/// Width of the widest line in a (possibly multi-line) annotated string.
///
/// # Example
///
/// ```
/// use conkit_text::measure::max_line_width;
///
/// assert_eq!(max_line_width("short\nlonger line"), 11);
/// assert_eq!(max_line_width(""), 0);
/// ```
pub fn max_line_width(text: &str) -> usize {
    text.split('\n').map(visible_width).max().unwrap_or(0)
}

/// Returns `true` if the annotated text fits within `width` columns.
#[inline]
pub fn fits_in_width(text: &str, width: usize) -> bool {
    visible_width(text) <= width
}

#[cfg(test)]
mod tests {
    use super::*;
    use conkit_core::markup::Colorize;

    #[test]
    fn test_plain_width() {
        assert_eq!(visible_width(""), 0);
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width("a b"), 3);
    }

    #[test]
    fn test_annotated_width() {
        assert_eq!(visible_width(&"hello".red()), 5);
        assert_eq!(visible_width(&"hello".red().bold().underline()), 5);
        assert_eq!(visible_width(&format!("[{}]", "ok".green())), 4);
    }

    #[test]
    fn test_wide_characters() {
        assert_eq!(visible_width("日本語"), 6);
        assert_eq!(visible_width(&"日本語".cyan()), 6);
        assert_eq!(visible_width("Hi世界"), 6);
    }

    #[test]
    fn test_max_line_width() {
        assert_eq!(max_line_width("short\nlonger line"), 11);
        assert_eq!(max_line_width(&format!("{}\nxy", "a".red())), 2);
        assert_eq!(max_line_width("one"), 3);
    }

    #[test]
    fn test_fits_in_width() {
        assert!(fits_in_width("abc", 3));
        assert!(!fits_in_width("abcd", 3));
        assert!(fits_in_width(&"abc".red(), 3));
    }
}
