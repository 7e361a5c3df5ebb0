//! Grapheme cluster display widths.
//!
//! Widths are measured per user-perceived character (grapheme cluster),
//! not per codepoint: CJK ideographs occupy two columns, combining marks
//! occupy none, and emoji ZWJ sequences render as a single double-width
//! glyph even though they span many codepoints.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Display width of a single grapheme cluster in terminal columns.
///
/// Tabs measure as one column here; wrapping expands them separately.
///
/// # Example
///
/// ```
/// use conkit_text::grapheme::grapheme_width;
///
/// assert_eq!(grapheme_width("a"), 1);
/// assert_eq!(grapheme_width("中"), 2);
/// assert_eq!(grapheme_width("\n"), 0);
/// ```
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }

    match grapheme {
        "\t" => return 1,
        "\n" | "\r" | "\r\n" => return 0,
        _ => {}
    }

    // ZWJ sequences and emoji-presentation selectors collapse the whole
    // cluster into one double-width glyph.
    if grapheme.contains('\u{200D}') || grapheme.contains('\u{FE0F}') {
        return 2;
    }

    // The base character determines the width; combining marks and other
    // zero-width codepoints ride along.
    grapheme
        .chars()
        .filter_map(|c| c.width())
        .max()
        .unwrap_or(0)
}

/// Iterates the grapheme clusters of `text` with their display widths.
pub fn grapheme_widths(text: &str) -> impl Iterator<Item = (&str, usize)> {
    text.graphemes(true).map(|g| (g, grapheme_width(g)))
}

/// Returns `true` if the grapheme is a point where a word wrap may occur.
///
/// Ordinary whitespace breaks; non-breaking spaces and the word joiner do
/// not.
pub fn is_break_point(grapheme: &str) -> bool {
    let Some(c) = grapheme.chars().next() else {
        return false;
    };

    c.is_whitespace()
        && !matches!(
            c,
            '\u{00A0}' // no-break space
            | '\u{202F}' // narrow no-break space
            | '\u{2007}' // figure space
            | '\u{2060}' // word joiner
        )
}
