//! Text styling: attributes and combined styles.
//!
//! A [`Style`] is what the renderer tracks while it replays markup
//! instructions: an optional foreground, an optional background, and a
//! set of [`TextAttributes`]. Styles merge with later values taking
//! precedence, which gives nested markup its scoping behaviour.

use crate::color::Color;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Text decoration attributes as a compact bitfield.
    ///
    /// ```
    /// use conkit_core::TextAttributes;
    ///
    /// let attrs = TextAttributes::BOLD | TextAttributes::UNDERLINE;
    /// assert!(attrs.contains(TextAttributes::BOLD));
    /// assert!(!attrs.contains(TextAttributes::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextAttributes: u8 {
        /// Bold/bright text.
        const BOLD          = 0b0000_0001;
        /// Dim/faint text.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Blinking text (rarely honoured by modern terminals).
        const BLINK         = 0b0001_0000;
        /// Reverse video (swap fg and bg).
        const REVERSE       = 0b0010_0000;
        /// Hidden/invisible text.
        const HIDDEN        = 0b0100_0000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl TextAttributes {
    /// No attributes set (alias for `empty()`).
    pub const NONE: Self = Self::empty();

    /// Writes the SGR escape sequences enabling these attributes.
    pub fn write_ansi(&self, out: &mut String) {
        const CODES: [(TextAttributes, &str); 8] = [
            (TextAttributes::BOLD, "\x1b[1m"),
            (TextAttributes::DIM, "\x1b[2m"),
            (TextAttributes::ITALIC, "\x1b[3m"),
            (TextAttributes::UNDERLINE, "\x1b[4m"),
            (TextAttributes::BLINK, "\x1b[5m"),
            (TextAttributes::REVERSE, "\x1b[7m"),
            (TextAttributes::HIDDEN, "\x1b[8m"),
            (TextAttributes::STRIKETHROUGH, "\x1b[9m"),
        ];

        for (attr, code) in CODES {
            if self.contains(attr) {
                out.push_str(code);
            }
        }
    }
}

impl fmt::Display for TextAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(TextAttributes, &str); 8] = [
            (TextAttributes::BOLD, "bold"),
            (TextAttributes::DIM, "dim"),
            (TextAttributes::ITALIC, "italic"),
            (TextAttributes::UNDERLINE, "underline"),
            (TextAttributes::BLINK, "blink"),
            (TextAttributes::REVERSE, "reverse"),
            (TextAttributes::HIDDEN, "hidden"),
            (TextAttributes::STRIKETHROUGH, "strikethrough"),
        ];

        let mut first = true;
        for (attr, name) in NAMES {
            if self.contains(attr) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }

        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}

/// Complete style information for a run of text.
///
/// `None` for a colour means "use the terminal default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground (text) colour.
    pub fg: Option<Color>,
    /// Background colour.
    pub bg: Option<Color>,
    /// Decoration attributes.
    pub attributes: TextAttributes,
}

impl Style {
    /// Creates an empty style with no colours and no attributes.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attributes: TextAttributes::empty(),
        }
    }

    /// Returns `true` if nothing is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }

    /// Sets the foreground colour.
    #[inline]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Sets the background colour.
    #[inline]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Adds the given attributes.
    #[inline]
    pub const fn attrs(mut self, attrs: TextAttributes) -> Self {
        self.attributes = self.attributes.union(attrs);
        self
    }

    /// Adds the bold attribute.
    #[inline]
    pub const fn bold(self) -> Self {
        self.attrs(TextAttributes::BOLD)
    }

    /// Adds the dim attribute.
    #[inline]
    pub const fn dim(self) -> Self {
        self.attrs(TextAttributes::DIM)
    }

    /// Adds the italic attribute.
    #[inline]
    pub const fn italic(self) -> Self {
        self.attrs(TextAttributes::ITALIC)
    }

    /// Adds the underline attribute.
    #[inline]
    pub const fn underline(self) -> Self {
        self.attrs(TextAttributes::UNDERLINE)
    }

    /// Merges another style into this one, with `other` taking precedence.
    ///
    /// ```
    /// use conkit_core::{Color, Style};
    ///
    /// let base = Style::new().fg(Color::White).bg(Color::Black);
    /// let patch = Style::new().fg(Color::Red).bold();
    /// let merged = base.merge(&patch);
    ///
    /// assert_eq!(merged.fg, Some(Color::Red));
    /// assert_eq!(merged.bg, Some(Color::Black));
    /// assert!(merged.attributes.contains(conkit_core::TextAttributes::BOLD));
    /// ```
    #[inline]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attributes: self.attributes | other.attributes,
        }
    }

    /// Writes the full SGR sequence establishing this style from a reset
    /// state.
    pub fn write_ansi(&self, out: &mut String) {
        if let Some(fg) = self.fg {
            fg.write_ansi_fg(out);
        }
        if let Some(bg) = self.bg {
            bg.write_ansi_bg(out);
        }
        self.attributes.write_ansi(out);
    }
}

/// The SGR sequence resetting all styling.
pub const ANSI_RESET: &str = "\x1b[0m";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_display() {
        let attrs = TextAttributes::BOLD | TextAttributes::ITALIC;
        assert_eq!(attrs.to_string(), "bold, italic");
        assert_eq!(TextAttributes::empty().to_string(), "none");
    }

    #[test]
    fn test_attributes_write_ansi() {
        let mut out = String::new();
        (TextAttributes::BOLD | TextAttributes::UNDERLINE).write_ansi(&mut out);
        assert_eq!(out, "\x1b[1m\x1b[4m");
    }

    #[test]
    fn test_style_builder() {
        let style = Style::new().fg(Color::Red).bg(Color::Black).bold().underline();
        assert_eq!(style.fg, Some(Color::Red));
        assert_eq!(style.bg, Some(Color::Black));
        assert!(style.attributes.contains(TextAttributes::BOLD));
        assert!(style.attributes.contains(TextAttributes::UNDERLINE));
        assert!(!style.attributes.contains(TextAttributes::ITALIC));
    }

    #[test]
    fn test_style_merge() {
        let base = Style::new().fg(Color::White).bg(Color::Black);
        let patch = Style::new().fg(Color::Red).bold();
        let merged = base.merge(&patch);

        assert_eq!(merged.fg, Some(Color::Red));
        assert_eq!(merged.bg, Some(Color::Black));
        assert!(merged.attributes.contains(TextAttributes::BOLD));
    }

    #[test]
    fn test_style_write_ansi() {
        let mut out = String::new();
        Style::new().fg(Color::Red).bold().write_ansi(&mut out);
        assert_eq!(out, "\x1b[31m\x1b[1m");
    }

    #[test]
    fn test_empty_style() {
        assert!(Style::new().is_empty());
        assert!(!Style::new().dim().is_empty());

        let mut out = String::new();
        Style::new().write_ansi(&mut out);
        assert!(out.is_empty());
    }
}
