//! Embedded colour annotations.
//!
//! Styling travels *inside* ordinary `String`s as compact instruction
//! sequences bracketed by a pair of private-use sentinels. This lets
//! styled text flow through the measurement, wrapping, and column-sizing
//! machinery as plain strings; only the terminal renderer interprets the
//! instructions, and only at output time.
//!
//! An annotation is `U+E800` + opcode payload + `U+E801`:
//!
//! | payload            | instruction                    |
//! |--------------------|--------------------------------|
//! | `F` + colour token | push foreground colour         |
//! | `B` + colour token | push background colour         |
//! | `A` + 2 hex digits | push attribute bits            |
//! | `P`                | pop the innermost pushed state |
//!
//! A colour token is a single hex digit (palette index) or `#RRGGBB`.
//! Instructions nest: `"a".red()` inside `"...".bold()` restores bold
//! red-less text when its pop is replayed.
//!
//! Scanning is total: a sentinel without a terminator, or with an
//! unintelligible payload, degrades to literal text rather than failing.

use crate::color::Color;
use crate::style::TextAttributes;
use std::borrow::Cow;

/// Start-of-annotation sentinel (private use area).
pub const MARK_START: char = '\u{E800}';
/// End-of-annotation sentinel (private use area).
pub const MARK_END: char = '\u{E801}';

/// A single markup instruction embedded in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Push a foreground colour.
    PushFg(Color),
    /// Push a background colour.
    PushBg(Color),
    /// Push additional text attributes.
    PushAttrs(TextAttributes),
    /// Pop the innermost pushed state.
    Pop,
}

impl Instruction {
    /// Encodes this instruction as an annotation sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use conkit_core::markup::{segments, Instruction, Segment};
    /// use conkit_core::Color;
    ///
    /// let encoded = Instruction::PushFg(Color::Red).encode();
    /// let items: Vec<_> = segments(&encoded).collect();
    /// assert_eq!(items, vec![Segment::Instr(Instruction::PushFg(Color::Red))]);
    /// ```
    pub fn encode(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }

    /// Encodes this instruction, appending to `out`.
    pub fn encode_into(&self, out: &mut String) {
        out.push(MARK_START);
        match self {
            Self::PushFg(color) => {
                out.push('F');
                encode_color(*color, out);
            }
            Self::PushBg(color) => {
                out.push('B');
                encode_color(*color, out);
            }
            Self::PushAttrs(attrs) => {
                out.push('A');
                out.push_str(&format!("{:02x}", attrs.bits()));
            }
            Self::Pop => out.push('P'),
        }
        out.push(MARK_END);
    }

    /// Decodes an annotation payload (the text between the sentinels).
    pub fn decode(payload: &str) -> Option<Self> {
        let mut chars = payload.chars();
        let instruction = match chars.next()? {
            'F' => Self::PushFg(decode_color(chars.as_str())?),
            'B' => Self::PushBg(decode_color(chars.as_str())?),
            'A' => {
                let hex = chars.as_str();
                if hex.len() != 2 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return None;
                }
                let bits = u8::from_str_radix(hex, 16).ok()?;
                Self::PushAttrs(TextAttributes::from_bits_truncate(bits))
            }
            'P' => {
                if chars.next().is_some() {
                    return None;
                }
                Self::Pop
            }
            _ => return None,
        };
        Some(instruction)
    }
}

fn encode_color(color: Color, out: &mut String) {
    match color.palette_index() {
        Some(index) => out.push(char::from_digit(index as u32, 16).unwrap_or('7')),
        None => {
            if let Color::Rgb(r, g, b) = color {
                out.push_str(&format!("#{:02x}{:02x}{:02x}", r, g, b));
            }
        }
    }
}

fn decode_color(token: &str) -> Option<Color> {
    if let Some(hex) = token.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let mut chars = token.chars();
    let digit = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Color::from_palette_index(digit.to_digit(16)? as u8)
}

/// One piece of an annotated string: literal text or an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A run of literal text with no annotations.
    Text(&'a str),
    /// A decoded markup instruction.
    Instr(Instruction),
}

/// Iterator over the [`Segment`]s of an annotated string.
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if let Some(after_start) = self.rest.strip_prefix(MARK_START) {
            if let Some(end) = after_start.find(MARK_END) {
                let payload = &after_start[..end];
                if let Some(instruction) = Instruction::decode(payload) {
                    self.rest = &after_start[end + MARK_END.len_utf8()..];
                    return Some(Segment::Instr(instruction));
                }
            }
            // Unterminated or unintelligible: surface the sentinel as text
            // and rescan from the next character.
            let sentinel = &self.rest[..MARK_START.len_utf8()];
            self.rest = after_start;
            return Some(Segment::Text(sentinel));
        }

        let text_end = self.rest.find(MARK_START).unwrap_or(self.rest.len());
        let (text, rest) = self.rest.split_at(text_end);
        self.rest = rest;
        Some(Segment::Text(text))
    }
}

/// Splits an annotated string into text runs and instructions.
///
/// # Example
///
/// ```
/// use conkit_core::markup::{segments, Colorize, Segment};
///
/// let annotated = "ok: ".to_string() + &"pass".green();
/// let text: String = segments(&annotated)
///     .filter_map(|s| match s {
///         Segment::Text(t) => Some(t),
///         Segment::Instr(_) => None,
///     })
///     .collect();
/// assert_eq!(text, "ok: pass");
/// ```
pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

/// Removes all annotations, returning the plain text.
///
/// Borrows when the input carries no annotations.
///
/// # Example
///
/// ```
/// use conkit_core::markup::{strip_markup, Colorize};
///
/// assert_eq!(strip_markup("plain"), "plain");
/// assert_eq!(strip_markup(&"error".red().bold()), "error");
/// ```
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    if !text.contains(MARK_START) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        if let Segment::Text(t) = segment {
            out.push_str(t);
        }
    }
    Cow::Owned(out)
}

fn wrap_in(text: &str, push: Instruction) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    push.encode_into(&mut out);
    out.push_str(text);
    Instruction::Pop.encode_into(&mut out);
    out
}

/// Extension methods attaching colour annotations to strings.
///
/// Each method wraps the receiver in a push/pop instruction pair, so
/// calls nest and compose:
///
/// ```
/// use conkit_core::markup::{strip_markup, Colorize};
///
/// let status = format!("[{}]", "FAIL".red().bold());
/// assert_eq!(strip_markup(&status), "[FAIL]");
/// ```
pub trait Colorize {
    /// Wraps the text in a foreground colour annotation.
    fn color(&self, color: Color) -> String;
    /// Wraps the text in a background colour annotation.
    fn on_color(&self, color: Color) -> String;
    /// Wraps the text in an attribute annotation.
    fn attr(&self, attrs: TextAttributes) -> String;

    fn black(&self) -> String {
        self.color(Color::Black)
    }
    fn red(&self) -> String {
        self.color(Color::Red)
    }
    fn green(&self) -> String {
        self.color(Color::Green)
    }
    fn yellow(&self) -> String {
        self.color(Color::Yellow)
    }
    fn blue(&self) -> String {
        self.color(Color::Blue)
    }
    fn magenta(&self) -> String {
        self.color(Color::Magenta)
    }
    fn cyan(&self) -> String {
        self.color(Color::Cyan)
    }
    fn white(&self) -> String {
        self.color(Color::White)
    }
    fn on_black(&self) -> String {
        self.on_color(Color::Black)
    }
    fn on_red(&self) -> String {
        self.on_color(Color::Red)
    }
    fn on_green(&self) -> String {
        self.on_color(Color::Green)
    }
    fn on_yellow(&self) -> String {
        self.on_color(Color::Yellow)
    }
    fn on_blue(&self) -> String {
        self.on_color(Color::Blue)
    }
    fn bold(&self) -> String {
        self.attr(TextAttributes::BOLD)
    }
    fn dim(&self) -> String {
        self.attr(TextAttributes::DIM)
    }
    fn italic(&self) -> String {
        self.attr(TextAttributes::ITALIC)
    }
    fn underline(&self) -> String {
        self.attr(TextAttributes::UNDERLINE)
    }
}

impl Colorize for str {
    fn color(&self, color: Color) -> String {
        wrap_in(self, Instruction::PushFg(color))
    }

    fn on_color(&self, color: Color) -> String {
        wrap_in(self, Instruction::PushBg(color))
    }

    fn attr(&self, attrs: TextAttributes) -> String {
        wrap_in(self, Instruction::PushAttrs(attrs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round_trip(instruction: Instruction) {
        let encoded = instruction.encode();
        let items: Vec<_> = segments(&encoded).collect();
        assert_eq!(items, vec![Segment::Instr(instruction)]);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        round_trip(Instruction::PushFg(Color::Red));
        round_trip(Instruction::PushFg(Color::BrightWhite));
        round_trip(Instruction::PushFg(Color::Rgb(1, 128, 255)));
        round_trip(Instruction::PushBg(Color::Cyan));
        round_trip(Instruction::PushAttrs(TextAttributes::BOLD | TextAttributes::DIM));
        round_trip(Instruction::Pop);
    }

    #[test]
    fn test_segments_mixed() {
        let annotated = format!("a{}b{}c", "x".red(), "y".bold());
        let plain: String = segments(&annotated)
            .filter_map(|s| match s {
                Segment::Text(t) => Some(t),
                Segment::Instr(_) => None,
            })
            .collect();
        assert_eq!(plain, "axbyc");

        let instructions: Vec<_> = segments(&annotated)
            .filter_map(|s| match s {
                Segment::Instr(i) => Some(i),
                Segment::Text(_) => None,
            })
            .collect();
        assert_eq!(
            instructions,
            vec![
                Instruction::PushFg(Color::Red),
                Instruction::Pop,
                Instruction::PushAttrs(TextAttributes::BOLD),
                Instruction::Pop,
            ]
        );
    }

    #[test]
    fn test_malformed_unterminated() {
        let text = format!("a{}rest", MARK_START);
        let items: Vec<_> = segments(&text).collect();
        assert_eq!(
            items,
            vec![
                Segment::Text("a"),
                Segment::Text("\u{E800}"),
                Segment::Text("rest"),
            ]
        );
    }

    #[test]
    fn test_malformed_bad_payload() {
        let text = format!("{}Z?{}tail", MARK_START, MARK_END);
        let plain = strip_markup(&text);
        // The sentinel degrades to text; the bogus payload and the stray
        // end sentinel are preserved verbatim.
        assert_eq!(plain, format!("{}Z?{}tail", MARK_START, MARK_END));
    }

    #[test]
    fn test_strip_markup_borrows_plain_text() {
        assert!(matches!(strip_markup("plain"), Cow::Borrowed(_)));
        assert!(matches!(strip_markup(&"x".red()), Cow::Owned(_)));
    }

    #[test]
    fn test_colorize_nesting() {
        let nested = format!("a {} c", "b".red()).bold();
        assert_eq!(strip_markup(&nested), "a b c");

        let instructions: Vec<_> = segments(&nested)
            .filter_map(|s| match s {
                Segment::Instr(i) => Some(i),
                Segment::Text(_) => None,
            })
            .collect();
        assert_eq!(
            instructions,
            vec![
                Instruction::PushAttrs(TextAttributes::BOLD),
                Instruction::PushFg(Color::Red),
                Instruction::Pop,
                Instruction::Pop,
            ]
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(Instruction::decode(""), None);
        assert_eq!(Instruction::decode("F"), None);
        assert_eq!(Instruction::decode("Fzz"), None);
        assert_eq!(Instruction::decode("F#12"), None);
        assert_eq!(Instruction::decode("Px"), None);
        assert_eq!(Instruction::decode("A1"), None);
        assert_eq!(Instruction::decode("Q"), None);
    }
}
