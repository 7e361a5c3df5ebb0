//! Terminal colour model.
//!
//! Colours are either one of the 16 ANSI palette entries or a 24-bit RGB
//! value. Palette colours render as classic SGR codes (30-37, 90-97) so
//! they respect the user's terminal theme; RGB colours render as
//! `38;2;r;g;b` truecolor sequences.

use crate::error::ColorParseError;
use std::fmt;

/// A terminal colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// 24-bit truecolor value.
    Rgb(u8, u8, u8),
}

/// The palette colours in index order (0-15).
const PALETTE: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::BrightBlack,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightWhite,
];

impl Color {
    /// Returns the palette index (0-15) for palette colours, `None` for RGB.
    pub fn palette_index(&self) -> Option<u8> {
        PALETTE.iter().position(|c| c == self).map(|i| i as u8)
    }

    /// Looks up a palette colour by index. Indices above 15 return `None`.
    pub fn from_palette_index(index: u8) -> Option<Self> {
        PALETTE.get(index as usize).copied()
    }

    /// Parse a colour from a name (`"red"`, `"bright-cyan"`) or a
    /// `#RRGGBB` hex string.
    ///
    /// # Example
    ///
    /// ```
    /// use conkit_core::Color;
    ///
    /// assert_eq!(Color::parse("red").unwrap(), Color::Red);
    /// assert_eq!(Color::parse("bright-blue").unwrap(), Color::BrightBlue);
    /// assert_eq!(Color::parse("#FF8000").unwrap(), Color::Rgb(255, 128, 0));
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let name = trimmed.to_ascii_lowercase();
        match name.as_str() {
            "black" => Ok(Self::Black),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "magenta" => Ok(Self::Magenta),
            "cyan" => Ok(Self::Cyan),
            "white" => Ok(Self::White),
            "bright-black" | "gray" | "grey" => Ok(Self::BrightBlack),
            "bright-red" => Ok(Self::BrightRed),
            "bright-green" => Ok(Self::BrightGreen),
            "bright-yellow" => Ok(Self::BrightYellow),
            "bright-blue" => Ok(Self::BrightBlue),
            "bright-magenta" => Ok(Self::BrightMagenta),
            "bright-cyan" => Ok(Self::BrightCyan),
            "bright-white" => Ok(Self::BrightWhite),
            _ => Err(ColorParseError::UnknownColor(trimmed.to_string())),
        }
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(hex.to_string()));
        }
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| ColorParseError::InvalidHex(hex.to_string()))?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| ColorParseError::InvalidHex(hex.to_string()))?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| ColorParseError::InvalidHex(hex.to_string()))?;
        Ok(Self::Rgb(r, g, b))
    }

    /// Writes the SGR sequence selecting this colour as the foreground.
    pub fn write_ansi_fg(&self, out: &mut String) {
        match self {
            Self::Rgb(r, g, b) => {
                out.push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
            }
            palette => {
                // 30-37 for the base palette, 90-97 for the bright half.
                let index = palette.palette_index().unwrap_or(7);
                let code = if index < 8 { 30 + index as u16 } else { 82 + index as u16 };
                out.push_str(&format!("\x1b[{}m", code));
            }
        }
    }

    /// Writes the SGR sequence selecting this colour as the background.
    pub fn write_ansi_bg(&self, out: &mut String) {
        match self {
            Self::Rgb(r, g, b) => {
                out.push_str(&format!("\x1b[48;2;{};{};{}m", r, g, b));
            }
            palette => {
                let index = palette.palette_index().unwrap_or(0);
                let code = if index < 8 { 40 + index as u16 } else { 92 + index as u16 };
                out.push_str(&format!("\x1b[{}m", code));
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Blue => write!(f, "blue"),
            Self::Magenta => write!(f, "magenta"),
            Self::Cyan => write!(f, "cyan"),
            Self::White => write!(f, "white"),
            Self::BrightBlack => write!(f, "bright-black"),
            Self::BrightRed => write!(f, "bright-red"),
            Self::BrightGreen => write!(f, "bright-green"),
            Self::BrightYellow => write!(f, "bright-yellow"),
            Self::BrightBlue => write!(f, "bright-blue"),
            Self::BrightMagenta => write!(f, "bright-magenta"),
            Self::BrightCyan => write!(f, "bright-cyan"),
            Self::BrightWhite => write!(f, "bright-white"),
            Self::Rgb(r, g, b) => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Color::parse("red").unwrap(), Color::Red);
        assert_eq!(Color::parse("Bright-Cyan").unwrap(), Color::BrightCyan);
        assert_eq!(Color::parse("grey").unwrap(), Color::BrightBlack);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#000000").unwrap(), Color::Rgb(0, 0, 0));
        assert_eq!(Color::parse("#ff8000").unwrap(), Color::Rgb(255, 128, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Color::parse(""), Err(ColorParseError::EmptyInput));
        assert!(matches!(Color::parse("mauve"), Err(ColorParseError::UnknownColor(_))));
        assert!(matches!(Color::parse("#12345"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(Color::parse("#12345G"), Err(ColorParseError::InvalidHex(_))));
    }

    #[test]
    fn test_palette_index_round_trip() {
        for index in 0..16u8 {
            let color = Color::from_palette_index(index).unwrap();
            assert_eq!(color.palette_index(), Some(index));
        }
        assert_eq!(Color::from_palette_index(16), None);
        assert_eq!(Color::Rgb(1, 2, 3).palette_index(), None);
    }

    #[test]
    fn test_ansi_fg_codes() {
        let mut out = String::new();
        Color::Red.write_ansi_fg(&mut out);
        assert_eq!(out, "\x1b[31m");

        out.clear();
        Color::BrightRed.write_ansi_fg(&mut out);
        assert_eq!(out, "\x1b[91m");

        out.clear();
        Color::Rgb(1, 2, 3).write_ansi_fg(&mut out);
        assert_eq!(out, "\x1b[38;2;1;2;3m");
    }

    #[test]
    fn test_ansi_bg_codes() {
        let mut out = String::new();
        Color::Blue.write_ansi_bg(&mut out);
        assert_eq!(out, "\x1b[44m");

        out.clear();
        Color::BrightBlue.write_ansi_bg(&mut out);
        assert_eq!(out, "\x1b[104m");
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::Red.to_string(), "red");
        assert_eq!(Color::BrightWhite.to_string(), "bright-white");
        assert_eq!(Color::Rgb(255, 128, 0).to_string(), "#FF8000");
    }
}
