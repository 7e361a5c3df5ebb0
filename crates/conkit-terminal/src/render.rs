//! Markup-to-ANSI rendering.
//!
//! Replays the instructions embedded in an annotated line against a
//! style stack and emits SGR escape sequences. Wrapped lines are
//! self-contained (the wrapper re-opens active styles per line), so
//! rendering is also per-line: the stack starts empty and the output
//! ends with a reset whenever any styling was emitted.

use conkit_core::markup::{segments, Instruction, Segment};
use conkit_core::{Style, ANSI_RESET};

/// Renders one annotated line to a string with ANSI escapes.
///
/// # Example
///
/// ```
/// use conkit_core::Colorize;
/// use conkit_terminal::render::render_ansi;
///
/// assert_eq!(render_ansi("plain"), "plain");
/// assert_eq!(render_ansi(&"x".red()), "\x1b[31mx\x1b[0m");
/// ```
pub fn render_ansi(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut stack: Vec<Style> = Vec::new();

    for segment in segments(line) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Instr(instruction) => {
                let current = stack.last().copied().unwrap_or_default();
                let target = match instruction {
                    Instruction::PushFg(color) => {
                        let next = current.merge(&Style::new().fg(color));
                        stack.push(next);
                        next
                    }
                    Instruction::PushBg(color) => {
                        let next = current.merge(&Style::new().bg(color));
                        stack.push(next);
                        next
                    }
                    Instruction::PushAttrs(attrs) => {
                        let next = current.merge(&Style::new().attrs(attrs));
                        stack.push(next);
                        next
                    }
                    Instruction::Pop => {
                        stack.pop();
                        stack.last().copied().unwrap_or_default()
                    }
                };
                transition(&current, &target, &mut out);
            }
        }
    }

    // Styling still open at end of line (re-opened continuation lines
    // never pop their prefix) closes with a reset.
    if !stack.last().copied().unwrap_or_default().is_empty() {
        out.push_str(ANSI_RESET);
    }
    out
}

/// Emits the escape sequence taking the terminal from one style to
/// another. Removing colours or attributes forces a reset-and-reapply;
/// additions are emitted incrementally.
fn transition(from: &Style, to: &Style, out: &mut String) {
    if from == to {
        return;
    }

    let attrs_removed = !from.attributes.difference(to.attributes).is_empty();
    let fg_removed = from.fg.is_some() && to.fg.is_none();
    let bg_removed = from.bg.is_some() && to.bg.is_none();

    if attrs_removed || fg_removed || bg_removed {
        out.push_str(ANSI_RESET);
        to.write_ansi(out);
        return;
    }

    if to.fg != from.fg {
        if let Some(fg) = to.fg {
            fg.write_ansi_fg(out);
        }
    }
    if to.bg != from.bg {
        if let Some(bg) = to.bg {
            bg.write_ansi_bg(out);
        }
    }
    to.attributes.difference(from.attributes).write_ansi(out);
}
