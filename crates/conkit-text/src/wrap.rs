//! Annotation-aware word wrapping.
//!
//! Wrapping operates on annotated strings: markup instructions are
//! zero-width, are never split by a line break, and the style stack that
//! is open when a break occurs is re-opened at the start of the
//! continuation line. That makes every output line self-contained, which
//! matters when table cells from different columns interleave their
//! wrapped lines.
//!
//! The strategy is the classic greedy word wrap: a word moves to the
//! next line when it no longer fits, a word wider than the whole line
//! breaks at grapheme boundaries, explicit newlines are preserved, and
//! whitespace at a line break is discarded.

use crate::grapheme::{grapheme_width, grapheme_widths, is_break_point};
use conkit_core::markup::{segments, Instruction, Segment};
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

/// Markup nesting is shallow in practice; keep the stack inline.
type StyleStack = SmallVec<[Instruction; 4]>;

/// Options for [`wrap_with_options`].
#[derive(Debug, Clone)]
pub struct WrapOptions {
    /// Maximum visible width in columns. Zero disables wrapping.
    pub width: usize,
    /// Tabs expand to this many spaces.
    pub tab_width: usize,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            width: 80,
            tab_width: 4,
        }
    }
}

impl WrapOptions {
    /// Creates options with the given width and default tab handling.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Sets the tab expansion width.
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}

/// Wraps annotated text to the given visible width.
///
/// # Example
///
/// ```
/// use conkit_text::wrap::wrap;
///
/// assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
/// assert_eq!(wrap("unbreakable", 6), vec!["unbrea", "kable"]);
/// ```
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    wrap_with_options(text, &WrapOptions::new(width))
}

/// Wraps annotated text with full options.
pub fn wrap_with_options(text: &str, options: &WrapOptions) -> Vec<String> {
    if options.width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut wrapper = Wrapper::new(options.width, options.tab_width);
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            wrapper.end_input_line();
        }
        wrapper.feed(line);
    }
    wrapper.finish()
}

/// Number of lines annotated text occupies when wrapped to `width`.
///
/// # Example
///
/// ```
/// use conkit_text::wrap::measure_height;
///
/// assert_eq!(measure_height("the quick brown fox", 10), 2);
/// assert_eq!(measure_height("", 10), 1);
/// ```
pub fn measure_height(text: &str, width: usize) -> usize {
    wrap(text, width).len()
}

/// Greedy line assembler sharing one style stack across input lines.
struct Wrapper {
    width: usize,
    tab_width: usize,
    /// Markup pushes currently in effect, innermost last.
    stack: StyleStack,
    lines: Vec<String>,
    /// The line being assembled, including any re-opening prefix.
    line: String,
    line_width: usize,
    /// Whitespace and instructions seen since the last word; discarded at
    /// a line break (the stack already carries the instructions' effect).
    pending: String,
    pending_width: usize,
    /// Word under construction (may contain embedded instructions).
    word: String,
    word_width: usize,
}

impl Wrapper {
    fn new(width: usize, tab_width: usize) -> Self {
        Self {
            width,
            tab_width,
            stack: StyleStack::new(),
            lines: Vec::new(),
            line: String::new(),
            line_width: 0,
            pending: String::new(),
            pending_width: 0,
            word: String::new(),
            word_width: 0,
        }
    }

    /// Consumes one newline-free run of annotated text.
    fn feed(&mut self, text: &str) {
        for segment in segments(text) {
            match segment {
                Segment::Instr(instruction) => {
                    // Mid-word instructions stay embedded so the word
                    // wraps as a unit; between words they join the
                    // pending run and take effect immediately.
                    if self.word.is_empty() {
                        instruction.encode_into(&mut self.pending);
                        apply(&mut self.stack, instruction);
                    } else {
                        instruction.encode_into(&mut self.word);
                    }
                }
                Segment::Text(run) => {
                    for grapheme in run.graphemes(true) {
                        if is_break_point(grapheme) {
                            self.end_word();
                            if grapheme == "\t" {
                                for _ in 0..self.tab_width {
                                    self.pending.push(' ');
                                }
                                self.pending_width += self.tab_width;
                            } else {
                                self.pending.push_str(grapheme);
                                self.pending_width += grapheme_width(grapheme);
                            }
                        } else {
                            self.word.push_str(grapheme);
                            self.word_width += grapheme_width(grapheme);
                        }
                    }
                }
            }
        }
        self.end_word();
    }

    /// Places the completed word onto the current or a fresh line.
    fn end_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.word);
        let word_width = std::mem::take(&mut self.word_width);

        if self.line_width + self.pending_width + word_width <= self.width {
            self.line.push_str(&self.pending);
            self.line.push_str(&word);
            self.line_width += self.pending_width + word_width;
            self.clear_pending();
            apply_all(&mut self.stack, &word);
            return;
        }

        if word_width > self.width {
            self.break_long_word(&word);
            return;
        }

        if self.line_width > 0 {
            self.break_line();
        } else {
            self.restart_line();
        }
        self.line.push_str(&word);
        self.line_width += word_width;
        apply_all(&mut self.stack, &word);
    }

    /// Splits a word wider than the whole line at grapheme boundaries.
    fn break_long_word(&mut self, word: &str) {
        if self.line_width > 0 {
            self.break_line();
        } else {
            self.restart_line();
        }

        for segment in segments(word) {
            match segment {
                Segment::Instr(instruction) => {
                    instruction.encode_into(&mut self.line);
                    apply(&mut self.stack, instruction);
                }
                Segment::Text(run) => {
                    for (grapheme, grapheme_w) in grapheme_widths(run) {
                        if self.line_width + grapheme_w > self.width && self.line_width > 0 {
                            self.break_line();
                        }
                        self.line.push_str(grapheme);
                        self.line_width += grapheme_w;
                    }
                }
            }
        }
    }

    /// Flushes the current line and starts the next from the style stack.
    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.line));
        self.restart_line();
    }

    /// Resets the line buffer to a fresh re-opening prefix, discarding
    /// pending whitespace (its instructions live on in the stack).
    fn restart_line(&mut self) {
        self.line = reopen_prefix(&self.stack);
        self.line_width = 0;
        self.clear_pending();
    }

    fn clear_pending(&mut self) {
        self.pending.clear();
        self.pending_width = 0;
    }

    /// Ends an input line at an explicit newline. Trailing instructions
    /// are kept (so fully-fitting text round-trips exactly); trailing
    /// whitespace is trimmed.
    fn end_input_line(&mut self) {
        self.end_word();
        self.retain_pending_instructions();
        self.lines.push(std::mem::take(&mut self.line));
        self.restart_line();
    }

    fn finish(mut self) -> Vec<String> {
        self.end_word();
        self.retain_pending_instructions();
        let Wrapper { mut lines, line, .. } = self;
        lines.push(line);
        lines
    }

    fn retain_pending_instructions(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        for segment in segments(&pending) {
            if let Segment::Instr(instruction) = segment {
                instruction.encode_into(&mut self.line);
            }
        }
        self.pending_width = 0;
    }
}

fn apply(stack: &mut StyleStack, instruction: Instruction) {
    match instruction {
        Instruction::Pop => {
            stack.pop();
        }
        push => stack.push(push),
    }
}

/// Replays every instruction embedded in `text` onto the stack.
fn apply_all(stack: &mut StyleStack, text: &str) {
    for segment in segments(text) {
        if let Segment::Instr(instruction) = segment {
            apply(stack, instruction);
        }
    }
}

/// Encodes the instructions that re-establish the active style stack.
fn reopen_prefix(stack: &[Instruction]) -> String {
    let mut prefix = String::new();
    for instruction in stack {
        instruction.encode_into(&mut prefix);
    }
    prefix
}
