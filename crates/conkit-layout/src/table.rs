//! Tabular report rendering.
//!
//! A [`Table`] collects column specifications and annotated cell
//! strings, negotiates widths against the available space, and renders
//! the grid: wrapped headings with underlines, wrapped and aligned
//! cells zipped line-by-line across columns, and a stacked section for
//! columns the negotiation moved out of the grid.

use crate::column::ColumnSpec;
use crate::negotiate::{negotiate, Negotiated};
use conkit_text::{pad, visible_width, wrap, Alignment};

/// Rendering options for a table.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Render the heading row and its underline.
    pub show_headings: bool,
    /// Character used to underline headings; `None` omits the rule.
    pub underline: Option<char>,
    /// Separator between adjacent columns.
    pub separator: String,
    /// Spaces prepended to every rendered line.
    pub indent: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            show_headings: true,
            underline: Some('-'),
            separator: "  ".to_string(),
            indent: 0,
        }
    }
}

/// A tabular report: columns, rows, and rendering options.
#[derive(Debug, Clone, Default)]
pub struct Table {
    specs: Vec<ColumnSpec>,
    rows: Vec<Vec<String>>,
    options: TableOptions,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    pub fn column(mut self, spec: ColumnSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Appends a data row. Rows shorter than the column list are padded
    /// with empty cells; surplus cells are ignored.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    /// Appends a data row through a mutable reference.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize_with(self.specs.len().max(row.len()), String::new);
        self.rows.push(row);
    }

    /// Disables the heading row.
    pub fn without_headings(mut self) -> Self {
        self.options.show_headings = false;
        self
    }

    /// Sets the heading underline character (`None` to omit).
    pub fn underline(mut self, underline: Option<char>) -> Self {
        self.options.underline = underline;
        self
    }

    /// Sets the column separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.options.separator = separator.into();
        self
    }

    /// Indents every rendered line by `indent` spaces.
    pub fn indent(mut self, indent: usize) -> Self {
        self.options.indent = indent;
        self
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Negotiates widths and renders the table into lines.
    ///
    /// Lines never exceed `available` columns unless fixed columns force
    /// an overflow.
    pub fn render(&self, available: usize) -> Vec<String> {
        if self.specs.is_empty() {
            return Vec::new();
        }

        let indent = " ".repeat(self.options.indent);
        let available = available.saturating_sub(self.options.indent).max(1);
        let separator_width = visible_width(&self.options.separator);

        let negotiated = self.negotiate_widths(available, separator_width);
        let mut lines = Vec::new();

        if self.options.show_headings && !negotiated.grid.is_empty() {
            self.render_heading(&negotiated, &mut lines);
        }

        for row in &self.rows {
            self.render_row(row, &negotiated, available, &mut lines);
        }

        if self.options.indent > 0 {
            for line in &mut lines {
                if !line.is_empty() {
                    line.insert_str(0, &indent);
                }
            }
        }
        lines
    }

    fn negotiate_widths(&self, available: usize, separator_width: usize) -> Negotiated {
        let contents: Vec<Vec<&str>> = self
            .specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let mut cells: Vec<&str> = self
                    .rows
                    .iter()
                    .map(|row| cell_at(row, index))
                    .collect();
                if self.options.show_headings {
                    cells.push(spec.heading.as_str());
                }
                cells
            })
            .collect();

        negotiate(&self.specs, &contents, available, separator_width)
    }

    fn render_heading(&self, negotiated: &Negotiated, lines: &mut Vec<String>) {
        let headings: Vec<&str> = negotiated
            .grid
            .iter()
            .map(|&(index, _)| self.specs[index].heading.as_str())
            .collect();
        self.zip_cells(&headings, negotiated, lines);

        if let Some(rule) = self.options.underline {
            let ruled: Vec<String> = negotiated
                .grid
                .iter()
                .map(|&(_, width)| rule.to_string().repeat(width))
                .collect();
            lines.push(ruled.join(&self.options.separator));
        }
    }

    fn render_row(
        &self,
        row: &[String],
        negotiated: &Negotiated,
        available: usize,
        lines: &mut Vec<String>,
    ) {
        if !negotiated.grid.is_empty() {
            let cells: Vec<&str> = negotiated
                .grid
                .iter()
                .map(|&(index, _)| cell_at(row, index))
                .collect();
            self.zip_cells(&cells, negotiated, lines);
        }

        for &index in &negotiated.stacked {
            let label = conkit_core::strip_markup(&self.specs[index].heading);
            let entry = format!("{}: {}", label, cell_at(row, index));
            lines.extend(wrap(&entry, available));
        }
    }

    /// Wraps each cell to its column width and zips the wrapped lines
    /// across columns, padding to keep the grid aligned.
    fn zip_cells(&self, cells: &[&str], negotiated: &Negotiated, lines: &mut Vec<String>) {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(&negotiated.grid)
            .map(|(cell, &(_, width))| wrap(cell, width))
            .collect();

        let height = wrapped.iter().map(Vec::len).max().unwrap_or(0);
        let last = negotiated.grid.len().saturating_sub(1);

        for line_index in 0..height {
            let mut parts: Vec<String> = Vec::with_capacity(negotiated.grid.len());
            for (col, &(index, width)) in negotiated.grid.iter().enumerate() {
                let alignment = self.specs[index].alignment;
                let content = wrapped[col].get(line_index).map(String::as_str).unwrap_or("");
                // The last column stays unpadded when left-aligned so
                // rendered lines carry no trailing spaces.
                if col == last && alignment == Alignment::Left {
                    parts.push(content.to_string());
                } else {
                    parts.push(pad(content, width, alignment));
                }
            }
            let mut line = parts.join(&self.options.separator);
            while line.ends_with(' ') {
                line.pop();
            }
            lines.push(line);
        }
    }
}

/// Rows are sized when pushed; columns added afterwards read as empty.
fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use conkit_core::markup::{strip_markup, Colorize};
    use pretty_assertions::assert_eq;

    fn plain(lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| strip_markup(l).into_owned()).collect()
    }

    fn sample() -> Table {
        Table::new()
            .column(ColumnSpec::new("Name"))
            .column(ColumnSpec::new("Size").right())
            .row(["alpha", "120"])
            .row(["beta", "7"])
    }

    #[test]
    fn test_simple_grid() {
        let lines = sample().render(40);
        assert_eq!(
            lines,
            vec![
                "Name   Size",
                "-----  ----",
                "alpha   120",
                "beta      7",
            ]
        );
    }

    #[test]
    fn test_without_headings() {
        let lines = sample().without_headings().render(40);
        assert_eq!(lines, vec!["alpha  120", "beta     7"]);
    }

    #[test]
    fn test_no_underline() {
        let lines = sample().underline(None).render(40);
        assert_eq!(lines[1], "alpha   120");
    }

    #[test]
    fn test_cells_wrap_under_pressure() {
        let table = Table::new()
            .column(ColumnSpec::new("Key"))
            .column(ColumnSpec::new("Description"))
            .row(["color", "Render output with embedded colour annotations"]);
        let lines = table.render(30);

        assert!(lines.len() > 3);
        for line in &lines {
            assert!(conkit_text::visible_width(line) <= 30, "{:?}", line);
        }
    }

    #[test]
    fn test_indent() {
        let lines = sample().indent(2).render(40);
        assert!(lines.iter().all(|l| l.starts_with("  ")));
    }

    #[test]
    fn test_row_padding_and_surplus() {
        let table = Table::new()
            .column(ColumnSpec::new("A"))
            .column(ColumnSpec::new("B"))
            .row(["only"])
            .row(["one", "two", "three"]);
        let lines = plain(&table.render(40));
        assert_eq!(lines[2], "only");
        assert_eq!(lines[3], "one   two");
    }

    #[test]
    fn test_column_added_after_rows_reads_empty() {
        let table = Table::new()
            .column(ColumnSpec::new("A"))
            .row(["x"])
            .column(ColumnSpec::new("B"));
        let lines = plain(&table.render(40));
        assert_eq!(lines[2], "x");
    }

    #[test]
    fn test_annotated_cells_align() {
        let table = Table::new()
            .column(ColumnSpec::new("Status"))
            .column(ColumnSpec::new("Name"))
            .row([&"ok".green() as &str, "alpha"])
            .row([&"failed".red() as &str, "beta"]);
        let lines = table.render(40);

        assert_eq!(
            plain(&lines),
            vec![
                "Status  Name",
                "------  ----",
                "ok      alpha",
                "failed  beta",
            ]
        );
    }

    #[test]
    fn test_stacked_rendering() {
        let table = Table::new()
            .column(ColumnSpec::new("Id"))
            .column(ColumnSpec::new("Title"))
            .column(ColumnSpec::new("Notes"))
            .row(["1", "first title text", "a fairly long note that will not fit"]);
        let lines = plain(&table.render(16));

        assert!(lines.iter().any(|l| l.starts_with("Notes: ")));
        for line in &lines {
            assert!(conkit_text::visible_width(line) <= 16, "{:?}", line);
        }
    }

    #[test]
    fn test_empty_table() {
        assert!(Table::new().render(40).is_empty());
        let headings_only = Table::new().column(ColumnSpec::new("A")).render(40);
        assert_eq!(headings_only, vec!["A", "-"]);
    }
}
