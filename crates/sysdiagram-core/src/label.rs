//! Node labels.
//!
//! A node is labelled either with plain text or with an HTML-like table, the
//! Graphviz feature used to draw database tables and component cards.
//!
//! # Overview
//!
//! - [`Label`] - Plain text or table label of a node.
//! - [`TableLabel`] - A `<TABLE>` with table-wide attributes and rows.
//! - [`Row`] - A `<TR>` made of cells.
//! - [`Cell`] - A `<TD>` made of text runs.
//! - [`TextRun`] - Text with optional bold and font attributes.
//!
//! # Example
//!
//! ```
//! use sysdiagram_core::{
//!     color::Color,
//!     label::{Align, Cell, Row, TableLabel, TextRun},
//! };
//!
//! let header = Color::new("#4A90E2").unwrap();
//! let table = TableLabel::new()
//!     .with_cell_padding(4)
//!     .with_row(Row::new().with_cell(
//!         Cell::new(TextRun::new("User").bold()).with_colspan(2).with_bgcolor(header),
//!     ))
//!     .with_row(
//!         Row::new()
//!             .with_cell(Cell::text("id: Long").with_align(Align::Left))
//!             .with_cell(Cell::text("PK").with_align(Align::Left)),
//!     );
//!
//! let html = table.to_html();
//! assert!(html.starts_with("<TABLE"));
//! assert!(html.contains("<B>User</B>"));
//! ```

use std::fmt::Write;

use crate::color::Color;

/// Label of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Plain text, emitted as a quoted string.
    Text(String),
    /// HTML-like table, emitted as `<...>`.
    Table(TableLabel),
}

impl Label {
    /// Returns the table if this is a table label.
    pub fn as_table(&self) -> Option<&TableLabel> {
        match self {
            Self::Table(table) => Some(table),
            Self::Text(_) => None,
        }
    }
}

impl From<TableLabel> for Label {
    fn from(table: TableLabel) -> Self {
        Self::Table(table)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Horizontal alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Center => "CENTER",
            Self::Right => "RIGHT",
        }
    }
}

/// A piece of text inside a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    text: String,
    bold: bool,
    color: Option<Color>,
    point_size: Option<f32>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            color: None,
            point_size: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = Some(size);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    fn write_html(&self, out: &mut String) {
        let has_font = self.color.is_some() || self.point_size.is_some();
        if self.bold {
            out.push_str("<B>");
        }
        if has_font {
            out.push_str("<FONT");
            if let Some(color) = self.color {
                let _ = write!(out, " COLOR=\"{color}\"");
            }
            if let Some(size) = self.point_size {
                let _ = write!(out, " POINT-SIZE=\"{size}\"");
            }
            out.push('>');
        }
        out.push_str(&escape_html(&self.text));
        if has_font {
            out.push_str("</FONT>");
        }
        if self.bold {
            out.push_str("</B>");
        }
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    runs: Vec<TextRun>,
    colspan: Option<u32>,
    align: Option<Align>,
    bgcolor: Option<Color>,
}

impl Cell {
    pub fn new(run: TextRun) -> Self {
        Self {
            runs: vec![run],
            colspan: None,
            align: None,
            bgcolor: None,
        }
    }

    /// Cell holding a single plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TextRun::new(text))
    }

    /// Cell with no content.
    pub fn empty() -> Self {
        Self {
            runs: Vec::new(),
            colspan: None,
            align: None,
            bgcolor: None,
        }
    }

    pub fn with_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = Some(colspan);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    /// Concatenated text of all runs, without markup.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(TextRun::text).collect()
    }

    pub fn colspan(&self) -> u32 {
        self.colspan.unwrap_or(1)
    }

    pub fn bgcolor(&self) -> Option<Color> {
        self.bgcolor
    }

    fn write_html(&self, out: &mut String) {
        out.push_str("<TD");
        if let Some(bgcolor) = self.bgcolor {
            let _ = write!(out, " BGCOLOR=\"{bgcolor}\"");
        }
        if let Some(colspan) = self.colspan {
            let _ = write!(out, " COLSPAN=\"{colspan}\"");
        }
        if let Some(align) = self.align {
            let _ = write!(out, " ALIGN=\"{}\"", align.as_str());
        }
        out.push('>');
        for run in &self.runs {
            run.write_html(out);
        }
        out.push_str("</TD>");
    }
}

/// A table row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of columns the row spans.
    pub fn width(&self) -> u32 {
        self.cells.iter().map(Cell::colspan).sum()
    }
}

/// An HTML-like table label.
///
/// Defaults to `BORDER="0" CELLBORDER="1" CELLSPACING="0" CELLPADDING="4"`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLabel {
    border: u32,
    cell_border: u32,
    cell_spacing: u32,
    cell_padding: u32,
    bgcolor: Option<Color>,
    rows: Vec<Row>,
}

impl Default for TableLabel {
    fn default() -> Self {
        Self {
            border: 0,
            cell_border: 1,
            cell_spacing: 0,
            cell_padding: 4,
            bgcolor: None,
            rows: Vec::new(),
        }
    }
}

impl TableLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell_padding(mut self, padding: u32) -> Self {
        self.cell_padding = padding;
        self
    }

    pub fn with_bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Text of the first cell of the first row, conventionally the title.
    pub fn title(&self) -> Option<String> {
        self.rows
            .first()
            .and_then(|row| row.cells.first())
            .map(Cell::plain_text)
    }

    /// Renders the table as HTML-like markup, without the enclosing `<` `>`
    /// that mark an HTML label in DOT.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<TABLE BORDER=\"{}\" CELLBORDER=\"{}\" CELLSPACING=\"{}\" CELLPADDING=\"{}\"",
            self.border, self.cell_border, self.cell_spacing, self.cell_padding
        );
        if let Some(bgcolor) = self.bgcolor {
            let _ = write!(out, " BGCOLOR=\"{bgcolor}\"");
        }
        out.push('>');
        for row in &self.rows {
            out.push_str("\n<TR>");
            for cell in &row.cells {
                cell.write_html(&mut out);
            }
            out.push_str("</TR>");
        }
        out.push_str("\n</TABLE>");
        out
    }
}

/// Escapes text for use inside an HTML-like label.
///
/// Newlines become `<BR/>` line breaks.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<BR/>"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("JWT Authentication & Authorization"),
            "JWT Authentication &amp; Authorization"
        );
        assert_eq!(escape_html("a<b>\"c\""), "a&lt;b&gt;&quot;c&quot;");
        assert_eq!(escape_html("one\ntwo"), "one<BR/>two");
    }

    #[test]
    fn test_cell_attributes() {
        let cell = Cell::text("Port: 8080")
            .with_colspan(2)
            .with_align(Align::Left)
            .with_bgcolor(Color::new("#F5F5F5").unwrap());

        let mut out = String::new();
        cell.write_html(&mut out);
        assert_eq!(
            out,
            "<TD BGCOLOR=\"#f5f5f5\" COLSPAN=\"2\" ALIGN=\"LEFT\">Port: 8080</TD>"
        );
    }

    #[test]
    fn test_run_with_font() {
        let run = TextRun::new("Redis Cache")
            .bold()
            .with_color(Color::new("white").unwrap())
            .with_point_size(13.0);

        let mut out = String::new();
        run.write_html(&mut out);
        assert_eq!(
            out,
            "<B><FONT COLOR=\"#ffffff\" POINT-SIZE=\"13\">Redis Cache</FONT></B>"
        );
    }

    #[test]
    fn test_empty_cell() {
        let mut out = String::new();
        Cell::empty().with_align(Align::Left).write_html(&mut out);
        assert_eq!(out, "<TD ALIGN=\"LEFT\"></TD>");
    }

    #[test]
    fn test_table_html_structure() {
        let table = TableLabel::new()
            .with_cell_padding(10)
            .with_bgcolor(Color::new("white").unwrap())
            .with_row(Row::new().with_cell(Cell::text("a")))
            .with_row(Row::new().with_cell(Cell::text("b")).with_cell(Cell::text("c")));

        let html = table.to_html();
        assert!(html.starts_with(concat!(
            "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" ",
            "CELLPADDING=\"10\" BGCOLOR=\"#ffffff\">"
        )));
        assert!(html.ends_with("</TABLE>"));
        assert_eq!(html.matches("<TR>").count(), 2);
        assert_eq!(html.matches("<TD").count(), 3);
    }

    #[test]
    fn test_title_and_width() {
        let title = Cell::new(TextRun::new("Message").bold()).with_colspan(2);
        let table = TableLabel::new()
            .with_row(Row::new().with_cell(title))
            .with_row(Row::new().with_cell(Cell::text("id")).with_cell(Cell::text("PK")));

        assert_eq!(table.title().as_deref(), Some("Message"));
        assert_eq!(table.rows()[0].width(), 2);
        assert_eq!(table.rows()[1].width(), 2);
    }
}
