use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A body paragraph as yielded by a document reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Resolved style name, e.g. `Heading 1` or `Normal`.
    pub style: String,
    pub text: String,
}

impl Paragraph {
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
        }
    }
}

/// Text collected under one top-level heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub title: String,
    pub items: Vec<String>,
}

impl HeadingRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub title: String,
    pub names: String,
    pub roles: String,
    pub countries: String,
}

impl OutputRow {
    pub const HEADERS: [&'static str; 4] = ["University", "Names", "Roles", "Countries"];

    pub fn cells(&self) -> [&str; 4] {
        [
            self.title.as_str(),
            self.names.as_str(),
            self.roles.as_str(),
            self.countries.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformResult {
    pub rows: Vec<OutputRow>,
    /// Total number of items across all rows.
    pub item_count: usize,
}

/// Column sizing rules applied after the initial write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPolicy {
    pub max_width: usize,
    pub padding: usize,
    /// Width of a column that has never been sized.
    pub default_width: f64,
}

impl LayoutPolicy {
    pub const DEFAULT_MAX_WIDTH: usize = 50;
    pub const DEFAULT_PADDING: usize = 2;
    pub const DEFAULT_COLUMN_WIDTH: f64 = 13.0;

    pub fn candidate_width(&self, chars: usize) -> f64 {
        chars.saturating_add(self.padding).min(self.max_width) as f64
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            max_width: Self::DEFAULT_MAX_WIDTH,
            padding: Self::DEFAULT_PADDING,
            default_width: Self::DEFAULT_COLUMN_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub wrap_text: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrap_text: false,
        }
    }
}

/// In-memory worksheet. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    column_widths: BTreeMap<usize, f64>,
}

impl Sheet {
    pub const DEFAULT_NAME: &'static str = "Sheet1";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }

    /// Header row followed by one row per output row.
    pub fn from_rows(name: impl Into<String>, rows: &[OutputRow]) -> Self {
        let mut sheet = Self::new(name);
        sheet.push_row(OutputRow::HEADERS);
        for row in rows {
            sheet.push_row(row.cells());
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Cell::new).collect());
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    pub fn cell_text(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map(|cell| cell.text.as_str()).unwrap_or("")
    }

    /// Grows the grid when the cell does not exist yet.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        &mut cells[col]
    }

    /// Pads the grid with empty rows up to `rows`. Never truncates.
    pub fn ensure_row_count(&mut self, rows: usize) {
        if self.rows.len() < rows {
            self.rows.resize_with(rows, Vec::new);
        }
    }

    pub fn set_wrap_text(&mut self, row: usize, col: usize) {
        self.cell_mut(row, col).wrap_text = true;
    }

    pub fn column_width(&self, col: usize) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn set_column_width(&mut self, col: usize, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_widths(&self) -> &BTreeMap<usize, f64> {
        &self.column_widths
    }
}
