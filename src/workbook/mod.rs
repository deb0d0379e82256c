//! In-memory cell grid shared by the gradebook and the quiz results.
//!
//! Coordinates are 1-based `(row, column)` pairs, the way spreadsheet users
//! address cells. The `xlsx` submodule converts to and from file storage.

pub mod xlsx;

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Last row an `.xlsx` worksheet can address.
pub const MAX_ROWS: u32 = 1_048_576;
/// Last column (`XFD`) an `.xlsx` worksheet can address.
pub const MAX_COLUMNS: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// A cell counts as a score only when it holds a finite number.
    pub fn as_score(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Self::Number(n) => Some(Cow::Owned(format_number(*n))),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), Cell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn cell(&self, row: u32, column: u32) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.cells.get(&(row, column)).unwrap_or(&EMPTY)
    }

    /// Writing an empty cell clears the slot so it no longer widens the bounds.
    pub fn set(&mut self, row: u32, column: u32, value: impl Into<Cell>) {
        debug_assert!(row >= 1 && column >= 1, "cell coordinates are 1-based");
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), value);
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    pub fn min_row(&self) -> u32 {
        self.cells.keys().map(|(row, _)| *row).min().unwrap_or(1)
    }

    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|(row, _)| *row).max().unwrap_or(1)
    }

    pub fn min_column(&self) -> u32 {
        self.cells.keys().map(|(_, col)| *col).min().unwrap_or(1)
    }

    pub fn max_column(&self) -> u32 {
        self.cells.keys().map(|(_, col)| *col).max().unwrap_or(1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Appends a sheet after the existing ones and hands it back for editing.
    pub fn push_sheet(&mut self, sheet: Sheet) -> &mut Sheet {
        let index = self.sheets.len();
        self.sheets.push(sheet);
        &mut self.sheets[index]
    }
}

/// Converts a 1-based column number to its letter form (1 = A, 27 = AA).
pub fn column_letter(column: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

pub fn cell_address(row: u32, column: u32) -> String {
    format!("{}{}", column_letter(column), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sheet_reports_unit_bounds() {
        let sheet = Sheet::new("empty");
        assert_eq!(sheet.min_row(), 1);
        assert_eq!(sheet.max_row(), 1);
        assert_eq!(sheet.min_column(), 1);
        assert_eq!(sheet.max_column(), 1);
        assert_eq!(sheet.cell(3, 3), &Cell::Empty);
    }

    #[test]
    fn bounds_track_non_empty_cells() {
        let mut sheet = Sheet::new("grid");
        sheet.set(2, 3, "x");
        sheet.set(9, 5, 4.0);
        sheet.set(12, 1, "");

        assert_eq!(sheet.min_row(), 2);
        assert_eq!(sheet.max_row(), 9);
        assert_eq!(sheet.min_column(), 3);
        assert_eq!(sheet.max_column(), 5);
    }

    #[test]
    fn writing_empty_clears_cell() {
        let mut sheet = Sheet::new("grid");
        sheet.set(4, 4, 2.5);
        sheet.set(4, 4, Cell::Empty);
        assert_eq!(sheet.cell(4, 4), &Cell::Empty);
        assert_eq!(sheet.cells().count(), 0);
    }

    #[test]
    fn only_finite_numbers_are_scores() {
        assert_eq!(Cell::Number(4.0).as_score(), Some(4.0));
        assert_eq!(Cell::Number(f64::NAN).as_score(), None);
        assert_eq!(Cell::Text("4".into()).as_score(), None);
        assert_eq!(Cell::Empty.as_score(), None);
    }

    #[test]
    fn numbers_render_as_text_without_trailing_fraction() {
        assert_eq!(Cell::Number(1042.0).as_text().as_deref(), Some("1042"));
        assert_eq!(Cell::Number(3.5).as_text().as_deref(), Some("3.5"));
        assert_eq!(Cell::Empty.as_text(), None);
    }

    #[test]
    fn column_letters_roll_over() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(5), "E");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(703), "AAA");
        assert_eq!(cell_address(9, 5), "E9");
    }
}
