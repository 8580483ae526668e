//! Cell coordinate and range types

use crate::error::{Error, Result};
use crate::{GRID_COLS, GRID_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell coordinate (e.g., "A1", "Z100")
///
/// Columns are the letters A-Z, rows are 1-100. Letters are accepted in either
/// case and always printed in uppercase.
///
/// Coordinates order row-major: `A1 < B1 < Z1 < A2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Row index (0-based internally, 1-based in display)
    pub row: u8,
    /// Column index (0-based, A=0, B=1, ..., Z=25)
    pub col: u8,
}

impl CellCoord {
    /// Create a new coordinate from 0-based indices
    ///
    /// Indices must lie on the 26x100 grid; debug builds panic otherwise.
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(
            row < GRID_ROWS && col < GRID_COLS,
            "coordinate ({row}, {col}) is outside the {GRID_COLS}x{GRID_ROWS} grid"
        );
        Self { row, col }
    }

    /// Parse a coordinate from its key form
    ///
    /// # Examples
    /// ```
    /// use tally_sheets_core::CellCoord;
    ///
    /// let coord = CellCoord::parse("A1").unwrap();
    /// assert_eq!(coord.row, 0);
    /// assert_eq!(coord.col, 0);
    ///
    /// let coord = CellCoord::parse("b4").unwrap();
    /// assert_eq!(coord.to_key(), "B4");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        // Parse column letters
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col_str = &s[..pos];
        if col_str.len() > 1 {
            return Err(Error::ColumnOutOfBounds(
                col_str.to_ascii_uppercase(),
                Self::column_letter(GRID_COLS - 1),
            ));
        }
        let col = Self::letter_to_column(char::from(bytes[0]))?;

        // Parse row number
        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        if row > GRID_ROWS as u32 {
            return Err(Error::RowOutOfBounds(row, GRID_ROWS));
        }

        // Rows are 1-based on the grid, 0-based internally
        Ok(Self::new((row - 1) as u8, col))
    }

    /// Convert a column index to its letter (0 = A, 25 = Z)
    pub fn column_letter(col: u8) -> char {
        debug_assert!(col < GRID_COLS, "column index {col} is outside A-Z");
        char::from(b'A' + col.min(GRID_COLS - 1))
    }

    /// Convert a column letter to its index (A = 0, Z = 25), case-insensitive
    pub fn letter_to_column(letter: char) -> Result<u8> {
        if !letter.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                letter
            )));
        }
        Ok(letter.to_ascii_uppercase() as u8 - b'A')
    }

    /// 1-based row number as shown on the grid
    pub fn row_number(&self) -> u32 {
        self.row as u32 + 1
    }

    /// Format as the canonical key (`"B4"`)
    pub fn to_key(&self) -> String {
        format!("{}{}", Self::column_letter(self.col), self.row_number())
    }

    /// Create a range from this coordinate to another
    pub fn to(&self, other: CellCoord) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_letter(self.col), self.row_number())
    }
}

impl FromStr for CellCoord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CellCoord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CellCoord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        CellCoord::parse(&key).map_err(serde::de::Error::custom)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
///
/// The corners are normalized on construction, so `B4:A1` and `A1:B4` are the
/// same range. A range always covers the full cross-product of its column and
/// row intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start coordinate (top-left)
    pub start: CellCoord,
    /// End coordinate (bottom-right)
    pub end: CellCoord,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellCoord::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellCoord::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a single-cell range
    pub fn single(coord: CellCoord) -> Self {
        Self {
            start: coord,
            end: coord,
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        match s.split_once(':') {
            Some((start, end)) => {
                if end.contains(':') {
                    return Err(Error::InvalidRange(s.to_string()));
                }
                let start = CellCoord::parse(start)?;
                let end = CellCoord::parse(end)?;
                Ok(Self::new(start, end))
            }
            // Single cell range
            None => Ok(Self::single(CellCoord::parse(s)?)),
        }
    }

    /// Check if a coordinate is within this range
    pub fn contains(&self, coord: &CellCoord) -> bool {
        coord.row >= self.start.row
            && coord.row <= self.end.row
            && coord.col >= self.start.col
            && coord.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> usize {
        (self.end.row - self.start.row) as usize + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> usize {
        (self.end.col - self.start.col) as usize + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    /// Whether the range covers exactly one cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over all coordinates in the range, column by column
    ///
    /// `A1:B2` yields `A1, A2, B1, B2`.
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        if self.is_single_cell() {
            self.start.to_key()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over the coordinates of a range, column by column
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u8,
    current_col: u8,
}

impl Iterator for CellRangeIterator {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_col > self.range.end.col {
            return None;
        }

        let coord = CellCoord::new(self.current_row, self.current_col);

        // Move down the column, then on to the next one
        self.current_row += 1;
        if self.current_row > self.range.end.row {
            self.current_row = self.range.start.row;
            self.current_col += 1;
        }

        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.current_col > self.range.end.col {
            0
        } else {
            let full_cols = (self.range.end.col - self.current_col) as usize;
            full_cols * self.range.row_count() + (self.range.end.row - self.current_row) as usize + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}
