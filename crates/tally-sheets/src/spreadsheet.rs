//! Spreadsheet panel model
//!
//! Holds the raw cell text, the cell selected in the formula bar, and the
//! display values of the latest evaluation pass. Every edit discards the
//! display values; the next read recomputes them from scratch.
//!
//! # Example
//!
//! ```rust
//! use tally_sheets::Spreadsheet;
//!
//! let mut sheet = Spreadsheet::demo();
//! assert_eq!(sheet.display_value("B4").unwrap(), "1800");
//!
//! sheet.set_raw_content("B2", "750").unwrap();
//! assert_eq!(sheet.display_value("B4").unwrap(), "1750");
//! ```

use std::cell::OnceCell;
use std::collections::BTreeSet;

use tally_sheets_core::{CellCoord, CellStore, Result, GRID_COLS, GRID_ROWS};
use tally_sheets_formula::{evaluate, DependencyGraph, EvaluationMap};

/// Evaluate a cell store snapshot
///
/// Pure: the same snapshot always produces the same map.
pub fn evaluation_map(store: &CellStore) -> EvaluationMap {
    evaluate(store)
}

/// The spreadsheet panel's state
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    cells: CellStore,
    selected: CellCoord,
    evaluated: OnceCell<EvaluationMap>,
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Spreadsheet {
    /// Create an empty sheet with `A1` selected
    pub fn new() -> Self {
        Self::from_store(CellStore::new())
    }

    /// Create a sheet over existing cells with `A1` selected
    pub fn from_store(cells: CellStore) -> Self {
        Self {
            cells,
            selected: CellCoord::new(0, 0),
            evaluated: OnceCell::new(),
        }
    }

    /// The sheet the panel opens with: revenue and expenses per quarter, and
    /// their sums in row 4
    pub fn demo() -> Self {
        let cells = [
            ("A1", "Revenue"),
            ("B1", "1000"),
            ("C1", "1200"),
            ("D1", "1500"),
            ("A2", "Expenses"),
            ("B2", "800"),
            ("C2", "900"),
            ("D2", "1100"),
            ("A4", "Profit"),
            ("B4", "=SUM(B1:B2)"),
            ("C4", "=SUM(C1:C2)"),
            ("D4", "=SUM(D1:D2)"),
        ]
        .into_iter()
        .filter_map(|(key, text)| Some((CellCoord::parse(key).ok()?, text)))
        .collect();

        Self::from_store(cells)
    }

    /// The raw cells
    pub fn store(&self) -> &CellStore {
        &self.cells
    }

    /// Take the raw cells out of the sheet
    pub fn into_store(self) -> CellStore {
        self.cells
    }

    /// Raw text of a cell, empty if unpopulated
    pub fn raw_content(&self, key: &str) -> Result<&str> {
        Ok(self.cells.raw(CellCoord::parse(key)?))
    }

    /// Replace the raw text of a cell
    ///
    /// This is the only way cells change. Empty text clears the cell.
    pub fn set_raw_content<S: Into<String>>(&mut self, key: &str, text: S) -> Result<()> {
        let coord = CellCoord::parse(key)?;
        self.set_cell(coord, text.into());
        Ok(())
    }

    fn set_cell(&mut self, coord: CellCoord, text: String) {
        tracing::debug!("edit {coord}: {text:?}");
        self.cells.set(coord, text);
        self.evaluated = OnceCell::new();
    }

    /// Display values of every populated cell
    ///
    /// Computed on the first read after an edit and reused until the next one.
    pub fn evaluation_map(&self) -> &EvaluationMap {
        self.evaluated.get_or_init(|| evaluation_map(&self.cells))
    }

    /// Text to render for a cell, empty if unpopulated
    pub fn display_value(&self, key: &str) -> Result<&str> {
        let coord = CellCoord::parse(key)?;
        Ok(self.evaluation_map().display(coord))
    }

    /// Select the cell shown in the formula bar
    pub fn select(&mut self, key: &str) -> Result<()> {
        self.selected = CellCoord::parse(key)?;
        Ok(())
    }

    /// The cell shown in the formula bar
    pub fn selected(&self) -> CellCoord {
        self.selected
    }

    /// Formula bar text: raw content of the selected cell
    pub fn formula_input(&self) -> &str {
        self.cells.raw(self.selected)
    }

    /// Replace the selected cell's raw text from the formula bar
    pub fn set_formula_input<S: Into<String>>(&mut self, text: S) {
        self.set_cell(self.selected, text.into());
    }

    /// Column header labels, `A` through `Z`
    pub fn column_headers() -> Vec<char> {
        (0..GRID_COLS).map(CellCoord::column_letter).collect()
    }

    /// Display text of the whole grid: 100 rows of 26 cells
    pub fn display_rows(&self) -> Vec<Vec<&str>> {
        let values = self.evaluation_map();
        (0..GRID_ROWS)
            .map(|row| {
                (0..GRID_COLS)
                    .map(|col| values.display(CellCoord::new(row, col)))
                    .collect()
            })
            .collect()
    }

    /// Formula cells that lie on a reference cycle
    pub fn circular_cells(&self) -> BTreeSet<CellCoord> {
        DependencyGraph::from_store(&self.cells).circular_cells()
    }
}
