//! # tally-sheets
//!
//! A small spreadsheet engine: a 26x100 grid of raw cell text, a formula
//! language of exactly one shape (`=SUM(<cell>:<cell>)`), and a memoized
//! evaluator that survives circular references.
//!
//! ## Features
//!
//! - Literal text displays unchanged
//! - `=SUM(A1:B2)` sums the full rectangle, reversed corners included
//! - Any other formula displays `#NAME?`
//! - Reference cycles terminate; each participant sees its partner as `0`
//! - Sheets load from and save to `.json` (key → text) or `.csv` (grid)
//!
//! ## Example
//!
//! ```rust
//! use tally_sheets::prelude::*;
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_raw_content("A1", "5").unwrap();
//! sheet.set_raw_content("B1", "5").unwrap();
//! sheet.set_raw_content("B2", "5").unwrap();
//! sheet.set_raw_content("A4", "=SUM(A1:B2)").unwrap();
//!
//! assert_eq!(sheet.display_value("A4").unwrap(), "15");
//!
//! // Save to file
//! // sheet.save("budget.json").unwrap();
//! ```

pub mod prelude;
pub mod spreadsheet;

pub use spreadsheet::{evaluation_map, Spreadsheet};

// Re-export core types
pub use tally_sheets_core::{
    CellCoord, CellError, CellRange, CellStore, Error, Result, GRID_COLS, GRID_ROWS,
};

// Re-export formula types
pub use tally_sheets_formula::{
    classify, evaluate, evaluate_with_stats, format_number, leading_number, parse_sum_formula,
    CellContent, DependencyGraph, EvaluationMap, EvaluationPass, FormulaError, FormulaResult,
    PassStats,
};

// Re-export I/O types
pub use tally_sheets_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Extension trait for Spreadsheet to add file I/O
pub trait SpreadsheetExt: Sized {
    /// Open a sheet from a `.json` or `.csv` file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the sheet's raw cells to a `.json` or `.csv` file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl SpreadsheetExt for Spreadsheet {
    fn open<P: AsRef<Path>>(path: P) -> Result<Spreadsheet> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let store = match extension.as_deref() {
            Some("json") => {
                let file = File::open(path).map_err(|e| Error::other(e.to_string()))?;
                serde_json::from_reader::<_, CellStore>(BufReader::new(file))
                    .map_err(|e| Error::other(e.to_string()))?
            }
            Some("csv") => CsvReader::read_file(path, &CsvReadOptions::default())
                .map_err(|e| Error::other(e.to_string()))?,
            _ => {
                return Err(Error::other(format!(
                    "Unsupported file format: {}",
                    path.display()
                )))
            }
        };

        tracing::debug!("opened {} with {} cells", path.display(), store.len());
        Ok(Spreadsheet::from_store(store))
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("json") => {
                let file = File::create(path).map_err(|e| Error::other(e.to_string()))?;
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, self.store())
                    .map_err(|e| Error::other(e.to_string()))?;
                writer.flush().map_err(|e| Error::other(e.to_string()))
            }
            Some("csv") => {
                CsvWriter::write_store_file(self.store(), path, &CsvWriteOptions::default())
                    .map_err(|e| Error::other(e.to_string()))
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }
}
