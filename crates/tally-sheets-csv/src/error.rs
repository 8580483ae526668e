//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A non-empty field that does not fit on the 26x100 grid
    #[error("Field at row {row}, column {column} is outside the grid")]
    OutOfGrid { row: usize, column: usize },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tally_sheets_core::Error),
}
