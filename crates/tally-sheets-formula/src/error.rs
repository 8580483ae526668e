//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Reasons a cell's text is not a recognized formula
///
/// The evaluator never surfaces these as failures; they all display as
/// `#NAME?`. They exist so callers can explain *why* a formula was rejected.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Text does not start with `=`
    #[error("Not a formula: {0:?}")]
    NotAFormula(String),

    /// Starts with `=` but is not `=SUM(<cell>:<cell>)`
    #[error("Unsupported formula: {0}")]
    UnsupportedFormula(String),

    /// A `SUM` operand that does not name a cell on the grid
    #[error("Invalid reference: {0}")]
    InvalidReference(#[from] tally_sheets_core::Error),
}
