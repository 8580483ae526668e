//! Formula parser
//!
//! The formula language has exactly one shape: `=SUM(<cell>:<cell>)`, matched
//! case-insensitively anywhere in text that starts with `=`. The first match
//! wins and text around it is ignored. Anything else that starts with `=` is
//! an unrecognized formula.

use lazy_regex::regex_captures;
use tally_sheets_core::{CellCoord, CellRange};

use crate::error::{FormulaError, FormulaResult};

/// Classification of a cell's raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent<'a> {
    /// Plain text, displayed unchanged
    Literal(&'a str),
    /// `=SUM(...)` over a normalized range
    Sum(CellRange),
    /// Starts with `=` but is not a recognized formula (`#NAME?`)
    Unrecognized,
}

/// Check whether raw cell text is a formula
pub fn is_formula(raw: &str) -> bool {
    raw.starts_with('=')
}

/// Classify raw cell text
///
/// # Examples
/// ```
/// use tally_sheets_core::CellRange;
/// use tally_sheets_formula::{classify, CellContent};
///
/// assert_eq!(classify("Revenue"), CellContent::Literal("Revenue"));
/// assert_eq!(
///     classify("=sum(b2:a1)"),
///     CellContent::Sum(CellRange::parse("A1:B2").unwrap())
/// );
/// assert_eq!(classify("=AVG(A1:A2)"), CellContent::Unrecognized);
/// ```
pub fn classify(raw: &str) -> CellContent<'_> {
    if !is_formula(raw) {
        return CellContent::Literal(raw);
    }

    match parse_sum_formula(raw) {
        Ok(range) => CellContent::Sum(range),
        Err(e) => {
            tracing::trace!("unrecognized formula {raw:?}: {e}");
            CellContent::Unrecognized
        }
    }
}

/// Parse `=SUM(<cell>:<cell>)` into the range it sums
///
/// Column runs are letters and row runs are ASCII digits; leading zeros in a
/// row are accepted. An operand that matches the shape but lies outside the
/// 26x100 grid is an [`FormulaError::InvalidReference`].
pub fn parse_sum_formula(text: &str) -> FormulaResult<CellRange> {
    if !is_formula(text) {
        return Err(FormulaError::NotAFormula(text.to_string()));
    }

    let (_, start_col, start_row, end_col, end_row) =
        regex_captures!(r"=SUM\(([A-Z]+)([0-9]+):([A-Z]+)([0-9]+)\)"i, text)
            .ok_or_else(|| FormulaError::UnsupportedFormula(text.to_string()))?;

    let start = CellCoord::parse(&format!("{start_col}{start_row}"))?;
    let end = CellCoord::parse(&format!("{end_col}{end_row}"))?;

    Ok(CellRange::new(start, end))
}
