//! # tally-sheets-formula
//!
//! Formula parser and evaluator for tally-sheets.
//!
//! This crate provides:
//! - Classification of raw cell text (literal, `SUM` formula, unrecognized formula)
//! - Lenient numeric coercion of display values
//! - A memoized, cycle-safe evaluation pass over a [`CellStore`]
//! - Dependency diagnostics for reporting circular references
//!
//! ## Example
//!
//! ```rust
//! use tally_sheets_core::CellStore;
//! use tally_sheets_formula::evaluate;
//!
//! let store = CellStore::from_pairs([
//!     ("A1", "5"),
//!     ("B1", "5"),
//!     ("B2", "5"),
//!     ("A4", "=SUM(A1:B2)"),
//! ])
//! .unwrap();
//!
//! let values = evaluate(&store);
//! assert_eq!(values.get_key("A4"), Some("15"));
//! ```
//!
//! [`CellStore`]: tally_sheets_core::CellStore

pub mod coerce;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use coerce::{format_number, leading_number};
pub use dependency::DependencyGraph;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_with_stats, EvaluationMap, EvaluationPass, PassStats};
pub use parser::{classify, is_formula, parse_sum_formula, CellContent};
