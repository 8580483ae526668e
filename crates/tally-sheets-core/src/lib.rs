//! # tally-sheets-core
//!
//! Core data structures for the tally-sheets formula engine.
//!
//! This crate provides the fundamental types used throughout tally-sheets:
//! - [`CellCoord`] and [`CellRange`] - Grid addressing and rectangular ranges
//! - [`CellError`] - The error tokens a cell can display
//! - [`CellStore`] - The raw text of every populated cell
//!
//! ## Example
//!
//! ```rust
//! use tally_sheets_core::{CellCoord, CellStore};
//!
//! let mut store = CellStore::new();
//! store.set(CellCoord::parse("A1").unwrap(), "Revenue");
//! store.set(CellCoord::parse("b1").unwrap(), "1000");
//!
//! assert_eq!(store.raw(CellCoord::parse("B1").unwrap()), "1000");
//! assert_eq!(store.raw(CellCoord::parse("C1").unwrap()), "");
//! ```

pub mod cell;
pub mod error;
pub mod store;

// Re-exports for convenience
pub use cell::{CellCoord, CellError, CellRange, CellRangeIterator};
pub use error::{Error, Result};
pub use store::CellStore;

/// Number of rows in the grid (rows 1-100)
pub const GRID_ROWS: u8 = 100;

/// Number of columns in the grid (columns A-Z)
pub const GRID_COLS: u8 = 26;
