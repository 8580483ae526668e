//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellCoord`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular range of cells (e.g., "A1:B10")
//! - [`CellError`] - Error tokens shown in place of a value

mod address;
mod value;

pub use address::{CellCoord, CellRange, CellRangeIterator};
pub use value::CellError;
