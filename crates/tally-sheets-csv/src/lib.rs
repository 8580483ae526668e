//! # tally-sheets-csv
//!
//! CSV grid reader and writer for tally-sheets.
//!
//! Record *i*, field *j* of a CSV file maps to row *i*, column *j* of the grid.

mod reader;
mod writer;
mod options;
mod error;

pub use reader::CsvReader;
pub use writer::CsvWriter;
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use error::{CsvError, CsvResult};
