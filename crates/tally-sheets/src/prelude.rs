//! Prelude module - common imports for tally-sheets users
//!
//! ```rust
//! use tally_sheets::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellCoord,
    CellError,
    CellRange,
    CellStore,

    // Evaluation types
    EvaluationMap,
    PassStats,

    // Error types
    Error,
    Result,

    // Main types
    Spreadsheet,
    // Extension traits
    SpreadsheetExt,
};
