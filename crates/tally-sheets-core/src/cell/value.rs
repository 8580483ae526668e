//! Cell error tokens

use std::fmt;

/// Error tokens a cell can display in place of a value
///
/// These are ordinary display strings, never `Err` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    /// #REF! - Reference back into a cell that is still being resolved
    Ref,
    /// #NAME? - Formula that is not a recognized `SUM`
    Name,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tokens() {
        assert_eq!(CellError::Ref.as_str(), "#REF!");
        assert_eq!(CellError::Name.to_string(), "#NAME?");
    }
}
