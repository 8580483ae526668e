//! Raw cell content storage

use std::collections::BTreeMap;

use crate::cell::{CellCoord, CellRange};
use crate::error::Result;

/// Raw text of every populated cell
///
/// This is the only mutable state of a sheet. Unpopulated coordinates are
/// absent; setting a cell to the empty string removes it. Iteration is
/// row-major (`A1, B1, ..., Z1, A2, ...`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStore {
    cells: BTreeMap<CellCoord, String>,
}

impl CellStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(key, text)` pairs, parsing each key
    ///
    /// ```
    /// use tally_sheets_core::CellStore;
    ///
    /// let store = CellStore::from_pairs([("A1", "5"), ("b1", "=SUM(A1:A1)")]).unwrap();
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (key, text) in pairs {
            store.set(CellCoord::parse(key.as_ref())?, text);
        }
        Ok(store)
    }

    /// Raw content of a cell, if populated
    pub fn get(&self, coord: CellCoord) -> Option<&str> {
        self.cells.get(&coord).map(String::as_str)
    }

    /// Raw content of a cell, empty if absent
    pub fn raw(&self, coord: CellCoord) -> &str {
        self.get(coord).unwrap_or("")
    }

    /// Replace the raw content of a cell, returning the previous content
    ///
    /// An empty `text` clears the cell.
    pub fn set<S: Into<String>>(&mut self, coord: CellCoord, text: S) -> Option<String> {
        let text = text.into();
        if text.is_empty() {
            self.cells.remove(&coord)
        } else {
            self.cells.insert(coord, text)
        }
    }

    /// Clear a cell, returning its previous content
    pub fn remove(&mut self, coord: CellCoord) -> Option<String> {
        self.cells.remove(&coord)
    }

    /// Check if a cell is populated
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Number of populated cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell is populated
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over populated cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &str)> + '_ {
        self.cells.iter().map(|(coord, text)| (*coord, text.as_str()))
    }

    /// Iterate over populated coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.keys().copied()
    }

    /// Bounding rectangle of all populated cells
    pub fn used_range(&self) -> Option<CellRange> {
        let mut coords = self.cells.keys();
        let first = *coords.next()?;
        let (mut min_row, mut min_col, mut max_row, mut max_col) =
            (first.row, first.col, first.row, first.col);
        for coord in coords {
            min_row = min_row.min(coord.row);
            min_col = min_col.min(coord.col);
            max_row = max_row.max(coord.row);
            max_col = max_col.max(coord.col);
        }
        Some(CellRange::new(
            CellCoord::new(min_row, min_col),
            CellCoord::new(max_row, max_col),
        ))
    }

    /// Remove every cell
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl<S: Into<String>> FromIterator<(CellCoord, S)> for CellStore {
    fn from_iter<I: IntoIterator<Item = (CellCoord, S)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<S: Into<String>> Extend<(CellCoord, S)> for CellStore {
    fn extend<I: IntoIterator<Item = (CellCoord, S)>>(&mut self, iter: I) {
        for (coord, text) in iter {
            self.set(coord, text);
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CellStore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.cells.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CellStore {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let cells = BTreeMap::<CellCoord, String>::deserialize(deserializer)?;
        Ok(cells.into_iter().collect())
    }
}
