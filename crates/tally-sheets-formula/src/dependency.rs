//! Dependency tracking for circular reference diagnostics
//!
//! The graph only reports cycles. It does not change how cells evaluate.

use std::collections::{BTreeSet, HashMap, HashSet};

use tally_sheets_core::{CellCoord, CellStore};

use crate::parser::{classify, CellContent};

/// Dependency graph for `SUM` formula cells
///
/// Tracks which cells each formula reads.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Cell → Cells it depends on (precedents)
    precedents: HashMap<CellCoord, HashSet<CellCoord>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from every `SUM` formula in a store
    pub fn from_store(store: &CellStore) -> Self {
        let mut graph = Self::new();
        for (coord, raw) in store.iter() {
            if let CellContent::Sum(range) = classify(raw) {
                for precedent in range.cells() {
                    graph.add_dependency(precedent, coord);
                }
            }
        }
        graph
    }

    /// Add a dependency: dependent depends on precedent
    pub fn add_dependency(&mut self, precedent: CellCoord, dependent: CellCoord) {
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Get cells that the given cell depends on
    pub fn precedents(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        self.precedents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Check whether a cell lies on a reference cycle (including reading itself)
    pub fn has_circular_reference(&self, cell: CellCoord) -> bool {
        let mut visited = HashSet::new();
        let mut stack: Vec<CellCoord> = self.precedents(cell).collect();

        while let Some(current) = stack.pop() {
            if current == cell {
                return true;
            }
            if visited.insert(current) {
                stack.extend(self.precedents(current));
            }
        }

        false
    }

    /// All formula cells that lie on a reference cycle, row-major
    pub fn circular_cells(&self) -> BTreeSet<CellCoord> {
        self.precedents
            .keys()
            .copied()
            .filter(|&cell| self.has_circular_reference(cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(key: &str) -> CellCoord {
        CellCoord::parse(key).unwrap()
    }

    #[test]
    fn test_add_dependency() {
        let mut graph = DependencyGraph::new();

        let a1 = coord("A1");
        let b1 = coord("B1");

        graph.add_dependency(a1, b1);

        assert!(graph.precedents(b1).any(|c| c == a1));
        assert_eq!(graph.precedents(a1).count(), 0);
    }

    #[test]
    fn test_from_store_covers_rectangle() {
        let store = CellStore::from_pairs([("C3", "=SUM(A1:B2)"), ("D1", "=AVG(A1:A2)")]).unwrap();
        let graph = DependencyGraph::from_store(&store);

        let mut precedents: Vec<_> = graph.precedents(coord("C3")).collect();
        precedents.sort();
        assert_eq!(
            precedents,
            vec![coord("A1"), coord("B1"), coord("A2"), coord("B2")]
        );
        assert_eq!(graph.precedents(coord("D1")).count(), 0);
    }

    #[test]
    fn test_circular_reference() {
        let mut graph = DependencyGraph::new();

        let a1 = coord("A1");
        let b1 = coord("B1");
        let c1 = coord("C1");

        // A1 -> B1 -> C1 -> A1 (circular)
        graph.add_dependency(a1, b1);
        graph.add_dependency(b1, c1);
        graph.add_dependency(c1, a1);

        assert!(graph.has_circular_reference(a1));
        assert!(graph.has_circular_reference(b1));
        assert!(graph.has_circular_reference(c1));
    }

    #[test]
    fn test_cells_feeding_a_cycle_are_not_on_it() {
        let store = CellStore::from_pairs([
            ("A1", "=SUM(A1:A1)"),
            ("B1", "=SUM(A1:A1)"),
            ("C1", "=SUM(D1:D1)"),
            ("D1", "=SUM(C1:C1)"),
            ("E1", "=SUM(F1:F2)"),
        ])
        .unwrap();
        let graph = DependencyGraph::from_store(&store);

        let circular: Vec<_> = graph.circular_cells().into_iter().map(|c| c.to_key()).collect();
        assert_eq!(circular, vec!["A1", "C1", "D1"]);
    }
}
