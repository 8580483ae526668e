//! Formula evaluator
//!
//! Computes the display value of every populated cell. Each pass is a fresh
//! [`EvaluationPass`]: a memo of finished cells plus the set of cells still
//! being resolved on the current call stack. Nothing survives between passes.
//!
//! A reference back into a cell that is still in progress yields `#REF!` to
//! the caller only. That token coerces to `0` inside a `SUM`, so every cell on
//! a reference cycle ends up with a number, never `#REF!`.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};
use tally_sheets_core::{CellCoord, CellError, CellRangeIterator, CellStore};

use crate::coerce::{format_number, leading_number};
use crate::parser::{classify, CellContent};

/// Counters collected during one evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Number of cells whose value was computed (including absent cells
    /// referenced from a range)
    pub cells_evaluated: usize,
    /// Number of formula cells computed
    pub formulas: usize,
    /// Number of cells that resolved to `#NAME?`
    pub name_errors: usize,
    /// Number of times a reference re-entered a cell still in progress
    pub cycle_hits: usize,
}

/// Display values of every populated cell, produced by one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EvaluationMap {
    values: BTreeMap<CellCoord, String>,
}

impl EvaluationMap {
    /// Display value of a populated cell
    pub fn get(&self, coord: CellCoord) -> Option<&str> {
        self.values.get(&coord).map(String::as_str)
    }

    /// Display value by key (`"B4"`); `None` for unpopulated or invalid keys
    pub fn get_key(&self, key: &str) -> Option<&str> {
        CellCoord::parse(key).ok().and_then(|coord| self.get(coord))
    }

    /// Text to render for a cell, empty when unpopulated
    pub fn display(&self, coord: CellCoord) -> &str {
        self.get(coord).unwrap_or("")
    }

    /// Iterate over display values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &str)> + '_ {
        self.values.iter().map(|(coord, value)| (*coord, value.as_str()))
    }

    /// Number of cells in the map
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert into a map keyed by coordinate strings
    pub fn into_key_map(self) -> BTreeMap<String, String> {
        self.values
            .into_iter()
            .map(|(coord, value)| (coord.to_key(), value))
            .collect()
    }
}

/// A `SUM` cell whose operands are still being added up
struct SumFrame {
    coord: CellCoord,
    operands: CellRangeIterator,
    sum: f64,
}

enum Entry {
    /// Finished value for the caller
    Value(String),
    /// A `SUM` that must add up its operands first
    Pending(SumFrame),
}

/// State of one evaluation pass over a cell store
pub struct EvaluationPass<'a> {
    store: &'a CellStore,
    /// Finished display values
    memo: AHashMap<CellCoord, String>,
    /// Cells on the active resolution stack
    in_progress: AHashSet<CellCoord>,
    stats: PassStats,
}

impl<'a> EvaluationPass<'a> {
    /// Start a pass with an empty memo
    pub fn new(store: &'a CellStore) -> Self {
        Self {
            store,
            memo: AHashMap::with_capacity(store.len()),
            in_progress: AHashSet::new(),
            stats: PassStats::default(),
        }
    }

    /// Resolve the display value of a cell
    ///
    /// Memoized values are returned as-is. A cell that is already being
    /// resolved yields `#REF!` without being memoized; every other cell is
    /// computed once and memoized with whatever its own computation produced.
    ///
    /// Nested `SUM`s are walked with an explicit stack of frames, not the
    /// call stack.
    pub fn resolve(&mut self, coord: CellCoord) -> String {
        let mut current = match self.enter(coord) {
            Entry::Value(value) => return value,
            Entry::Pending(frame) => frame,
        };
        let mut parents: Vec<SumFrame> = Vec::new();

        loop {
            match current.operands.next() {
                Some(operand) => match self.enter(operand) {
                    Entry::Value(value) => current.sum += leading_number(&value),
                    Entry::Pending(frame) => parents.push(std::mem::replace(&mut current, frame)),
                },
                None => {
                    let value = self.complete(current.coord, format_number(current.sum));
                    match parents.pop() {
                        Some(parent) => {
                            current = parent;
                            current.sum += leading_number(&value);
                        }
                        None => return value,
                    }
                }
            }
        }
    }

    /// First visit of a cell: memo, then in-progress check, then classify
    fn enter(&mut self, coord: CellCoord) -> Entry {
        if let Some(value) = self.memo.get(&coord) {
            return Entry::Value(value.clone());
        }

        if !self.in_progress.insert(coord) {
            self.stats.cycle_hits += 1;
            tracing::debug!("circular reference into {coord}");
            return Entry::Value(CellError::Ref.as_str().to_string());
        }

        let store = self.store;
        match classify(store.raw(coord)) {
            CellContent::Literal(text) => Entry::Value(self.complete(coord, text.to_string())),
            CellContent::Unrecognized => {
                self.stats.formulas += 1;
                self.stats.name_errors += 1;
                Entry::Value(self.complete(coord, CellError::Name.as_str().to_string()))
            }
            CellContent::Sum(range) => {
                self.stats.formulas += 1;
                Entry::Pending(SumFrame {
                    coord,
                    operands: range.cells(),
                    sum: 0.0,
                })
            }
        }
    }

    /// Leave a cell: clear its in-progress mark, then memoize its value
    fn complete(&mut self, coord: CellCoord, result: String) -> String {
        self.in_progress.remove(&coord);
        self.stats.cells_evaluated += 1;
        tracing::trace!("{coord} = {result:?}");
        self.memo.insert(coord, result.clone());
        result
    }

    /// Counters collected so far
    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    /// End the pass, keeping the values of populated cells only
    pub fn finish(self) -> (EvaluationMap, PassStats) {
        let store = self.store;
        let values = self
            .memo
            .into_iter()
            .filter(|(coord, _)| store.contains(*coord))
            .collect();
        (EvaluationMap { values }, self.stats)
    }
}

/// Evaluate every populated cell of a store
///
/// # Examples
/// ```
/// use tally_sheets_core::CellStore;
/// use tally_sheets_formula::evaluate;
///
/// let store = CellStore::from_pairs([("A1", "=SUM(A1:A1)")]).unwrap();
/// assert_eq!(evaluate(&store).get_key("A1"), Some("0"));
/// ```
pub fn evaluate(store: &CellStore) -> EvaluationMap {
    evaluate_with_stats(store).0
}

/// Evaluate every populated cell of a store, returning pass counters too
///
/// Cells are visited in the store's row-major order.
pub fn evaluate_with_stats(store: &CellStore) -> (EvaluationMap, PassStats) {
    let mut pass = EvaluationPass::new(store);
    for coord in store.coords() {
        pass.resolve(coord);
    }

    let (values, stats) = pass.finish();
    tracing::debug!(
        cells = stats.cells_evaluated,
        formulas = stats.formulas,
        name_errors = stats.name_errors,
        cycle_hits = stats.cycle_hits,
        "evaluation pass complete"
    );
    (values, stats)
}
