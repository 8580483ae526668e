//! Tests for evaluating whole cell stores

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tally_sheets::prelude::*;
use tally_sheets::{evaluation_map, EvaluationPass};

fn store(pairs: &[(&str, &str)]) -> CellStore {
    CellStore::from_pairs(pairs.iter().copied()).unwrap()
}

fn evaluated(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    evaluation_map(&store(pairs)).into_key_map()
}

/// Literal text displays unchanged
#[test]
fn test_literals_pass_through() {
    let values = evaluated(&[("A1", "Revenue"), ("B1", "1000"), ("C1", "  spaced  "), ("D1", "12abc")]);
    assert_eq!(values["A1"], "Revenue");
    assert_eq!(values["B1"], "1000");
    assert_eq!(values["C1"], "  spaced  ");
    assert_eq!(values["D1"], "12abc");
}

/// Formulas other than SUM display #NAME?
#[test]
fn test_unrecognized_formulas() {
    let values = evaluated(&[
        ("A1", "=AVG(A1:A2)"),
        ("A2", "=1+1"),
        ("A3", "=SUM(A1:AA2)"),
        ("A4", "="),
    ]);
    assert!(values.values().all(|v| v == "#NAME?"));
}

/// SUM covers the whole rectangle between its corners
#[test]
fn test_sum_rectangle() {
    let values = evaluated(&[("A1", "5"), ("B1", "5"), ("B2", "5"), ("A4", "=SUM(A1:B2)")]);
    assert_eq!(values["A4"], "15");
}

/// Reversed corners name the same rectangle
#[test]
fn test_sum_reversed_bounds() {
    let pairs = [("A1", "1"), ("B1", "2"), ("A2", "3"), ("B2", "4")];
    for formula in ["=SUM(A1:B2)", "=SUM(B2:A1)", "=SUM(A2:B1)", "=SUM(B1:A2)"] {
        let mut cells = pairs.to_vec();
        cells.push(("C5", formula));
        assert_eq!(evaluated(&cells)["C5"], "10", "{formula}");
    }
}

/// A three-column, three-row block, not just the cells along its diagonal
#[test]
fn test_sum_non_degenerate_block() {
    let mut cells: Vec<(String, String)> = Vec::new();
    for col in ['B', 'C', 'D'] {
        for row in 2..=4 {
            cells.push((format!("{col}{row}"), "1".to_string()));
        }
    }
    cells.push(("F1".to_string(), "=sum(d2:b4)".to_string()));

    let values = evaluation_map(&CellStore::from_pairs(cells).unwrap());
    assert_eq!(values.get_key("F1"), Some("9"));
}

/// Non-numeric operands count as zero
#[test]
fn test_non_numeric_operands() {
    let values = evaluated(&[("A1", "x"), ("B1", "3"), ("C1", "=SUM(A1:B1)")]);
    assert_eq!(values["C1"], "3");
}

/// Fractional sums keep their digits
#[test]
fn test_fractional_sum() {
    let values = evaluated(&[("A1", "0.1"), ("A2", "0.2"), ("A3", "=SUM(A1:A2)")]);
    assert_eq!(values["A3"], "0.30000000000000004");
}

/// A cell summing itself resolves to 0, not an error
#[test]
fn test_self_reference() {
    let values = evaluated(&[("A1", "=SUM(A1:A1)")]);
    assert_eq!(values["A1"], "0");
}

/// Both sides of a mutual cycle resolve to 0
#[test]
fn test_mutual_cycle() {
    let values = evaluated(&[("A1", "=SUM(B1:B1)"), ("B1", "=SUM(A1:A1)")]);
    assert_eq!(values["A1"], "0");
    assert_eq!(values["B1"], "0");
}

/// #REF! is never a final display value
#[test]
fn test_ref_token_never_displayed() {
    let values = evaluated(&[
        ("A1", "=SUM(A1:C3)"),
        ("B2", "=SUM(A1:A1)"),
        ("C3", "=SUM(B2:B2)"),
        ("A3", "2"),
    ]);
    assert!(values.values().all(|v| v != "#REF!"));
    assert_eq!(values["B2"], "0");
    assert_eq!(values["C3"], "0");
    assert_eq!(values["A1"], "2");
}

/// Absent cells count as zero and are not in the map
#[test]
fn test_absent_cells() {
    let values = evaluation_map(&store(&[("A3", "=SUM(A1:A2)")]));
    assert_eq!(values.get_key("A3"), Some("0"));
    assert_eq!(values.get_key("A1"), None);
    assert_eq!(values.display(CellCoord::parse("A1").unwrap()), "");
    assert_eq!(values.len(), 1);
}

/// A pass can be driven one cell at a time
#[test]
fn test_manual_pass() {
    let cells = store(&[("A1", "4"), ("A2", "=SUM(A1:A1)")]);
    let mut pass = EvaluationPass::new(&cells);
    assert_eq!(pass.resolve(CellCoord::parse("A2").unwrap()), "4");
    assert_eq!(pass.stats().formulas, 1);

    let (values, stats) = pass.finish();
    assert_eq!(values.len(), 2);
    assert_eq!(stats.cells_evaluated, 2);
}

fn arbitrary_store() -> impl Strategy<Value = CellStore> {
    let coord = (0u8..6, 0u8..6).prop_map(|(row, col)| CellCoord::new(row, col));
    let text = prop_oneof![
        "-?[0-9]{1,4}(\\.[0-9]{1,2})?",
        "[a-z ]{0,6}",
        "=(SUM|sum)\\([A-F][1-6]:[A-F][1-6]\\)",
        "=[A-Z]{1,4}\\([A-F][1-6]\\)",
    ];
    proptest::collection::vec((coord, text), 0..24)
        .prop_map(|cells| cells.into_iter().collect::<CellStore>())
}

proptest! {
    #[test]
    fn prop_evaluation_is_idempotent(cells in arbitrary_store()) {
        prop_assert_eq!(evaluation_map(&cells), evaluation_map(&cells));
    }

    #[test]
    fn prop_every_populated_cell_has_a_value(cells in arbitrary_store()) {
        let values = evaluation_map(&cells);
        prop_assert_eq!(values.len(), cells.len());
        for (coord, raw) in cells.iter() {
            let value = values.get(coord).unwrap();
            prop_assert_ne!(value, "#REF!");
            if !raw.starts_with('=') {
                prop_assert_eq!(value, raw);
            }
        }
    }
}
