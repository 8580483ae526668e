//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use tally_sheets_core::{CellCoord, CellStore, GRID_COLS, GRID_ROWS};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a cell store
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<CellStore> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a cell store
    ///
    /// Fields are stored as raw text, formulas included. Empty fields leave
    /// their cell unpopulated. Each line is a grid row: blank lines are empty
    /// rows, so cells below them keep their positions.
    pub fn read<R: Read>(mut reader: R, options: &CsvReadOptions) -> CsvResult<CellStore> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(options.flexible)
            .from_reader(input.as_slice());

        let mut store = CellStore::new();
        let mut record = csv::StringRecord::new();
        let mut row = 0;

        while csv_reader.read_record(&mut record)? {
            let start = record.position().map_or(0, |pos| pos.byte() as usize);
            row += blank_lines_at(&input, start);

            for (col, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                if row >= GRID_ROWS as usize || col >= GRID_COLS as usize {
                    return Err(CsvError::OutOfGrid {
                        row: row + 1,
                        column: col + 1,
                    });
                }

                store.set(CellCoord::new(row as u8, col as u8), field);
            }

            row += 1;
        }

        tracing::debug!("read {} populated cells from CSV", store.len());
        Ok(store)
    }
}

/// Count the blank lines the CSV parser skipped before a record
///
/// `start` is the byte offset where the previous record ended. A `\r\n` split
/// across that offset belongs to the previous record.
fn blank_lines_at(input: &[u8], start: usize) -> usize {
    let mut rest = input.get(start..).unwrap_or_default();
    if start > 0 && input.get(start - 1) == Some(&b'\r') {
        rest = rest.strip_prefix(b"\n").unwrap_or(rest);
    }

    let mut lines = 0;
    let mut bytes = rest.iter().peekable();
    while let Some(&byte) = bytes.next() {
        match byte {
            b'\n' => lines += 1,
            b'\r' => {
                lines += 1;
                bytes.next_if_eq(&&b'\n');
            }
            _ => break,
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(key: &str) -> CellCoord {
        CellCoord::parse(key).unwrap()
    }

    #[test]
    fn test_read_grid() {
        let data = "Revenue,1000,1200\nExpenses,800,900\n,,\nProfit,=SUM(B1:B2),\"=SUM(C1:C2)\"\n";
        let store = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(store.len(), 9);
        assert_eq!(store.raw(coord("A1")), "Revenue");
        assert_eq!(store.raw(coord("C2")), "900");
        assert_eq!(store.raw(coord("B4")), "=SUM(B1:B2)");
        assert_eq!(store.raw(coord("C4")), "=SUM(C1:C2)");
        assert!(!store.contains(coord("A3")));
    }

    #[test]
    fn test_read_skips_header_when_asked() {
        let options = CsvReadOptions {
            has_header: true,
            ..Default::default()
        };
        let store = CsvReader::read("A,B\n1,2\n".as_bytes(), &options).unwrap();
        assert_eq!(store.raw(coord("A1")), "1");
        assert_eq!(store.raw(coord("B1")), "2");
    }

    #[test]
    fn test_read_rejects_fields_past_the_grid() {
        let wide = vec!["x"; 27].join(",");
        let err = CsvReader::read(wide.as_bytes(), &CsvReadOptions::default()).unwrap_err();
        assert!(matches!(err, CsvError::OutOfGrid { row: 1, column: 27 }));

        // Trailing empty fields past the grid are fine
        let padded = format!("x{}", ",".repeat(30));
        assert!(CsvReader::read(padded.as_bytes(), &CsvReadOptions::default()).is_ok());
    }

    #[test]
    fn test_blank_lines_are_empty_rows() {
        let store = CsvReader::read("a\n\nb\n".as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(store.raw(coord("A1")), "a");
        assert_eq!(store.raw(coord("A3")), "b");
        assert!(!store.contains(coord("A2")));

        let store = CsvReader::read("\r\n1\r\n\r\n\r\n2\r\n".as_bytes(), &CsvReadOptions::default())
            .unwrap();
        assert_eq!(store.raw(coord("A2")), "1");
        assert_eq!(store.raw(coord("A5")), "2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_blank_line_keeps_sum_rows_aligned() {
        let data = "1\n2\n\n=SUM(A1:A2)\n";
        let store = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(store.raw(coord("A4")), "=SUM(A1:A2)");
        assert_eq!(tally_sheets_formula::evaluate(&store).get_key("A4"), Some("3"));
    }

    #[test]
    fn test_multiline_field_is_one_row() {
        let data = "\"two\nlines\",x\ny\n";
        let store = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(store.raw(coord("A1")), "two\nlines");
        assert_eq!(store.raw(coord("A2")), "y");
    }
}
