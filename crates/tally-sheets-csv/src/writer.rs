//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use tally_sheets_core::{CellCoord, CellStore};
use tally_sheets_formula::EvaluationMap;

/// CSV file writer
///
/// Writes the rectangle from `A1` to the bottom-right populated cell.
pub struct CsvWriter;

impl CsvWriter {
    /// Write the raw text of a store to a CSV file
    pub fn write_store_file<P: AsRef<Path>>(
        store: &CellStore,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_store(store, file, options)
    }

    /// Write the raw text of a store to a writer
    pub fn write_store<W: Write>(
        store: &CellStore,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let extent = store.used_range().map(|range| range.end);
        Self::write_grid(extent, |coord| store.raw(coord), writer, options)
    }

    /// Write evaluated display values to a writer
    pub fn write_display<W: Write>(
        values: &EvaluationMap,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let extent = values.iter().fold(None, |acc: Option<CellCoord>, (coord, _)| {
            Some(match acc {
                Some(max) => CellCoord::new(max.row.max(coord.row), max.col.max(coord.col)),
                None => coord,
            })
        });
        Self::write_grid(extent, |coord| values.display(coord), writer, options)
    }

    fn write_grid<'a, W, F>(
        extent: Option<CellCoord>,
        text_at: F,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()>
    where
        W: Write,
        F: Fn(CellCoord) -> &'a str,
    {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if let Some(end) = extent {
            if options.write_header {
                let header: Vec<String> = (0..=end.col)
                    .map(|col| CellCoord::column_letter(col).to_string())
                    .collect();
                csv_writer.write_record(&header)?;
            }

            for row in 0..=end.row {
                let record: Vec<&str> = (0..=end.col)
                    .map(|col| text_at(CellCoord::new(row, col)))
                    .collect();
                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
