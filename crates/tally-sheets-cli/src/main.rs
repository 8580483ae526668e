//! Tally CLI - evaluate and edit SUM spreadsheets

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tally_sheets::prelude::*;
use tally_sheets::{evaluate_with_stats, CsvWriteOptions, CsvWriter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tally")]
#[command(
    author,
    version,
    about = "Evaluate and edit SUM spreadsheets stored as JSON or CSV"
)]
struct Cli {
    /// Log more (-v for debug, -vv for trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the evaluated grid of a sheet
    Eval {
        /// Input sheet file (json, csv)
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Print raw cell text instead of display values
        #[arg(long)]
        raw: bool,
    },

    /// Show the raw text and display value of one cell
    Get {
        /// Input sheet file (json, csv)
        input: PathBuf,

        /// Cell key, e.g. B4
        cell: String,
    },

    /// Replace the raw text of one cell and save the sheet
    Set {
        /// Input sheet file (json, csv)
        input: PathBuf,

        /// Cell key, e.g. B4
        cell: String,

        /// New raw text; empty clears the cell
        text: String,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show information about a sheet
    Info {
        /// Input sheet file (json, csv)
        input: PathBuf,
    },

    /// Evaluate the built-in demo sheet
    Demo {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned text grid with row and column headers
    Table,
    /// Comma-separated grid from A1
    Csv,
    /// Object of cell key to text
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval { input, format, raw } => {
            let sheet = open(&input)?;
            print_sheet(&sheet, format, raw)
        }
        Commands::Get { input, cell } => get_cell(&input, &cell),
        Commands::Set {
            input,
            cell,
            text,
            output,
        } => set_cell(&input, &cell, text, output.as_deref()),
        Commands::Info { input } => show_info(&input),
        Commands::Demo { format } => print_sheet(&Spreadsheet::demo(), format, false),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open(input: &Path) -> Result<Spreadsheet> {
    let sheet = Spreadsheet::open(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    tracing::debug!(
        path = %input.display(),
        cells = sheet.store().len(),
        "opened sheet"
    );
    Ok(sheet)
}

fn print_sheet(sheet: &Spreadsheet, format: OutputFormat, raw: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let written = match format {
        OutputFormat::Table => {
            let table = if raw {
                render_table(sheet.store().iter(), |coord| sheet.store().raw(coord))
            } else {
                let values = sheet.evaluation_map();
                render_table(values.iter(), |coord| values.display(coord))
            };
            out.write_all(table.as_bytes())
        }
        OutputFormat::Csv => {
            let options = CsvWriteOptions::default();
            let written = if raw {
                CsvWriter::write_store(sheet.store(), &mut out, &options)
            } else {
                CsvWriter::write_display(sheet.evaluation_map(), &mut out, &options)
            };
            written.context("Failed to write CSV")?;
            Ok(())
        }
        OutputFormat::Json => {
            let json = if raw {
                serde_json::to_string_pretty(sheet.store())
            } else {
                serde_json::to_string_pretty(sheet.evaluation_map())
            }
            .context("Failed to serialize sheet")?;
            writeln!(out, "{json}")
        }
    };
    written.context("Failed to write to stdout")
}

/// Render the rectangle from A1 to the last populated row and column
fn render_table<'a, I, F>(cells: I, text_at: F) -> String
where
    I: Iterator<Item = (CellCoord, &'a str)>,
    F: Fn(CellCoord) -> &'a str,
{
    let Some((max_row, max_col)) = cells.fold(None, |acc: Option<(u8, u8)>, (coord, _)| {
        Some(match acc {
            Some((row, col)) => (row.max(coord.row), col.max(coord.col)),
            None => (coord.row, coord.col),
        })
    }) else {
        return String::new();
    };

    let row_label_width = (max_row as usize + 1).to_string().len();
    let widths: Vec<usize> = (0..=max_col)
        .map(|col| {
            (0..=max_row)
                .map(|row| text_at(CellCoord::new(row, col)).chars().count())
                .max()
                .unwrap_or(0)
                .max(1)
        })
        .collect();

    let mut table = String::new();
    table.push_str(&" ".repeat(row_label_width));
    for (col, &width) in widths.iter().enumerate() {
        let letter = CellCoord::column_letter(col as u8);
        table.push_str(&format!(" | {letter:<width$}"));
    }
    table.push('\n');

    for row in 0..=max_row {
        table.push_str(&format!("{:>row_label_width$}", row as u32 + 1));
        for (col, &width) in widths.iter().enumerate() {
            let text = text_at(CellCoord::new(row, col as u8));
            table.push_str(&format!(" | {text:<width$}"));
        }
        table.push('\n');
    }

    table
}

fn get_cell(input: &Path, cell: &str) -> Result<()> {
    let sheet = open(input)?;

    let raw = sheet
        .raw_content(cell)
        .with_context(|| format!("Invalid cell '{cell}'"))?;
    let value = sheet.display_value(cell)?;

    println!("raw:   {raw}");
    println!("value: {value}");
    Ok(())
}

fn set_cell(input: &Path, cell: &str, text: String, output: Option<&Path>) -> Result<()> {
    let mut sheet = open(input)?;

    sheet
        .set_raw_content(cell, text)
        .with_context(|| format!("Invalid cell '{cell}'"))?;

    let target = output.unwrap_or(input);
    tracing::debug!(path = %target.display(), "saving sheet");
    sheet
        .save(target)
        .with_context(|| format!("Failed to write '{}'", target.display()))?;

    eprintln!(
        "{} = {} (saved to '{}')",
        cell.trim().to_uppercase(),
        sheet.display_value(cell)?,
        target.display()
    );
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let sheet = open(input)?;
    let (_, stats) = evaluate_with_stats(sheet.store());

    println!("File: {}", input.display());
    println!("Cells: {}", sheet.store().len());

    match sheet.store().used_range() {
        Some(range) => println!(
            "Used range: {} ({} rows x {} columns)",
            range,
            range.row_count(),
            range.col_count()
        ),
        None => println!("Used range: empty"),
    }

    println!("Formulas: {}", stats.formulas);
    println!("#NAME? cells: {}", stats.name_errors);
    println!("Cycle short-circuits: {}", stats.cycle_hits);

    let circular: Vec<String> = sheet.circular_cells().iter().map(|c| c.to_key()).collect();
    if circular.is_empty() {
        println!("Circular references: none");
    } else {
        println!("Circular references: {}", circular.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let sheet = Spreadsheet::demo();
        let values = sheet.evaluation_map();
        let table = render_table(values.iter(), |coord| values.display(coord));

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  | A        | B    | C    | D   ");
        assert_eq!(lines[1], "1 | Revenue  | 1000 | 1200 | 1500");
        assert_eq!(lines[3], "3 |          |      |      |     ");
        assert_eq!(lines[4], "4 | Profit   | 1800 | 2100 | 2600");
    }

    #[test]
    fn test_render_empty_table() {
        let store = CellStore::new();
        assert_eq!(render_table(store.iter(), |coord| store.raw(coord)), "");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["tally", "-vv", "eval", "sheet.json", "--format", "csv", "--raw"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Eval {
                format: OutputFormat::Csv,
                raw: true,
                ..
            }
        ));
    }
}
