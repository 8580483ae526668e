//! Drive the spreadsheet the way the panel does: select, type, re-render.

use tally_sheets::prelude::*;

fn main() -> Result<()> {
    let mut sheet = Spreadsheet::demo();

    sheet.select("E4")?;
    sheet.set_formula_input("=SUM(B4:D4)");
    println!("{} = {}", sheet.selected(), sheet.display_value("E4")?);

    sheet.select("B1")?;
    sheet.set_formula_input("=SUM(E4:E4)");
    println!("{} = {} (cycle through E4)", sheet.selected(), sheet.display_value("B1")?);

    for coord in sheet.circular_cells() {
        println!("circular: {coord}");
    }

    Ok(())
}
