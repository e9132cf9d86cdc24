use std::path::Path;

use anyhow::{bail, Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use super::loader::extension;
use super::table::{BatchTable, Cell};

/// Prefix of the suggested output file name.
pub const OUTPUT_PREFIX: &str = "predicted_";

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

/// Default save name for the results of `input`: the input name with the
/// output prefix. Spreadsheet inputs are always saved as `.xlsx`.
pub fn suggest_output_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    let ext = if extension(input) == "csv" { "csv" } else { "xlsx" };
    format!("{OUTPUT_PREFIX}{stem}.{ext}")
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write the table with a header row of column names. Dispatch by extension.
pub fn save_table(table: &BatchTable, path: &Path) -> Result<()> {
    match extension(path).as_str() {
        "xlsx" => save_xlsx(table, path),
        "csv" => save_csv(table, path),
        other => bail!("Cannot save results as .{other}; choose .xlsx or .csv"),
    }
}

fn save_xlsx(table: &BatchTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.column_names().iter().enumerate() {
        sheet
            .write_string(0, column_index(col)?, name)
            .context("writing header row")?;
    }
    for (r, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(r + 1).context("too many rows for a worksheet")?;
        for (c, cell) in row.iter().enumerate() {
            write_cell(sheet, row_num, column_index(c)?, cell)
                .with_context(|| format!("writing row {}", r + 1))?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("saving {}", path.display()))
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).context("too many columns for a worksheet")
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Empty => {}
        Cell::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Cell::Float(v) => {
            sheet.write_number(row, col, *v)?;
        }
        Cell::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Cell::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

fn save_csv(table: &BatchTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer
        .write_record(table.column_names())
        .context("writing CSV header")?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|c| c.to_string()))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
