use super::{Cell, Sheet, Workbook, MAX_COLUMNS, MAX_ROWS};
use crate::error::{GraderError, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;
use tracing::debug;

/// Loads every sheet of an `.xlsx` workbook. The file handle is released on return.
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let mut source: Xlsx<_> = open_workbook(path)?;
    let mut workbook = Workbook::new();

    for name in source.sheet_names() {
        let range = source.worksheet_range(&name)?;
        workbook.push_sheet(sheet_from_range(&name, &range));
    }

    if workbook.sheets().is_empty() {
        return Err(GraderError::EmptyWorkbook(path.display().to_string()));
    }
    debug!(path = %path.display(), sheets = workbook.sheets().len(), "loaded workbook");
    Ok(workbook)
}

/// Loads a single named sheet, failing when the workbook does not contain it.
pub fn load_sheet(path: &Path, name: &str) -> Result<Sheet> {
    let mut source: Xlsx<_> = open_workbook(path)?;
    if !source.sheet_names().iter().any(|sheet| sheet == name) {
        return Err(GraderError::SheetNotFound {
            workbook: path.display().to_string(),
            sheet: name.to_string(),
        });
    }
    let range = source.worksheet_range(name)?;
    Ok(sheet_from_range(name, &range))
}

fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    // calamine reports cells relative to the first used cell, 0-based.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    for (row, col, value) in range.used_cells() {
        let cell = convert_value(value);
        if cell.is_empty() {
            continue;
        }
        sheet.set(start_row + row as u32 + 1, start_col + col as u32 + 1, cell);
    }
    sheet
}

fn convert_value(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::DateTime(v) => Cell::Number(v.as_f64()),
        Data::String(v) => Cell::from(v.as_str()),
        Data::Bool(v) => Cell::Text(if *v { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(e.to_string()),
        Data::DateTimeIso(v) | Data::DurationIso(v) => Cell::from(v.as_str()),
    }
}

/// Writes all sheets, in order, to a new `.xlsx` file in a single save.
pub fn save_workbook(workbook: &Workbook, path: &Path) -> Result<()> {
    let mut output = rust_xlsxwriter::Workbook::new();

    for sheet in workbook.sheets() {
        let worksheet = output.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for ((row, col), cell) in sheet.cells() {
            let (row, col) = storage_position(sheet, row, col)?;
            match cell {
                Cell::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Cell::Empty => {}
            }
        }
    }

    output.save(path)?;
    debug!(path = %path.display(), "saved workbook");
    Ok(())
}

/// Converts a 1-based position to the 0-based one rust_xlsxwriter takes.
fn storage_position(sheet: &Sheet, row: u32, column: u32) -> Result<(u32, u16)> {
    let out_of_range = || GraderError::CellOutOfRange {
        sheet: sheet.name.clone(),
        row,
        column,
    };
    if row == 0 || row > MAX_ROWS || column == 0 || column > MAX_COLUMNS {
        return Err(out_of_range());
    }
    let column = u16::try_from(column - 1).map_err(|_| out_of_range())?;
    Ok((row - 1, column))
}
