use std::io::{Read, Seek};

use calamine::{Data, Range, Reader, Xlsx};
use log::debug;

use super::model::{Cell, RawSheetTable, SheetBlock};
use super::range::ColumnRange;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Column Reader – workbook → per-sheet wide tables
// ---------------------------------------------------------------------------

/// Read one block (scores or intensities) from an xlsx workbook.
///
/// Every sheet is returned in the workbook's native order, restricted to
/// `cols`, with the title row of the two-row header skipped so the second
/// header row supplies the column names. Pure read: the reader is fully
/// consumed here and never retained.
pub fn read_block<RS: Read + Seek>(reader: RS, cols: &ColumnRange) -> Result<SheetBlock> {
    let mut workbook = Xlsx::new(reader)?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook.worksheet_range(&name)?;
        let table = slice_sheet(&range, cols);
        debug!(
            "sheet '{}': {} data rows x {} columns in range",
            name,
            table.rows.len(),
            table.columns.len()
        );
        sheets.push((name, table));
    }

    Ok(SheetBlock { sheets })
}

/// Cut the requested columns out of a sheet, dropping the title row.
///
/// Sheet row 0 is the title row, row 1 carries the column names, rows 2+
/// are data. A sheet whose used range is empty yields an empty table.
fn slice_sheet(range: &Range<Data>, cols: &ColumnRange) -> RawSheetTable {
    let Some((end_row, _)) = range.end() else {
        return RawSheetTable {
            columns: Vec::new(),
            rows: Vec::new(),
        };
    };

    let col_span = cols.start..=cols.end;

    let columns: Vec<String> = col_span
        .clone()
        .map(|c| match range.get_value((1, c as u32)) {
            Some(Data::String(s)) => s.clone(),
            Some(other) => cell_from_xlsx(other).key_fragment(),
            None => String::new(),
        })
        .collect();

    let mut rows = Vec::new();
    for r in 2..=end_row {
        let row: Vec<Cell> = col_span
            .clone()
            .map(|c| {
                range
                    .get_value((r, c as u32))
                    .map(cell_from_xlsx)
                    .unwrap_or(Cell::Empty)
            })
            .collect();
        rows.push(row);
    }

    RawSheetTable { columns, rows }
}

/// Coerce a calamine cell into our best-fit dynamic type.
fn cell_from_xlsx(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        // Cell-level errors (#N/A, #DIV/0!, ...) read as missing values.
        Data::Error(_) => Cell::Empty,
    }
}
