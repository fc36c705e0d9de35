use log::debug;

use super::model::{LongTable, SheetBlock};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Reshaper – wide per-sheet tables → one long keyed table
// ---------------------------------------------------------------------------

/// Unpivot a block into a single long table of (composite key, value) pairs.
///
/// `label_column` names the block's first column (`"Intensities"` or
/// `"Score"`); its cell provides the formula half of each composite key.
/// Traversal is row-major: for each sheet in workbook order, for each data
/// row, every variant column is emitted in column order. The key is built
/// directly as `label ⧺ variant name`, so both blocks of a well-formed file
/// produce identical key sequences by construction.
pub fn unpivot(block: &SheetBlock, label_column: &str) -> Result<LongTable> {
    let mut long = LongTable::default();

    for (sheet_name, table) in &block.sheets {
        // A sheet with zero data rows contributes zero keyed rows.
        if table.rows.is_empty() {
            continue;
        }

        let found = table.columns.first().map(String::as_str).unwrap_or("");
        if found != label_column {
            return Err(Error::MissingLabelColumn {
                sheet: sheet_name.clone(),
                expected: label_column.to_string(),
                found: found.to_string(),
            });
        }

        let before = long.len();
        for row in &table.rows {
            let label = row.first().map(|c| c.key_fragment()).unwrap_or_default();
            for (name, cell) in table.columns.iter().zip(row.iter()) {
                // The label column must not re-enter as if it were data.
                if name == label_column {
                    continue;
                }
                long.keys.push(format!("{label}{name}"));
                long.values.push(cell.clone());
            }
        }
        debug!("sheet '{sheet_name}': unpivoted {} keyed rows", long.len() - before);
    }

    Ok(long)
}
