use super::model::MergedTable;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Serializer – merged table → downloadable CSV bytes
// ---------------------------------------------------------------------------

/// Encode the merged table as UTF-8 CSV bytes.
///
/// The composite key leads each record under the header `formula`, followed
/// by one column per input file. Missing cells serialize as empty fields.
/// Deterministic and side-effect free.
pub fn to_csv_bytes(table: &MergedTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = Vec::with_capacity(table.num_columns() + 1);
    header.push("formula".to_string());
    header.extend(table.columns.iter().cloned());
    writer.write_record(&header)?;

    for (key, row) in table.keys.iter().zip(&table.rows) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(key.clone());
        record.extend(
            row.iter()
                .map(|cell| cell.as_ref().map(|c| c.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    #[test]
    fn header_keys_and_missing_cells() {
        let table = MergedTable {
            keys: vec!["C10H18Cl4".into(), "C10H18Cl5".into()],
            columns: vec!["run_a".into(), "run_b".into()],
            rows: vec![
                vec![Some(Cell::Number(1.0)), None],
                vec![None, Some(Cell::Number(2.5))],
            ],
        };

        let bytes = to_csv_bytes(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "formula,run_a,run_b\nC10H18Cl4,1,\nC10H18Cl5,,2.5\n");
    }

    #[test]
    fn empty_table_serializes_to_header_only() {
        let table = MergedTable::default();
        let text = String::from_utf8(to_csv_bytes(&table).unwrap()).unwrap();
        assert_eq!(text, "formula\n");
    }

    #[test]
    fn serialization_is_deterministic() {
        let table = MergedTable {
            keys: vec!["ACl4".into()],
            columns: vec!["f".into()],
            rows: vec![vec![Some(Cell::Number(3.0))]],
        };
        assert_eq!(to_csv_bytes(&table).unwrap(), to_csv_bytes(&table).unwrap());
    }
}
