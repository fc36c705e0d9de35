use std::collections::HashMap;
use std::io::{Read, Seek};

use log::info;
use serde::{Deserialize, Serialize};

use super::filter::apply_threshold;
use super::model::{Cell, FilteredTable, MergedTable};
use super::range::ColumnRange;
use super::reader::read_block;
use super::reshape::unpivot;
use crate::error::Result;

/// Label-column headers of the two CP-Seeker blocks.
pub const INTENSITIES_LABEL: &str = "Intensities";
pub const SCORES_LABEL: &str = "Score";

// ---------------------------------------------------------------------------
// Pipeline parameters
// ---------------------------------------------------------------------------

/// Tunable inputs of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Minimum confidence score (inclusive) for an intensity to survive.
    pub threshold: u32,
    /// Column-letter span of the scores block.
    pub location_scores: String,
    /// Column-letter span of the intensities block.
    pub location_intensities: String,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            threshold: 80,
            location_scores: "A:AC".to_string(),
            location_intensities: "AD:BF".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Multi-file Merger – the pipeline front door
// ---------------------------------------------------------------------------

/// Run the whole reshape → filter → merge pipeline over a batch of files.
///
/// Each entry pairs a display name (used as the output column header) with
/// an open workbook reader. Files are processed independently and merged
/// column-wise with an outer alignment on composite key; rows missing in
/// every file's column are dropped at the very end. An empty batch yields an
/// empty table rather than an error. Any per-file failure aborts the whole
/// run — there is no skip-and-continue.
pub fn run_pipeline<RS: Read + Seek>(
    files: Vec<(String, RS)>,
    params: &PipelineParams,
) -> Result<MergedTable> {
    let scores_range = ColumnRange::parse(&params.location_scores)?;
    let intensities_range = ColumnRange::parse(&params.location_intensities)?;

    let mut names = Vec::with_capacity(files.len());
    let mut filtered = Vec::with_capacity(files.len());
    for (name, reader) in files {
        let table = process_file(reader, params.threshold, &scores_range, &intensities_range)?;
        info!(
            "{}: retained {} of {} cells at threshold {}",
            name,
            table.retained(),
            table.keys.len(),
            params.threshold
        );
        names.push(name);
        filtered.push(table);
    }

    let merged = merge_filtered(names, filtered);
    info!(
        "merged output: {} rows x {} columns",
        merged.num_rows(),
        merged.num_columns()
    );
    Ok(merged)
}

/// Read → unpivot → filter one workbook.
fn process_file<RS: Read + Seek>(
    mut reader: RS,
    threshold: u32,
    scores_range: &ColumnRange,
    intensities_range: &ColumnRange,
) -> Result<FilteredTable> {
    let scores_block = read_block(&mut reader, scores_range)?;
    reader.rewind()?;
    let intensities_block = read_block(&mut reader, intensities_range)?;

    let scores = unpivot(&scores_block, SCORES_LABEL)?;
    let intensities = unpivot(&intensities_block, INTENSITIES_LABEL)?;

    apply_threshold(&intensities, &scores, threshold)
}

/// Outer-merge per-file filtered tables column-wise on composite key.
///
/// The row index is the union of all files' keys in first-appearance order.
/// A key duplicated within one file overwrites that file's earlier value.
/// Rows left missing in every column are dropped here, and only here.
fn merge_filtered(names: Vec<String>, tables: Vec<FilteredTable>) -> MergedTable {
    let num_files = tables.len();

    let mut keys: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<Option<Cell>>> = Vec::new();

    for (file_idx, table) in tables.iter().enumerate() {
        for (key, value) in table.keys.iter().zip(&table.values) {
            let row_idx = *index.entry(key.clone()).or_insert_with(|| {
                keys.push(key.clone());
                rows.push(vec![None; num_files]);
                rows.len() - 1
            });
            rows[row_idx][file_idx] = value.clone();
        }
    }

    // dropna(how="all"): a row survives if any file contributed a value.
    let mut out_keys = Vec::with_capacity(keys.len());
    let mut out_rows = Vec::with_capacity(rows.len());
    for (key, row) in keys.into_iter().zip(rows) {
        if row.iter().any(Option::is_some) {
            out_keys.push(key);
            out_rows.push(row);
        }
    }

    MergedTable {
        keys: out_keys,
        columns: names,
        rows: out_rows,
    }
}
