use log::debug;

use super::model::{FilteredTable, LongTable};
use crate::error::{Error, Result, ShapeMismatch};

// ---------------------------------------------------------------------------
// Aligner/Filter – mask intensities by their paired confidence score
// ---------------------------------------------------------------------------

/// Mask intensities whose aligned score fails the confidence cutoff.
///
/// The comparison is inclusive: a cell survives iff its score is numeric and
/// `score >= threshold`. Both tables must carry the same key sequence in the
/// same order; anything else is a [`Error::ShapeMismatch`]. The output keeps
/// the input key order untouched, with failed cells set to `None`. Rows that
/// end up missing everywhere are NOT dropped here — that happens only after
/// the multi-file merge, so a later file can still fill them.
pub fn apply_threshold(
    intensities: &LongTable,
    scores: &LongTable,
    threshold: u32,
) -> Result<FilteredTable> {
    if intensities.len() != scores.len() {
        return Err(Error::ShapeMismatch(ShapeMismatch::RowCount {
            intensities: intensities.len(),
            scores: scores.len(),
        }));
    }
    if let Some(index) = intensities
        .keys
        .iter()
        .zip(&scores.keys)
        .position(|(a, b)| a != b)
    {
        return Err(Error::ShapeMismatch(ShapeMismatch::KeySequence {
            index,
            intensities: intensities.keys[index].clone(),
            scores: scores.keys[index].clone(),
        }));
    }

    let cutoff = f64::from(threshold);
    let values: Vec<_> = intensities
        .values
        .iter()
        .zip(&scores.values)
        .map(|(cell, score)| match score.as_f64() {
            Some(s) if s >= cutoff && !cell.is_empty() => Some(cell.clone()),
            _ => None,
        })
        .collect();

    let table = FilteredTable {
        keys: intensities.keys.clone(),
        values,
    };
    debug!(
        "threshold {}: retained {} of {} cells",
        threshold,
        table.retained(),
        table.keys.len()
    );
    Ok(table)
}
