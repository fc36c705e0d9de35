use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// ColumnRange – Excel column-letter span, e.g. "A:AC" or "AD:BF"
// ---------------------------------------------------------------------------

/// An inclusive span of spreadsheet columns, resolved to 0-based indices.
///
/// A valid span covers the block's label column plus at least one variant
/// column, so it is always at least two columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    /// Parse a specifier such as `"A:AC"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidRange {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (first, second) = spec
            .split_once(':')
            .ok_or_else(|| invalid("expected '<start>:<end>'"))?;

        let start = column_index(first.trim()).ok_or_else(|| invalid("bad start column"))?;
        let end = column_index(second.trim()).ok_or_else(|| invalid("bad end column"))?;

        if start > end {
            return Err(invalid("start column is past end column"));
        }
        if end == start {
            return Err(invalid("range must cover a label column plus data columns"));
        }

        Ok(ColumnRange { start, end })
    }

    /// Number of columns in the span.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Convert column letters to a 0-based index (`A` → 0, `Z` → 25, `AA` → 26).
fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut idx: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as usize - 'A' as usize + 1;
        idx = idx.checked_mul(26)?.checked_add(digit)?;
    }
    Some(idx - 1)
}
