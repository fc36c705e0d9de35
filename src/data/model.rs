use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell as loaded from a workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Numeric view of the cell, used for score comparison.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Render the cell for composite-key construction.
    ///
    /// Excel hands integers back as floats; a formula label stored as `42`
    /// must concatenate as `"42"`, not `"42.0"`.
    pub fn key_fragment(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(v) if v.fract() == 0.0 => format!("{}", *v as i64),
            Cell::Number(v) => format!("{v}"),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) if v.fract() == 0.0 => write!(f, "{}", *v as i64),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawSheetTable / SheetBlock – one block of one workbook
// ---------------------------------------------------------------------------

/// One sheet's rows restricted to a requested column range, title row
/// already skipped. The first column is the block's label column
/// (`Intensities` or `Score`), the rest are chlorine-variant columns.
#[derive(Debug, Clone)]
pub struct RawSheetTable {
    /// Column names taken from the second header row.
    pub columns: Vec<String>,
    /// Data rows, each as wide as `columns`.
    pub rows: Vec<Vec<Cell>>,
}

impl RawSheetTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All sheets of one workbook for one block, in the workbook's native
/// sheet order.
#[derive(Debug, Clone)]
pub struct SheetBlock {
    pub sheets: Vec<(String, RawSheetTable)>,
}

// ---------------------------------------------------------------------------
// LongTable – the unpivoted (key, value) sequence
// ---------------------------------------------------------------------------

/// Single-column long table keyed by `formula ⧺ variant` composite keys.
/// Keys and values are parallel; order is the row-major traversal order of
/// the source sheets and is load-bearing for alignment.
#[derive(Debug, Clone, Default)]
pub struct LongTable {
    pub keys: Vec<String>,
    pub values: Vec<Cell>,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilteredTable – intensities surviving the score threshold
// ---------------------------------------------------------------------------

/// One file's intensities after threshold masking. `None` marks a cell whose
/// score failed the cutoff (or was itself missing). Key order matches the
/// LongTable it came from.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    pub keys: Vec<String>,
    pub values: Vec<Option<Cell>>,
}

impl FilteredTable {
    /// Number of surviving (non-missing) cells.
    pub fn retained(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// MergedTable – the final multi-file artifact
// ---------------------------------------------------------------------------

/// Column-wise merge of per-file filtered tables: one row per composite key
/// (union across files, first-appearance order), one column per input file.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    pub keys: Vec<String>,
    /// One name per input file, in input order.
    pub columns: Vec<String>,
    /// Row-major: `rows[i][j]` is key `i` in file `j`.
    pub rows: Vec<Vec<Option<Cell>>>,
}

impl MergedTable {
    pub fn num_rows(&self) -> usize {
        self.keys.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
