//! Reshape, threshold-filter and merge CP-Seeker spreadsheet output.
//!
//! CP-Seeker writes one workbook per run, each sheet carrying a wide table
//! with two parallel column blocks: confidence scores and peak intensities,
//! one row per chemical formula and one column per chlorine-count variant.
//! This crate unpivots those blocks into a long table keyed by
//! `formula ⧺ variant`, masks intensities whose score fails a confidence
//! cutoff, merges any number of workbooks column-wise, and serializes the
//! result as CSV.
//!
//! The whole pipeline is a pure function of its inputs:
//!
//! ```no_run
//! use std::fs::File;
//! use cpmerge::{run_pipeline, to_csv_bytes, PipelineParams};
//!
//! # fn main() -> anyhow::Result<()> {
//! let file = File::open("CPSeeker_run.xlsx")?;
//! let merged = run_pipeline(
//!     vec![("run_a".to_string(), file)],
//!     &PipelineParams::default(),
//! )?;
//! let csv = to_csv_bytes(&merged)?;
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;

pub use data::merge::{run_pipeline, PipelineParams, INTENSITIES_LABEL, SCORES_LABEL};
pub use data::model::{Cell, FilteredTable, LongTable, MergedTable, RawSheetTable, SheetBlock};
pub use data::range::ColumnRange;
pub use data::serialize::to_csv_bytes;
pub use error::{Error, Result};
