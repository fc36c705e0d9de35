/// Data layer: table types and the reshape → filter → merge pipeline.
///
/// Architecture:
/// ```text
///  .xlsx workbooks (scores block | intensities block)
///        │
///        ▼
///   ┌──────────┐
///   │  reader   │  column range → per-sheet wide tables (SheetBlock)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape  │  row-major unpivot → LongTable keyed by formula⧺variant
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  score >= threshold mask → FilteredTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  merge    │  outer column-wise merge across files → MergedTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ serialize  │  UTF-8 CSV bytes
///   └───────────┘
/// ```

pub mod filter;
pub mod merge;
pub mod model;
pub mod range;
pub mod reader;
pub mod reshape;
pub mod serialize;
